/// Badge color used when the category is unknown or missing.
pub const NEUTRAL_COLOR: &str = "#cbd5e1";

/// Air-quality category as labelled by the backend (five-step index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiCategory {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AqiCategory {
    pub const ALL: [Self; 5] = [
        Self::Good,
        Self::Fair,
        Self::Moderate,
        Self::Poor,
        Self::VeryPoor,
    ];

    /// Match a backend label. Case and surrounding whitespace are ignored.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "good" => Some(Self::Good),
            "fair" => Some(Self::Fair),
            "moderate" => Some(Self::Moderate),
            "poor" => Some(Self::Poor),
            "very poor" => Some(Self::VeryPoor),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "#86efac",
            Self::Fair => "#bef264",
            Self::Moderate => "#fde68a",
            Self::Poor => "#fdba74",
            Self::VeryPoor => "#f87171",
        }
    }

    pub fn advisory(self) -> &'static str {
        match self {
            Self::Good => "Air quality is good. Enjoy outdoor activities.",
            Self::Fair => "Air quality is acceptable for most people.",
            Self::Moderate => "Sensitive people should limit prolonged outdoor exertion.",
            Self::Poor => "Everyone should reduce prolonged or heavy outdoor exertion.",
            Self::VeryPoor => "Avoid outdoor activity if possible.",
        }
    }
}

/// Badge color and advisory for a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub color: &'static str,
    pub advisory: &'static str,
}

/// Unknown and missing labels map to the neutral color and an empty advisory.
pub fn category_for(label: Option<&str>) -> CategoryStyle {
    match label.and_then(AqiCategory::from_label) {
        Some(category) => CategoryStyle {
            color: category.color(),
            advisory: category.advisory(),
        },
        None => CategoryStyle {
            color: NEUTRAL_COLOR,
            advisory: "",
        },
    }
}

/// US EPA AQI band, used for the sample station markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsAqiBand {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
}

impl UsAqiBand {
    pub fn from_value(aqi: f64) -> Self {
        if aqi <= 50.0 {
            Self::Good
        } else if aqi <= 100.0 {
            Self::Moderate
        } else if aqi <= 150.0 {
            Self::UnhealthySensitive
        } else if aqi <= 200.0 {
            Self::Unhealthy
        } else {
            Self::VeryUnhealthy
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthySensitive => "Unhealthy (SG)",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "#86efac",
            Self::Moderate => "#fde68a",
            Self::UnhealthySensitive => "#fdba74",
            Self::Unhealthy => "#f87171",
            Self::VeryUnhealthy => "#c4b5fd",
        }
    }

    pub fn advisory(self) -> &'static str {
        match self {
            Self::Good => "Air quality is good — enjoy outdoor activities.",
            Self::Moderate => "Moderate — sensitive people should limit prolonged exertion.",
            Self::UnhealthySensitive => {
                "Sensitive groups: reduce prolonged or heavy exertion outdoors."
            }
            Self::Unhealthy => "Unhealthy — everyone should reduce prolonged outdoor exertion.",
            Self::VeryUnhealthy => "Very Unhealthy — avoid outdoor activity if possible.",
        }
    }
}
