use js_sys::Function;
use ::leaflet::{
    CircleMarker, CircleOptions, Evented, LatLng, LatLngBounds, Layer, LayerGroup, Map,
    MapOptions, Marker, MouseEvent, TileLayer, TileLayerOptions,
};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use cleansky_shared::{GeoBounds, GeoPoint, Station, ViewState};

use crate::config::{TILE_ATTRIBUTION, TILE_MAX_ZOOM, TILE_URL};
use crate::controller::MapSurface;

// Calls used with argument shapes the crate bindings don't take.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(extends = Layer)]
    type RawLayer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup_html(this: &RawLayer, content: &str);

    #[wasm_bindgen(extends = Map)]
    type RawMap;

    #[wasm_bindgen(method, js_name = panInsideBounds)]
    fn pan_inside_bounds_with(this: &RawMap, bounds: &LatLngBounds, options: &JsValue);

    #[wasm_bindgen(extends = Evented)]
    type RawEvented;

    #[wasm_bindgen(method, js_name = on)]
    fn on_event(this: &RawEvented, kind: &str, handler: &Function);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapSettings {
    center: [f64; 2],
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    max_bounds: [[f64; 2]; 2],
    max_bounds_viscosity: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileSettings {
    attribution: &'static str,
    max_zoom: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StationStyle {
    radius: f64,
    color: &'static str,
    fill_color: &'static str,
    fill_opacity: f64,
    /// Keeps a station click from also reaching the map's click handler.
    bubbling_mouse_events: bool,
}

#[derive(Serialize)]
struct PanOptions {
    animate: bool,
}

/// Serialize `value` into one of the crate's option objects.
fn options<T: Serialize, O: JsCast>(value: &T) -> Result<O, String> {
    serde_wasm_bindgen::to_value(value)
        .map(JsCast::unchecked_into)
        .map_err(|e| format!("options: {e}"))
}

fn lat_lng(point: GeoPoint) -> LatLng {
    LatLng::new(point.lat, point.lon)
}

/// Event handlers registered on the map. Dropping them detaches nothing on
/// the Leaflet side, so they must outlive the map.
pub struct MapBindings {
    _drag: Closure<dyn Fn()>,
    _stations: Vec<Closure<dyn Fn()>>,
}

/// Leaflet map locked to the view's bounds.
#[derive(Debug, Clone)]
pub struct LeafletSurface {
    map: Map,
    /// Holds the single current-location marker.
    location: LayerGroup,
}

impl LeafletSurface {
    /// Create the map inside `element_id` with OpenStreetMap tiles.
    pub fn create(element_id: &str, view: &ViewState) -> Result<Self, String> {
        let element = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(element_id))
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| format!("#{element_id} not found"))?;

        let settings: MapOptions = options(&MapSettings {
            center: [view.center.lat, view.center.lon],
            zoom: view.zoom,
            min_zoom: view.min_zoom,
            max_zoom: view.max_zoom,
            max_bounds: view.bounds.as_corners(),
            max_bounds_viscosity: 1.0,
        })?;
        let map = Map::new_with_element(&element, &settings);

        let tiles: TileLayerOptions = options(&TileSettings {
            attribution: TILE_ATTRIBUTION,
            max_zoom: TILE_MAX_ZOOM,
        })?;
        TileLayer::new_options(TILE_URL, &tiles).add_to(&map);

        let location = LayerGroup::new();
        location.add_to(&map);

        Ok(Self { map, location })
    }

    /// Wire clicks, drag clamping, and station markers to the given handlers.
    pub fn bind(
        &self,
        bounds: GeoBounds,
        stations: &[Station],
        on_click: impl Fn(GeoPoint) + 'static,
        on_station: impl Fn(&Station) + Clone + 'static,
    ) -> Result<MapBindings, String> {
        self.map.on_mouse_click(Box::new(move |event: MouseEvent| {
            let position = event.lat_lng();
            on_click(GeoPoint::new(position.lat(), position.lng()));
        }));

        let map = self.map.clone();
        let limits = LatLngBounds::new(&lat_lng(bounds.south_west), &lat_lng(bounds.north_east));
        let pan_options = serde_wasm_bindgen::to_value(&PanOptions { animate: false })
            .map_err(|e| format!("options: {e}"))?;
        let drag = Closure::<dyn Fn()>::new(move || {
            map.unchecked_ref::<RawMap>().pan_inside_bounds_with(&limits, &pan_options);
        });
        self.map.unchecked_ref::<RawEvented>().on_event("drag", drag.as_ref().unchecked_ref());

        let mut station_handlers = Vec::with_capacity(stations.len());
        for station in stations {
            let band = station.band();
            let style: CircleOptions = options(&StationStyle {
                radius: 10.0,
                color: band.color(),
                fill_color: band.color(),
                fill_opacity: 0.9,
                bubbling_mouse_events: false,
            })?;
            let circle = CircleMarker::new_with_options(&lat_lng(station.point()), &style);
            circle.add_to(&self.map);
            circle.unchecked_ref::<RawLayer>().bind_popup_html(&station.popup_html());

            let station = *station;
            let on_station = on_station.clone();
            let handler = Closure::<dyn Fn()>::new(move || on_station(&station));
            circle.unchecked_ref::<RawEvented>().on_event("click", handler.as_ref().unchecked_ref());
            station_handlers.push(handler);
        }

        Ok(MapBindings {
            _drag: drag,
            _stations: station_handlers,
        })
    }
}

impl MapSurface for LeafletSurface {
    type Marker = Marker;

    fn pan_to(&self, point: GeoPoint) {
        self.map.pan_to(&lat_lng(point));
    }

    fn add_marker(&self, point: GeoPoint, popup_html: &str) -> Marker {
        let marker = Marker::new(&lat_lng(point));
        marker.unchecked_ref::<RawLayer>().bind_popup_html(popup_html);
        self.location.add_layer(&marker);
        marker
    }

    fn remove_marker(&self, _marker: Marker) {
        // The group never holds more than the one marker being replaced.
        self.location.clear_layers();
    }

    fn invalidate_size(&self) {
        self.map.invalidate_size(true);
    }
}
