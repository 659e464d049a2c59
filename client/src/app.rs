use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use cleansky_shared::{SAMPLE_STATIONS, ViewState};

use crate::api::HttpAirApi;
use crate::config::MAP_ELEMENT_ID;
use crate::console;
use crate::controller::{MapController, Panel, Panels};
use crate::details::{DetailsModal, DetailsView};
use crate::map::{LeafletSurface, MapBindings};
use crate::runtime::BrowserLoop;
use crate::sidebar::{Sidebar, SidebarView};

/// Newtype wrappers so each signal gets its own Leptos context slot.
#[derive(Clone, Copy)]
pub(crate) struct SidebarContent(pub RwSignal<SidebarView>);
#[derive(Clone, Copy)]
pub(crate) struct DetailsContent(pub RwSignal<DetailsView>);
#[derive(Clone, Copy)]
pub(crate) struct SidebarOpen(pub RwSignal<bool>);
#[derive(Clone, Copy)]
pub(crate) struct DetailsOpen(pub RwSignal<bool>);

/// [`Panels`] backed by the reactive signals the components read.
#[derive(Clone, Copy)]
pub(crate) struct SignalPanels {
    sidebar: RwSignal<SidebarView>,
    details: RwSignal<DetailsView>,
    sidebar_open: RwSignal<bool>,
    details_open: RwSignal<bool>,
}

impl Panels for SignalPanels {
    fn show_sidebar(&self, view: SidebarView) {
        self.sidebar.set(view);
    }

    fn show_details(&self, view: DetailsView) {
        self.details.set(view);
    }

    fn set_open(&self, panel: Panel, open: bool) {
        match panel {
            Panel::Sidebar => self.sidebar_open.set(open),
            Panel::Details => self.details_open.set(open),
        }
    }
}

type BrowserController = MapController<LeafletSurface, HttpAirApi, SignalPanels, BrowserLoop>;

struct KeydownBinding {
    window: web_sys::Window,
    _handler: Closure<dyn Fn(web_sys::KeyboardEvent)>,
}

thread_local! {
    static CONTROLLER: RefCell<Option<Rc<BrowserController>>> = const { RefCell::new(None) };
    static MAP_BINDINGS: RefCell<Option<MapBindings>> = const { RefCell::new(None) };
    static KEYDOWN_BINDING: RefCell<Option<KeydownBinding>> = const { RefCell::new(None) };
}

fn with_controller(f: impl FnOnce(&Rc<BrowserController>)) {
    let controller = CONTROLLER.with(|slot| slot.borrow().clone());
    if let Some(controller) = controller {
        f(&controller);
    }
}

/// Open or close a panel from a button or shortcut.
pub(crate) fn toggle_panel(panel: Panel, open: bool) {
    with_controller(|controller| controller.toggle_panel(panel, open));
}

/// Create the Leaflet map and the controller that drives it.
fn mount_map(panels: SignalPanels) -> Result<(), String> {
    let view = ViewState::default();
    let surface = LeafletSurface::create(MAP_ELEMENT_ID, &view)?;
    let controller = MapController::new(
        surface.clone(),
        HttpAirApi,
        panels,
        BrowserLoop,
        view.bounds,
    );

    let click_target = Rc::downgrade(&controller);
    let station_target = Rc::downgrade(&controller);
    let bindings = surface.bind(
        view.bounds,
        &SAMPLE_STATIONS,
        move |point| {
            if let Some(controller) = click_target.upgrade() {
                controller.handle_click(point);
            }
        },
        move |station| {
            if let Some(controller) = station_target.upgrade() {
                controller.show_station(station);
            }
        },
    )?;

    MAP_BINDINGS.with(|slot| {
        *slot.borrow_mut() = Some(bindings);
    });
    CONTROLLER.with(|slot| {
        *slot.borrow_mut() = Some(controller);
    });
    Ok(())
}

/// Root component. Owns the panel signals and boots the map after mount.
#[component]
pub fn App() -> impl IntoView {
    let sidebar: RwSignal<SidebarView> = RwSignal::new(SidebarView::unavailable());
    let details: RwSignal<DetailsView> = RwSignal::new(DetailsView::unavailable());
    let sidebar_open: RwSignal<bool> = RwSignal::new(false);
    let details_open: RwSignal<bool> = RwSignal::new(false);

    provide_context(SidebarContent(sidebar));
    provide_context(DetailsContent(details));
    provide_context(SidebarOpen(sidebar_open));
    provide_context(DetailsOpen(details_open));

    let panels = SignalPanels {
        sidebar,
        details,
        sidebar_open,
        details_open,
    };

    // The #map element exists once this runs.
    Effect::new(move || {
        let already_mounted = CONTROLLER.with(|slot| slot.borrow().is_some());
        if already_mounted {
            return;
        }
        if let Err(e) = mount_map(panels) {
            console::warn(&format!("map unavailable: {e}"));
        }
    });

    // Escape closes the details modal first, then the sidebar.
    Effect::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };

        KEYDOWN_BINDING.with(|slot| {
            if let Some(old) = slot.borrow_mut().take() {
                let _ = old.window.remove_event_listener_with_callback(
                    "keydown",
                    old._handler.as_ref().unchecked_ref(),
                );
            }
        });

        let handler =
            Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                if e.key() != "Escape" {
                    return;
                }
                if details_open.get_untracked() {
                    toggle_panel(Panel::Details, false);
                } else if sidebar_open.get_untracked() {
                    toggle_panel(Panel::Sidebar, false);
                }
            });

        if window
            .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            KEYDOWN_BINDING.with(|slot| {
                *slot.borrow_mut() = Some(KeydownBinding {
                    window: window.clone(),
                    _handler: handler,
                });
            });
        }
    });

    view! {
        <div class="app-shell" class:sidebar-open=move || sidebar_open.get()>
            <header class="app-header">
                <span class="brand">"CleanSky"</span>
                <span class="tagline">"Click anywhere in Canada for air quality and weather"</span>
                <button
                    class="header-button"
                    title=move || if sidebar_open.get() { "Hide panel" } else { "Show panel" }
                    on:click=move |_| toggle_panel(Panel::Sidebar, !sidebar_open.get_untracked())
                >
                    {move || if sidebar_open.get() { "\u{00AB}" } else { "\u{00BB}" }}
                </button>
            </header>
            <main class="map-area">
                <Sidebar />
                <div id=MAP_ELEMENT_ID class="map" />
            </main>
        </div>
        <DetailsModal />
    }
}
