use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use cleansky_shared::{AirQualityResult, AirResponse, Clamped, GeoBounds, GeoPoint, Station};

use crate::config::{CLICK_DEBOUNCE_MS, SIDEBAR_TRANSITION_MS};
use crate::console;
use crate::details::DetailsView;
use crate::runtime::EventLoop;
use crate::sidebar::SidebarView;

/// What the controller needs from the mapping library.
pub trait MapSurface {
    type Marker;

    fn pan_to(&self, point: GeoPoint);
    fn add_marker(&self, point: GeoPoint, popup_html: &str) -> Self::Marker;
    fn remove_marker(&self, marker: Self::Marker);
    /// Recompute the map canvas size after its container changed.
    fn invalidate_size(&self);
}

/// Air-quality backend and reverse geocoder.
pub trait AirApi {
    fn fetch_air(&self, point: GeoPoint) -> impl Future<Output = Result<AirResponse, String>>;
    fn reverse_place(&self, point: GeoPoint)
    -> impl Future<Output = Result<Option<String>, String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Sidebar,
    Details,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    pub sidebar_open: bool,
    pub details_open: bool,
}

/// Where rendered content ends up.
pub trait Panels {
    fn show_sidebar(&self, view: SidebarView);
    fn show_details(&self, view: DetailsView);
    fn set_open(&self, panel: Panel, open: bool);
}

/// Owns the map marker, panel state, and the pending debounced load.
pub struct MapController<M: MapSurface, A, P, E: EventLoop> {
    map: M,
    api: A,
    panels: P,
    event_loop: E,
    bounds: GeoBounds,
    marker: RefCell<Option<M::Marker>>,
    pending_load: RefCell<Option<E::Timer>>,
    pending_resize: RefCell<Option<E::Timer>>,
    /// Set from a station click until the event loop turns over, so the same
    /// click reaching the map underneath is not treated as a location pick.
    station_click_active: Cell<bool>,
    station_click_release: RefCell<Option<E::Timer>>,
    /// Sequence of the most recently dispatched render; older completions are dropped.
    latest_seq: Cell<u64>,
    panel_state: Cell<PanelState>,
}

impl<M, A, P, E> MapController<M, A, P, E>
where
    M: MapSurface + 'static,
    A: AirApi + 'static,
    P: Panels + 'static,
    E: EventLoop + 'static,
{
    pub fn new(map: M, api: A, panels: P, event_loop: E, bounds: GeoBounds) -> Rc<Self> {
        Rc::new(Self {
            map,
            api,
            panels,
            event_loop,
            bounds,
            marker: RefCell::new(None),
            pending_load: RefCell::new(None),
            pending_resize: RefCell::new(None),
            station_click_active: Cell::new(false),
            station_click_release: RefCell::new(None),
            latest_seq: Cell::new(0),
            panel_state: Cell::new(PanelState::default()),
        })
    }

    pub fn panel_state(&self) -> PanelState {
        self.panel_state.get()
    }

    /// Clamp the click into the bounds and schedule a debounced load. A click
    /// inside the debounce window replaces the pending one.
    pub fn handle_click(self: &Rc<Self>, point: GeoPoint) {
        if !point.is_finite() {
            console::warn("ignoring map click with non-finite coordinates");
            return;
        }
        if self.station_click_active.get() {
            console::debug("map click belongs to a station marker");
            return;
        }
        let Clamped { point, adjusted } = self.bounds.clamp(point);
        if adjusted {
            self.map.pan_to(point);
        }

        let weak = Rc::downgrade(self);
        let timer = self.event_loop.delay(
            CLICK_DEBOUNCE_MS,
            Box::new(move || {
                let Some(this) = weak.upgrade() else {
                    return;
                };
                let load = Rc::clone(&this).load_location(point);
                this.event_loop.spawn(Box::pin(load));
            }),
        );
        // Dropping the previous timer cancels it.
        let previous = self.pending_load.borrow_mut().replace(timer);
        drop(previous);
    }

    fn next_seq(&self) -> u64 {
        let seq = self.latest_seq.get().wrapping_add(1);
        self.latest_seq.set(seq);
        seq
    }

    fn is_stale(&self, seq: u64) -> bool {
        self.latest_seq.get() != seq
    }

    /// Fetch and render one location. Failures render the unavailable state.
    pub async fn load_location(self: Rc<Self>, point: GeoPoint) {
        let seq = self.next_seq();

        let response = match self.api.fetch_air(point).await {
            Ok(response) => response,
            Err(e) => {
                console::warn(&format!(
                    "air quality request for {} failed: {e}",
                    point.label()
                ));
                AirResponse::unavailable()
            }
        };
        if self.is_stale(seq) {
            console::debug(&format!("dropping stale air response #{seq}"));
            return;
        }

        let title = self.resolve_title(&response.result, point).await;
        if self.is_stale(seq) {
            console::debug(&format!("dropping stale air response #{seq}"));
            return;
        }

        self.render_sidebar(&response.result, point, title.as_deref());
        self.render_modal(&response, point);
    }

    /// Place name for the sidebar title: payload city, then reverse geocoding,
    /// then the coordinate string. Unavailable results get no title.
    async fn resolve_title(&self, result: &AirQualityResult, point: GeoPoint) -> Option<String> {
        if !result.is_ok() {
            return None;
        }
        if let Some(city) = result.city() {
            return Some(city.to_string());
        }
        match self.api.reverse_place(point).await {
            Ok(Some(name)) => Some(name),
            Ok(None) => Some(point.label()),
            Err(e) => {
                console::warn(&format!("reverse geocoding for {} failed: {e}", point.label()));
                Some(point.label())
            }
        }
    }

    pub fn render_sidebar(
        self: &Rc<Self>,
        result: &AirQualityResult,
        point: GeoPoint,
        title: Option<&str>,
    ) {
        let view = SidebarView::from_result(result, title, &now_label());
        self.replace_marker(point, &view.popup_html());
        self.panels.show_sidebar(view);
        self.toggle_panel(Panel::Sidebar, true);
    }

    pub fn render_modal(&self, response: &AirResponse, point: GeoPoint) {
        self.panels
            .show_details(DetailsView::from_response(response, point));
    }

    /// Sample station click: render its static reading and supersede any
    /// pending or in-flight location load.
    pub fn show_station(self: &Rc<Self>, station: &Station) {
        drop(self.pending_load.borrow_mut().take());
        self.next_seq();

        self.station_click_active.set(true);
        let weak = Rc::downgrade(self);
        let release = self.event_loop.delay(
            0,
            Box::new(move || {
                if let Some(this) = weak.upgrade() {
                    this.station_click_active.set(false);
                }
            }),
        );
        drop(self.station_click_release.borrow_mut().replace(release));

        let view = SidebarView::from_station(station, &now_label());
        self.replace_marker(station.point(), &view.popup_html());
        self.panels.show_sidebar(view);
        self.panels.show_details(DetailsView::from_station(station));
        self.toggle_panel(Panel::Sidebar, true);
    }

    fn replace_marker(&self, point: GeoPoint, popup_html: &str) {
        if let Some(old) = self.marker.borrow_mut().take() {
            self.map.remove_marker(old);
        }
        let marker = self.map.add_marker(point, popup_html);
        *self.marker.borrow_mut() = Some(marker);
    }

    /// Open or close a panel. Sidebar changes resize the map once the slide
    /// transition has finished.
    pub fn toggle_panel(self: &Rc<Self>, panel: Panel, open: bool) {
        let mut state = self.panel_state.get();
        match panel {
            Panel::Sidebar => state.sidebar_open = open,
            Panel::Details => state.details_open = open,
        }
        self.panel_state.set(state);
        self.panels.set_open(panel, open);

        if panel == Panel::Sidebar {
            let weak = Rc::downgrade(self);
            let timer = self.event_loop.delay(
                SIDEBAR_TRANSITION_MS,
                Box::new(move || {
                    if let Some(this) = weak.upgrade() {
                        this.map.invalidate_size();
                    }
                }),
            );
            let previous = self.pending_resize.borrow_mut().replace(timer);
            drop(previous);
        }
    }
}

fn now_label() -> String {
    format!("Updated: {}", chrono::Local::now().format("%H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use cleansky_shared::format::PLACEHOLDER;
    use cleansky_shared::{CANADA_BOUNDS, SAMPLE_STATIONS};
    use futures::channel::oneshot;
    use futures::executor::{LocalPool, LocalSpawner};
    use futures::task::LocalSpawnExt;
    use serde_json::json;

    use crate::runtime::LocalTask;

    struct ScheduledTask {
        due: u32,
        cancelled: Rc<Cell<bool>>,
        task: Box<dyn FnOnce()>,
    }

    /// Timer handle that flags its task as cancelled on drop.
    struct ManualTimer(Rc<Cell<bool>>);

    impl Drop for ManualTimer {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    /// Deterministic event loop driven by `advance`.
    struct ManualLoop {
        now: Cell<u32>,
        scheduled: RefCell<Vec<ScheduledTask>>,
        pool: RefCell<LocalPool>,
        spawner: LocalSpawner,
    }

    impl ManualLoop {
        fn new() -> Rc<Self> {
            let pool = LocalPool::new();
            let spawner = pool.spawner();
            Rc::new(Self {
                now: Cell::new(0),
                scheduled: RefCell::new(Vec::new()),
                pool: RefCell::new(pool),
                spawner,
            })
        }

        fn advance(&self, millis: u32) {
            let target = self.now.get() + millis;
            loop {
                let next = {
                    let mut scheduled = self.scheduled.borrow_mut();
                    scheduled.retain(|t| !t.cancelled.get());
                    let due = scheduled
                        .iter()
                        .enumerate()
                        .filter(|(_, t)| t.due <= target)
                        .min_by_key(|(_, t)| t.due)
                        .map(|(i, _)| i);
                    due.map(|i| scheduled.remove(i))
                };
                let Some(next) = next else {
                    break;
                };
                self.now.set(next.due);
                next.cancelled.set(true);
                (next.task)();
                self.run_pending();
            }
            self.now.set(target);
            self.run_pending();
        }

        fn run_pending(&self) {
            self.pool.borrow_mut().run_until_stalled();
        }
    }

    impl EventLoop for Rc<ManualLoop> {
        type Timer = ManualTimer;

        fn delay(&self, millis: u32, task: Box<dyn FnOnce()>) -> ManualTimer {
            let cancelled = Rc::new(Cell::new(false));
            self.scheduled.borrow_mut().push(ScheduledTask {
                due: self.now.get() + millis,
                cancelled: Rc::clone(&cancelled),
                task,
            });
            ManualTimer(cancelled)
        }

        fn spawn(&self, task: LocalTask) {
            self.spawner
                .spawn_local(task)
                .expect("local pool accepts tasks");
        }
    }

    #[derive(Default)]
    struct FakeMap {
        panned_to: RefCell<Vec<GeoPoint>>,
        markers: RefCell<Vec<(u32, GeoPoint, String)>>,
        removed: RefCell<Vec<u32>>,
        next_id: Cell<u32>,
        resizes: Cell<u32>,
    }

    impl MapSurface for Rc<FakeMap> {
        type Marker = u32;

        fn pan_to(&self, point: GeoPoint) {
            self.panned_to.borrow_mut().push(point);
        }

        fn add_marker(&self, point: GeoPoint, popup_html: &str) -> u32 {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.markers
                .borrow_mut()
                .push((id, point, popup_html.to_string()));
            id
        }

        fn remove_marker(&self, marker: u32) {
            self.removed.borrow_mut().push(marker);
        }

        fn invalidate_size(&self) {
            self.resizes.set(self.resizes.get() + 1);
        }
    }

    type AirReply = Result<AirResponse, String>;

    struct FakeApi {
        air_calls: RefCell<Vec<GeoPoint>>,
        reverse_calls: RefCell<Vec<GeoPoint>>,
        scripted_air: RefCell<VecDeque<oneshot::Receiver<AirReply>>>,
        default_air: AirReply,
        reverse: Result<Option<String>, String>,
    }

    impl FakeApi {
        fn answering(default_air: AirReply) -> Rc<Self> {
            Rc::new(Self {
                air_calls: RefCell::new(Vec::new()),
                reverse_calls: RefCell::new(Vec::new()),
                scripted_air: RefCell::new(VecDeque::new()),
                default_air,
                reverse: Ok(None),
            })
        }

        fn with_reverse(default_air: AirReply, reverse: Result<Option<String>, String>) -> Rc<Self> {
            Rc::new(Self {
                reverse,
                ..Rc::into_inner(Self::answering(default_air)).expect("fresh fake")
            })
        }

        /// The next air request waits until the returned sender is used.
        fn hold_next_air(&self) -> oneshot::Sender<AirReply> {
            let (tx, rx) = oneshot::channel();
            self.scripted_air.borrow_mut().push_back(rx);
            tx
        }
    }

    impl AirApi for Rc<FakeApi> {
        fn fetch_air(&self, point: GeoPoint) -> impl Future<Output = AirReply> {
            self.air_calls.borrow_mut().push(point);
            let scripted = self.scripted_air.borrow_mut().pop_front();
            let default = self.default_air.clone();
            async move {
                match scripted {
                    Some(rx) => rx.await.unwrap_or_else(|_| Err("sender dropped".into())),
                    None => default,
                }
            }
        }

        fn reverse_place(
            &self,
            point: GeoPoint,
        ) -> impl Future<Output = Result<Option<String>, String>> {
            self.reverse_calls.borrow_mut().push(point);
            let reply = self.reverse.clone();
            async move { reply }
        }
    }

    #[derive(Default)]
    struct RecordingPanels {
        sidebar: RefCell<Option<SidebarView>>,
        details: RefCell<Option<DetailsView>>,
        sidebar_renders: Cell<u32>,
        open: RefCell<Vec<(Panel, bool)>>,
    }

    impl Panels for Rc<RecordingPanels> {
        fn show_sidebar(&self, view: SidebarView) {
            self.sidebar_renders.set(self.sidebar_renders.get() + 1);
            *self.sidebar.borrow_mut() = Some(view);
        }

        fn show_details(&self, view: DetailsView) {
            *self.details.borrow_mut() = Some(view);
        }

        fn set_open(&self, panel: Panel, open: bool) {
            self.open.borrow_mut().push((panel, open));
        }
    }

    type TestController = MapController<Rc<FakeMap>, Rc<FakeApi>, Rc<RecordingPanels>, Rc<ManualLoop>>;

    struct Harness {
        controller: Rc<TestController>,
        map: Rc<FakeMap>,
        api: Rc<FakeApi>,
        panels: Rc<RecordingPanels>,
        event_loop: Rc<ManualLoop>,
    }

    fn harness(api: Rc<FakeApi>) -> Harness {
        let map = Rc::new(FakeMap::default());
        let panels = Rc::new(RecordingPanels::default());
        let event_loop = ManualLoop::new();
        let controller = MapController::new(
            Rc::clone(&map),
            Rc::clone(&api),
            Rc::clone(&panels),
            Rc::clone(&event_loop),
            CANADA_BOUNDS,
        );
        Harness {
            controller,
            map,
            api,
            panels,
            event_loop,
        }
    }

    fn ok_response(raw: serde_json::Value) -> AirReply {
        Ok(AirResponse::from_json(raw).expect("test payload decodes"))
    }

    fn windsor() -> AirReply {
        ok_response(json!({
            "ok": true,
            "aqi": 1,
            "aqi_label": "Good",
            "source": "OpenWeather",
            "weather": { "city": "Windsor", "temp": 20.0 }
        }))
    }

    #[test]
    fn click_outside_bounds_is_clamped_and_panned() {
        let h = harness(FakeApi::answering(windsor()));
        h.controller.handle_click(GeoPoint::new(30.0, -160.0));
        h.event_loop.advance(200);

        let expected = GeoPoint::new(41.7, -141.0);
        assert_eq!(*h.map.panned_to.borrow(), vec![expected]);
        assert_eq!(*h.api.air_calls.borrow(), vec![expected]);
    }

    #[test]
    fn click_inside_bounds_does_not_pan() {
        let h = harness(FakeApi::answering(windsor()));
        h.controller.handle_click(GeoPoint::new(42.3, -83.0));
        h.event_loop.advance(200);

        assert!(h.map.panned_to.borrow().is_empty());
        assert_eq!(*h.api.air_calls.borrow(), vec![GeoPoint::new(42.3, -83.0)]);
    }

    #[test]
    fn rapid_clicks_load_only_the_last_point() {
        let h = harness(FakeApi::answering(windsor()));
        h.controller.handle_click(GeoPoint::new(45.0, -75.0));
        h.event_loop.advance(50);
        h.controller.handle_click(GeoPoint::new(46.0, -76.0));
        h.event_loop.advance(50);
        h.controller.handle_click(GeoPoint::new(47.0, -77.0));

        h.event_loop.advance(199);
        assert!(h.api.air_calls.borrow().is_empty());

        h.event_loop.advance(1);
        assert_eq!(*h.api.air_calls.borrow(), vec![GeoPoint::new(47.0, -77.0)]);

        h.event_loop.advance(1_000);
        assert_eq!(h.api.air_calls.borrow().len(), 1);
    }

    #[test]
    fn clicks_after_quiet_period_each_load() {
        let h = harness(FakeApi::answering(windsor()));
        h.controller.handle_click(GeoPoint::new(45.0, -75.0));
        h.event_loop.advance(250);
        h.controller.handle_click(GeoPoint::new(46.0, -76.0));
        h.event_loop.advance(250);
        assert_eq!(h.api.air_calls.borrow().len(), 2);
    }

    #[test]
    fn successful_load_renders_sidebar_modal_and_marker() {
        let h = harness(FakeApi::answering(windsor()));
        h.controller.handle_click(GeoPoint::new(42.3, -83.0));
        h.event_loop.advance(200);

        let sidebar = h.panels.sidebar.borrow().clone().expect("sidebar rendered");
        assert_eq!(sidebar.title, "Windsor");
        assert_eq!(sidebar.aqi_label, "Good");
        assert_eq!(sidebar.temperature, "20°C");

        let details = h.panels.details.borrow().clone().expect("details rendered");
        assert_eq!(details.temperature, "20°C");

        let markers = h.map.markers.borrow();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].1, GeoPoint::new(42.3, -83.0));
        assert_eq!(markers[0].2, "Windsor<br/>AQI: 1 (Good)");
        assert!(h.controller.panel_state().sidebar_open);
        assert!(h.panels.open.borrow().contains(&(Panel::Sidebar, true)));
    }

    #[test]
    fn present_city_skips_reverse_geocoding() {
        let h = harness(FakeApi::answering(windsor()));
        futures::executor::block_on(Rc::clone(&h.controller).load_location(GeoPoint::new(42.3, -83.0)));

        assert!(h.api.reverse_calls.borrow().is_empty());
        assert_eq!(h.panels.sidebar.borrow().as_ref().map(|s| s.title.clone()), Some("Windsor".into()));
    }

    #[test]
    fn missing_city_uses_reverse_geocoded_town() {
        let api = FakeApi::with_reverse(
            ok_response(json!({ "ok": true, "aqi": 2, "aqi_label": "Fair", "weather": {} })),
            Ok(Some("Kingsville".to_string())),
        );
        let h = harness(api);
        futures::executor::block_on(Rc::clone(&h.controller).load_location(GeoPoint::new(42.04, -82.74)));

        assert_eq!(*h.api.reverse_calls.borrow(), vec![GeoPoint::new(42.04, -82.74)]);
        assert_eq!(h.panels.sidebar.borrow().as_ref().map(|s| s.title.clone()), Some("Kingsville".into()));
    }

    #[test]
    fn failed_reverse_geocoding_falls_back_to_coordinates() {
        let api = FakeApi::with_reverse(
            ok_response(json!({ "ok": true })),
            Err("fetch error: offline".to_string()),
        );
        let h = harness(api);
        futures::executor::block_on(Rc::clone(&h.controller).load_location(GeoPoint::new(42.04, -82.74)));

        assert_eq!(
            h.panels.sidebar.borrow().as_ref().map(|s| s.title.clone()),
            Some("42.0400, -82.7400".into())
        );
    }

    #[test]
    fn not_ok_response_renders_placeholders_everywhere() {
        let h = harness(FakeApi::answering(ok_response(json!({
            "ok": false,
            "aqi": 4,
            "weather": { "city": "Windsor", "temp": 12.0 }
        }))));
        futures::executor::block_on(Rc::clone(&h.controller).load_location(GeoPoint::new(42.3, -83.0)));

        assert_eq!(*h.panels.sidebar.borrow(), Some(SidebarView::unavailable()));
        assert_eq!(*h.panels.details.borrow(), Some(DetailsView::unavailable()));
        assert!(h.api.reverse_calls.borrow().is_empty());
        let sidebar = SidebarView::unavailable();
        for field in [
            &sidebar.title,
            &sidebar.aqi_value,
            &sidebar.aqi_label,
            &sidebar.temperature,
            &sidebar.wind,
            &sidebar.pm2_5,
            &sidebar.pm10,
            &sidebar.source,
            &sidebar.updated,
        ] {
            assert_eq!(field, PLACEHOLDER);
        }
    }

    #[test]
    fn transport_failure_renders_unavailable_instead_of_failing() {
        let h = harness(FakeApi::answering(Err("fetch error: offline".to_string())));
        futures::executor::block_on(Rc::clone(&h.controller).load_location(GeoPoint::new(42.3, -83.0)));

        assert_eq!(*h.panels.sidebar.borrow(), Some(SidebarView::unavailable()));
        assert_eq!(*h.panels.details.borrow(), Some(DetailsView::unavailable()));
        assert_eq!(h.map.markers.borrow().len(), 1);
        assert!(h.controller.panel_state().sidebar_open);
    }

    #[test]
    fn each_result_replaces_the_previous_marker() {
        let h = harness(FakeApi::answering(windsor()));
        futures::executor::block_on(Rc::clone(&h.controller).load_location(GeoPoint::new(42.3, -83.0)));
        futures::executor::block_on(Rc::clone(&h.controller).load_location(GeoPoint::new(43.0, -81.0)));

        assert_eq!(h.map.markers.borrow().len(), 2);
        assert_eq!(*h.map.removed.borrow(), vec![0]);
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_result() {
        let h = harness(FakeApi::answering(windsor()));
        let slow = h.api.hold_next_air();

        h.controller.handle_click(GeoPoint::new(45.0, -75.0));
        h.event_loop.advance(200);
        assert_eq!(h.api.air_calls.borrow().len(), 1);
        assert!(h.panels.sidebar.borrow().is_none());

        h.controller.handle_click(GeoPoint::new(42.3, -83.0));
        h.event_loop.advance(200);
        assert_eq!(h.panels.sidebar_renders.get(), 1);

        slow.send(ok_response(json!({ "ok": true, "weather": { "city": "Ottawa" } })))
            .expect("slow request still waiting");
        h.event_loop.run_pending();

        assert_eq!(h.panels.sidebar_renders.get(), 1);
        assert_eq!(
            h.panels.sidebar.borrow().as_ref().map(|s| s.title.clone()),
            Some("Windsor".into())
        );
    }

    #[test]
    fn sidebar_toggle_resizes_map_after_transition() {
        let h = harness(FakeApi::answering(windsor()));
        h.controller.toggle_panel(Panel::Sidebar, true);
        h.event_loop.advance(299);
        assert_eq!(h.map.resizes.get(), 0);
        h.event_loop.advance(1);
        assert_eq!(h.map.resizes.get(), 1);

        h.controller.toggle_panel(Panel::Sidebar, false);
        h.event_loop.advance(100);
        h.controller.toggle_panel(Panel::Sidebar, true);
        h.event_loop.advance(300);
        assert_eq!(h.map.resizes.get(), 2);
    }

    #[test]
    fn details_toggle_tracks_state_without_resizing() {
        let h = harness(FakeApi::answering(windsor()));
        h.controller.toggle_panel(Panel::Details, true);
        h.event_loop.advance(1_000);

        assert_eq!(
            h.controller.panel_state(),
            PanelState {
                sidebar_open: false,
                details_open: true
            }
        );
        assert_eq!(h.map.resizes.get(), 0);
        assert_eq!(*h.panels.open.borrow(), vec![(Panel::Details, true)]);
    }

    #[test]
    fn station_click_cancels_pending_load() {
        let h = harness(FakeApi::answering(windsor()));
        h.controller.handle_click(GeoPoint::new(45.0, -75.0));
        h.controller.show_station(&SAMPLE_STATIONS[0]);
        h.event_loop.advance(1_000);

        assert!(h.api.air_calls.borrow().is_empty());
        let sidebar = h.panels.sidebar.borrow().clone().expect("station rendered");
        assert_eq!(sidebar.title, "Windsor Downtown");
        assert_eq!(h.map.markers.borrow()[0].1, SAMPLE_STATIONS[0].point());
    }

    #[test]
    fn station_click_reaching_the_map_keeps_station_view() {
        let h = harness(FakeApi::answering(windsor()));
        let station = &SAMPLE_STATIONS[0];
        h.controller.show_station(station);
        h.controller.handle_click(station.point());
        h.event_loop.advance(1_000);

        assert!(h.api.air_calls.borrow().is_empty());
        assert_eq!(
            h.panels.sidebar.borrow().as_ref().map(|s| s.title.clone()),
            Some("Windsor Downtown".into())
        );
        assert_eq!(h.map.markers.borrow().len(), 1);
    }

    #[test]
    fn map_clicks_after_a_station_click_load_again() {
        let h = harness(FakeApi::answering(windsor()));
        h.controller.show_station(&SAMPLE_STATIONS[1]);
        h.event_loop.advance(10);

        h.controller.handle_click(GeoPoint::new(42.3, -83.0));
        h.event_loop.advance(200);

        assert_eq!(*h.api.air_calls.borrow(), vec![GeoPoint::new(42.3, -83.0)]);
        assert_eq!(
            h.panels.sidebar.borrow().as_ref().map(|s| s.title.clone()),
            Some("Windsor".into())
        );
    }

    #[test]
    fn mistyped_field_still_renders_city_and_aqi() {
        let h = harness(FakeApi::answering(ok_response(json!({
            "ok": true,
            "aqi": 2,
            "aqi_label": "Fair",
            "weather": { "city": "Windsor", "temp": 20.0, "station_id": "6077243" }
        }))));
        futures::executor::block_on(Rc::clone(&h.controller).load_location(GeoPoint::new(42.3, -83.0)));

        let sidebar = h.panels.sidebar.borrow().clone().expect("sidebar rendered");
        assert_eq!(sidebar.title, "Windsor");
        assert_eq!(sidebar.aqi_value, "2");
        assert_eq!(sidebar.temperature, "20°C");
        let details = h.panels.details.borrow().clone().expect("details rendered");
        assert_eq!(details.station_id, PLACEHOLDER);
        assert_eq!(details.temperature, "20°C");
    }

    #[test]
    fn non_finite_click_is_ignored() {
        let h = harness(FakeApi::answering(windsor()));
        h.controller.handle_click(GeoPoint::new(f64::NAN, -75.0));
        h.event_loop.advance(1_000);
        assert!(h.api.air_calls.borrow().is_empty());
    }
}
