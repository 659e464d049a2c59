use std::future::Future;
use std::pin::Pin;

pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Timers and task spawning for the controller. Dropping a timer handle
/// cancels it if it has not fired yet.
pub trait EventLoop {
    type Timer;

    fn delay(&self, millis: u32, task: Box<dyn FnOnce()>) -> Self::Timer;
    fn spawn(&self, task: LocalTask);
}

/// Browser event loop: `setTimeout` via gloo and `spawn_local` futures.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLoop;

impl EventLoop for BrowserLoop {
    type Timer = gloo_timers::callback::Timeout;

    fn delay(&self, millis: u32, task: Box<dyn FnOnce()>) -> Self::Timer {
        gloo_timers::callback::Timeout::new(millis, task)
    }

    fn spawn(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
