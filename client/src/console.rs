//! Diagnostics sink. Browser builds write to the devtools console; native
//! builds (unit tests) write to stderr.

#[cfg(target_arch = "wasm32")]
pub fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

#[cfg(target_arch = "wasm32")]
pub fn debug(message: &str) {
    web_sys::console::debug_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(message: &str) {
    eprintln!("warn: {message}");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn debug(message: &str) {
    eprintln!("debug: {message}");
}
