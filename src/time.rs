//! Monotonic clock shared by the hosts
//!
//! Seconds as `f64`. In the browser this is `performance.now()`; natively it
//! counts from the first call.

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub fn now_seconds() -> f64 {
    // Workers and detached documents have no window clock
    let Some(performance) = web_sys::window().and_then(|window| window.performance()) else {
        return 0.0;
    };
    performance.now() / 1_000.0
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}
