
#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL
}

/// Viewports narrower than this page vertically instead of hijacking the
/// horizontal axis.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Duration of the route curtain, each way.
pub const CURTAIN_MS: u32 = 450;

/// Duration of the entrance reveal after its assets are ready.
pub const REVEAL_MS: u32 = 1400;

pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}
