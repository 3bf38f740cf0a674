//! Platform abstraction layer
//!
//! Capability detection done once at startup. The result picks the ship's
//! control scheme for the whole session.

use crate::sim::ControlScheme;

/// Pick the control scheme from a browser user-agent string.
///
/// Phones and tablets (`Mobi` or `Android` anywhere, case-insensitive) get
/// touch controls; everything else gets the keyboard.
pub fn control_scheme_for_user_agent(user_agent: &str) -> ControlScheme {
    let ua = user_agent.to_ascii_lowercase();
    if ua.contains("mobi") || ua.contains("android") {
        ControlScheme::Touch
    } else {
        ControlScheme::Keyboard
    }
}

/// Detect the control scheme for the running browser
#[cfg(target_arch = "wasm32")]
pub fn detect_control_scheme() -> ControlScheme {
    let user_agent = web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .unwrap_or_default();
    control_scheme_for_user_agent(&user_agent)
}

/// Native builds have no touch screen to speak of
#[cfg(not(target_arch = "wasm32"))]
pub fn detect_control_scheme() -> ControlScheme {
    ControlScheme::Keyboard
}
