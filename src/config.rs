//! Tunables for the page controller. Everything time- or pixel-based that the
//! controller consults is read from here.

use crate::device::DeviceClass;

#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// Viewports at or below this width (CSS px) are treated as compact.
    pub mobile_breakpoint: f64,
    /// Lookahead added to the scroll offset before section hit testing.
    pub desktop_highlight_bias: f64,
    pub compact_highlight_bias: f64,
    /// Fixed header clearance subtracted from anchor scroll targets.
    pub header_offset: f64,
    /// Scroll offset past which the navbar gets the `scrolled` class.
    pub navbar_scrolled_threshold: f64,
    pub menu_close_delay_ms: u32,
    pub highlight_delay_ms: u32,
    pub focus_delay_ms: u32,
    pub resize_debounce_ms: u32,
    pub scroll_throttle_ms: f64,
    pub particle_count: usize,
    /// Minimum rightward travel (px) for a swipe to dismiss the drawer.
    pub swipe_close_threshold: f64,
    pub storage_key: &'static str,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            desktop_highlight_bias: 200.0,
            compact_highlight_bias: 120.0,
            header_offset: 100.0,
            navbar_scrolled_threshold: 100.0,
            menu_close_delay_ms: 300,
            highlight_delay_ms: 100,
            focus_delay_ms: 100,
            resize_debounce_ms: 250,
            scroll_throttle_ms: 100.0,
            particle_count: 30,
            swipe_close_threshold: 60.0,
            storage_key: "language-preference",
        }
    }
}

impl PageConfig {
    pub fn highlight_bias(&self, class: DeviceClass) -> f64 {
        match class {
            DeviceClass::Desktop => self.desktop_highlight_bias,
            DeviceClass::Compact => self.compact_highlight_bias,
        }
    }
}

#[cfg(debug_assertions)]
pub fn log_level() -> log::Level {
    log::Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> log::Level {
    log::Level::Info
}
