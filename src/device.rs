/// Viewport classification used to pick biases and particle styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Compact,
}

const MOBILE_UA_TOKENS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

impl DeviceClass {
    /// Narrow viewport OR a mobile user agent means compact.
    pub fn detect(viewport_width: f64, user_agent: &str, breakpoint: f64) -> Self {
        if viewport_width <= breakpoint || is_mobile_user_agent(user_agent) {
            DeviceClass::Compact
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn is_compact(self) -> bool {
        self == DeviceClass::Compact
    }
}

/// What a resize means for the page once the new class is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAction {
    /// Viewport crossed the breakpoint: close the drawer, regenerate now.
    Crossed,
    /// Same class: regenerate once the resize burst is over.
    Debounce,
}

pub fn resize_action(previous: DeviceClass, detected: DeviceClass) -> ResizeAction {
    if previous == detected {
        ResizeAction::Debounce
    } else {
        ResizeAction::Crossed
    }
}

fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_UA_TOKENS.iter().any(|token| ua.contains(token))
}
