pub const FINE_POINTER_QUERY: &str = "(pointer: fine)";

/// Substrings matched case-insensitively against the user agent.
///
/// Known approximation: hybrid touch laptops and tablets in desktop mode are
/// misclassified either way. Kept as-is to match the site's historic behavior.
pub const MOBILE_USER_AGENT_TOKENS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let lower = user_agent.to_ascii_lowercase();
    MOBILE_USER_AGENT_TOKENS
        .iter()
        .any(|token| lower.contains(token))
}

/// Mobile means a mobile user agent AND touch support. Viewport width is
/// deliberately not consulted.
pub fn is_mobile_device(user_agent: &str, has_touch: bool) -> bool {
    has_touch && is_mobile_user_agent(user_agent)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceProfile {
    pub user_agent: String,
    pub has_touch: bool,
    pub fine_pointer: bool,
}

impl DeviceProfile {
    pub fn is_mobile(&self) -> bool {
        is_mobile_device(&self.user_agent, self.has_touch)
    }

    /// Hard gate for the pointer effect.
    pub fn cursor_enabled(&self) -> bool {
        self.fine_pointer && !self.is_mobile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15";
    const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/124.0 Safari/537.36";

    #[test]
    fn mobile_requires_user_agent_and_touch() {
        assert!(is_mobile_device(IPHONE_UA, true));
        assert!(!is_mobile_device(IPHONE_UA, false));
        assert!(!is_mobile_device(DESKTOP_UA, true));
        assert!(is_mobile_user_agent("Opera Mini/8.0"));
    }

    #[test]
    fn cursor_gate_needs_fine_pointer_on_non_mobile() {
        let desktop = DeviceProfile {
            user_agent: DESKTOP_UA.to_string(),
            has_touch: true,
            fine_pointer: true,
        };
        assert!(desktop.cursor_enabled());

        let coarse = DeviceProfile {
            fine_pointer: false,
            ..desktop.clone()
        };
        assert!(!coarse.cursor_enabled());

        let tablet_with_mouse = DeviceProfile {
            user_agent: "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X)".to_string(),
            has_touch: true,
            fine_pointer: true,
        };
        assert!(!tablet_with_mouse.cursor_enabled());
    }
}
