pub mod device;
pub mod geom;
pub mod hover;
pub mod motion;
pub mod outline;
pub mod overlay;
pub mod palette;
pub mod signal;
pub mod site;
pub mod theme;

pub use device::{is_mobile_device, DeviceProfile, FINE_POINTER_QUERY};
pub use geom::{Point, Rect};
pub use hover::{detect_hover, ElementProbe, ElementTraits, HoverState, InteractionVariant};
pub use motion::{organic_offset, FrameThrottle, OrganicMotion, MAX_ORGANIC_OFFSET};
pub use outline::{outline_box, OutlineBox, OutlineKind};
pub use overlay::{compose, OverlayFrame, OverlayInputs};
pub use signal::{Signal, Subscription};
pub use site::{NavItem, SiteConfig, SocialLink, SITE_CONFIG};
pub use theme::{
    MemoryThemeStore, Theme, ThemeController, ThemeParseError, ThemeStore, ToggleOutcome,
    DARK_SCHEME_QUERY, DEFAULT_THEME,
};
