use gloo::timers::callback::Timeout;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use portfolio_core::hover::BRAND_LINK_ATTRIBUTE;
use portfolio_core::outline::parse_css_px;
use portfolio_core::{is_mobile_device, DeviceProfile, ElementProbe, ElementTraits, Rect, Theme};

pub(crate) const THEME_ATTRIBUTE: &str = "data-theme";
pub(crate) const NAV_OPEN_ATTRIBUTE: &str = "data-nav-open";
pub(crate) const CURSOR_ACTIVE_CLASS: &str = "custom-cursor-active";
const THEME_GLOBAL: &str = "__PORTFOLIO_THEME__";

pub(crate) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub(crate) fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub(crate) fn set_theme_attributes(theme: Theme) {
    let Some(document) = document() else {
        return;
    };
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    }
    if let Some(body) = document.body() {
        let _ = body.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    }
}

/// Theme set by the inline shell script before the bundle loaded.
pub(crate) fn pre_hydration_theme() -> Option<Theme> {
    let window = web_sys::window()?;
    let global = Reflect::get(&window, &JsValue::from_str(THEME_GLOBAL))
        .ok()
        .and_then(|value| value.as_string())
        .and_then(|value| Theme::parse(&value).ok());
    global.or_else(document_theme)
}

pub(crate) fn document_theme() -> Option<Theme> {
    let root = document()?.document_element()?;
    let value = root.get_attribute(THEME_ATTRIBUTE)?;
    Theme::parse(&value).ok()
}

pub(crate) fn set_body_class(class: &str, enabled: bool) {
    let Some(body) = body() else {
        return;
    };
    let _ = body.class_list().toggle_with_force(class, enabled);
}

pub(crate) fn set_body_attribute(name: &str, value: Option<&str>) {
    let Some(body) = body() else {
        return;
    };
    match value {
        Some(value) => {
            let _ = body.set_attribute(name, value);
        }
        None => {
            let _ = body.remove_attribute(name);
        }
    }
}

pub(crate) fn body_attribute(name: &str) -> Option<String> {
    body()?.get_attribute(name)
}

fn has_touch() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let ontouchstart = Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
    ontouchstart || window.navigator().max_touch_points() > 0
}

fn user_agent() -> String {
    web_sys::window()
        .and_then(|window| window.navigator().user_agent().ok())
        .unwrap_or_default()
}

pub(crate) fn is_mobile() -> bool {
    is_mobile_device(&user_agent(), has_touch())
}

pub(crate) fn device_profile(fine_pointer: bool) -> DeviceProfile {
    DeviceProfile {
        user_agent: user_agent(),
        has_touch: has_touch(),
        fine_pointer,
    }
}

pub(crate) fn reload_after(delay_ms: u32) {
    Timeout::new(delay_ms, || {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    })
    .forget();
}

/// [`ElementProbe`] over a live DOM element.
#[derive(Clone)]
pub(crate) struct DomElement(Element);

impl DomElement {
    pub(crate) fn new(element: Element) -> Self {
        Self(element)
    }

    fn computed(&self, property: &str) -> Option<String> {
        let window = web_sys::window()?;
        let style = window.get_computed_style(&self.0).ok()??;
        let value = style.get_property_value(property).ok()?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

impl ElementProbe for DomElement {
    fn traits(&self) -> ElementTraits {
        let tag = self.0.local_name().to_ascii_lowercase();
        let input_type = if tag == "input" {
            self.0.get_attribute("type")
        } else {
            None
        };
        let content_editable = self
            .0
            .dyn_ref::<HtmlElement>()
            .is_some_and(|element| element.is_content_editable());
        ElementTraits {
            input_type,
            cursor: self.computed("cursor"),
            role: self.0.get_attribute("role"),
            has_click_handler: self.0.has_attribute("onclick"),
            content_editable,
            brand_link: self.0.has_attribute(BRAND_LINK_ATTRIBUTE),
            tag,
        }
    }

    fn within_nav(&self) -> bool {
        matches!(self.0.closest("nav"), Ok(Some(_)))
    }

    fn geometry(&self) -> Option<(Rect, f64)> {
        if !self.0.is_connected() {
            return None;
        }
        let rect = self.0.get_bounding_client_rect();
        let radius = self
            .computed("border-top-left-radius")
            .map(|value| parse_css_px(&value))
            .unwrap_or(0.0);
        Some((
            Rect::new(rect.left(), rect.top(), rect.width(), rect.height()),
            radius,
        ))
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(DomElement)
    }
}
