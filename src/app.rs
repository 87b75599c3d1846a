use yew::prelude::*;

use crate::cursor_glow::CursorGlow;
use crate::shared;
use crate::site_header::SiteHeader;

#[function_component(App)]
pub(crate) fn app() -> Html {
    use_effect_with((), |_| {
        let bridge = shared::observe_nav_attribute();
        move || drop(bridge)
    });

    html! {
        <>
            <SiteHeader />
            <CursorGlow />
        </>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use portfolio_core::{Theme, SITE_CONFIG};
    use wasm_bindgen_test::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Element, HtmlElement};

    use crate::dom;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_root(id: &str) -> Element {
        let document = dom::document().expect("document available");
        let root = document.create_element("div").expect("create test root");
        root.set_id(id);
        dom::body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        root
    }

    #[wasm_bindgen_test(async)]
    async fn header_renders_config_and_resolves_theme() {
        set_panic_hook();
        let root = mount_root("app-test-header");
        let app_handle = yew::Renderer::<App>::with_root(root.clone()).render();
        TimeoutFuture::new(50).await;

        let brand = root
            .query_selector("[data-brand-link]")
            .ok()
            .flatten()
            .expect("brand link rendered");
        assert_eq!(brand.get_attribute("href").as_deref(), Some(SITE_CONFIG.brand_href));

        let links = root
            .query_selector_all(".site-nav a")
            .expect("nav links queryable");
        assert!(links.length() as usize >= SITE_CONFIG.nav_items.len());

        let switch = root
            .query_selector("[role=switch]")
            .ok()
            .flatten()
            .expect("theme switch rendered");
        assert!(!switch.has_attribute("disabled"));
        let theme = dom::document_theme().expect("theme attribute written");
        let checked = switch.get_attribute("aria-checked");
        assert_eq!(checked.as_deref(), Some(if theme == Theme::Light { "true" } else { "false" }));

        app_handle.destroy();
        root.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn mobile_menu_publishes_and_escape_closes() {
        set_panic_hook();
        let root = mount_root("app-test-menu");
        let app_handle = yew::Renderer::<App>::with_root(root.clone()).render();
        TimeoutFuture::new(50).await;

        let button = root
            .query_selector(".site-header__menu-button")
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .expect("menu button rendered");
        button.click();
        TimeoutFuture::new(50).await;
        assert!(shared::nav_open_signal().get());
        assert_eq!(
            dom::body_attribute(dom::NAV_OPEN_ATTRIBUTE).as_deref(),
            Some("true")
        );

        let init = web_sys::KeyboardEventInit::new();
        init.set_key("Escape");
        let event = web_sys::KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
            .expect("keyboard event");
        dom::document()
            .expect("document available")
            .dispatch_event(&event)
            .expect("dispatch escape");
        TimeoutFuture::new(50).await;
        assert!(!shared::nav_open_signal().get());

        app_handle.destroy();
        root.remove();
    }
}
