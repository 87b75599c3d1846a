use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent, Node};
use yew::prelude::*;

use portfolio_core::site::nav_item_by_href;
use portfolio_core::{NavItem, SITE_CONFIG};

use crate::shared;
use crate::theme_toggle::ThemeToggle;

fn current_hash() -> Option<String> {
    let hash = web_sys::window()?.location().hash().ok()?;
    nav_item_by_href(&hash).map(|item| item.href.to_string())
}

fn focus_first_link(panel: &NodeRef) {
    let Some(panel) = panel.cast::<web_sys::Element>() else {
        return;
    };
    let first = panel
        .query_selector("a[href]")
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok());
    if let Some(link) = first {
        let _ = link.focus();
    }
}

/// Escape and outside pointer-down both close an open menu.
struct MenuDismissal {
    _keydown: EventListener,
    _mousedown: EventListener,
}

fn dismiss_menu(open: UseStateHandle<bool>, panel: NodeRef, toggle: NodeRef) -> Option<MenuDismissal> {
    let document = crate::dom::document()?;

    let keydown = {
        let open = open.clone();
        EventListener::new(&document, "keydown", move |event: &Event| {
            let escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|event| event.key() == "Escape");
            if escape {
                open.set(false);
            }
        })
    };

    let mousedown = EventListener::new(&document, "mousedown", move |event: &Event| {
        let Some(target) = event.target().and_then(|target| target.dyn_into::<Node>().ok()) else {
            return;
        };
        let inside = |node: &NodeRef| {
            node.cast::<Node>()
                .is_some_and(|node| node.contains(Some(&target)))
        };
        if !inside(&panel) && !inside(&toggle) {
            open.set(false);
        }
    });

    Some(MenuDismissal {
        _keydown: keydown,
        _mousedown: mousedown,
    })
}

#[derive(Properties, PartialEq)]
struct NavLinksProps {
    items: &'static [NavItem],
    active: Option<String>,
    onnavigate: Callback<()>,
}

#[function_component(NavLinks)]
fn nav_links(props: &NavLinksProps) -> Html {
    props
        .items
        .iter()
        .map(|item| {
            let current = props.active.as_deref() == Some(item.href);
            let onclick = props.onnavigate.reform(|_: MouseEvent| ());
            html! {
                <li key={item.href}>
                    <a
                        href={item.href}
                        class={classes!("site-nav__link", current.then_some("site-nav__link--active"))}
                        aria-current={current.then_some("location")}
                        {onclick}
                    >
                        { item.label }
                    </a>
                </li>
            }
        })
        .collect()
}

fn social_links() -> Html {
    SITE_CONFIG
        .social_links
        .iter()
        .map(|link| {
            html! {
                <a
                    key={link.href}
                    class="site-header__social"
                    href={link.href}
                    target="_blank"
                    rel="noopener noreferrer"
                    aria-label={link.label}
                >
                    { link.short }
                </a>
            }
        })
        .collect()
}

#[function_component(SiteHeader)]
pub(crate) fn site_header() -> Html {
    let menu_open = use_state_eq(|| false);
    let active = use_state_eq(current_hash);
    let panel = use_node_ref();
    let toggle = use_node_ref();

    {
        let active = active.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "hashchange", move |_event: &Event| {
                    active.set(current_hash());
                })
            });
            move || drop(listener)
        });
    }

    {
        let panel = panel.clone();
        let toggle = toggle.clone();
        let open_handle = menu_open.clone();
        use_effect_with(*menu_open, move |open| {
            shared::publish_nav_open(*open);
            let dismissal = if *open {
                focus_first_link(&panel);
                dismiss_menu(open_handle, panel, toggle)
            } else {
                None
            };
            move || drop(dismissal)
        });
    }

    use_effect_with((), |_| shared::clear_nav_open);

    let on_toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |()| menu_open.set(false))
    };

    let open = *menu_open;
    let menu_label = if open { "Close menu" } else { "Open menu" };

    html! {
        <header class={classes!("site-header", open.then_some("site-header--menu-open"))}>
            <a
                class="site-header__brand"
                href={SITE_CONFIG.brand_href}
                data-brand-link="true"
                aria-label={format!("{}, {}", SITE_CONFIG.name, SITE_CONFIG.title)}
            >
                <span class="site-header__name">{ SITE_CONFIG.name }</span>
                <span class="site-header__title">{ SITE_CONFIG.title }</span>
            </a>
            <nav class="site-nav" aria-label="Primary">
                <ul class="site-nav__list">
                    <NavLinks
                        items={SITE_CONFIG.nav_items}
                        active={(*active).clone()}
                        onnavigate={Callback::noop()}
                    />
                </ul>
            </nav>
            <div class="site-header__actions">
                { social_links() }
                <ThemeToggle />
                <button
                    ref={toggle}
                    type="button"
                    class="site-header__menu-button"
                    aria-label={menu_label}
                    aria-expanded={open.to_string()}
                    aria-controls="site-mobile-menu"
                    onclick={on_toggle}
                >
                    <span aria-hidden="true" class="site-header__menu-icon" />
                </button>
            </div>
            <div
                ref={panel}
                id="site-mobile-menu"
                class="site-header__mobile-menu"
                hidden={!open}
            >
                <nav aria-label="Mobile">
                    <ul class="site-nav__list site-nav__list--mobile">
                        <NavLinks
                            items={SITE_CONFIG.nav_items}
                            active={(*active).clone()}
                            onnavigate={close_menu}
                        />
                    </ul>
                </nav>
                <div class="site-header__mobile-social">
                    { social_links() }
                </div>
            </div>
        </header>
    }
}
