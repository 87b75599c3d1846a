use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MutationObserver, MutationObserverInit, MutationRecord};
use yew::prelude::*;

use portfolio_core::{Signal, Theme};

use crate::dom;

thread_local! {
    static THEME: Signal<Option<Theme>> = Signal::new(None);
    static NAV_OPEN: Signal<bool> = Signal::new(false);
}

pub(crate) fn theme_signal() -> Signal<Option<Theme>> {
    THEME.with(Signal::clone)
}

pub(crate) fn nav_open_signal() -> Signal<bool> {
    NAV_OPEN.with(Signal::clone)
}

/// Owned by the theme switch. Mirrors into `data-theme` for CSS.
pub(crate) fn publish_theme(theme: Theme) {
    dom::set_theme_attributes(theme);
    THEME.with(|signal| signal.set(Some(theme)));
}

/// Owned by the site header. Mirrors into `data-nav-open` on `<body>`.
pub(crate) fn publish_nav_open(open: bool) {
    dom::set_body_attribute(
        dom::NAV_OPEN_ATTRIBUTE,
        Some(if open { "true" } else { "false" }),
    );
    NAV_OPEN.with(|signal| signal.set(open));
}

pub(crate) fn clear_nav_open() {
    dom::set_body_attribute(dom::NAV_OPEN_ATTRIBUTE, None);
    NAV_OPEN.with(|signal| signal.set(false));
}

/// Feeds `data-nav-open` writes made outside this crate into the nav signal.
pub(crate) struct NavAttributeBridge {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl Drop for NavAttributeBridge {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn nav_attribute_open() -> bool {
    dom::body_attribute(dom::NAV_OPEN_ATTRIBUTE).as_deref() == Some("true")
}

pub(crate) fn observe_nav_attribute() -> Option<NavAttributeBridge> {
    let body = dom::body()?;
    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        |records: js_sys::Array, _observer: MutationObserver| {
            let touched = records.iter().any(|record| {
                record
                    .dyn_into::<MutationRecord>()
                    .ok()
                    .and_then(|record| record.attribute_name())
                    .is_some_and(|name| name == dom::NAV_OPEN_ATTRIBUTE)
            });
            if touched {
                NAV_OPEN.with(|signal| signal.set(nav_attribute_open()));
            }
        },
    );
    let observer = MutationObserver::new(callback.as_ref().unchecked_ref()).ok()?;
    let options = MutationObserverInit::new();
    options.set_attributes(true);
    options.set_attribute_filter(&js_sys::Array::of1(&dom::NAV_OPEN_ATTRIBUTE.into()));
    if observer.observe_with_options(&body, &options).is_err() {
        gloo::console::warn!("nav attribute observer failed to attach");
        return None;
    }
    NAV_OPEN.with(|signal| signal.set(nav_attribute_open()));
    Some(NavAttributeBridge {
        observer,
        _callback: callback,
    })
}

/// Re-renders the calling component whenever `signal` changes.
#[hook]
pub(crate) fn use_signal<T>(signal: Signal<T>) -> T
where
    T: Clone + PartialEq + 'static,
{
    let value = use_state(|| signal.get());
    {
        let value = value.clone();
        use_effect_with((), move |_| {
            value.set(signal.get());
            let subscription = signal.subscribe(move |next| value.set(next.clone()));
            move || drop(subscription)
        });
    }
    (*value).clone()
}
