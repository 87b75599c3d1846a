use gloo::events::EventListener;
use js_sys::{Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, MediaQueryList, MediaQueryListEvent};

fn media_query(query: &str) -> Option<MediaQueryList> {
    web_sys::window()?.match_media(query).ok()?
}

pub(crate) fn query_matches(query: &str) -> Option<bool> {
    media_query(query).map(|list| list.matches())
}

fn has_method(target: &JsValue, name: &str) -> bool {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .is_some_and(|value| value.is_instance_of::<Function>())
}

enum Subscription {
    Modern(EventListener),
    Legacy {
        list: MediaQueryList,
        callback: Closure<dyn FnMut(MediaQueryListEvent)>,
    },
}

/// Live subscription to a media query; unsubscribes on drop.
pub(crate) struct MediaWatch {
    subscription: Option<Subscription>,
}

impl Drop for MediaWatch {
    #[allow(deprecated)]
    fn drop(&mut self) {
        if let Some(Subscription::Legacy { list, callback }) = self.subscription.take() {
            let _ = list.remove_listener_with_opt_callback(Some(callback.as_ref().unchecked_ref()));
        }
    }
}

/// Calls `on_change` with the new match state. Uses `change` events where
/// available, the legacy `addListener` API otherwise, and returns `None` when
/// the query cannot be observed at all.
#[allow(deprecated)]
pub(crate) fn watch_media(query: &str, on_change: impl Fn(bool) + 'static) -> Option<MediaWatch> {
    let list = media_query(query)?;
    if has_method(&list, "addEventListener") {
        let listener = EventListener::new(&list, "change", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<MediaQueryListEvent>() {
                on_change(event.matches());
            }
        });
        return Some(MediaWatch {
            subscription: Some(Subscription::Modern(listener)),
        });
    }
    if has_method(&list, "addListener") {
        let callback = Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |event: MediaQueryListEvent| {
            on_change(event.matches());
        });
        if list
            .add_listener_with_opt_callback(Some(callback.as_ref().unchecked_ref()))
            .is_ok()
        {
            return Some(MediaWatch {
                subscription: Some(Subscription::Legacy { list, callback }),
            });
        }
    }
    gloo::console::warn!("media query is static, changes will be ignored:", query);
    None
}
