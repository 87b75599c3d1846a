use std::rc::Rc;

use yew::prelude::*;

use portfolio_core::{Theme, ThemeController, ToggleOutcome, DARK_SCHEME_QUERY};

use crate::dom;
use crate::media;
use crate::shared::{self, use_signal};
use crate::storage::LocalThemeStore;

#[derive(Properties, PartialEq)]
pub(crate) struct ThemeToggleProps {
    #[prop_or_default]
    pub(crate) class: Classes,
}

fn apply_toggle(outcome: ToggleOutcome) {
    match outcome {
        ToggleOutcome::InPlace(theme) => shared::publish_theme(theme),
        ToggleOutcome::Reload { theme, delay_ms } => {
            gloo::console::log!("theme: mobile toggle, reloading", theme.as_str());
            dom::set_theme_attributes(theme);
            dom::reload_after(delay_ms);
        }
    }
}

#[function_component(ThemeToggle)]
pub(crate) fn theme_toggle(props: &ThemeToggleProps) -> Html {
    let controller = use_mut_ref(ThemeController::unresolved);
    let store: Rc<LocalThemeStore> = use_memo((), |_| LocalThemeStore::open());
    let theme = use_signal(shared::theme_signal());

    {
        let controller = controller.clone();
        let store = store.clone();
        use_effect_with((), move |_| {
            let pre_hydration = dom::pre_hydration_theme();
            let system_prefers_dark = media::query_matches(DARK_SCHEME_QUERY);
            let resolved = controller
                .borrow_mut()
                .hydrate(&*store, pre_hydration, system_prefers_dark);
            shared::publish_theme(resolved);

            let watch = media::watch_media(DARK_SCHEME_QUERY, move |prefers_dark| {
                let changed = controller
                    .borrow_mut()
                    .on_system_change(&*store, prefers_dark);
                if let Some(theme) = changed {
                    gloo::console::log!("theme: following system", theme.as_str());
                    shared::publish_theme(theme);
                }
            });
            move || drop(watch)
        });
    }

    let classes = classes!("site-header__toggle", props.class.clone());

    let Some(theme) = theme else {
        return html! {
            <button
                type="button"
                class={classes}
                aria-label="Toggle theme"
                role="switch"
                aria-checked="false"
                disabled=true
            >
                <span aria-hidden="true" class="theme-toggle__placeholder" />
            </button>
        };
    };

    let onclick = {
        let controller = controller.clone();
        let store = store.clone();
        Callback::from(move |_: MouseEvent| {
            let outcome = controller.borrow_mut().toggle(&*store, dom::is_mobile());
            if let Some(outcome) = outcome {
                apply_toggle(outcome);
            }
        })
    };

    let (label, icon) = match theme {
        Theme::Dark => ("Switch to light mode", "theme-toggle__icon theme-toggle__icon--moon"),
        Theme::Light => ("Switch to dark mode", "theme-toggle__icon theme-toggle__icon--sun"),
    };

    html! {
        <button
            type="button"
            class={classes}
            aria-label={label}
            role="switch"
            aria-checked={(theme == Theme::Light).to_string()}
            {onclick}
        >
            <span aria-hidden="true" class={icon} />
        </button>
    }
}
