use std::cell::Cell;

use web_sys::Storage;

use portfolio_core::theme::EXPLICIT_FLAG_VALUE;
use portfolio_core::{MemoryThemeStore, Theme, ThemeStore, SITE_CONFIG};

/// Theme persistence over `localStorage`, degrading to memory when storage is
/// missing or throws.
pub(crate) struct LocalThemeStore {
    storage: Option<Storage>,
    fallback: MemoryThemeStore,
    value_key: &'static str,
    explicit_key: &'static str,
    warned: Cell<bool>,
}

impl LocalThemeStore {
    pub(crate) fn open() -> Self {
        Self::with_keys(SITE_CONFIG.theme_storage_key, SITE_CONFIG.theme_explicit_key)
    }

    pub(crate) fn with_keys(value_key: &'static str, explicit_key: &'static str) -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        let store = Self {
            storage,
            fallback: MemoryThemeStore::new(),
            value_key,
            explicit_key,
            warned: Cell::new(false),
        };
        if store.storage.is_none() {
            store.warn_once("storage unavailable, theme kept in memory");
        }
        store
    }

    fn warn_once(&self, message: &str) {
        if self.warned.replace(true) {
            return;
        }
        gloo::console::warn!("theme store:", message.to_string());
    }

    fn get(&self, key: &str) -> Option<Option<String>> {
        let storage = self.storage.as_ref()?;
        match storage.get_item(key) {
            Ok(value) => Some(value),
            Err(_) => {
                self.warn_once("storage read failed");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            self.warn_once("storage write failed");
        }
    }
}

impl ThemeStore for LocalThemeStore {
    fn read(&self) -> Option<Theme> {
        match self.get(self.value_key) {
            Some(raw) => raw.and_then(|raw| Theme::parse(&raw).ok()),
            None => self.fallback.read(),
        }
    }

    fn write(&self, theme: Theme) {
        self.fallback.write(theme);
        self.set(self.value_key, theme.as_str());
    }

    fn explicit(&self) -> bool {
        match self.get(self.explicit_key) {
            Some(raw) => raw.as_deref() == Some(EXPLICIT_FLAG_VALUE),
            None => self.fallback.explicit(),
        }
    }

    fn mark_explicit(&self) {
        self.fallback.mark_explicit();
        self.set(self.explicit_key, EXPLICIT_FLAG_VALUE);
    }

    fn available(&self) -> bool {
        self.storage.is_some()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use portfolio_core::ThemeController;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const VALUE_KEY: &str = "portfolio-theme.test";
    const EXPLICIT_KEY: &str = "portfolio-theme-explicit.test";

    fn fresh_store() -> LocalThemeStore {
        let store = LocalThemeStore::with_keys(VALUE_KEY, EXPLICIT_KEY);
        if let Some(storage) = store.storage.as_ref() {
            let _ = storage.remove_item(VALUE_KEY);
            let _ = storage.remove_item(EXPLICIT_KEY);
        }
        store
    }

    #[wasm_bindgen_test]
    fn writes_literal_values() {
        let store = fresh_store();
        store.write(Theme::Light);
        let raw = store
            .storage
            .as_ref()
            .and_then(|storage| storage.get_item(VALUE_KEY).ok().flatten());
        assert_eq!(raw.as_deref(), Some("light"));
        assert_eq!(store.read(), Some(Theme::Light));
    }

    #[wasm_bindgen_test]
    fn garbage_reads_as_unset() {
        let store = fresh_store();
        store.set(VALUE_KEY, "sepia");
        assert_eq!(store.read(), None);
    }

    #[wasm_bindgen_test]
    fn reload_round_trip_keeps_explicit_choice() {
        let store = fresh_store();
        let mut controller = ThemeController::unresolved();
        controller.hydrate(&store, None, Some(true));
        controller.toggle(&store, false);

        let reopened = LocalThemeStore::with_keys(VALUE_KEY, EXPLICIT_KEY);
        let mut reloaded = ThemeController::unresolved();
        assert_eq!(reloaded.hydrate(&reopened, None, Some(true)), Theme::Light);
        assert_eq!(reloaded.on_system_change(&reopened, true), None);
    }
}
