use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_THEME: Theme = Theme::Dark;
pub const MOBILE_RELOAD_DELAY_MS: u32 = 100;
pub const EXPLICIT_FLAG_VALUE: &str = "true";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn parse(value: &str) -> Result<Self, ThemeParseError> {
        match value.trim() {
            "" => Err(ThemeParseError::Empty),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeParseError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeParseError {
    #[error("theme value is empty")]
    Empty,
    #[error("unknown theme '{0}', expected \"light\" or \"dark\"")]
    Unknown(String),
}

/// Durable home of the theme value and the explicit-choice flag.
///
/// Implementations are best effort: a backend that cannot write simply
/// drops the value, and reads of garbage come back as `None`.
pub trait ThemeStore {
    fn read(&self) -> Option<Theme>;
    fn write(&self, theme: Theme);
    fn explicit(&self) -> bool;
    fn mark_explicit(&self);

    /// `false` when the durable backend is missing and values only live in
    /// memory for this page view.
    fn available(&self) -> bool {
        true
    }
}

#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    value: Cell<Option<Theme>>,
    explicit: Cell<bool>,
    writes: Cell<u32>,
    offline: bool,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(theme: Theme) -> Self {
        let store = Self::default();
        store.value.set(Some(theme));
        store
    }

    /// Stands in for a browser without usable storage.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Number of theme writes seen so far.
    pub fn write_count(&self) -> u32 {
        self.writes.get()
    }

    pub fn clear(&self) {
        self.value.set(None);
        self.explicit.set(false);
    }
}

impl ThemeStore for MemoryThemeStore {
    fn read(&self) -> Option<Theme> {
        self.value.get()
    }

    fn write(&self, theme: Theme) {
        self.value.set(Some(theme));
        self.writes.set(self.writes.get().saturating_add(1));
    }

    fn explicit(&self) -> bool {
        self.explicit.get()
    }

    fn mark_explicit(&self) {
        self.explicit.set(true);
    }

    fn available(&self) -> bool {
        !self.offline
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InitialSources {
    /// Value written into the page by the inline pre-hydration script.
    pub pre_hydration: Option<Theme>,
    pub stored: Option<Theme>,
    /// `None` when the color-scheme query is unavailable.
    pub system_prefers_dark: Option<bool>,
}

pub fn resolve_initial(sources: InitialSources) -> Theme {
    sources
        .pre_hydration
        .or(sources.stored)
        .or(sources.system_prefers_dark.map(Theme::from_prefers_dark))
        .unwrap_or(DEFAULT_THEME)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Re-render in place.
    InPlace(Theme),
    /// Document and storage already carry `theme`; reload the page after the delay.
    Reload { theme: Theme, delay_ms: u32 },
}

impl ToggleOutcome {
    pub fn theme(self) -> Theme {
        match self {
            ToggleOutcome::InPlace(theme) => theme,
            ToggleOutcome::Reload { theme, .. } => theme,
        }
    }
}

/// Light/dark state machine: `Unresolved` until [`hydrate`](Self::hydrate),
/// then `Resolved(theme)` for the rest of the page view.
#[derive(Clone, Debug, Default)]
pub struct ThemeController {
    resolved: Option<Theme>,
    explicit: bool,
    system_persisted: bool,
}

impl ThemeController {
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn resolved(&self) -> Option<Theme> {
        self.resolved
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    pub fn hydrate<S: ThemeStore + ?Sized>(
        &mut self,
        store: &S,
        pre_hydration: Option<Theme>,
        system_prefers_dark: Option<bool>,
    ) -> Theme {
        self.explicit = store.explicit();
        // Without storage the in-memory default stands in for the OS preference.
        let system_prefers_dark = system_prefers_dark.filter(|_| store.available());
        let theme = resolve_initial(InitialSources {
            pre_hydration,
            stored: store.read(),
            system_prefers_dark,
        });
        self.resolved = Some(theme);
        self.persist(store, theme);
        theme
    }

    /// Flips the resolved theme. Returns `None` while unresolved.
    ///
    /// On mobile the in-memory state is left alone; the caller writes the
    /// document attributes and reloads.
    pub fn toggle<S: ThemeStore + ?Sized>(
        &mut self,
        store: &S,
        is_mobile: bool,
    ) -> Option<ToggleOutcome> {
        let next = self.resolved?.toggled();
        self.explicit = true;
        store.mark_explicit();
        store.write(next);
        if is_mobile {
            return Some(ToggleOutcome::Reload {
                theme: next,
                delay_ms: MOBILE_RELOAD_DELAY_MS,
            });
        }
        self.resolved = Some(next);
        Some(ToggleOutcome::InPlace(next))
    }

    /// Applies a live OS color-scheme change unless the user has chosen a
    /// theme. Returns the new theme when it changed.
    pub fn on_system_change<S: ThemeStore + ?Sized>(
        &mut self,
        store: &S,
        prefers_dark: bool,
    ) -> Option<Theme> {
        if self.explicit || store.explicit() {
            self.explicit = true;
            return None;
        }
        let current = self.resolved?;
        let next = Theme::from_prefers_dark(prefers_dark);
        if next == current {
            return None;
        }
        self.resolved = Some(next);
        store.write(next);
        Some(next)
    }

    fn persist<S: ThemeStore + ?Sized>(&mut self, store: &S, theme: Theme) {
        if self.explicit {
            if store.read() != Some(theme) {
                store.write(theme);
            }
            return;
        }
        if store.read().is_none() && !self.system_persisted {
            store.write(theme);
            self.system_persisted = true;
        }
    }
}
