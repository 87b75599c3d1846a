use portfolio_core::theme::MOBILE_RELOAD_DELAY_MS;
use portfolio_core::{MemoryThemeStore, Theme, ThemeController, ThemeStore, ToggleOutcome};

fn hydrated(store: &MemoryThemeStore, system_prefers_dark: bool) -> ThemeController {
    let mut controller = ThemeController::unresolved();
    controller.hydrate(store, None, Some(system_prefers_dark));
    controller
}

#[test]
fn double_toggle_returns_to_original_state() {
    let store = MemoryThemeStore::with_value(Theme::Dark);
    let mut controller = hydrated(&store, true);
    assert_eq!(controller.resolved(), Some(Theme::Dark));

    let first = controller.toggle(&store, false);
    assert_eq!(first, Some(ToggleOutcome::InPlace(Theme::Light)));
    assert_eq!(store.read(), Some(Theme::Light));

    let second = controller.toggle(&store, false);
    assert_eq!(second, Some(ToggleOutcome::InPlace(Theme::Dark)));
    assert_eq!(controller.resolved(), Some(Theme::Dark));
    assert_eq!(store.read(), Some(Theme::Dark));
}

#[test]
fn stored_light_survives_reload_without_consulting_os() {
    let store = MemoryThemeStore::new();
    let mut controller = hydrated(&store, true);
    controller.toggle(&store, false);
    assert_eq!(store.read(), Some(Theme::Light));

    // Reload: fresh controller, same storage, OS still prefers dark.
    let mut reloaded = ThemeController::unresolved();
    let theme = reloaded.hydrate(&store, None, Some(true));
    assert_eq!(theme, Theme::Light);
    assert!(reloaded.is_explicit());
}

#[test]
fn explicit_choice_blocks_os_changes() {
    let store = MemoryThemeStore::new();
    let mut controller = hydrated(&store, true);
    controller.toggle(&store, false);
    assert_eq!(controller.resolved(), Some(Theme::Light));

    assert_eq!(controller.on_system_change(&store, true), None);
    assert_eq!(controller.on_system_change(&store, false), None);
    assert_eq!(controller.resolved(), Some(Theme::Light));

    let mut reloaded = hydrated(&store, true);
    assert_eq!(reloaded.on_system_change(&store, true), None);
    assert_eq!(reloaded.resolved(), Some(Theme::Light));
}

#[test]
fn os_changes_apply_until_user_chooses() {
    let store = MemoryThemeStore::new();
    let mut controller = hydrated(&store, false);
    assert_eq!(controller.resolved(), Some(Theme::Light));

    assert_eq!(controller.on_system_change(&store, true), Some(Theme::Dark));
    assert_eq!(store.read(), Some(Theme::Dark));
    assert_eq!(controller.on_system_change(&store, true), None);
}

#[test]
fn clearing_storage_restores_os_following() {
    let store = MemoryThemeStore::new();
    let mut controller = hydrated(&store, true);
    controller.toggle(&store, false);
    store.clear();

    let mut reloaded = hydrated(&store, false);
    assert_eq!(reloaded.resolved(), Some(Theme::Light));
    assert_eq!(reloaded.on_system_change(&store, true), Some(Theme::Dark));
}

#[test]
fn implicit_system_theme_is_persisted_once() {
    let store = MemoryThemeStore::new();
    let mut controller = ThemeController::unresolved();
    controller.hydrate(&store, None, Some(false));
    assert_eq!(store.read(), Some(Theme::Light));
    assert_eq!(store.write_count(), 1);

    controller.hydrate(&store, None, Some(false));
    assert_eq!(store.write_count(), 1);
}

#[test]
fn pre_hydration_value_wins() {
    let store = MemoryThemeStore::with_value(Theme::Dark);
    let mut controller = ThemeController::unresolved();
    let theme = controller.hydrate(&store, Some(Theme::Light), Some(true));
    assert_eq!(theme, Theme::Light);
}

#[test]
fn unavailable_everything_defaults_to_dark() {
    let store = MemoryThemeStore::new();
    let mut controller = ThemeController::unresolved();
    assert_eq!(controller.hydrate(&store, None, None), Theme::Dark);
}

#[test]
fn missing_storage_falls_back_to_dark_over_os_light() {
    let store = MemoryThemeStore::offline();
    let mut controller = ThemeController::unresolved();
    assert_eq!(controller.hydrate(&store, None, Some(false)), Theme::Dark);

    // Toggling still works in memory for the rest of the page view.
    let outcome = controller.toggle(&store, false);
    assert_eq!(outcome, Some(ToggleOutcome::InPlace(Theme::Light)));
    assert_eq!(store.read(), Some(Theme::Light));
}

#[test]
fn mobile_toggle_persists_and_requests_reload() {
    let store = MemoryThemeStore::with_value(Theme::Dark);
    let mut controller = hydrated(&store, true);

    let outcome = controller.toggle(&store, true);
    assert_eq!(
        outcome,
        Some(ToggleOutcome::Reload {
            theme: Theme::Light,
            delay_ms: MOBILE_RELOAD_DELAY_MS,
        })
    );
    assert_eq!(MOBILE_RELOAD_DELAY_MS, 100);
    assert_eq!(store.read(), Some(Theme::Light));
    assert!(store.explicit());
    // No in-place transition: the page is about to reload.
    assert_eq!(controller.resolved(), Some(Theme::Dark));
}
