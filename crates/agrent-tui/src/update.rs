//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects. The session gate lives here too:
//! every session change notification re-evaluates which screen tree is
//! mounted, and switching trees resets per-tree state and issues that
//! tree's initial data load.

use agrent_core::session::Session;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::{DataUiEvent, UiEvent};
use crate::features::{auth, owner, profile, renter};
use crate::state::{AppState, Screen, ScreenTree};

/// The main reducer function.
pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::SessionChanged(session) => apply_session(state, session),
        UiEvent::Terminal(Event::Key(key)) if key.kind != KeyEventKind::Release => {
            handle_key(state, &key)
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::Auth(event) => auth::handle_event(state, event),
        UiEvent::Data(event) => handle_data(state, event),
    }
}

/// The gate: applies a session snapshot and remounts the tree if it changed.
///
/// Per-tree state is reset on a switch so nothing leaks across accounts;
/// the new tree's initial data load is issued immediately.
fn apply_session(state: &mut AppState, session: Session) -> Vec<UiEffect> {
    let previous = state.tree();
    state.session = session;
    let current = state.tree();
    if previous == current {
        return vec![];
    }

    state.auth = Default::default();
    state.owner = Default::default();
    state.renter = Default::default();
    state.profile = Default::default();
    state.screen = current.home();

    match current {
        ScreenTree::Owner => state.owner.overview.loading = true,
        ScreenTree::Renter => state.renter.browse.loading = true,
        ScreenTree::Unauthenticated => {}
    }
    current.entry_effects()
}

fn handle_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    // Ctrl+C always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return vec![];
    }

    let tree = state.tree();
    if tree == ScreenTree::Unauthenticated {
        return auth::handle_key(state, key);
    }

    // Outside text forms: quit and tab navigation.
    if !state.screen.captures_text() {
        match key.code {
            KeyCode::Char('q') => {
                state.should_quit = true;
                return vec![];
            }
            KeyCode::Tab | KeyCode::BackTab => {
                return cycle_tab(state, key.code == KeyCode::Tab);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some((screen, _)) = tree.tabs().get(index).copied() {
                    return switch_screen(state, screen);
                }
                return vec![];
            }
            _ => {}
        }
    }

    if state.screen == Screen::Profile {
        return profile::handle_key(state, key);
    }
    match tree {
        ScreenTree::Owner => owner::handle_key(state, key),
        ScreenTree::Renter => renter::handle_key(state, key),
        ScreenTree::Unauthenticated => vec![],
    }
}

fn cycle_tab(state: &mut AppState, forward: bool) -> Vec<UiEffect> {
    let tabs = state.tree().tabs();
    if tabs.is_empty() {
        return vec![];
    }
    let current = tabs
        .iter()
        .position(|(screen, _)| *screen == state.screen)
        .unwrap_or(0);
    let next = if forward {
        (current + 1) % tabs.len()
    } else {
        (current + tabs.len() - 1) % tabs.len()
    };
    switch_screen(state, tabs[next].0)
}

/// Switches screens and issues that screen's fetch. Remote resources are
/// fetched per screen and discarded, never cached, so entering a screen
/// always reloads it.
fn switch_screen(state: &mut AppState, screen: Screen) -> Vec<UiEffect> {
    state.go_to(screen);
    match screen {
        Screen::OwnerHome | Screen::Tracking => {
            state.owner.overview.loading = true;
            vec![UiEffect::LoadOverview]
        }
        Screen::OwnerVehicles => {
            state.owner.vehicles.loading = true;
            vec![UiEffect::LoadVehicles]
        }
        Screen::OwnerBookings => {
            state.owner.bookings.loading = true;
            vec![UiEffect::LoadBookings]
        }
        Screen::Browse => {
            state.renter.browse.loading = true;
            vec![UiEffect::LoadVehicles]
        }
        Screen::RenterBookings => {
            state.renter.bookings.loading = true;
            vec![UiEffect::LoadBookings]
        }
        Screen::Profile => {
            state.profile.loading = true;
            vec![UiEffect::LoadProfile]
        }
        _ => vec![],
    }
}

/// Applies a data result. Failures surface in the status line and leave
/// prior on-screen state untouched.
fn handle_data(state: &mut AppState, event: DataUiEvent) -> Vec<UiEffect> {
    match event {
        DataUiEvent::Vehicles(Ok(items)) => {
            match state.tree() {
                ScreenTree::Owner => state.owner.vehicles.set_items(items),
                ScreenTree::Renter => state.renter.browse.set_items(items),
                ScreenTree::Unauthenticated => {}
            }
            vec![]
        }
        DataUiEvent::Vehicles(Err(message)) => {
            state.owner.vehicles.loading = false;
            state.renter.browse.loading = false;
            state.status.error(message);
            vec![]
        }
        DataUiEvent::VehicleSaved(result) => {
            state.owner.form.busy = false;
            match result {
                Ok(message) => {
                    let effects = if state.screen == Screen::VehicleForm {
                        switch_screen(state, Screen::OwnerVehicles)
                    } else {
                        // Availability toggle from the list: just reload.
                        state.owner.vehicles.loading = true;
                        vec![UiEffect::LoadVehicles]
                    };
                    state.status.info(message);
                    effects
                }
                Err(message) => {
                    state.status.error(message);
                    vec![]
                }
            }
        }
        DataUiEvent::VehicleDeleted(result) => {
            state.owner.pending_delete = None;
            match result {
                Ok(message) => {
                    state.owner.vehicles.loading = true;
                    state.status.info(message);
                    vec![UiEffect::LoadVehicles]
                }
                Err(message) => {
                    state.status.error(message);
                    vec![]
                }
            }
        }
        DataUiEvent::Bookings(Ok(items)) => {
            match state.tree() {
                ScreenTree::Owner => state.owner.bookings.set_items(items),
                ScreenTree::Renter => state.renter.bookings.set_items(items),
                ScreenTree::Unauthenticated => {}
            }
            vec![]
        }
        DataUiEvent::Bookings(Err(message)) => {
            state.owner.bookings.loading = false;
            state.renter.bookings.loading = false;
            state.status.error(message);
            vec![]
        }
        DataUiEvent::BookingCreated(result) => {
            state.renter.form.busy = false;
            match result {
                Ok(message) => {
                    let effects = switch_screen(state, Screen::RenterBookings);
                    state.status.info(message);
                    effects
                }
                Err(message) => {
                    state.status.error(message);
                    vec![]
                }
            }
        }
        DataUiEvent::BookingUpdated(result) => match result {
            Ok(message) => {
                state.status.info(message);
                match state.tree() {
                    ScreenTree::Owner => state.owner.bookings.loading = true,
                    ScreenTree::Renter => state.renter.bookings.loading = true,
                    ScreenTree::Unauthenticated => return vec![],
                }
                vec![UiEffect::LoadBookings]
            }
            Err(message) => {
                state.status.error(message);
                vec![]
            }
        },
        DataUiEvent::Overview(result) => {
            match result {
                Ok((vehicles, bookings)) => state.owner.overview.set(vehicles, bookings),
                Err(message) => {
                    state.owner.overview.loading = false;
                    state.status.error(message);
                }
            }
            vec![]
        }
        DataUiEvent::Profile(result) => {
            state.profile.loading = false;
            match result {
                Ok(overview) => state.profile.overview = Some(overview),
                Err(message) => state.status.error(message),
            }
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use agrent_core::api::LoginOutcome;
    use agrent_core::session::{Role, Session};
    use crossterm::event::KeyEvent;

    use super::*;
    use crate::events::AuthUiEvent;
    use crate::state::Severity;

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::from(code)))
    }

    fn type_str(state: &mut AppState, text: &str) {
        for c in text.chars() {
            update(state, key(KeyCode::Char(c)));
        }
    }

    fn authenticated(role: Role) -> Session {
        Session {
            token: Some("tok".to_string()),
            role: Some(role),
            temp_token: None,
            username: None,
        }
    }

    #[test]
    fn login_submit_emits_login_effect_with_trimmed_credentials() {
        let mut state = AppState::new(Session::default());
        type_str(&mut state, "ravi ");
        update(&mut state, key(KeyCode::Tab));
        type_str(&mut state, "secret");
        let effects = update(&mut state, key(KeyCode::Enter));

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::Login { username, password }]
                if username == "ravi" && password == "secret"
        ));
        assert!(state.auth.login.busy);
    }

    #[test]
    fn empty_login_is_rejected_locally() {
        let mut state = AppState::new(Session::default());
        update(&mut state, key(KeyCode::Tab));
        let effects = update(&mut state, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(matches!(
            state.status.message,
            Some((Severity::Error, _))
        ));
    }

    #[test]
    fn role_needed_outcome_routes_to_role_selection() {
        let mut state = AppState::new(Session::default());
        state.auth.login.busy = true;

        update(
            &mut state,
            UiEvent::Auth(AuthUiEvent::LoginFinished(Ok(
                LoginOutcome::RoleSelectionRequired {
                    username: "ravi".to_string(),
                },
            ))),
        );

        assert_eq!(state.screen, Screen::RoleSelect);
        assert_eq!(state.auth.role_select.username.as_deref(), Some("ravi"));
        assert!(!state.auth.login.busy);
    }

    #[test]
    fn login_error_surfaces_verbatim() {
        let mut state = AppState::new(Session::default());
        update(
            &mut state,
            UiEvent::Auth(AuthUiEvent::LoginFinished(Err(
                "Invalid password!".to_string()
            ))),
        );
        assert_eq!(
            state.status.message,
            Some((Severity::Error, "Invalid password!".to_string()))
        );
        assert_eq!(state.screen, Screen::Login);
    }

    #[test]
    fn session_change_mounts_owner_tree_and_loads_overview() {
        let mut state = AppState::new(Session::default());
        let effects = update(
            &mut state,
            UiEvent::SessionChanged(authenticated(Role::Owner)),
        );

        assert_eq!(state.screen, Screen::OwnerHome);
        assert!(matches!(effects.as_slice(), [UiEffect::LoadOverview]));
        assert!(state.owner.overview.loading);
    }

    #[test]
    fn logout_notification_remounts_login() {
        let mut state = AppState::new(authenticated(Role::Renter));
        assert_eq!(state.screen, Screen::Browse);

        let effects = update(&mut state, UiEvent::SessionChanged(Session::default()));
        assert_eq!(state.screen, Screen::Login);
        assert!(effects.is_empty());
    }

    #[test]
    fn session_change_within_tree_keeps_screen() {
        let mut state = AppState::new(authenticated(Role::Owner));
        state.go_to(Screen::Tracking);

        let effects = update(
            &mut state,
            UiEvent::SessionChanged(authenticated(Role::Owner)),
        );
        assert_eq!(state.screen, Screen::Tracking);
        assert!(effects.is_empty());
    }

    #[test]
    fn failed_fetch_keeps_prior_items() {
        let mut state = AppState::new(authenticated(Role::Renter));
        let vehicle = serde_json::from_value(serde_json::json!({
            "_id": "v1",
            "vehicle_name": "Tractor",
            "type": "tractor",
            "rent_price": 1000.0,
        }))
        .unwrap();
        state.renter.browse.set_items(vec![vehicle]);

        update(
            &mut state,
            UiEvent::Data(DataUiEvent::Vehicles(Err("boom".to_string()))),
        );

        assert_eq!(state.renter.browse.items.len(), 1);
        assert!(!state.renter.browse.loading);
        assert_eq!(
            state.status.message,
            Some((Severity::Error, "boom".to_string()))
        );
    }

    #[test]
    fn tab_switch_refetches_screen_data() {
        let mut state = AppState::new(authenticated(Role::Renter));
        let effects = update(&mut state, key(KeyCode::Tab));

        assert_eq!(state.screen, Screen::RenterBookings);
        assert!(matches!(effects.as_slice(), [UiEffect::LoadBookings]));
        assert!(state.renter.bookings.loading);
    }

    #[test]
    fn profile_logout_key_emits_logout_effect() {
        let mut state = AppState::new(authenticated(Role::Owner));
        state.go_to(Screen::Profile);
        let effects = update(&mut state, key(KeyCode::Char('l')));
        assert!(matches!(effects.as_slice(), [UiEffect::Logout]));
    }

    #[test]
    fn quit_keys_set_should_quit() {
        let mut state = AppState::new(authenticated(Role::Owner));
        update(&mut state, key(KeyCode::Char('q')));
        assert!(state.should_quit);

        // Ctrl+C also quits from a text screen.
        let mut state = AppState::new(Session::default());
        update(
            &mut state,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(state.should_quit);
    }
}
