//! Auth feature reducer.
//!
//! Key handling for the unauthenticated screens and processing of auth
//! flow results. Login routes the role-needed outcome into role selection;
//! every other failure surfaces verbatim in the status line.

use agrent_core::api::{LoginOutcome, Registration};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::AuthUiEvent;
use crate::state::{AppState, Screen};

use super::state::{LoginForm, SignupForm};

/// Handles a key press on one of the unauthenticated screens.
pub fn handle_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    match state.screen {
        Screen::Login => login_key(state, key),
        Screen::Signup => signup_key(state, key),
        Screen::RoleSelect => role_select_key(state, key),
        _ => vec![],
    }
}

fn login_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    let form = &mut state.auth.login;
    if form.busy {
        return vec![];
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('n') {
        state.go_to(Screen::Signup);
        return vec![];
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.focus = (form.focus + 1) % LoginForm::FIELD_COUNT;
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = (form.focus + LoginForm::FIELD_COUNT - 1) % LoginForm::FIELD_COUNT;
            vec![]
        }
        KeyCode::Enter => {
            if form.focus + 1 < LoginForm::FIELD_COUNT {
                form.focus += 1;
                return vec![];
            }
            submit_login(state)
        }
        _ => {
            form.focused_field_mut().handle_key(key);
            vec![]
        }
    }
}

fn submit_login(state: &mut AppState) -> Vec<UiEffect> {
    let form = &mut state.auth.login;
    let username = form.username.trimmed().to_string();
    let password = form.password.trimmed().to_string();
    if username.is_empty() || password.is_empty() {
        state
            .status
            .error("Please enter both username and password.");
        return vec![];
    }
    form.busy = true;
    state.status.info("Logging in...");
    vec![UiEffect::Login {
        username,
        password,
    }]
}

fn signup_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    let form = &mut state.auth.signup;
    if form.busy {
        return vec![];
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('l') {
        state.go_to(Screen::Login);
        return vec![];
    }

    match key.code {
        KeyCode::Esc => {
            state.go_to(Screen::Login);
            vec![]
        }
        KeyCode::Tab | KeyCode::Down => {
            form.focus = (form.focus + 1) % SignupForm::FIELD_COUNT;
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = (form.focus + SignupForm::FIELD_COUNT - 1) % SignupForm::FIELD_COUNT;
            vec![]
        }
        KeyCode::Enter => {
            if form.focus + 1 < SignupForm::FIELD_COUNT {
                form.focus += 1;
                return vec![];
            }
            submit_signup(state)
        }
        _ => {
            form.focused_field_mut().handle_key(key);
            vec![]
        }
    }
}

fn submit_signup(state: &mut AppState) -> Vec<UiEffect> {
    let form = &mut state.auth.signup;
    if !form.is_complete() {
        state.status.error("Please fill in all fields.");
        return vec![];
    }
    let registration = Registration {
        username: form.username.trimmed().to_string(),
        password: form.password.trimmed().to_string(),
        fullname: form.fullname.trimmed().to_string(),
        phone: form.phone.trimmed().to_string(),
        address: form.address.trimmed().to_string(),
    };
    form.busy = true;
    state.status.info("Creating account...");
    vec![UiEffect::Signup {
        registration,
    }]
}

fn role_select_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    let select = &mut state.auth.role_select;
    if select.busy {
        return vec![];
    }

    match key.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            select.toggle();
            vec![]
        }
        KeyCode::Esc => {
            state.go_to(Screen::Login);
            vec![]
        }
        KeyCode::Enter => {
            select.busy = true;
            let role = select.selected;
            state.status.info("Saving your role...");
            vec![UiEffect::SelectRole {
                role,
            }]
        }
        _ => vec![],
    }
}

/// Processes an auth flow result.
pub fn handle_event(state: &mut AppState, event: AuthUiEvent) -> Vec<UiEffect> {
    match event {
        AuthUiEvent::LoginFinished(result) => {
            state.auth.login.busy = false;
            match result {
                Ok(LoginOutcome::Authenticated { .. }) => {
                    // The session change notification mounts the new tree.
                    state.status.info("Login successful!");
                }
                Ok(LoginOutcome::RoleSelectionRequired { username }) => {
                    state.auth.role_select.username = Some(username);
                    state.go_to(Screen::RoleSelect);
                    state.status.info("Please select your role to continue.");
                }
                Err(message) => state.status.error(message),
            }
            vec![]
        }
        AuthUiEvent::SignupFinished(result) => {
            state.auth.signup.busy = false;
            match result {
                Ok(message) => {
                    let username = state.auth.signup.username.trimmed().to_string();
                    state.auth.role_select.username = Some(username);
                    state.go_to(Screen::RoleSelect);
                    state.status.info(message);
                }
                Err(message) => state.status.error(message),
            }
            vec![]
        }
        AuthUiEvent::RoleSelected(result) => {
            state.auth.role_select.busy = false;
            match result {
                Ok(message) => state.status.info(message),
                Err(message) => state.status.error(message),
            }
            vec![]
        }
    }
}
