//! Profile screen reducer.

use crossterm::event::{KeyCode, KeyEvent};

use crate::effects::UiEffect;
use crate::state::AppState;

/// Handles a key press on the profile screen.
pub fn handle_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('r') => {
            state.profile.loading = true;
            vec![UiEffect::LoadProfile]
        }
        KeyCode::Char('l') => {
            state.status.info("Logging out...");
            vec![UiEffect::Logout]
        }
        _ => vec![],
    }
}
