//! Unauthenticated tree: login, signup, role selection.

mod render;
mod state;
mod update;

pub use render::render;
pub use state::{AuthState, LoginForm, RoleSelect, SignupForm};
pub use update::{handle_event, handle_key};
