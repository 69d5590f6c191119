//! Application state composition and the screen-tree gate.
//!
//! ## State hierarchy
//!
//! ```text
//! AppState
//! ├── session: Session        (snapshot, refreshed on store notifications)
//! ├── screen: Screen          (current screen within the active tree)
//! ├── auth: AuthState         (login/signup/role-selection forms)
//! ├── owner: OwnerState       (dashboard, fleet, bookings, tracking)
//! ├── renter: RenterState     (browse, booking form, own bookings)
//! ├── profile: ProfileState   (shared by both authenticated trees)
//! └── status: StatusLine      (transient error/info banner)
//! ```
//!
//! The gate is [`ScreenTree::for_session`]: one of three screen trees is
//! rendered depending on the presence/value of token and role. It is
//! re-evaluated on every session change notification; switching trees
//! resets the screen to that tree's home.

use agrent_core::session::{Role, Session};

use crate::effects::UiEffect;
use crate::features::auth::AuthState;
use crate::features::owner::OwnerState;
use crate::features::profile::ProfileState;
use crate::features::renter::RenterState;

/// Which of the three screen trees is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTree {
    Unauthenticated,
    Owner,
    Renter,
}

impl ScreenTree {
    /// The gate: decides the visible tree from session state.
    ///
    /// No token always means unauthenticated, regardless of any leftover
    /// role value. A token with any role other than `owner` (including a
    /// missing role) lands in the renter tree.
    pub fn for_session(session: &Session) -> Self {
        if session.token.is_none() {
            return ScreenTree::Unauthenticated;
        }
        match session.role {
            Some(Role::Owner) => ScreenTree::Owner,
            _ => ScreenTree::Renter,
        }
    }

    /// First screen shown when entering this tree.
    pub fn home(self) -> Screen {
        match self {
            ScreenTree::Unauthenticated => Screen::Login,
            ScreenTree::Owner => Screen::OwnerHome,
            ScreenTree::Renter => Screen::Browse,
        }
    }

    /// Tab bar entries for this tree (screens reachable directly).
    pub fn tabs(self) -> &'static [(Screen, &'static str)] {
        match self {
            ScreenTree::Unauthenticated => &[],
            ScreenTree::Owner => &[
                (Screen::OwnerHome, "Home"),
                (Screen::OwnerVehicles, "My Vehicles"),
                (Screen::OwnerBookings, "Bookings"),
                (Screen::Tracking, "Tracking"),
                (Screen::Profile, "Profile"),
            ],
            ScreenTree::Renter => &[
                (Screen::Browse, "Browse"),
                (Screen::RenterBookings, "My Bookings"),
                (Screen::Profile, "Profile"),
            ],
        }
    }

    /// Data load issued when this tree is entered (or on startup).
    pub fn entry_effects(self) -> Vec<UiEffect> {
        match self {
            ScreenTree::Unauthenticated => vec![],
            ScreenTree::Owner => vec![UiEffect::LoadOverview],
            ScreenTree::Renter => vec![UiEffect::LoadVehicles],
        }
    }
}

/// Individual screens across all trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    // Unauthenticated tree
    Login,
    Signup,
    RoleSelect,
    // Owner tree
    OwnerHome,
    OwnerVehicles,
    VehicleForm,
    OwnerBookings,
    Tracking,
    // Renter tree
    Browse,
    BookingForm,
    RenterBookings,
    // Both authenticated trees
    Profile,
}

impl Screen {
    /// Screens whose keyboard input goes to a text form first.
    pub fn captures_text(self) -> bool {
        matches!(
            self,
            Screen::Login | Screen::Signup | Screen::VehicleForm | Screen::BookingForm
        )
    }
}

/// Severity of the status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Transient one-line banner at the bottom of the screen.
///
/// Replaces the mobile app's alert dialogs: errors carry the server message
/// or a generic fallback, successes the server confirmation.
#[derive(Debug, Default)]
pub struct StatusLine {
    pub message: Option<(Severity, String)>,
}

impl StatusLine {
    pub fn info(&mut self, text: impl Into<String>) {
        self.message = Some((Severity::Info, text.into()));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.message = Some((Severity::Error, text.into()));
    }

    pub fn clear(&mut self) {
        self.message = None;
    }
}

/// Combined application state.
pub struct AppState {
    pub should_quit: bool,
    pub session: Session,
    pub screen: Screen,
    pub auth: AuthState,
    pub owner: OwnerState,
    pub renter: RenterState,
    pub profile: ProfileState,
    pub status: StatusLine,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        let screen = ScreenTree::for_session(&session).home();
        Self {
            should_quit: false,
            session,
            screen,
            auth: AuthState::default(),
            owner: OwnerState::default(),
            renter: RenterState::default(),
            profile: ProfileState::default(),
            status: StatusLine::default(),
        }
    }

    /// The tree currently mounted.
    pub fn tree(&self) -> ScreenTree {
        ScreenTree::for_session(&self.session)
    }

    /// Initial data load for the tree the app starts in.
    pub fn startup_effects(&self) -> Vec<UiEffect> {
        self.tree().entry_effects()
    }

    /// Jumps to a screen, clearing any stale status banner and pending
    /// confirmation.
    pub fn go_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.status.clear();
        self.owner.pending_delete = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: Option<&str>, role: Option<Role>) -> Session {
        Session {
            token: token.map(str::to_string),
            role,
            temp_token: None,
            username: None,
        }
    }

    #[test]
    fn no_token_renders_unauthenticated_regardless_of_role() {
        for role in [None, Some(Role::Owner), Some(Role::Renter)] {
            let tree = ScreenTree::for_session(&session(None, role));
            assert_eq!(tree, ScreenTree::Unauthenticated);
        }
    }

    #[test]
    fn owner_role_renders_owner_tree() {
        let tree = ScreenTree::for_session(&session(Some("tok"), Some(Role::Owner)));
        assert_eq!(tree, ScreenTree::Owner);
        assert_eq!(tree.home(), Screen::OwnerHome);
    }

    #[test]
    fn non_owner_roles_default_to_renter_tree() {
        for role in [Some(Role::Renter), None] {
            let tree = ScreenTree::for_session(&session(Some("tok"), role));
            assert_eq!(tree, ScreenTree::Renter);
        }
    }

    #[test]
    fn tabs_belong_to_their_tree() {
        assert!(ScreenTree::Unauthenticated.tabs().is_empty());
        assert!(
            ScreenTree::Owner
                .tabs()
                .iter()
                .any(|(screen, _)| *screen == Screen::Tracking)
        );
        assert!(
            ScreenTree::Renter
                .tabs()
                .iter()
                .all(|(screen, _)| *screen != Screen::Tracking)
        );
    }
}
