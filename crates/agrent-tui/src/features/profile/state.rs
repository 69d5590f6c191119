//! Profile screen state.

use crate::events::ProfileOverview;

/// Profile plus account counts; all three fetches land together.
#[derive(Debug, Default)]
pub struct ProfileState {
    pub overview: Option<ProfileOverview>,
    pub loading: bool,
}
