//! Auth flow form state.

use agrent_core::session::Role;

use crate::common::Field;

/// State for the three unauthenticated screens.
#[derive(Debug, Default)]
pub struct AuthState {
    pub login: LoginForm,
    pub signup: SignupForm,
    pub role_select: RoleSelect,
}

/// Login form: username + password.
#[derive(Debug)]
pub struct LoginForm {
    pub username: Field,
    pub password: Field,
    pub focus: usize,
    pub busy: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: Field::new(),
            password: Field::masked(),
            focus: 0,
            busy: false,
        }
    }
}

impl LoginForm {
    pub const FIELD_COUNT: usize = 2;

    pub fn focused_field_mut(&mut self) -> &mut Field {
        match self.focus {
            0 => &mut self.username,
            _ => &mut self.password,
        }
    }
}

/// Signup form, mirroring the server's required registration fields.
#[derive(Debug)]
pub struct SignupForm {
    pub username: Field,
    pub password: Field,
    pub fullname: Field,
    pub phone: Field,
    pub address: Field,
    pub focus: usize,
    pub busy: bool,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            username: Field::new(),
            password: Field::masked(),
            fullname: Field::new(),
            phone: Field::new(),
            address: Field::new(),
            focus: 0,
            busy: false,
        }
    }
}

impl SignupForm {
    pub const FIELD_COUNT: usize = 5;
    pub const LABELS: [&'static str; Self::FIELD_COUNT] =
        ["Username", "Password", "Full name", "Phone", "Address"];

    pub fn field(&self, index: usize) -> &Field {
        match index {
            0 => &self.username,
            1 => &self.password,
            2 => &self.fullname,
            3 => &self.phone,
            _ => &self.address,
        }
    }

    pub fn focused_field_mut(&mut self) -> &mut Field {
        match self.focus {
            0 => &mut self.username,
            1 => &mut self.password,
            2 => &mut self.fullname,
            3 => &mut self.phone,
            _ => &mut self.address,
        }
    }

    /// True when every required field has content.
    pub fn is_complete(&self) -> bool {
        (0..Self::FIELD_COUNT).all(|i| !self.field(i).trimmed().is_empty())
    }
}

/// Role-selection step between a "role needed" login (or signup) and the
/// final token exchange.
#[derive(Debug)]
pub struct RoleSelect {
    pub selected: Role,
    pub username: Option<String>,
    pub busy: bool,
}

impl Default for RoleSelect {
    fn default() -> Self {
        Self {
            selected: Role::Renter,
            username: None,
            busy: false,
        }
    }
}

impl RoleSelect {
    pub fn toggle(&mut self) {
        self.selected = match self.selected {
            Role::Owner => Role::Renter,
            Role::Renter => Role::Owner,
        };
    }
}
