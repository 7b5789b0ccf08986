//! Canned payloads for the user and auth endpoints.

use chrono::Utc;

use crate::{AuthCredential, NewUser};

/// Registered account that exists but has no password on file.
pub const EXISTING_EMAIL: &str = "sydney@fife";
/// Account unknown to the server.
pub const INVALID_EMAIL: &str = "wrong@reqres.in";
/// Account accepted by both register and login.
pub const DEFAULT_EMAIL: &str = "eve.holt@reqres.in";
pub const DEFAULT_PASSWORD: &str = "cityslicka";

/// Error text returned when register/login omit the password.
pub const MISSING_PASSWORD: &str = "Missing password";

pub fn alice() -> NewUser {
    NewUser::new("Alice", "QA")
}

pub fn bob() -> NewUser {
    NewUser::new("Bob", "Developer")
}

/// A fresh `{name, job}` payload; the name is unique per millisecond.
pub fn create_user_payload() -> NewUser {
    NewUser::new(format!("User_{}", Utc::now().timestamp_millis()), "Tester")
}

/// Credentials of the default account. Adjust with
/// [`AuthCredential::with_email`], [`AuthCredential::with_password`] or
/// [`AuthCredential::without_password`].
pub fn auth_data() -> AuthCredential {
    AuthCredential::new(DEFAULT_EMAIL, DEFAULT_PASSWORD)
}
