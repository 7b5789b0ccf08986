use std::fmt;

use serde::{Deserialize, Serialize};

/// A user record as returned by create (and echoed by update).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub job: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request payload for creating or updating a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub job: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
        }
    }

    /// Same name, different job.
    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = job.into();
        self
    }
}

/// Response of `PUT /api/users/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    pub updated_at: String,
}

/// A user record as listed by the directory endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

/// Single-record envelope returned by `GET /api/users/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserEnvelope {
    pub data: UserSummary,
}

/// One page of `GET /api/users?page={n}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PagedUserList {
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub data: Vec<UserSummary>,
}

impl PagedUserList {
    /// Whether a page after this one exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Payload for register and login.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AuthCredential {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCredential")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AuthCredential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Some(password.into()),
        }
    }

    /// Credential with no password field at all.
    pub fn email_only(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn without_password(mut self) -> Self {
        self.password = None;
        self
    }
}

/// Result of register or login.
#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
pub struct AuthResult {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{AuthCredential, PagedUserList, User};

    #[test]
    fn credential_without_password_omits_field() {
        let body = serde_json::to_value(AuthCredential::email_only("sydney@fife"))
            .expect("credential must serialize");
        assert_eq!(body, serde_json::json!({ "email": "sydney@fife" }));
    }

    #[test]
    fn credential_debug_redacts_password() {
        let debug = format!("{:?}", AuthCredential::new("eve.holt@reqres.in", "cityslicka"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("cityslicka"));
    }

    #[test]
    fn created_user_uses_camel_case_timestamps() {
        let user: User = serde_json::from_str(
            r#"{"name":"Alice","job":"QA","id":"42","createdAt":"2026-01-01T10:00:00.000Z"}"#,
        )
        .expect("user must parse");
        assert_eq!(user.id.as_deref(), Some("42"));
        assert_eq!(user.created_at.as_deref(), Some("2026-01-01T10:00:00.000Z"));
        assert_eq!(user.updated_at, None);
    }

    #[test]
    fn last_page_has_no_next() {
        let page: PagedUserList = serde_json::from_str(
            r#"{"page":2,"per_page":6,"total":12,"total_pages":2,"data":[]}"#,
        )
        .expect("page must parse");
        assert!(!page.has_next());
    }
}
