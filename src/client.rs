use std::future::Future;

use reqwest::{Method, StatusCode};

use crate::{
    log, AuthCredential, AuthResult, HarnessConfig, HttpClient, NewUser, PagedUserList,
    ReqresError, Result, UpdatedUser, User, UserEnvelope, UserSummary,
};

/// Collection path of the user resource.
pub const USERS_PATH: &str = "/api/users";
/// Registration endpoint.
pub const REGISTER_PATH: &str = "/api/register";
/// Login endpoint.
pub const LOGIN_PATH: &str = "/api/login";

/// Formats the path of a single user.
///
/// Example: `2` → `"/api/users/2"`
pub fn user_path(id: u64) -> String {
    format!("{USERS_PATH}/{id}")
}

/// Formats the path of one page of the user list.
///
/// Example: `2` → `"/api/users?page=2"`
pub fn users_page_path(page: u32) -> String {
    format!("{USERS_PATH}?page={page}")
}

#[derive(Clone, Debug)]
/// Typed client for the user-management API.
///
/// One method per endpoint; every method goes through the shared
/// [`HttpClient`] so status handling and error shapes are identical across
/// endpoints.
pub struct ReqresClient {
    http: HttpClient,
}

impl ReqresClient {
    /// Wraps an already configured [`HttpClient`].
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Creates a client from the harness configuration.
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(HttpClient::from_config(config))
    }

    /// Creates a client from `BASE_URL`, `REQRES_API_KEY` and `CI`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use reqres_harness::ReqresClient;
    ///
    /// let client = ReqresClient::from_env().expect("missing BASE_URL");
    /// ```
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(&HarnessConfig::from_env()?))
    }

    /// Returns a client whose requests also carry `Authorization: Bearer <token>`.
    pub fn with_bearer(&self, token: impl Into<String>) -> Self {
        Self::new(self.http.with_bearer(token))
    }

    /// The underlying wrapper, for raw probes (headers, timing, rate limits).
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Fetches the first page of users.
    pub async fn list_users(&self) -> Result<PagedUserList> {
        self.list_users_page(1).await
    }

    /// Fetches one page of users. Pages start at 1.
    pub async fn list_users_page(&self, page: u32) -> Result<PagedUserList> {
        if page == 0 {
            return Err(ReqresError::InvalidInput(
                "page number must be at least 1".to_owned(),
            ));
        }
        let path = users_page_path(page);
        self.logged(
            Method::GET,
            &path,
            None,
            self.http.get(&path),
            |list: &PagedUserList| format!("page {} of {}", list.page, list.total_pages),
        )
        .await
    }

    /// Walks every page, requesting page `n + 1` after page `n`, and returns
    /// all users in server order.
    ///
    /// The page count comes from the first response. A later page that
    /// echoes a different page number than the one requested is a
    /// [`ReqresError::Parse`]; an empty page ends the walk early.
    pub async fn list_all_users(&self) -> Result<Vec<UserSummary>> {
        let first = self.list_users_page(1).await?;
        let total_pages = first.total_pages;
        let mut users = first.data;
        for page in 2..=total_pages {
            let list = self.list_users_page(page).await?;
            if list.page != page {
                return Err(ReqresError::Parse {
                    message: format!("requested page {page}, server answered page {}", list.page),
                    body: String::new(),
                });
            }
            if list.data.is_empty() {
                break;
            }
            users.extend(list.data);
        }
        Ok(users)
    }

    /// Fetches one user. Unknown ids fail with a 404 `RequestFailed`.
    pub async fn get_user(&self, id: u64) -> Result<UserEnvelope> {
        ensure_positive_id(id)?;
        let path = user_path(id);
        self.logged(
            Method::GET,
            &path,
            None,
            self.http.get(&path),
            |user: &UserEnvelope| format!("user {}", user.data.id),
        )
        .await
    }

    /// Creates a user; the server assigns `id` and `createdAt`.
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.logged(
            Method::POST,
            USERS_PATH,
            Some(user),
            self.http.post(USERS_PATH, user),
            |created: &User| format!("id {}", created.id.as_deref().unwrap_or("<none>")),
        )
        .await
    }

    /// Replaces a user's name and job; the server assigns `updatedAt`.
    pub async fn update_user(&self, id: u64, user: &NewUser) -> Result<UpdatedUser> {
        ensure_positive_id(id)?;
        let path = user_path(id);
        self.logged(
            Method::PUT,
            &path,
            Some(user),
            self.http.put(&path, user),
            |updated: &UpdatedUser| format!("updatedAt {}", updated.updated_at),
        )
        .await
    }

    /// Deletes a user and returns the response status (204 on success).
    ///
    /// The body is never parsed and a non-2xx status is returned, not raised;
    /// only transport failures produce an error.
    pub async fn delete_user(&self, id: u64) -> Result<StatusCode> {
        ensure_positive_id(id)?;
        let path = user_path(id);
        self.logged(
            Method::DELETE,
            &path,
            None,
            async {
                self.http
                    .execute(self.http.request(Method::DELETE, &path))
                    .await
                    .map(|response| response.status)
            },
            |status: &StatusCode| format!("status {}", status.as_u16()),
        )
        .await
    }

    /// Registers a user. A missing password fails with a 400 `RequestFailed`.
    pub async fn register(&self, credential: &AuthCredential) -> Result<AuthResult> {
        self.logged(
            Method::POST,
            REGISTER_PATH,
            Some(credential),
            self.http.post(REGISTER_PATH, credential),
            |result: &AuthResult| match result.id {
                Some(id) => format!("id {id}"),
                None => "no id".to_owned(),
            },
        )
        .await
    }

    /// Logs in. Invalid credentials or missing fields fail with a 400
    /// `RequestFailed`.
    pub async fn login(&self, credential: &AuthCredential) -> Result<AuthResult> {
        self.logged(
            Method::POST,
            LOGIN_PATH,
            Some(credential),
            self.http.post(LOGIN_PATH, credential),
            |result: &AuthResult| {
                if result.token.is_some() {
                    "token issued".to_owned()
                } else {
                    "no token".to_owned()
                }
            },
        )
        .await
    }

    /// Logs in and returns the token, or `None` when the server rejects the
    /// credentials with any non-2xx status.
    pub async fn login_token(&self, email: &str, password: &str) -> Result<Option<String>> {
        match self.login(&AuthCredential::new(email, password)).await {
            Ok(result) => Ok(result.token),
            Err(ReqresError::RequestFailed { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn logged<T, F, D>(
        &self,
        method: Method,
        path: &str,
        payload: Option<log::Payload<'_>>,
        call: F,
        describe: D,
    ) -> Result<T>
    where
        F: Future<Output = Result<T>>,
        D: FnOnce(&T) -> String,
    {
        log::request_started(&method, path, payload);
        match call.await {
            Ok(value) => {
                log::request_succeeded(&method, path, &describe(&value));
                Ok(value)
            }
            Err(err) => {
                log::request_failed(&method, path, &err);
                Err(err)
            }
        }
    }
}

fn ensure_positive_id(id: u64) -> Result<()> {
    if id == 0 {
        return Err(ReqresError::InvalidInput(
            "user id must be a positive integer".to_owned(),
        ));
    }
    Ok(())
}
