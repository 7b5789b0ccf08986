//! `reqres-harness` drives a reqres-style user-management API from tests.
//!
//! The crate provides:
//! - [`HttpClient`], which turns every exchange into a parsed value or a
//!   [`ReqresError`] carrying the status code and raw body;
//! - [`ReqresClient`], one typed method per endpoint
//!   ([`ReqresClient::list_users_page`], [`ReqresClient::get_user`],
//!   [`ReqresClient::create_user`], [`ReqresClient::update_user`],
//!   [`ReqresClient::delete_user`], [`ReqresClient::register`],
//!   [`ReqresClient::login`]);
//! - [`with_retry`], a bounded retry for network failures and 5xx responses;
//! - [`assertions`] and [`fixtures`] for writing the checks themselves.

pub mod assertions;
mod client;
mod config;
mod error;
pub mod fixtures;
mod http;
mod log;
mod options;
mod retry;
mod types;
mod wire;

pub use client::{
    user_path, users_page_path, ReqresClient, LOGIN_PATH, REGISTER_PATH, USERS_PATH,
};
pub use config::{HarnessConfig, API_KEY_VAR, BASE_URL_VAR, CI_VAR};
pub use error::ReqresError;
pub use http::{join_url, HttpClient, RawResponse, API_KEY_HEADER};
pub use options::ClientOptions;
pub use retry::{
    rate_limit_delay, wait_for_rate_limit, with_retry, HasStatus, RetryPolicy, RetryableError,
    DEFAULT_RETRY_AFTER,
};
pub use types::{
    AuthCredential, AuthResult, NewUser, PagedUserList, UpdatedUser, User, UserEnvelope,
    UserSummary,
};

pub type Result<T> = std::result::Result<T, ReqresError>;
