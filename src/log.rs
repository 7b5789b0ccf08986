//! Request and assertion events.
//!
//! Emitted through `tracing` when the `tracing` feature is enabled (default);
//! compiled to no-ops otherwise.

use std::fmt;

use reqwest::Method;

use crate::ReqresError;

/// Request body rendered into the start event.
pub(crate) type Payload<'a> = &'a (dyn fmt::Debug + Sync);

#[cfg(feature = "tracing")]
pub(crate) fn request_started(method: &Method, path: &str, payload: Option<Payload<'_>>) {
    match payload {
        Some(payload) => tracing::info!(%method, path, ?payload, "request started"),
        None => tracing::info!(%method, path, "request started"),
    }
}

#[cfg(feature = "tracing")]
pub(crate) fn request_succeeded(method: &Method, path: &str, detail: &str) {
    tracing::info!(%method, path, detail, "request succeeded");
}

#[cfg(feature = "tracing")]
pub(crate) fn request_failed(method: &Method, path: &str, error: &ReqresError) {
    tracing::error!(%method, path, %error, "request failed");
}

#[cfg(feature = "tracing")]
pub(crate) fn check(message: fmt::Arguments<'_>) {
    tracing::info!("{message}");
}

#[cfg(feature = "tracing")]
pub(crate) fn check_failed(message: fmt::Arguments<'_>) {
    tracing::error!("{message}");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn request_started(_: &Method, _: &str, _: Option<Payload<'_>>) {}

#[cfg(not(feature = "tracing"))]
pub(crate) fn request_succeeded(_: &Method, _: &str, _: &str) {}

#[cfg(not(feature = "tracing"))]
pub(crate) fn request_failed(_: &Method, _: &str, _: &ReqresError) {}

#[cfg(not(feature = "tracing"))]
pub(crate) fn check(_: fmt::Arguments<'_>) {}

#[cfg(not(feature = "tracing"))]
pub(crate) fn check_failed(_: fmt::Arguments<'_>) {}
