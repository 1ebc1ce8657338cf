//! Client side of lingobridge
//!
//! [`TranslationController`] owns what the user sees: the text being typed,
//! the selected languages, the last translation, and whether a request is in
//! flight or failed. It talks to the proxy endpoint through a
//! [`TranslationBackend`], normally a [`ProxyClient`].

pub mod controller;
pub mod error;
pub mod proxy_client;

// Integration tests (only available during testing)
#[cfg(test)]
mod integration_tests;

pub use controller::{ControllerOptions, ControllerState, RequestLifecycle, TranslationController};
pub use error::{ClientError, ClientResult};
pub use proxy_client::{ProxyClient, TranslationBackend};
