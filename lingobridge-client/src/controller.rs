//! Translation client controller
//!
//! Turns user edits (text, source language, target language) into at most one
//! authoritative request at a time and folds its outcome back into the state a
//! front end renders.
//!
//! Every issued request is tagged with a monotonically increasing sequence
//! number. A completion is applied only if its tag still equals the latest
//! issued one; anything older was superseded and is dropped without touching
//! state. There is no cancellation token: the upstream call of a superseded
//! request still runs to completion, its answer is just never observed.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lingobridge_client::{ControllerOptions, ProxyClient, TranslationController};
//!
//! let backend = Arc::new(ProxyClient::new("http://127.0.0.1:3000")?);
//! let controller = TranslationController::new(backend, ControllerOptions::default());
//! let mut updates = controller.subscribe();
//!
//! controller.update_text("Hello");           // translates after the debounce window
//! updates.changed().await?;                 // Pending
//! updates.changed().await?;                 // Succeeded or Failed
//! println!("{}", controller.translated_text());
//! ```

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use lingobridge::{LanguageCode, TranslationRequest, TranslationResult, is_eligible};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

use crate::error::ClientResult;
use crate::proxy_client::TranslationBackend;

/// Where the most recent request stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestLifecycle {
    Idle,
    Pending,
    Succeeded,
    /// Carries the message shown to the user
    Failed(String),
}

/// Everything a front end needs to render the translator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerState {
    pub text: String,
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
    /// Last successful result; survives later failures
    pub result: Option<TranslationResult>,
    pub lifecycle: RequestLifecycle,
    /// Tag of the most recently issued request, 0 before the first one
    pub sequence: u64,
}

impl ControllerState {
    pub fn request_eligible(&self) -> bool {
        is_eligible(&self.text, self.target_language)
    }

    pub fn translated_text(&self) -> &str {
        self.result
            .as_ref()
            .map_or("", |result| result.translated_text.as_str())
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle == RequestLifecycle::Pending
    }

    pub fn error(&self) -> Option<&str> {
        match &self.lifecycle {
            RequestLifecycle::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Language the provider detected, shown only while the source is `auto`
    /// and the displayed result is current.
    pub fn detected_source_language(&self) -> Option<&str> {
        if !self.source_language.is_auto() || self.lifecycle != RequestLifecycle::Succeeded {
            return None;
        }
        self.result
            .as_ref()
            .and_then(|result| result.detected_source_language.as_deref())
    }

    fn request(&self) -> Option<TranslationRequest> {
        TranslationRequest::new(
            self.text.clone(),
            self.source_language,
            self.target_language,
        )
    }
}

/// Initial state and timing of a controller
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Quiet period after the last edit before a translation is issued
    pub debounce: Duration,
    pub text: String,
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            debounce: TranslationController::DEFAULT_DEBOUNCE,
            text: String::new(),
            source_language: LanguageCode::Auto,
            target_language: LanguageCode::Spanish,
        }
    }
}

struct Shared {
    backend: Arc<dyn TranslationBackend>,
    state: watch::Sender<ControllerState>,
    debounce: Duration,
    timer: Mutex<Option<AbortHandle>>,
}

impl Shared {
    /// Apply a completion if it belongs to the latest request
    fn complete(&self, sequence: u64, outcome: ClientResult<TranslationResult>) {
        self.state.send_if_modified(|state| {
            if state.sequence != sequence {
                debug!(
                    "Dropping response #{} superseded by #{}",
                    sequence, state.sequence
                );
                return false;
            }

            match outcome {
                Ok(result) => {
                    debug!("Request #{} succeeded via {}", sequence, result.provider_name);
                    state.result = Some(result);
                    state.lifecycle = RequestLifecycle::Succeeded;
                }
                Err(err) => {
                    warn!("Request #{} failed: {}", sequence, err);
                    state.lifecycle = RequestLifecycle::Failed(err.to_string());
                }
            }
            true
        });
    }

    fn disarm_timer(&self) -> std::sync::MutexGuard<'_, Option<AbortHandle>> {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            handle.abort();
        }
        timer
    }

    /// Disarm the timer, reporting whether it had not fired yet
    fn cancel_pending_timer(&self) -> bool {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        match timer.take() {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }
}

/// Debounced, self-superseding translation controller
///
/// Cheap to clone; clones share state. Setters spawn timers and `translate`
/// spawns request tasks, so the controller must be driven from inside a tokio
/// runtime.
#[derive(Clone)]
pub struct TranslationController {
    shared: Arc<Shared>,
}

impl TranslationController {
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

    pub fn new(backend: Arc<dyn TranslationBackend>, options: ControllerOptions) -> Self {
        let (state, _) = watch::channel(ControllerState {
            text: options.text,
            source_language: options.source_language,
            target_language: options.target_language,
            result: None,
            lifecycle: RequestLifecycle::Idle,
            sequence: 0,
        });

        Self {
            shared: Arc::new(Shared {
                backend,
                state,
                debounce: options.debounce,
                timer: Mutex::new(None),
            }),
        }
    }

    /// Receive every visible state change
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.shared.state.subscribe()
    }

    pub fn snapshot(&self) -> ControllerState {
        self.shared.state.borrow().clone()
    }

    pub fn text(&self) -> String {
        self.shared.state.borrow().text.clone()
    }

    pub fn source_language(&self) -> LanguageCode {
        self.shared.state.borrow().source_language
    }

    pub fn target_language(&self) -> LanguageCode {
        self.shared.state.borrow().target_language
    }

    pub fn result(&self) -> Option<TranslationResult> {
        self.shared.state.borrow().result.clone()
    }

    pub fn translated_text(&self) -> String {
        self.shared.state.borrow().translated_text().to_string()
    }

    pub fn lifecycle(&self) -> RequestLifecycle {
        self.shared.state.borrow().lifecycle.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.shared.state.borrow().error().map(str::to_string)
    }

    pub fn detected_source_language(&self) -> Option<String> {
        self.shared
            .state
            .borrow()
            .detected_source_language()
            .map(str::to_string)
    }

    /// True iff the current text is not blank and the target is not `auto`
    pub fn request_eligible(&self) -> bool {
        self.shared.state.borrow().request_eligible()
    }

    pub fn update_text(&self, text: impl Into<String>) {
        let text = text.into();
        let changed = self.shared.state.send_if_modified(|state| {
            if state.text == text {
                return false;
            }
            state.text = text;
            true
        });
        if changed {
            self.schedule_translation();
        }
    }

    pub fn update_source_language(&self, code: LanguageCode) {
        let changed = self.shared.state.send_if_modified(|state| {
            let changed = state.source_language != code;
            state.source_language = code;
            changed
        });
        if changed {
            self.schedule_translation();
        }
    }

    pub fn update_target_language(&self, code: LanguageCode) {
        let changed = self.shared.state.send_if_modified(|state| {
            let changed = state.target_language != code;
            state.target_language = code;
            changed
        });
        if changed {
            self.schedule_translation();
        }
    }

    /// Exchange source and target, carrying the translation over as new input
    ///
    /// Does nothing while the source is `auto`, which cannot be a target.
    pub fn swap(&self) {
        let swapped = self.shared.state.send_if_modified(|state| {
            if state.source_language.is_auto() {
                return false;
            }
            std::mem::swap(&mut state.source_language, &mut state.target_language);
            if let Some(result) = &state.result {
                if !result.translated_text.is_empty() {
                    state.text = result.translated_text.clone();
                }
            }
            true
        });
        if swapped {
            self.schedule_translation();
        }
    }

    /// Restart the debounce window
    ///
    /// Any pending timer is disarmed. A new one is armed only if the current
    /// state is eligible, so an edit that makes the input blank also stops a
    /// pending translation from firing.
    pub fn schedule_translation(&self) {
        let mut timer = self.shared.disarm_timer();
        if !self.request_eligible() {
            return;
        }

        let controller = self.clone();
        let delay = self.shared.debounce;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            controller.issue();
        });
        *timer = Some(task.abort_handle());
    }

    /// Issue a request for the current state right away
    ///
    /// Supersedes any request still in flight and disarms the debounce timer.
    /// Returns `None` without issuing anything if the state is not eligible.
    /// The returned handle completes once the outcome has been applied or
    /// dropped.
    pub fn translate(&self) -> Option<JoinHandle<()>> {
        drop(self.shared.disarm_timer());
        self.issue()
    }

    /// Issue a still-debounced edit now and wait for the latest request to settle
    ///
    /// Used when no further edits can arrive, e.g. once a front end's input is
    /// closed. Returns at once if nothing is armed or in flight.
    pub async fn flush(&self) {
        if self.shared.cancel_pending_timer() {
            self.issue();
        }
        let mut updates = self.subscribe();
        let _ = updates.wait_for(|state| !state.is_loading()).await;
    }

    fn issue(&self) -> Option<JoinHandle<()>> {
        let mut issued = None;
        self.shared.state.send_if_modified(|state| {
            let Some(request) = state.request() else {
                return false;
            };
            state.sequence += 1;
            state.lifecycle = RequestLifecycle::Pending;
            issued = Some((state.sequence, request));
            true
        });
        let (sequence, request) = issued?;

        debug!(
            "Issuing request #{} ({} → {})",
            sequence,
            request.source_language(),
            request.target_language()
        );

        let shared = Arc::clone(&self.shared);
        Some(tokio::spawn(async move {
            let outcome = shared.backend.translate(&request).await;
            shared.complete(sequence, outcome);
        }))
    }
}
