//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the shared,
//! clonable services built once at startup.

use crate::config::Config;
use aula_core::{relay::AnswerRelay, review::ReviewEngine};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
/// All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<AnswerRelay>,
    pub engine: Arc<ReviewEngine>,
    pub config: Arc<Config>,
}
