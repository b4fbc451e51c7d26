//! Aula API Library Crate
//!
//! This library contains all the logic for the Aula web service: the
//! application state, API handlers, request/response models, and routing.
//! The `api` binary is a thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
