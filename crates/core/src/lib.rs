//! Domain logic for the Aula teaching-assistant relay.
//!
//! The HTTP service in `services/api` is a thin layer over these modules:
//! the corpus loader, the prompt composer, the completion-provider client,
//! the review-session engine, and the direct-answer relay.

pub mod corpus;
pub mod coverage;
pub mod error;
pub mod llm_client;
pub mod prompt;
pub mod relay;
pub mod review;
pub mod session;
pub mod sources;
