//! HTTP client for the KoBoToolbox submission API.

pub mod client;

pub use client::{KoboClient, SubmissionOutcome};
