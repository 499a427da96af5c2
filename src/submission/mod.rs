//! Brief submission: delivery to a backend with a preview-mode fallback.

pub mod client;

pub use client::{HttpSubmissionClient, SubmissionClient, SubmissionMode, SubmissionResult};
