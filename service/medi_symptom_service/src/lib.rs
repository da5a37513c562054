//! Symptom checker service: request handling over the loaded artifacts
//!
//! [`SymptomChecker`] owns the immutable tables and classifier pipeline. The
//! HTTP routes and the CLI both go through [`SymptomChecker::check`].

pub mod checker;
pub mod report;
pub mod request;
pub mod routes;

pub use checker::{CheckError, LoadError, SymptomChecker};
pub use request::{CheckResponse, SymptomRequest, DEFAULT_TOPK};
pub use routes::router;
