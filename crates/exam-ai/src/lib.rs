//! Grading core for AI-assisted technical hiring exams.
//!
//! The library owns the request-scoped grading pipeline: prompt construction
//! for the remote model, best-effort extraction of its JSON verdict, a
//! deterministic fallback scorer for when the remote path is unavailable, and
//! report aggregation. Transport, persistence, and CLI surfaces live in the
//! `exam-ai-api` service crate.

pub mod config;
pub mod error;
pub mod grading;
pub mod telemetry;
