//! Shared library for the course platform Lambdas and scripts.
//!
//! This crate provides configuration access, the Supabase client and the
//! diagnostic report types used across all binaries.

pub mod auth;
pub mod config;
pub mod courses;
pub mod diagnostics;
pub mod error;
pub mod http;
pub mod supabase;

pub use auth::{key_role, KeyRole};
pub use config::{EnvSource, ProcessEnv};
pub use courses::{describe_outcome, fetch_course_by_slug, Course};
pub use diagnostics::{EnvCheckReport, HealthReport};
pub use error::{Error, Result};
pub use supabase::{SupabaseClient, SupabaseConfig};
