//! Vercel API integration
//!
//! This module wraps the two REST endpoints lookout talks to and the
//! classification of the build-log lines they return.

pub mod client;
pub mod events;
