//! Service plumbing shared by identity HTTP services.

pub mod error;
pub mod health;
pub mod middleware;
pub mod tracing;
