//! Test utilities for the identity stores.
//!
//! Provides entity fixtures and a throwaway MongoDB database for live tests.
//! Use from dev-dependencies only.

pub mod fixture;
pub mod mongo;

pub use mongo::{TEST_URL_ENV, TestMongo, offline_stores};
