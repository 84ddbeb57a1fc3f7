pub mod claims;
pub mod provider;
pub mod repository;
