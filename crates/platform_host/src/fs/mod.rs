//! Remote file-store contracts, wire types, and path helpers.

pub mod path;
pub mod service;
pub mod types;
