//! Shared application domain and persistence modules for the Trolley
//! cart service.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod uuids;
