//! User module
//!
//! User records, their persistence port and the user endpoints.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
