//! Typed calls against the backend REST API, one module per resource.

mod client;

pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod orders;
pub mod products;
pub mod storage;
pub mod users;

pub use client::{ApiClient, REQUEST_ID_HEADER};
