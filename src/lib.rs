pub mod analytics;
pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod format;
pub mod models;
pub mod preview;
pub mod response;
pub mod staff;
pub mod storage;
