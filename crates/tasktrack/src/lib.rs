//! Multi-user task tracker with cookie-based session authentication.

pub mod api;
pub mod auth;
pub mod db;
pub mod task;
pub mod user;
