//! In-memory single-timestamp store served over HTTP.
//!
//! The value lives in one slot owned by a dedicated task; HTTP handlers
//! reach it only through [`state::TimestampStore`] handles.

pub mod app;
pub mod codec;
pub mod config;
pub mod errors;
pub mod routes;
pub mod services;
pub mod state;
