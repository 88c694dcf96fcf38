//! REST surface: the collector endpoint and a health check

pub mod handlers;
pub mod router;
pub mod state;
