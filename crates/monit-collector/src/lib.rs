//! Monit collector daemon library
//!
//! This module provides the pieces of the collector daemon:
//! - HTTP endpoint the monit agent posts notifications to
//! - Bounded hand-off queue between request handlers and the consumer
//! - Reference consumer that projects and reports each document
//! - Server lifecycle management

pub mod api;
pub mod collector;
pub mod config;
pub mod consumer;
pub mod error;
pub mod server;

pub use collector::Collector;
pub use config::DaemonConfig;
pub use error::{ApiError, CollectError, DaemonError};
pub use server::Server;
