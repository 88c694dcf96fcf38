//! API request handlers

mod collector;
mod health;

pub use collector::*;
pub use health::*;
