//! # viewer-core
//!
//! Shared plumbing for the message viewer: [`ViewerConfig`] loaded from the environment,
//! the [`ViewerError`] type and tracing initialization. Used by viewer-server.

pub mod config;
pub mod error;
pub mod logger;

pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use logger::init_tracing;
