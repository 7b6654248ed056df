//! snipman-client
//!
//! HTTP repository client for the snippet API. Every call is one round trip
//! and every failure surfaces as [`RequestFailed`].

pub mod client;
pub mod config;
pub mod error;
pub mod repository;

pub use client::SnippetClient;
pub use config::ClientConfig;
pub use error::{ClientBuildError, ConfigError, Operation, RequestFailed};
pub use repository::SnippetRepository;
