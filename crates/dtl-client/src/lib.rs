//! Client library for the Daily Topics backend.
//!
//! [`ApiClient`] maps each backend endpoint to a typed async method. The
//! [`views`] build the reader feed, catalog, profile and login flows on top
//! of it, and [`TokenStore`] keeps the bearer token between runs.

pub mod client;
pub mod config;
pub mod error;
pub mod operation;
pub mod storage;
pub mod tracing;
pub mod views;

pub use client::ApiClient;
pub use config::{ClientConfig, Environment};
pub use error::{ClientError, ClientResult};
pub use operation::Operation;
pub use storage::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore, USER_ID_KEY};
pub use views::{Catalog, Profile, ReaderFeed, Session};
