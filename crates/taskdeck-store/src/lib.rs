//! # taskdeck-store
//!
//! Task persistence on `SQLite`.
//!
//! - [`connection`]: pooled connections with WAL and busy timeout
//! - [`migrations`]: embedded, versioned schema
//! - [`repository`]: stateless SQL over a `&Connection`
//! - [`service`]: validation and defaults on top of the repository

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod repository;
pub mod service;

pub use connection::{ConnectionConfig, ConnectionPool};
pub use errors::{Result, StoreError};
pub use repository::{NewTask, TaskRepository};
pub use service::TaskService;

pub use rusqlite::Connection;
