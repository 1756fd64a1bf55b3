//! # VitaHealth native client
//!
//! Native host for the VitaHealth page logic in [`vitahealth_core`]: a
//! reqwest-backed [`Backend`](vitahealth_core::Backend), a file-backed
//! key-value store standing in for browser local storage, layered
//! configuration and the `vitahealth` terminal client.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use vitahealth::{FileStore, HttpBackend};
//! use vitahealth_core::flows::planner::{load_planner, PlannerView};
//! use vitahealth_core::{ProgressStore, SessionStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(FileStore::new("./data/storage.json"));
//! let backend = HttpBackend::new("http://127.0.0.1:5000");
//! let session = SessionStore::new(Arc::clone(&store)).sync_from_storage();
//! let progress = ProgressStore::new(store);
//!
//! if let PlannerView::Ready(board) = load_planner(&backend, &progress, &session, "VitaminC").await {
//!     println!("{}% done", board.percentage());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`backend`] - HTTP implementation of the backend seam
//! - [`storage`] - JSON-file key-value store
//! - [`cli`] - Command-line parsing, output and command handlers
//! - [`utils`] - Configuration and logging setup

#![warn(rustdoc::missing_crate_level_docs)]

/// reqwest client for the VitaHealth backend.
pub mod backend;
/// Command-line interface.
pub mod cli;
/// File-backed key-value storage.
pub mod storage;
/// Configuration and logging.
pub mod utils;

pub use backend::HttpBackend;
pub use storage::FileStore;
pub use utils::config::{ClientConfig, ConfigError};
pub use vitahealth_core;
