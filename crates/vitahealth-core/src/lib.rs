//! # vitahealth-core
//!
//! Framework-agnostic client logic for the VitaHealth nutritional-deficiency
//! screening product. The heavy lifting (image classification, meal plans,
//! accounts, PDF reports) happens in an external backend reached over HTTP;
//! this crate owns what the client decides on its own:
//!
//! - **Session state** derived from persisted credentials
//! - **Routing** and the access guard for protected pages
//! - **Planner keys** derived from deficiency labels
//! - **Plan progress** persisted locally per meal plan
//! - **Page controllers** for registration, login, detection, planner and profile
//!
//! Hosts (the Leptos frontend and the terminal client) plug in two seams:
//! [`Backend`] for the HTTP API and [`KeyValueStore`] for persisted storage.
//!
//! ## Example
//!
//! ```rust,ignore
//! use vitahealth_core::{MemoryStore, SessionStore, routes::{guard, Route}};
//!
//! let store = MemoryStore::new();
//! let session = SessionStore::new(store.clone()).sync_from_storage();
//! assert!(!session.is_authenticated());
//! assert_eq!(guard(Route::Profile, &store).route(), &Route::Login);
//! ```

/// Backend seam and endpoint layout.
pub mod api;
/// Categorized failures shared by every page.
pub mod error;
/// Page controllers.
pub mod flows;
/// Deficiency label normalization.
pub mod planner_key;
/// Per-plan completion state.
pub mod progress;
/// Route table, navigation chrome and the access guard.
pub mod routes;
/// Session state holder.
pub mod session;
/// Persisted key-value storage seam.
pub mod storage;
/// Request and response shapes of the external API.
pub mod types;

pub use api::{chatbot_url, Backend, Endpoints, DEFAULT_CHATBOT_URL, DEFAULT_ORIGIN};
pub use error::{ApiError, ApiResult, StorageError};
pub use progress::{PlanProgress, ProgressStore};
pub use routes::{GuardOutcome, Route};
pub use session::{Session, SessionStore};
pub use storage::{KeyValueStore, MemoryStore};
