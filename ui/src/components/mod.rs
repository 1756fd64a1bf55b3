//! Reusable UI components

pub mod guard;
pub mod loading;
pub mod modal;
pub mod navbar;

pub use guard::Guarded;
pub use loading::{LoadingOverlay, LoadingSpinner};
pub use modal::ModalDialog;
pub use navbar::Navbar;
