//! Session context for the booking front end.
//!
//! Replaces the token mirrored into browser storage with an explicit store
//! that handlers receive through application state.

pub mod forms;
pub mod models;
pub mod routes;
pub mod store;

pub use forms::validate_auth_form;
pub use models::{AuthForm, AuthMode, Session, UserProfile, UserRole};
pub use routes::{require_session, router};
pub use store::SessionStore;
