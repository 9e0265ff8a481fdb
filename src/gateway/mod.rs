//! Remote Data Gateway — typed request/response functions against the
//! backend REST API.
//!
//! Pure translation: no business logic lives here. The backend is the
//! single source of truth; it validates, persists, and generates ids.

mod client;
mod session;

pub use client::*;
pub use session::*;
