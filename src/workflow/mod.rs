//! User-facing workflows: batch invoice generation and the cascading
//! intake of a new client / device / intervention.
//!
//! Workflows talk to the backend through the traits in [`api`], so they
//! stay independent of the concrete HTTP gateway and are testable against
//! in-memory fakes.

pub mod api;
mod generate;
mod intake;

pub use api::*;
pub use generate::*;
pub use intake::*;
