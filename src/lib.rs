//! # atelier
//!
//! Management core for an electronics repair shop ("service après-vente"):
//! billing aggregation, partner-store invoice generation, and printable
//! service documents, on top of a remote REST backend.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Repairs referred by a partner store (magasin) are warranty work; completed,
//! unbilled store repairs are periodically consolidated into one invoice per
//! store.
//!
//! ## Quick Start
//!
//! ```rust
//! use atelier::core::*;
//! use rust_decimal_macros::dec;
//!
//! # let interventions: Vec<Intervention> = Vec::new();
//! // Group completed, unbilled store repairs by partner store.
//! let groups = compute_billing_groups(&interventions);
//!
//! // Track which interventions the user ticked for invoicing.
//! let selection = SelectionState::new();
//! for group in groups.values() {
//!     assert_eq!(selected_total(group, selection.selected(group.store_id)), dec!(0));
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Domain records, billing aggregation, selection state, workflows, document layouts |
//! | `gateway` | Async REST gateway to the backend (reqwest) |
//! | `pdf` | PDF rendering of document layouts (lopdf) |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod document;

#[cfg(feature = "core")]
pub mod workflow;

#[cfg(feature = "gateway")]
pub mod gateway;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
