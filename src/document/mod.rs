//! Printable documents: intervention sheets and store invoices.
//!
//! Rendering is split in two: a deterministic translation of a domain
//! record into a backend-agnostic [`DocumentLayout`], and a PDF backend
//! (feature `pdf`) that walks the layout with drawing primitives. The
//! layout is fully built before any drawing happens, so a failure never
//! leaves a truncated output file behind.

mod intervention;
mod invoice;
mod layout;

#[cfg(feature = "pdf")]
pub mod pdf;

pub use intervention::*;
pub use invoice::*;
pub use layout::*;

/// A generated file, ready to hand to the user.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}
