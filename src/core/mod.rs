//! Core logic - framework-agnostic validation, search, totals, and failure classification.
//!
//! Nothing in here performs I/O. The screens call into these modules before
//! and after talking to the API.

/// Classification of failed deletes
pub mod failure;
/// Case-insensitive list filtering
pub mod search;
/// Line-item totals
pub mod subtotal;
/// Forms and field-level validation
pub mod validation;

pub use failure::DeleteFailure;
pub use search::{Searchable, filter_by_term};
pub use subtotal::{compute_total, line_total};
pub use validation::{EntityForm, FieldErrors, FormMode, Submission};
