//! Screen state machines - the per-entity CRUD cycle, independent of any UI.
//!
//! A screen holds what a page showed: the last-fetched list, the search term,
//! the loading and error flags, and the open form. Every action ends in a
//! [`Feedback`] the front end renders; no failure escapes as an `Err`.

/// Generic list/form/delete cycle for one resource
pub mod list;
/// Sales with their line items and the cascading refresh
pub mod penjualan;

pub use list::ListScreen;
pub use penjualan::PenjualanScreen;

use crate::core::FieldErrors;

/// Title of the dialog shown when a delete is blocked by dependent records.
pub const STILL_REFERENCED_TITLE: &str = "Tidak Dapat Menghapus";

/// Outcome of a user action on a screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// A create or update succeeded; carries the notice shown to the user
    Saved(String),
    /// A delete succeeded; carries the notice shown to the user
    Deleted(String),
    /// The form failed validation and nothing was sent
    Invalid(FieldErrors),
    /// The user declined the confirmation
    Cancelled,
    /// Another request from this screen is still in flight
    Busy,
    /// The record cannot be deleted while other records reference it
    StillReferenced {
        /// Dialog title
        title: String,
        /// Dialog body, naming the record and what to remove first
        message: String,
    },
    /// Any other failure; carries the message shown to the user
    Failed(String),
}

impl Feedback {
    /// True when the action took effect on the server.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved(_) | Self::Deleted(_))
    }

    /// The user-facing text of this outcome, if it has one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Saved(message)
            | Self::Deleted(message)
            | Self::Failed(message)
            | Self::StillReferenced { message, .. } => Some(message.as_str()),
            Self::Invalid(_) | Self::Cancelled | Self::Busy => None,
        }
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Shows `prompt` and returns whether the user agreed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}
