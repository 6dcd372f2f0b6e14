//! Classification of failed deletes.
//!
//! The API refuses to delete a barang or pelanggan that transactions still
//! reference. It does not always say so in a structured way, so the check
//! looks at the status and error code first and falls back to scanning the
//! message for the phrases the database and the API are known to use.

use crate::errors::Error;

/// Error codes that mean "still referenced" when the server sends one.
const REFERENCE_CODES: [&str; 3] = ["FOREIGN_KEY_VIOLATION", "23000", "23503"];

/// Lowercase phrases found in referential-integrity failures.
const REFERENCE_MARKERS: [&str; 4] = [
    "foreign key constraint",
    "cannot delete or update a parent row",
    "terhubung",
    "referenced",
];

/// Why a delete failed, as far as the user needs to know.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteFailure {
    /// Other records still point at this one; they must be removed first
    StillReferenced,
    /// Anything else; retrying may help
    Other,
}

impl DeleteFailure {
    /// Classifies the error returned by a delete request.
    #[must_use]
    pub fn classify(error: &Error) -> Self {
        let Error::Api {
            status,
            message,
            code,
        } = error
        else {
            return Self::Other;
        };

        if *status == 409 {
            return Self::StillReferenced;
        }
        if code
            .as_deref()
            .is_some_and(|code| REFERENCE_CODES.contains(&code.trim()))
        {
            return Self::StillReferenced;
        }

        let message = message.to_lowercase();
        if REFERENCE_MARKERS
            .iter()
            .any(|marker| message.contains(marker))
        {
            Self::StillReferenced
        } else {
            Self::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, message: &str, code: Option<&str>) -> Error {
        Error::Api {
            status,
            message: message.to_string(),
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn test_parent_row_message_is_still_referenced() {
        let err = api(
            500,
            "Cannot delete or update a parent row: referenced by item_penjualan",
            None,
        );
        assert_eq!(DeleteFailure::classify(&err), DeleteFailure::StillReferenced);
    }

    #[test]
    fn test_indonesian_and_mixed_case_markers() {
        let err = api(400, "Barang masih TERHUBUNG dengan penjualan", None);
        assert_eq!(DeleteFailure::classify(&err), DeleteFailure::StillReferenced);

        let err = api(500, "SQLSTATE[23000]: a Foreign Key Constraint fails", None);
        assert_eq!(DeleteFailure::classify(&err), DeleteFailure::StillReferenced);
    }

    #[test]
    fn test_structured_signals_win_without_markers() {
        assert_eq!(
            DeleteFailure::classify(&api(409, "Conflict", None)),
            DeleteFailure::StillReferenced
        );
        assert_eq!(
            DeleteFailure::classify(&api(500, "Server Error", Some("23503"))),
            DeleteFailure::StillReferenced
        );
    }

    #[test]
    fn test_other_failures_are_generic() {
        assert_eq!(
            DeleteFailure::classify(&api(500, "Internal Server Error", None)),
            DeleteFailure::Other
        );
        assert_eq!(
            DeleteFailure::classify(&api(404, "Data tidak ditemukan", None)),
            DeleteFailure::Other
        );
        assert_eq!(DeleteFailure::classify(&Error::Timeout), DeleteFailure::Other);
    }
}
