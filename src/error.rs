use thiserror::Error;

/// Failure taxonomy for the diary core. Callers branch on the variant:
/// `NotFound` is informational, `AuthFailure` means re-enter credentials,
/// the storage variants mean the backend itself misbehaved.
#[derive(Debug, Error)]
pub enum DiaryError {
    /// The tabular backend rejected a read or write. Retrying is the
    /// caller's decision; this layer never retries.
    #[error("storage unavailable: {0}")]
    StoreUnavailable(String),

    /// A repair write for the reserved rows failed, so the sheet could not
    /// be brought into the expected shape.
    #[error("sheet structure repair failed: {0}")]
    StructureRepair(String),

    /// No diary entry exists for the requested date.
    #[error("no entry for {date}")]
    NotFound { date: String },

    /// Name/password did not match the roster. Deliberately the same for
    /// an unknown name and a wrong password.
    #[error("name or password does not match")]
    AuthFailure,
}

/// Recoverable conditions reported alongside a result, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A data row whose date cell is not a well-formed `YYYY-MM-DD`
    /// calendar date. The row is skipped, not fatal to the scan.
    MalformedRow { row: usize, date: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::MalformedRow { row, date } => {
                write!(f, "row {} has an unreadable date {:?}", row, date)
            }
        }
    }
}
