use chrono::NaiveDateTime;

/// Why a refresh cycle produced no snapshot.
///
/// Both variants reach the scheduler as a failed update: the kinds only differ for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// Transport error, timeout, non-success status, or a malformed table.
    #[error("failed to fetch the price table")]
    FetchFailed(#[source] anyhow::Error),

    /// The table has no slots at or after the cutoff.
    #[error("no price data available since {cutoff}")]
    NoDataForCurrentTime { cutoff: NaiveDateTime },
}
