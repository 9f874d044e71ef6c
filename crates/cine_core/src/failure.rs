/// Classification of a failed catalog fetch, as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidArgument,
    Timeout,
    Remote(u16),
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl ListingFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Human-readable message for the error banner of `listing`.
    pub fn user_message(&self, listing: &crate::Listing) -> String {
        let what = match listing {
            crate::Listing::Search(query) => format!("Failed to search for \"{query}\"."),
            crate::Listing::Collection(collection) => {
                format!("Failed to load {} movies.", collection.label())
            }
            crate::Listing::Discover { .. } => "Failed to load movies.".to_string(),
        };
        let hint = match &self.kind {
            FailureKind::Timeout => {
                "The request timed out. Please check your internet connection and try again."
                    .to_string()
            }
            FailureKind::Network => {
                "Please check your internet connection and try again.".to_string()
            }
            FailureKind::Remote(status) => {
                format!("The catalog service answered with status {status}. Please try again.")
            }
            FailureKind::InvalidArgument => self.detail.clone(),
        };
        format!("{what} {hint}")
    }
}
