use crate::{Listing, Movie, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchListing {
        request_id: RequestId,
        listing: Listing,
        page: u32,
    },
    /// Overwrite the favorites slot with the full list.
    PersistFavorites(Vec<Movie>),
    /// Overwrite the history slot with the full list.
    PersistSearchHistory(Vec<String>),
}
