use crate::{Listing, ListingFailure, Movie, MovieId, RequestId, ResultsPage};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A fetch for the results area has started.
    BeginLoading,
    /// A fetch failed; keeps the previously shown results.
    Fail(String),
    /// Replace the results area and pagination in one step.
    SetResults {
        results: Vec<Movie>,
        page: u32,
        total_pages: u32,
        total_results: u64,
    },
    /// Record the active query string (empty means the popular listing).
    SetQuery(String),
    AddFavorite(Movie),
    RemoveFavorite(MovieId),
    /// Push a query onto the recent-search history.
    RecordSearch(String),
    /// Reset results, pagination and query to their initial values.
    ClearResults,
    /// Seed favorites from durable storage at startup.
    LoadFavorites(Vec<Movie>),
    /// Seed the search history from durable storage at startup.
    LoadSearchHistory(Vec<String>),
    /// User submitted the search box.
    SearchSubmitted(String),
    /// User picked a non-search listing (collection or genre).
    BrowseRequested(Listing),
    /// User clicked a page number.
    PageRequested(u32),
    /// User clicked Retry on the error banner.
    RetryRequested,
    /// User clicked the heart on a movie card.
    FavoriteToggled(Movie),
    /// Engine completion for a listing fetch.
    ListingLoaded {
        request_id: RequestId,
        result: Result<ResultsPage, ListingFailure>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
