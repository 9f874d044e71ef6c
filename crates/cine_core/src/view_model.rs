use crate::{Listing, Movie, PageSlot};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub listing: Listing,
    pub query: String,
    pub results: Vec<Movie>,
    pub current_page: u32,
    /// Already capped for display.
    pub total_pages: u32,
    pub total_results: u64,
    pub pages: Vec<PageSlot>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub can_retry: bool,
    pub favorites: Vec<Movie>,
    pub search_history: Vec<String>,
    pub dirty: bool,
}

impl AppViewModel {
    /// Results are hidden while loading or while the error banner is up.
    pub fn shows_results(&self) -> bool {
        !self.is_loading && self.error.is_none() && !self.results.is_empty()
    }

    /// A finished search that matched nothing.
    pub fn is_empty_search(&self) -> bool {
        !self.is_loading && self.error.is_none() && self.results.is_empty() && !self.query.is_empty()
    }
}
