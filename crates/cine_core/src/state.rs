use crate::view_model::AppViewModel;
use crate::{visible_pages, Listing, Movie, MovieId, ResultsPage, DEFAULT_VISIBLE_PAGES};

pub type RequestId = u64;

/// Number of recent searches kept in the history.
pub const HISTORY_LIMIT: usize = 5;

/// The catalog refuses to serve pages beyond this one.
pub const MAX_DISPLAY_PAGES: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingFetch {
    pub(crate) request_id: RequestId,
    pub(crate) listing: Listing,
    pub(crate) page: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    favorites: Vec<Movie>,
    search_history: Vec<String>,
    results: Vec<Movie>,
    current_page: u32,
    total_pages: u32,
    total_results: u64,
    listing: Listing,
    is_loading: bool,
    error: Option<String>,
    next_request_id: RequestId,
    in_flight: Option<PendingFetch>,
    last_attempt: Option<(Listing, u32)>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            favorites: Vec::new(),
            search_history: Vec::new(),
            results: Vec::new(),
            current_page: 1,
            total_pages: 0,
            total_results: 0,
            listing: Listing::default(),
            is_loading: false,
            error: None,
            next_request_id: 1,
            in_flight: None,
            last_attempt: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn favorites(&self) -> &[Movie] {
        &self.favorites
    }

    pub fn search_history(&self) -> &[String] {
        &self.search_history
    }

    pub fn results(&self) -> &[Movie] {
        &self.results
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Total pages as offered to the pager, capped at [`MAX_DISPLAY_PAGES`].
    pub fn display_total_pages(&self) -> u32 {
        self.total_pages.min(MAX_DISPLAY_PAGES)
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Active query string; empty while browsing a collection.
    pub fn current_query(&self) -> &str {
        self.listing.query()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_favorite(&self, id: MovieId) -> bool {
        self.favorites.iter().any(|movie| movie.id == id)
    }

    /// Looks a movie up in the current results, then in the favorites.
    pub fn find_movie(&self, id: MovieId) -> Option<&Movie> {
        self.results
            .iter()
            .chain(self.favorites.iter())
            .find(|movie| movie.id == id)
    }

    /// Request id of the listing fetch whose completion is still expected.
    pub fn in_flight_request(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|pending| pending.request_id)
    }

    /// The most recent listing fetch, for the Retry affordance.
    pub fn last_attempt(&self) -> Option<(&Listing, u32)> {
        self.last_attempt
            .as_ref()
            .map(|(listing, page)| (listing, *page))
    }

    pub fn view(&self) -> AppViewModel {
        let total_pages = self.display_total_pages();
        AppViewModel {
            listing: self.listing.clone(),
            query: self.current_query().to_string(),
            results: self.results.clone(),
            current_page: self.current_page,
            total_pages,
            total_results: self.total_results,
            pages: visible_pages(self.current_page, total_pages, DEFAULT_VISIBLE_PAGES),
            is_loading: self.is_loading,
            error: self.error.clone(),
            can_retry: self.error.is_some() && self.last_attempt.is_some(),
            favorites: self.favorites.clone(),
            search_history: self.search_history.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.is_loading = false;
        self.dirty = true;
    }

    pub(crate) fn set_results(&mut self, page: ResultsPage) {
        self.results = page.results;
        self.current_page = page.page;
        self.total_pages = page.total_pages;
        self.total_results = page.total_results;
        self.is_loading = false;
        self.error = None;
        self.dirty = true;
    }

    pub(crate) fn set_query(&mut self, text: String) {
        self.listing = if text.is_empty() {
            Listing::default()
        } else {
            Listing::Search(text)
        };
        self.dirty = true;
    }

    pub(crate) fn set_listing(&mut self, listing: Listing) {
        self.listing = listing;
        self.dirty = true;
    }

    /// Returns `true` when the movie was not yet a favorite.
    pub(crate) fn add_favorite(&mut self, movie: Movie) -> bool {
        if self.is_favorite(movie.id) {
            return false;
        }
        self.favorites.push(movie);
        self.dirty = true;
        true
    }

    /// Returns `true` when a favorite with `id` was removed.
    pub(crate) fn remove_favorite(&mut self, id: MovieId) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|movie| movie.id != id);
        let removed = self.favorites.len() != before;
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// Returns `true` when the history changed.
    pub(crate) fn record_search(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        if self.search_history.first().map(String::as_str) == Some(query) {
            return false;
        }
        self.search_history.retain(|entry| entry != query);
        self.search_history.insert(0, query.to_string());
        self.search_history.truncate(HISTORY_LIMIT);
        self.dirty = true;
        true
    }

    pub(crate) fn clear_results(&mut self) {
        self.results.clear();
        self.current_page = 1;
        self.total_pages = 0;
        self.total_results = 0;
        self.listing = Listing::default();
        self.in_flight = None;
        self.dirty = true;
    }

    pub(crate) fn load_favorites(&mut self, favorites: Vec<Movie>) {
        self.favorites.clear();
        for movie in favorites {
            if !self.is_favorite(movie.id) {
                self.favorites.push(movie);
            }
        }
        self.dirty = true;
    }

    pub(crate) fn load_search_history(&mut self, mut history: Vec<String>) {
        history.truncate(HISTORY_LIMIT);
        self.search_history = history;
        self.dirty = true;
    }

    /// Allocates a request id for a listing fetch and marks it as the one in flight.
    pub(crate) fn start_fetch(&mut self, listing: Listing, page: u32) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.last_attempt = Some((listing.clone(), page));
        self.in_flight = Some(PendingFetch {
            request_id,
            listing,
            page,
        });
        request_id
    }

    /// Takes the in-flight fetch if `request_id` still refers to it and its
    /// listing is still the active one.
    pub(crate) fn settle_fetch(&mut self, request_id: RequestId) -> Option<PendingFetch> {
        match &self.in_flight {
            Some(pending) if pending.request_id == request_id => {
                let pending = self.in_flight.take()?;
                (pending.listing == self.listing).then_some(pending)
            }
            _ => None,
        }
    }
}
