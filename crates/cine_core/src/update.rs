use crate::{AppState, Effect, Listing, Msg, ResultsPage};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::BeginLoading => {
            state.begin_loading();
            Vec::new()
        }
        Msg::Fail(message) => {
            state.fail(message);
            Vec::new()
        }
        Msg::SetResults {
            results,
            page,
            total_pages,
            total_results,
        } => {
            state.set_results(ResultsPage {
                results,
                page,
                total_pages,
                total_results,
            });
            Vec::new()
        }
        Msg::SetQuery(text) => {
            state.set_query(text);
            Vec::new()
        }
        Msg::AddFavorite(movie) => {
            if state.add_favorite(movie) {
                vec![persist_favorites(&state)]
            } else {
                Vec::new()
            }
        }
        Msg::RemoveFavorite(id) => {
            if state.remove_favorite(id) {
                vec![persist_favorites(&state)]
            } else {
                Vec::new()
            }
        }
        Msg::FavoriteToggled(movie) => {
            let changed = if state.is_favorite(movie.id) {
                state.remove_favorite(movie.id)
            } else {
                state.add_favorite(movie)
            };
            if changed {
                vec![persist_favorites(&state)]
            } else {
                Vec::new()
            }
        }
        Msg::RecordSearch(query) => {
            if state.record_search(&query) {
                vec![persist_history(&state)]
            } else {
                Vec::new()
            }
        }
        Msg::ClearResults => {
            state.clear_results();
            Vec::new()
        }
        Msg::LoadFavorites(favorites) => {
            state.load_favorites(favorites);
            Vec::new()
        }
        Msg::LoadSearchHistory(history) => {
            state.load_search_history(history);
            Vec::new()
        }
        Msg::SearchSubmitted(text) => {
            let query = text.trim();
            if query.is_empty() {
                return (state, Vec::new());
            }
            let mut effects = Vec::with_capacity(2);
            if state.record_search(query) {
                effects.push(persist_history(&state));
            }
            state.set_query(query.to_string());
            effects.push(begin_fetch(&mut state, Listing::Search(query.to_string()), 1));
            effects
        }
        Msg::BrowseRequested(listing) => {
            if let Listing::Search(query) = listing {
                return update(state, Msg::SearchSubmitted(query));
            }
            state.set_listing(listing.clone());
            vec![begin_fetch(&mut state, listing, 1)]
        }
        Msg::PageRequested(page) => {
            let last_page = state.display_total_pages();
            if page == 0 || (last_page > 0 && page > last_page) {
                return (state, Vec::new());
            }
            let listing = state.listing().clone();
            vec![begin_fetch(&mut state, listing, page)]
        }
        Msg::RetryRequested => {
            let (listing, page) = match state.last_attempt() {
                Some((listing, page)) => (listing.clone(), page),
                None => (state.listing().clone(), state.current_page()),
            };
            state.set_listing(listing.clone());
            vec![begin_fetch(&mut state, listing, page)]
        }
        Msg::ListingLoaded { request_id, result } => {
            // Completions of superseded requests are dropped.
            let Some(pending) = state.settle_fetch(request_id) else {
                return (state, Vec::new());
            };
            match result {
                Ok(page) => state.set_results(page),
                Err(failure) => state.fail(failure.user_message(&pending.listing)),
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn begin_fetch(state: &mut AppState, listing: Listing, page: u32) -> Effect {
    state.begin_loading();
    let request_id = state.start_fetch(listing.clone(), page);
    Effect::FetchListing {
        request_id,
        listing,
        page,
    }
}

fn persist_favorites(state: &AppState) -> Effect {
    Effect::PersistFavorites(state.favorites().to_vec())
}

fn persist_history(state: &AppState) -> Effect {
    Effect::PersistSearchHistory(state.search_history().to_vec())
}
