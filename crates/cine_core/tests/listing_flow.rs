use std::cell::RefCell;
use std::rc::Rc;

use cine_core::{
    update, AppState, Collection, Effect, FailureKind, Listing, ListingFailure, Movie, Msg,
    PageSlot, ResultsPage, Store, MAX_DISPLAY_PAGES,
};

fn init_logging() {
    cine_logging::initialize_for_tests();
}

fn page_of(page: u32, total_pages: u32, total_results: u64) -> ResultsPage {
    let first = u64::from(page - 1) * 20 + 1;
    ResultsPage {
        results: (first..first + 20)
            .map(|id| Movie::new(id, format!("Movie {id}")))
            .collect(),
        page,
        total_pages,
        total_results,
    }
}

fn fetch_of(effects: &[Effect]) -> (u64, Listing, u32) {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchListing {
                request_id,
                listing,
                page,
            } => Some((*request_id, listing.clone(), *page)),
            _ => None,
        })
        .expect("fetch effect")
}

#[test]
fn popular_listing_resolves_into_results() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::BrowseRequested(Listing::Collection(Collection::Popular)),
    );
    assert!(state.is_loading());
    let (request_id, listing, page) = fetch_of(&effects);
    assert_eq!(listing, Listing::Collection(Collection::Popular));
    assert_eq!(page, 1);

    let (state, effects) = update(
        state,
        Msg::ListingLoaded {
            request_id,
            result: Ok(page_of(1, 500, 10_000)),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.is_loading());
    assert_eq!(state.error(), None);
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.results().len(), 20);
    assert_eq!(state.display_total_pages(), 500);
    assert_eq!(state.in_flight_request(), None);
}

#[test]
fn total_pages_are_capped_for_display() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SearchSubmitted("love".to_string()));
    let (request_id, _, _) = fetch_of(&effects);
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            request_id,
            result: Ok(page_of(1, 1200, 24_000)),
        },
    );

    assert_eq!(state.total_pages(), 1200);
    let view = state.view();
    assert_eq!(view.total_pages, MAX_DISPLAY_PAGES);
    assert_eq!(view.pages.last(), Some(&PageSlot::Page(MAX_DISPLAY_PAGES)));

    let (_, effects) = update(state.clone(), Msg::PageRequested(501));
    assert!(effects.is_empty());
    let (_, effects) = update(state, Msg::PageRequested(500));
    assert_eq!(fetch_of(&effects).2, 500);
}

#[test]
fn timeout_sets_retryable_error_and_stops_loading() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::BrowseRequested(Listing::Collection(Collection::Popular)),
    );
    let (request_id, _, _) = fetch_of(&effects);

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            request_id,
            result: Err(ListingFailure::new(
                FailureKind::Timeout,
                "request timed out after 10s",
            )),
        },
    );

    assert!(!state.is_loading());
    let message = state.error().expect("error message");
    assert!(message.contains("popular"));
    assert!(message.contains("timed out"));
    assert!(state.view().can_retry);

    let (state, effects) = update(state, Msg::RetryRequested);
    assert!(state.is_loading());
    assert_eq!(state.error(), None);
    let (_, listing, page) = fetch_of(&effects);
    assert_eq!(listing, Listing::Collection(Collection::Popular));
    assert_eq!(page, 1);
}

#[test]
fn search_records_history_and_requests_first_page() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SearchSubmitted("  blade runner ".to_string()));

    assert_eq!(state.current_query(), "blade runner");
    assert_eq!(state.search_history(), ["blade runner"]);
    assert_eq!(
        effects[0],
        Effect::PersistSearchHistory(vec!["blade runner".to_string()])
    );
    let (_, listing, page) = fetch_of(&effects);
    assert_eq!(listing, Listing::Search("blade runner".to_string()));
    assert_eq!(page, 1);
}

#[test]
fn blank_search_is_ignored() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::SearchSubmitted("   ".to_string()));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert!(state.search_history().is_empty());
}

#[test]
fn page_change_follows_active_listing() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SearchSubmitted("alien".to_string()));
    let (request_id, _, _) = fetch_of(&effects);
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            request_id,
            result: Ok(page_of(1, 4, 80)),
        },
    );

    let (state, effects) = update(state, Msg::PageRequested(3));
    assert_eq!(fetch_of(&effects), (2, Listing::Search("alien".to_string()), 3));

    let (state, _) = update(state, Msg::ClearResults);
    let (_, effects) = update(state, Msg::PageRequested(2));
    assert_eq!(
        fetch_of(&effects).1,
        Listing::Collection(Collection::Popular)
    );
}

#[test]
fn stale_completion_is_discarded() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SearchSubmitted("matrix".to_string()));
    let (first_id, _, _) = fetch_of(&effects);
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            request_id: first_id,
            result: Ok(page_of(1, 5, 100)),
        },
    );

    let (state, effects) = update(state, Msg::PageRequested(2));
    let (second_id, _, _) = fetch_of(&effects);
    let (state, effects) = update(state, Msg::PageRequested(3));
    let (third_id, _, _) = fetch_of(&effects);
    assert!(second_id < third_id);

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            request_id: third_id,
            result: Ok(page_of(3, 5, 100)),
        },
    );
    let (mut state, effects) = update(
        state,
        Msg::ListingLoaded {
            request_id: second_id,
            result: Err(ListingFailure::new(FailureKind::Network, "reset")),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.current_page(), 3);
    assert_eq!(state.error(), None);
    state.consume_dirty();
    let before = state.clone();
    let (mut after, _) = update(
        state,
        Msg::ListingLoaded {
            request_id: second_id,
            result: Ok(page_of(2, 5, 100)),
        },
    );
    assert!(!after.consume_dirty());
    assert_eq!(after, before);
}

#[test]
fn remote_error_message_mentions_status() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SearchSubmitted("dune".to_string()));
    let (request_id, _, _) = fetch_of(&effects);
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            request_id,
            result: Err(ListingFailure::new(FailureKind::Remote(503), "Service Unavailable")),
        },
    );

    let message = state.error().unwrap();
    assert!(message.starts_with("Failed to search for \"dune\"."));
    assert!(message.contains("503"));
}

#[test]
fn store_notifies_observers_only_on_change() {
    init_logging();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut store = Store::new(AppState::new());
    let sink = seen.clone();
    store.subscribe(move |view| sink.borrow_mut().push(view.search_history.clone()));

    let effects = store.dispatch(Msg::RecordSearch("dune".to_string()));
    assert_eq!(effects.len(), 1);
    store.dispatch(Msg::RemoveFavorite(7));
    store.dispatch(Msg::NoOp);
    store.dispatch(Msg::RecordSearch("arrival".to_string()));

    assert_eq!(
        *seen.borrow(),
        vec![
            vec!["dune".to_string()],
            vec!["arrival".to_string(), "dune".to_string()]
        ]
    );
    assert_eq!(store.state().search_history(), ["arrival", "dune"]);
}

#[test]
fn search_completing_after_clear_is_discarded() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SearchSubmitted("dune".to_string()));
    let (request_id, _, _) = fetch_of(&effects);
    let (state, _) = update(state, Msg::ClearResults);
    assert_eq!(state.in_flight_request(), None);

    let (state, effects) = update(
        state,
        Msg::ListingLoaded {
            request_id,
            result: Ok(ResultsPage {
                results: vec![Movie::new(438631, "Dune")],
                page: 1,
                total_pages: 1,
                total_results: 1,
            }),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.listing(), &Listing::Collection(Collection::Popular));
    assert_eq!(state.current_query(), "");
    assert!(state.results().is_empty());
}

#[test]
fn retry_after_clear_restores_the_attempted_listing() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SearchSubmitted("dune".to_string()));
    let (first_id, _, _) = fetch_of(&effects);
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            request_id: first_id,
            result: Err(ListingFailure::new(FailureKind::Timeout, "deadline")),
        },
    );
    let (state, _) = update(state, Msg::ClearResults);

    let (state, effects) = update(state, Msg::RetryRequested);
    let (retry_id, listing, page) = fetch_of(&effects);
    assert_eq!((listing, page), (Listing::Search("dune".to_string()), 1));
    assert_eq!(state.current_query(), "dune");

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            request_id: retry_id,
            result: Ok(page_of(1, 2, 40)),
        },
    );
    assert_eq!(state.results().len(), 20);
    assert_eq!(state.error(), None);
}

#[test]
fn observers_see_the_change_flag() {
    init_logging();
    let flags = Rc::new(RefCell::new(Vec::new()));
    let mut store = Store::new(AppState::new());
    let sink = flags.clone();
    store.subscribe(move |view| sink.borrow_mut().push(view.dirty));

    store.dispatch(Msg::SearchSubmitted("heat".to_string()));
    store.dispatch(Msg::NoOp);

    assert_eq!(*flags.borrow(), vec![true]);
}
