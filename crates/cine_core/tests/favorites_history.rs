use cine_core::{update, AppState, Effect, Movie, Msg, HISTORY_LIMIT};

fn init_logging() {
    cine_logging::initialize_for_tests();
}

fn record_all(state: AppState, queries: &[&str]) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    let mut state = state;
    for query in queries {
        let (next, mut produced) = update(state, Msg::RecordSearch((*query).to_string()));
        effects.append(&mut produced);
        state = next;
    }
    (state, effects)
}

#[test]
fn adding_the_same_favorite_twice_keeps_one_entry() {
    init_logging();
    let movie = Movie::new(603, "The Matrix");

    let (state, effects) = update(AppState::new(), Msg::AddFavorite(movie.clone()));
    assert_eq!(effects, vec![Effect::PersistFavorites(vec![movie.clone()])]);

    let (mut state, effects) = update(state, Msg::AddFavorite(movie.clone()));
    assert!(effects.is_empty());
    assert_eq!(state.favorites().len(), 1);
    assert!(state.is_favorite(603));
    assert!(state.consume_dirty());
}

#[test]
fn duplicate_id_with_different_payload_is_still_rejected() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AddFavorite(Movie::new(1, "First")));
    let (state, effects) = update(state, Msg::AddFavorite(Movie::new(1, "Renamed")));

    assert!(effects.is_empty());
    assert_eq!(state.favorites()[0].title, "First");
}

#[test]
fn removing_an_absent_favorite_is_a_noop() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AddFavorite(Movie::new(1, "One")));
    let mut before = state.clone();
    before.consume_dirty();

    let (mut next, effects) = update(before.clone(), Msg::RemoveFavorite(99));
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next, before);
}

#[test]
fn favorites_keep_insertion_order_and_persist_full_list() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AddFavorite(Movie::new(3, "C")));
    let (state, _) = update(state, Msg::AddFavorite(Movie::new(1, "A")));
    let (state, _) = update(state, Msg::AddFavorite(Movie::new(2, "B")));
    let (state, effects) = update(state, Msg::RemoveFavorite(1));

    let ids: Vec<_> = state.favorites().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![3, 2]);
    assert_eq!(
        effects,
        vec![Effect::PersistFavorites(vec![
            Movie::new(3, "C"),
            Movie::new(2, "B")
        ])]
    );
}

#[test]
fn toggle_adds_then_removes() {
    init_logging();
    let movie = Movie::new(42, "Arrival");
    let (state, effects) = update(AppState::new(), Msg::FavoriteToggled(movie.clone()));
    assert!(state.is_favorite(42));
    assert_eq!(effects.len(), 1);

    let (state, effects) = update(state, Msg::FavoriteToggled(movie));
    assert!(!state.is_favorite(42));
    assert_eq!(effects, vec![Effect::PersistFavorites(Vec::new())]);
}

#[test]
fn re_searched_term_moves_to_front_without_growing() {
    init_logging();
    let (state, effects) = record_all(AppState::new(), &["dune", "arrival", "dune"]);

    assert_eq!(state.search_history(), ["dune", "arrival"]);
    assert_eq!(
        effects.last(),
        Some(&Effect::PersistSearchHistory(vec![
            "dune".to_string(),
            "arrival".to_string()
        ]))
    );
}

#[test]
fn history_keeps_only_the_five_most_recent() {
    init_logging();
    let (state, effects) = record_all(AppState::new(), &["a", "b", "c", "d", "e", "f"]);

    assert_eq!(HISTORY_LIMIT, 5);
    assert_eq!(state.search_history(), ["f", "e", "d", "c", "b"]);
    assert_eq!(effects.len(), 6);
}

#[test]
fn history_is_case_sensitive_and_trimmed() {
    init_logging();
    let (state, _) = record_all(AppState::new(), &["  Dune ", "dune", "   "]);

    assert_eq!(state.search_history(), ["dune", "Dune"]);
}

#[test]
fn recording_the_current_head_does_not_rewrite_storage() {
    init_logging();
    let (state, _) = record_all(AppState::new(), &["dune"]);
    let (state, effects) = update(state, Msg::RecordSearch("dune".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.search_history(), ["dune"]);
}

#[test]
fn seeding_does_not_write_back_and_normalizes_input() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::LoadFavorites(vec![Movie::new(1, "A"), Movie::new(1, "A again"), Movie::new(2, "B")]),
    );
    assert!(effects.is_empty());
    assert_eq!(state.favorites().len(), 2);

    let history: Vec<String> = (1..=7).map(|n| format!("q{n}")).collect();
    let (state, effects) = update(state, Msg::LoadSearchHistory(history));
    assert!(effects.is_empty());
    assert_eq!(state.search_history().len(), HISTORY_LIMIT);
    assert_eq!(state.search_history()[0], "q1");
}

#[test]
fn favorites_serialize_with_catalog_field_names() {
    let mut movie = Movie::new(78, "Blade Runner");
    movie.poster_path = Some("/63N9uy8nd9j7Eog2axPQ8lbr3Wj.jpg".to_string());
    movie.vote_average = 7.9;

    let json = serde_json::to_value(vec![movie.clone()]).unwrap();
    assert_eq!(json[0]["id"], 78);
    assert_eq!(json[0]["poster_path"], "/63N9uy8nd9j7Eog2axPQ8lbr3Wj.jpg");
    assert_eq!(json[0]["vote_average"], 7.9);

    let restored: Vec<Movie> = serde_json::from_value(json).unwrap();
    assert_eq!(restored, vec![movie]);
}
