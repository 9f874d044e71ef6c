use std::time::Duration;

use cine_core::{Effect, FailureKind, Listing, ListingFailure, Movie, Msg, ResultsPage};
use cine_engine::{
    CatalogError, CatalogRequest, CatalogResponse, EngineEvent, EngineHandle, Genre,
    MovieDetails, MoviePage, MovieSummary, RequestId, SlotStore,
};
use cine_logging::{cine_debug, cine_info, cine_warn};

use super::persistence;

/// Something the main loop has to act on after an engine completion.
#[derive(Debug)]
pub enum Inbound {
    /// Feed into the store.
    Msg(Msg),
    Details(Result<Box<MovieDetails>, CatalogError>),
    Genres(Result<Vec<Genre>, CatalogError>),
}

/// Executes store effects against the engine and durable storage.
pub struct EffectRunner<S: SlotStore> {
    engine: EngineHandle,
    storage: S,
    /// Ids for requests the store does not track (details, genres).
    next_local_id: RequestId,
    pending_local: usize,
}

impl<S: SlotStore> EffectRunner<S> {
    pub fn new(engine: EngineHandle, storage: S) -> Self {
        Self {
            engine,
            storage,
            next_local_id: 1,
            pending_local: 0,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchListing {
                    request_id,
                    listing,
                    page,
                } => {
                    let request = listing_request(&listing, page);
                    cine_info!("FetchListing request_id={} {}", request_id, request);
                    self.engine.submit(request_id, request);
                }
                Effect::PersistFavorites(favorites) => {
                    persistence::save_favorites(&self.storage, &favorites);
                }
                Effect::PersistSearchHistory(history) => {
                    persistence::save_search_history(&self.storage, &history);
                }
            }
        }
    }

    pub fn request_details(&mut self, id: u64) {
        self.submit_local(CatalogRequest::Details { id });
    }

    pub fn request_genres(&mut self) {
        self.submit_local(CatalogRequest::Genres);
    }

    pub fn clear_cache(&self) {
        self.engine.clear_cache();
    }

    /// Details or genre requests still awaiting completion.
    pub fn has_pending_local(&self) -> bool {
        self.pending_local > 0
    }

    pub fn next_inbound(&mut self, timeout: Duration) -> Option<Inbound> {
        let event = self.engine.recv_timeout(timeout)?;
        let inbound = translate(event);
        if !matches!(inbound, Inbound::Msg(_)) {
            self.pending_local = self.pending_local.saturating_sub(1);
        }
        Some(inbound)
    }

    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }

    fn submit_local(&mut self, request: CatalogRequest) {
        let request_id = self.next_local_id;
        self.next_local_id += 1;
        self.pending_local += 1;
        cine_debug!("local request_id={} {}", request_id, request);
        self.engine.submit(request_id, request);
    }
}

pub fn listing_request(listing: &Listing, page: u32) -> CatalogRequest {
    match listing {
        Listing::Search(query) => CatalogRequest::Search {
            query: query.clone(),
            page,
        },
        Listing::Collection(collection) => CatalogRequest::Collection {
            collection: map_collection(*collection),
            page,
        },
        Listing::Discover { genre } => CatalogRequest::Discover {
            genre: *genre,
            page,
        },
    }
}

pub fn translate(event: EngineEvent) -> Inbound {
    let EngineEvent::Completed {
        request_id,
        request,
        result,
    } = event;
    match request {
        CatalogRequest::Details { .. } => Inbound::Details(result.and_then(|response| match response {
            CatalogResponse::Details(details) => Ok(details),
            other => Err(unexpected(&other)),
        })),
        CatalogRequest::Genres => Inbound::Genres(result.and_then(|response| match response {
            CatalogResponse::Genres(genres) => Ok(genres),
            other => Err(unexpected(&other)),
        })),
        CatalogRequest::Search { .. }
        | CatalogRequest::Collection { .. }
        | CatalogRequest::Discover { .. } => {
            let result = match result {
                Ok(CatalogResponse::Page(page)) => Ok(map_page(page)),
                Ok(other) => Err(map_failure(&unexpected(&other))),
                Err(err) => {
                    cine_warn!("Listing request {} failed: {}", request_id, err);
                    Err(map_failure(&err))
                }
            };
            Inbound::Msg(Msg::ListingLoaded { request_id, result })
        }
    }
}

pub fn map_movie(summary: MovieSummary) -> Movie {
    let release_date = summary.known_release_date().map(str::to_string);
    Movie {
        id: summary.id,
        title: summary.title,
        overview: summary.overview,
        poster_path: summary.poster_path,
        backdrop_path: summary.backdrop_path,
        release_date,
        vote_average: summary.vote_average,
        vote_count: summary.vote_count,
    }
}

fn map_page(page: MoviePage) -> ResultsPage {
    ResultsPage {
        results: page.results.into_iter().map(map_movie).collect(),
        page: page.page,
        total_pages: page.total_pages,
        total_results: page.total_results,
    }
}

fn map_failure(err: &CatalogError) -> ListingFailure {
    let kind = match err {
        CatalogError::InvalidArgument(_) => FailureKind::InvalidArgument,
        CatalogError::Timeout(_) => FailureKind::Timeout,
        CatalogError::Remote { status, .. } => FailureKind::Remote(*status),
        CatalogError::Network(_) => FailureKind::Network,
    };
    ListingFailure::new(kind, err.to_string())
}

fn map_collection(collection: cine_core::Collection) -> cine_engine::Collection {
    match collection {
        cine_core::Collection::Popular => cine_engine::Collection::Popular,
        cine_core::Collection::TopRated => cine_engine::Collection::TopRated,
        cine_core::Collection::Upcoming => cine_engine::Collection::Upcoming,
    }
}

fn unexpected(response: &CatalogResponse) -> CatalogError {
    CatalogError::Network(format!("unexpected response shape: {response:?}"))
}
