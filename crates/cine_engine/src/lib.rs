//! CineDiscover engine: catalog access, response cache and local storage.
mod cache;
mod client;
mod engine;
mod fetch;
mod images;
mod model;
mod persist;
mod request;
mod types;

pub use cache::{CacheEntry, Clock, ManualClock, ResponseCache, SystemClock, DEFAULT_TTL};
pub use client::CatalogClient;
pub use engine::EngineHandle;
pub use fetch::{CatalogSettings, Fetcher, ReqwestFetcher, DEFAULT_BASE_URL};
pub use images::{image_url, image_url_with_base, ImageKind, ImageSize, IMAGE_BASE_URL};
pub use model::{
    CastMember, Credits, CrewMember, Genre, GenreList, MovieDetails, MoviePage, MovieSummary,
    ProductionCompany, ProductionCountry, ReleaseStatus, Video, VideoList,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, FileSlotStore, PersistError, SlotStore};
pub use request::{CachePolicy, CatalogRequest, Collection};
pub use types::{CatalogError, CatalogResponse, EngineEvent, RequestId};
