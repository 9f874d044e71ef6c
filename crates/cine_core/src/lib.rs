//! CineDiscover core: pure application state machine and view-model helpers.
mod effect;
mod failure;
mod listing;
mod movie;
mod msg;
mod pagination;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::Effect;
pub use failure::{FailureKind, ListingFailure};
pub use listing::{Collection, Listing};
pub use movie::{Movie, MovieId, ResultsPage};
pub use msg::Msg;
pub use pagination::{visible_pages, PageSlot, DEFAULT_VISIBLE_PAGES};
pub use state::{AppState, RequestId, HISTORY_LIMIT, MAX_DISPLAY_PAGES};
pub use store::Store;
pub use update::update;
pub use view_model::AppViewModel;
