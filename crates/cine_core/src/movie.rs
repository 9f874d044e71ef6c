use serde::{Deserialize, Serialize};

pub type MovieId = u64;

/// Summary of a catalog movie as shown in listings and stored in favorites.
///
/// Field names follow the catalog's wire format so persisted favorites stay
/// readable by other clients of the same storage slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
}

impl Movie {
    /// Minimal constructor; the remaining attributes default to empty.
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: 0.0,
            vote_count: 0,
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultsPage {
    pub results: Vec<Movie>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}
