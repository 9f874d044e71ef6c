use std::fmt;

/// Curated collections offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Collection {
    #[default]
    Popular,
    TopRated,
    Upcoming,
}

impl Collection {
    pub fn label(self) -> &'static str {
        match self {
            Collection::Popular => "popular",
            Collection::TopRated => "top rated",
            Collection::Upcoming => "upcoming",
        }
    }
}

/// What the results area is currently showing.
///
/// The page-change and retry handlers dispatch on this instead of inferring
/// the mode from whether a query string happens to be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Collection(Collection),
    Search(String),
    Discover { genre: Option<u32> },
}

impl Default for Listing {
    fn default() -> Self {
        Listing::Collection(Collection::Popular)
    }
}

impl Listing {
    /// The active query string; empty outside of search mode.
    pub fn query(&self) -> &str {
        match self {
            Listing::Search(query) => query,
            Listing::Collection(_) | Listing::Discover { .. } => "",
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Listing::Search(_))
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Collection(collection) => write!(f, "{} movies", collection.label()),
            Listing::Search(query) => write!(f, "results for \"{query}\""),
            Listing::Discover { genre: Some(genre) } => write!(f, "movies in genre {genre}"),
            Listing::Discover { genre: None } => write!(f, "discovered movies"),
        }
    }
}
