use std::fmt;

use url::{form_urlencoded, Url};

use crate::CatalogError;

/// Curated listings served by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Popular,
    TopRated,
    Upcoming,
}

impl Collection {
    fn path_segment(self) -> &'static str {
        match self {
            Collection::Popular => "popular",
            Collection::TopRated => "top_rated",
            Collection::Upcoming => "upcoming",
        }
    }
}

/// Whether a read may be answered from, and stored into, the response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    #[default]
    Use,
    /// Always go to the network and leave the cache untouched.
    Bypass,
}

/// Sub-resources embedded into a details response.
const DETAILS_APPENDS: &str = "credits,videos,recommendations,similar";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogRequest {
    Search { query: String, page: u32 },
    Details { id: u64 },
    Collection { collection: Collection, page: u32 },
    Genres,
    Discover { genre: Option<u32>, page: u32 },
}

impl CatalogRequest {
    /// Checks arguments that must be rejected before touching the network.
    pub fn validate(&self) -> Result<(), CatalogError> {
        match self {
            CatalogRequest::Search { query, page } => {
                if query.trim().is_empty() {
                    return Err(CatalogError::invalid("search query cannot be empty"));
                }
                check_page(*page)
            }
            CatalogRequest::Details { id } => {
                if *id == 0 {
                    return Err(CatalogError::invalid("movie id must be positive"));
                }
                Ok(())
            }
            CatalogRequest::Collection { page, .. } | CatalogRequest::Discover { page, .. } => {
                check_page(*page)
            }
            CatalogRequest::Genres => Ok(()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            CatalogRequest::Search { .. } => "/search/movie".to_string(),
            CatalogRequest::Details { id } => format!("/movie/{id}"),
            CatalogRequest::Collection { collection, .. } => {
                format!("/movie/{}", collection.path_segment())
            }
            CatalogRequest::Genres => "/genre/movie/list".to_string(),
            CatalogRequest::Discover { .. } => "/discover/movie".to_string(),
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            CatalogRequest::Search { query, page } => vec![
                ("query", query.clone()),
                ("page", page.to_string()),
                ("include_adult", "false".to_string()),
            ],
            CatalogRequest::Details { .. } => {
                vec![("append_to_response", DETAILS_APPENDS.to_string())]
            }
            CatalogRequest::Collection { page, .. } => vec![("page", page.to_string())],
            CatalogRequest::Genres => Vec::new(),
            CatalogRequest::Discover { genre, page } => {
                let mut params = vec![
                    ("page", page.to_string()),
                    ("sort_by", "popularity.desc".to_string()),
                ];
                if let Some(genre) = genre {
                    params.push(("with_genres", genre.to_string()));
                }
                params
            }
        }
    }

    /// Cache key: path plus encoded query parameters, without the credential.
    pub fn signature(&self) -> String {
        let params = self.params();
        if params.is_empty() {
            return self.path();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        format!("{}?{query}", self.path())
    }

    /// Full outbound URL with the credential attached.
    pub(crate) fn url(&self, base_url: &str, api_key: &str) -> Result<Url, CatalogError> {
        let raw = format!("{}{}", base_url.trim_end_matches('/'), self.path());
        let mut url = Url::parse(&raw)
            .map_err(|err| CatalogError::invalid(format!("invalid base url {base_url}: {err}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            if !api_key.is_empty() {
                pairs.append_pair(cine_logging::CREDENTIAL_PARAM, api_key);
            }
            pairs.extend_pairs(self.params());
        }
        Ok(url)
    }
}

fn check_page(page: u32) -> Result<(), CatalogError> {
    if page == 0 {
        return Err(CatalogError::invalid("page must be positive"));
    }
    Ok(())
}

impl fmt::Display for CatalogRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}
