use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cine_logging::{cine_debug, cine_info, cine_warn, redact_credentials};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::fetch::{CatalogSettings, Fetcher, ReqwestFetcher};
use crate::{
    CachePolicy, CatalogError, CatalogRequest, CatalogResponse, Clock, Collection, Genre,
    GenreList, MovieDetails, MoviePage, ResponseCache, SystemClock,
};

/// Read-only access to the remote catalog with a TTL response cache.
///
/// The cache lock is never held across an await point, so one client can be
/// shared by concurrent requests.
pub struct CatalogClient {
    settings: CatalogSettings,
    fetcher: Arc<dyn Fetcher>,
    cache: Mutex<ResponseCache>,
}

impl CatalogClient {
    pub fn new(settings: CatalogSettings) -> Result<Self, CatalogError> {
        let fetcher = Arc::new(ReqwestFetcher::new(&settings)?);
        Ok(Self::with_parts(settings, fetcher, Arc::new(SystemClock)))
    }

    pub fn with_parts(
        settings: CatalogSettings,
        fetcher: Arc<dyn Fetcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = ResponseCache::new(settings.cache_ttl, clock);
        Self {
            settings,
            fetcher,
            cache: Mutex::new(cache),
        }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    pub async fn search(&self, query: &str, page: u32) -> Result<MoviePage, CatalogError> {
        let request = CatalogRequest::Search {
            query: query.to_string(),
            page,
        };
        self.execute(&request, CachePolicy::Use).await
    }

    /// Details with credits, videos, recommendations and similar titles embedded.
    pub async fn movie_details(&self, id: u64) -> Result<MovieDetails, CatalogError> {
        self.execute(&CatalogRequest::Details { id }, CachePolicy::Use)
            .await
    }

    pub async fn collection(
        &self,
        collection: Collection,
        page: u32,
    ) -> Result<MoviePage, CatalogError> {
        let request = CatalogRequest::Collection { collection, page };
        self.execute(&request, CachePolicy::Use).await
    }

    pub async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        let list: GenreList = self
            .execute(&CatalogRequest::Genres, CachePolicy::Use)
            .await?;
        Ok(list.genres)
    }

    /// Popular titles, optionally restricted to one genre.
    pub async fn discover(&self, genre: Option<u32>, page: u32) -> Result<MoviePage, CatalogError> {
        let request = CatalogRequest::Discover { genre, page };
        self.execute(&request, CachePolicy::Use).await
    }

    /// Runs `request` and decodes the payload into the response type matching
    /// its variant.
    pub async fn respond(&self, request: &CatalogRequest) -> Result<CatalogResponse, CatalogError> {
        let response = match request {
            CatalogRequest::Details { .. } => CatalogResponse::Details(Box::new(
                self.execute(request, CachePolicy::Use).await?,
            )),
            CatalogRequest::Genres => {
                let list: GenreList = self.execute(request, CachePolicy::Use).await?;
                CatalogResponse::Genres(list.genres)
            }
            CatalogRequest::Search { .. }
            | CatalogRequest::Collection { .. }
            | CatalogRequest::Discover { .. } => {
                CatalogResponse::Page(self.execute(request, CachePolicy::Use).await?)
            }
        };
        Ok(response)
    }

    /// Validates, consults the cache, fetches under the request deadline and
    /// decodes. Only payloads that decode are cached.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &CatalogRequest,
        policy: CachePolicy,
    ) -> Result<T, CatalogError> {
        request.validate()?;
        let signature = request.signature();

        if policy == CachePolicy::Use {
            let cached = self.cache().get(&signature);
            if let Some(payload) = cached {
                cine_debug!("cache hit {}", signature);
                return decode(payload);
            }
        }

        let payload = self.fetch(request).await?;
        let decoded = decode(payload.clone())?;
        if policy == CachePolicy::Use {
            self.cache().insert(signature, payload);
        }
        Ok(decoded)
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    /// Number of cached responses, expired ones not yet evicted included.
    pub fn cached_entries(&self) -> usize {
        self.cache().len()
    }

    async fn fetch(&self, request: &CatalogRequest) -> Result<Value, CatalogError> {
        let url = request.url(&self.settings.base_url, &self.settings.api_key)?;
        let deadline = self.settings.request_timeout;
        cine_info!("GET {}", redact_credentials(url.as_str()));

        // Dropping the transport future on expiry aborts the in-flight request.
        let result = match tokio::time::timeout(deadline, self.fetcher.get_json(&url)).await {
            Ok(result) => result,
            Err(_) => Err(CatalogError::Timeout(deadline)),
        };
        if let Err(err) = &result {
            cine_warn!("request {} failed: {}", request, err);
        }
        result
    }

    fn cache(&self) -> MutexGuard<'_, ResponseCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, CatalogError> {
    serde_json::from_value(payload)
        .map_err(|err| CatalogError::network(format!("malformed response body: {err}")))
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.settings.base_url)
            .field("request_timeout", &self.settings.request_timeout)
            .finish_non_exhaustive()
    }
}
