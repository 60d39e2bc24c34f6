//! PokeAPI client implementation.
//!
//! Requests go through a [`TtlCache`] keyed by URL. Only bodies that decode
//! are cached, so a cache hit always decodes again.

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use pokedex_cache::TtlCache;
use pokedex_core::constants::{LOCATION_AREA_PATH, MAX_FETCH_ATTEMPTS, MAX_PAGE_SCAN, POKEMON_PATH};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::types::{LocationArea, Pokemon};

use crate::config::ApiConfig;

/// One page of location-area names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocationPage {
    /// Id the walk started at.
    pub start: u32,
    /// Names collected, in id order.
    pub names: Vec<String>,
    /// First id not visited; where the following page starts.
    pub next: u32,
}

/// PokeAPI client with cached responses.
pub struct PokeApiClient {
    base_url: Url,
    http_client: reqwest::Client,
    location_cache: TtlCache,
    pokemon_cache: TtlCache,
}

impl PokeApiClient {
    /// Creates a client and starts its caches.
    pub fn with_config(config: ApiConfig) -> Result<Self> {
        let base_url = config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PokedexError::ConfigError(format!("failed to create HTTP client: {e}")))?;

        debug!(base_url = %base_url, "PokeAPI client ready");

        Ok(Self {
            base_url,
            http_client,
            location_cache: TtlCache::new(config.location_ttl()),
            pokemon_cache: TtlCache::new(config.pokemon_ttl()),
        })
    }

    /// Fetches a location area by numeric id and returns its name.
    pub async fn location_name(&self, id: u32) -> Result<String> {
        let area = self.location_area(&id.to_string()).await?;
        Ok(area.name)
    }

    /// Collects up to `count` location names, walking ids from `start`.
    ///
    /// Recoverable failures are retried up to [`MAX_FETCH_ATTEMPTS`] times;
    /// ids that still fail are skipped. The walk gives up after
    /// [`MAX_PAGE_SCAN`] ids, so the page can come back short or empty.
    #[instrument(skip(self))]
    pub async fn location_names(&self, start: u32, count: usize) -> LocationPage {
        let limit = start.saturating_add(MAX_PAGE_SCAN);
        let mut names = Vec::with_capacity(count);
        let mut id = start;

        while names.len() < count && id < limit {
            match self.location_name_with_retry(id).await {
                Ok(name) => names.push(name),
                Err(e) if e.is_not_found() => debug!(id, "No location with this id"),
                Err(e) => warn!(id, error = %e, "Skipping location"),
            }
            id += 1;
        }

        LocationPage { start, names, next: id }
    }

    async fn location_name_with_retry(&self, id: u32) -> Result<String> {
        let mut attempt = 1;
        loop {
            match self.location_name(id).await {
                Err(e) if e.is_recoverable() && attempt < MAX_FETCH_ATTEMPTS => {
                    debug!(id, attempt, error = %e, "Retrying location");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Fetches a location area by name or id.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = self.resource_url(LOCATION_AREA_PATH, name)?;
        self.fetch(&self.location_cache, &url, "location area", name).await
    }

    /// Names of the Pokémon that can be encountered in an area.
    pub async fn pokemon_in_area(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.location_area(name).await?.pokemon_names())
    }

    /// Fetches a Pokémon by name or id.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = self.resource_url(POKEMON_PATH, name)?;
        self.fetch(&self.pokemon_cache, &url, "pokemon", name).await
    }

    /// Stops the cache sweepers. Cached responses stay usable.
    pub fn close(&self) {
        self.location_cache.close();
        self.pokemon_cache.close();
    }

    /// `{base}/{path}/{name}/`, with `name` percent-encoded.
    fn resource_url(&self, path: &str, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PokedexError::InvalidInput(format!("{path} name cannot be empty")));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PokedexError::ConfigError(format!("cannot extend base URL {}", self.base_url)))?
            .pop_if_empty()
            .push(path)
            .push(name)
            .push("");
        Ok(url.into())
    }

    #[instrument(skip(self, cache))]
    async fn fetch<T: DeserializeOwned>(
        &self,
        cache: &TtlCache,
        url: &str,
        resource: &'static str,
        name: &str,
    ) -> Result<T> {
        if let Some(body) = cache.get(url) {
            debug!("Cache hit");
            return Ok(serde_json::from_slice(&body)?);
        }
        debug!("Cache miss");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| PokedexError::HttpError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PokedexError::NotFound {
                resource,
                name: name.to_string(),
            });
        }
        if !status.is_success() {
            return Err(PokedexError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PokedexError::HttpError(e.to_string()))?;

        let value = serde_json::from_slice(&body)?;
        cache.put(url, body);
        Ok(value)
    }
}

impl std::fmt::Debug for PokeApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokeApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("location_cache", &self.location_cache)
            .field("pokemon_cache", &self.pokemon_cache)
            .finish()
    }
}
