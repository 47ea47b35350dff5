use crate::cli::SortOrder;
use crate::config::ClientConfig;
use crate::filter::{self, EntityFilter};
use crate::models::{Entity, ValidationError};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Failures a resource operation can surface. Not-found lookups are not
/// errors; `get_by_id` reports them as `Ok(None)`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Request to the pantry API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{method} {url} returned {status}")]
    Status {
        method: &'static str,
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Server-side options for list requests, appended after the filter's own
/// query parameters.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

/// The id envelope returned by create operations.
#[derive(Debug, Deserialize)]
struct CreatedEnvelope {
    id: String,
}

/// HTTP client for one pantry API server, shared by all four resources.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    fn entity_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }

    /// Fetch the collection, filtered and sorted by the server.
    pub async fn list<E: Entity>(
        &self,
        filter: &E::Filter,
        options: &ListOptions,
    ) -> Result<Vec<E>, ApiError> {
        let url = self.collection_url(E::COLLECTION);
        let mut query = filter.query();
        query.push("sortby", options.sort_by.as_deref());
        if options.sort_by.is_some() {
            query.push("sortorder", Some(options.sort_order.as_param()));
        }

        tracing::debug!(url = %url, params = query.pairs().len(), "listing {}s", E::KIND);
        let resp = self.http.get(&url).query(query.pairs()).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                method: "GET",
                url,
                status: resp.status(),
            });
        }

        resp.json()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }

    /// Fetch a single entity. A 404 from the server becomes `Ok(None)`.
    pub async fn get_by_id<E: Entity>(&self, id: &str) -> Result<Option<E>, ApiError> {
        let url = self.entity_url(E::COLLECTION, id);
        let resp = self.http.get(&url).send().await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(url = %url, "no such {}", E::KIND);
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                method: "GET",
                url,
                status: resp.status(),
            });
        }

        let entity = resp
            .json()
            .await
            .map_err(|source| ApiError::Decode { url, source })?;
        Ok(Some(entity))
    }

    /// Validate and create a new entity; returns the server-assigned id
    /// extracted from the `{id}` response envelope.
    pub async fn add<E: Entity>(&self, entity: &E) -> Result<String, ApiError> {
        entity.validate()?;

        let url = self.collection_url(E::COLLECTION);
        let resp = self.http.post(&url).json(entity).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                method: "POST",
                url,
                status: resp.status(),
            });
        }

        let envelope: CreatedEnvelope = resp
            .json()
            .await
            .map_err(|source| ApiError::Decode { url, source })?;
        tracing::info!(id = %envelope.id, "created {}", E::KIND);
        Ok(envelope.id)
    }

    /// Delete an entity. Returns false when the server never had it.
    pub async fn remove<E: Entity>(&self, id: &str) -> Result<bool, ApiError> {
        let url = self.entity_url(E::COLLECTION, id);
        let resp = self.http.delete(&url).send().await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                method: "DELETE",
                url,
                status: resp.status(),
            });
        }
        Ok(true)
    }

    /// Re-apply `filter` to an already-fetched collection without a round
    /// trip, e.g. while the user is still typing in a filter box.
    pub fn filter<E: Entity>(&self, entities: &[E], filter: &E::Filter) -> Vec<E> {
        filter::apply(entities, filter)
    }
}
