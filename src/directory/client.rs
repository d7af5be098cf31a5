// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::debug;
use url::Url;

use crate::error::DirectoryError;
use crate::http::SharedHttpClient;

use super::types::{
    DirectoryResponse, LookupResults, RawPodcast, decode_podcasts, partition_lookup,
};

/// Base URL of the public podcast directory service
pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

/// Client for the upstream podcast directory service.
///
/// Each operation performs a single GET request; there are no retries.
/// The upstream is treated as a black box returning a known JSON envelope.
pub struct DirectoryClient {
    client: SharedHttpClient,
    base_url: Url,
}

impl DirectoryClient {
    /// Create a client against the default directory service
    pub fn new(client: SharedHttpClient) -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("valid default base URL");
        Self::with_base_url(client, base_url)
    }

    /// Create a client against a custom base URL (used by tests and mirrors)
    pub fn with_base_url(client: SharedHttpClient, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, DirectoryError> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    async fn get_payload(&self, url: Url) -> Result<DirectoryResponse, DirectoryError> {
        debug!(%url, "directory request");

        let response =
            self.client
                .get(url.as_str())
                .await
                .map_err(|e| DirectoryError::RequestFailed {
                    url: url.to_string(),
                    source: e,
                })?;

        if response.status >= 400 {
            return Err(DirectoryError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| DirectoryError::DecodeFailed {
            url: url.to_string(),
            source: e,
        })
    }

    /// Search the directory for podcasts matching a term
    pub async fn search(
        &self,
        term: &str,
        entity: &str,
        country: &str,
        limit: u32,
    ) -> Result<Vec<RawPodcast>, DirectoryError> {
        let url = self.endpoint(
            "/search",
            &[
                ("term", term),
                ("media", "podcast"),
                ("entity", entity),
                ("country", country),
                ("limit", &limit.to_string()),
            ],
        )?;

        let payload = self.get_payload(url).await?;
        Ok(decode_podcasts(payload.results))
    }

    /// Look up a single podcast record by its directory id
    pub async fn lookup_podcast(&self, id: &str) -> Result<RawPodcast, DirectoryError> {
        let url = self.endpoint("/lookup", &[("id", id), ("entity", "podcast")])?;

        let payload = self.get_payload(url).await?;
        partition_lookup(payload.results)
            .podcast
            .ok_or_else(|| DirectoryError::NotFound { id: id.to_string() })
    }

    /// Look up a podcast together with its most recent episodes.
    ///
    /// The directory returns the podcast record first and episode records
    /// after it; the result is partitioned accordingly.
    pub async fn lookup_episodes(
        &self,
        id: &str,
        limit: u32,
    ) -> Result<LookupResults, DirectoryError> {
        let url = self.endpoint(
            "/lookup",
            &[
                ("id", id),
                ("entity", "podcastEpisode"),
                ("limit", &limit.to_string()),
            ],
        )?;

        let payload = self.get_payload(url).await?;
        Ok(partition_lookup(payload.results))
    }
}
