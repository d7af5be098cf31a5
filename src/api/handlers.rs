// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analytics::{
    CATALOG_LOOKBACK_PAIRS, EpisodeAnalytics, LabelScheme, analyze_episodes, parse_release_date,
};
use crate::directory::{RawEpisode, RawPodcast};
use crate::error::{ApiError, DirectoryError};
use crate::normalize::{
    EpisodeProfile, NormalizedEpisode, NormalizedPodcast, PodcastOptions, SearchItem,
    normalize_episode, normalize_podcast, normalize_search_hit,
};

use super::AppContext;

const DEFAULT_SEARCH_LIMIT: u32 = 10;
const MAX_SEARCH_LIMIT: u32 = 50;
const DEFAULT_EPISODE_LIMIT: u32 = 50;
const MAX_EPISODE_LIMIT: u32 = 200;

/// Episodes fetched per search hit for cadence enrichment
const ENRICHMENT_EPISODE_FETCH: u32 = 20;
/// Episodes fetched for a podcast detail view
const DETAIL_EPISODE_FETCH: u32 = 25;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: usize,
    pub country: Option<String>,
    pub entity: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PodcastParams {
    pub podcast_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EpisodeParams {
    pub podcast_id: Option<String>,
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub result_count: usize,
    pub results: Vec<SearchItem>,
}

#[derive(Debug, Serialize)]
pub struct EpisodeListResponse {
    pub podcast_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_name: Option<String>,
    pub analytics: Option<EpisodeAnalytics>,
    pub result_count: usize,
    pub episodes: Vec<NormalizedEpisode>,
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingParameter { name })
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Search the directory and enrich each hit with publishing-cadence
/// insights. Enrichment lookups run concurrently and fail independently:
/// a hit whose lookup fails is returned as its minimal record.
pub async fn search(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = required(&params.query, "query")?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .min(MAX_SEARCH_LIMIT) as usize;
    let country = params.country.as_deref().unwrap_or("US");
    let entity = params.entity.as_deref().unwrap_or("podcast");

    // Fetch one upstream page large enough to slice locally
    let fetch = (params.offset + limit).min(MAX_EPISODE_LIMIT as usize) as u32;
    let hits = ctx.directory.search(query, entity, country, fetch).await?;
    info!(query, hits = hits.len(), "directory search");

    let page: Vec<&RawPodcast> = hits.iter().skip(params.offset).take(limit).collect();
    let results = join_all(page.into_iter().map(|hit| enrich_search_hit(&ctx, hit))).await;

    Ok(Json(SearchResponse {
        query: query.to_string(),
        result_count: results.len(),
        results,
    }))
}

async fn enrich_search_hit(ctx: &AppContext, raw: &RawPodcast) -> SearchItem {
    let mut item = normalize_search_hit(raw);

    let Some(id) = raw.collection_id else {
        return item;
    };

    match ctx
        .directory
        .lookup_episodes(&id.to_string(), ENRICHMENT_EPISODE_FETCH)
        .await
    {
        Ok(lookup) => {
            item.episode_insights = analyze_episodes(
                &lookup.episodes,
                CATALOG_LOOKBACK_PAIRS,
                LabelScheme::Catalog,
            );
        }
        Err(e) => {
            warn!(podcast_id = id, "enrichment failed, keeping minimal record: {e}");
        }
    }

    item
}

/// Podcast detail: the normalized record with embedded recent episodes,
/// episode insights, and the detail-strategy audience estimate
pub async fn podcast_detail(
    State(ctx): State<AppContext>,
    Query(params): Query<PodcastParams>,
) -> Result<Json<NormalizedPodcast>, ApiError> {
    let id = required(&params.podcast_id, "podcast_id")?;

    let lookup = ctx
        .directory
        .lookup_episodes(id, DETAIL_EPISODE_FETCH)
        .await?;

    let podcast = lookup
        .podcast
        .ok_or_else(|| DirectoryError::NotFound { id: id.to_string() })?;

    info!(podcast_id = id, episodes = lookup.episodes.len(), "podcast detail");

    Ok(Json(normalize_podcast(
        &podcast,
        &lookup.episodes,
        &PodcastOptions::default(),
    )))
}

/// Full episode listing with catalog-wide analytics. Pagination applies to
/// the episode array only; analytics always cover the full fetched list.
pub async fn episode_list(
    State(ctx): State<AppContext>,
    Query(params): Query<EpisodeParams>,
) -> Result<Json<EpisodeListResponse>, ApiError> {
    let id = required(&params.podcast_id, "podcast_id")?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_EPISODE_LIMIT)
        .min(MAX_EPISODE_LIMIT) as usize;

    let fetch = (params.offset + limit).min(MAX_EPISODE_LIMIT as usize) as u32;
    let lookup = ctx.directory.lookup_episodes(id, fetch).await?;

    if lookup.podcast.is_none() && lookup.episodes.is_empty() {
        return Err(DirectoryError::NotFound { id: id.to_string() }.into());
    }

    let analytics = analyze_episodes(
        &lookup.episodes,
        CATALOG_LOOKBACK_PAIRS,
        LabelScheme::Catalog,
    );

    let mut ordered: Vec<&RawEpisode> = lookup.episodes.iter().collect();
    ordered.sort_by_key(|episode| {
        std::cmp::Reverse(episode.release_date.as_deref().and_then(parse_release_date))
    });

    let episodes: Vec<NormalizedEpisode> = ordered
        .into_iter()
        .skip(params.offset)
        .take(limit)
        .map(|raw| normalize_episode(raw, &EpisodeProfile::Compact))
        .collect();

    Ok(Json(EpisodeListResponse {
        podcast_id: id.to_string(),
        podcast_name: lookup
            .podcast
            .as_ref()
            .and_then(|podcast| podcast.collection_name.clone()),
        analytics,
        result_count: episodes.len(),
        episodes,
    }))
}
