// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Envelope returned by the directory service for both search and lookup calls.
///
/// `results` stays as raw values because lookup responses mix record kinds
/// (the podcast record first, its episodes after it); records are decoded
/// individually so one malformed entry never poisons the rest.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectoryResponse {
    pub result_count: u64,
    pub results: Vec<Value>,
}

/// Raw podcast/collection record as the directory service returns it.
/// Every field may be absent; defaulting happens here, at the boundary.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPodcast {
    pub collection_id: Option<i64>,
    pub collection_name: Option<String>,
    pub artist_name: Option<String>,
    pub description: Option<String>,
    pub feed_url: Option<String>,
    pub collection_view_url: Option<String>,
    pub artwork_url_60: Option<String>,
    pub artwork_url_100: Option<String>,
    pub artwork_url_600: Option<String>,
    pub primary_genre_name: Option<String>,
    #[serde(deserialize_with = "deserialize_genres")]
    pub genres: Vec<String>,
    pub track_count: Option<u64>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub content_advisory_rating: Option<String>,
    pub release_date: Option<String>,
}

/// Raw episode record as the directory service returns it
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEpisode {
    pub track_id: Option<i64>,
    pub collection_id: Option<i64>,
    pub track_name: Option<String>,
    pub collection_name: Option<String>,
    pub artist_name: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub release_date: Option<String>,
    pub track_time_millis: Option<i64>,
    pub track_view_url: Option<String>,
    pub episode_url: Option<String>,
    pub artwork_url_60: Option<String>,
    pub artwork_url_160: Option<String>,
    pub artwork_url_600: Option<String>,
    #[serde(deserialize_with = "deserialize_genres")]
    pub genres: Vec<String>,
}

/// A lookup result split into the podcast record and its episode records
#[derive(Debug, Clone, Default)]
pub struct LookupResults {
    pub podcast: Option<RawPodcast>,
    pub episodes: Vec<RawEpisode>,
}

/// Genre entries arrive either as plain strings or as `{name: ..., id: ...}`
/// objects depending on the record kind.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenreEntry {
    Name(String),
    Tagged { name: String },
}

fn deserialize_genres<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<GenreEntry>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(|entry| match entry {
            GenreEntry::Name(name) => name,
            GenreEntry::Tagged { name } => name,
        })
        .collect())
}

fn is_episode_record(value: &Value) -> bool {
    let field = |key: &str| value.get(key).and_then(Value::as_str);
    field("wrapperType") == Some("podcastEpisode") || field("kind") == Some("podcastEpisode")
}

/// Split a mixed lookup result list into the podcast record and its episodes.
///
/// Records that fail to decode are skipped with a warning; the directory
/// data is known to be inconsistent and one bad record must not fail the call.
pub fn partition_lookup(results: Vec<Value>) -> LookupResults {
    let mut lookup = LookupResults::default();

    for value in results {
        if is_episode_record(&value) {
            match serde_json::from_value::<RawEpisode>(value) {
                Ok(episode) => lookup.episodes.push(episode),
                Err(e) => warn!("Skipping undecodable episode record: {e}"),
            }
        } else {
            match serde_json::from_value::<RawPodcast>(value) {
                Ok(podcast) => {
                    if lookup.podcast.is_none() {
                        lookup.podcast = Some(podcast);
                    }
                }
                Err(e) => warn!("Skipping undecodable podcast record: {e}"),
            }
        }
    }

    lookup
}

/// Decode search results, skipping records that fail to decode
pub fn decode_podcasts(results: Vec<Value>) -> Vec<RawPodcast> {
    results
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawPodcast>(value) {
            Ok(podcast) => Some(podcast),
            Err(e) => {
                warn!("Skipping undecodable search record: {e}");
                None
            }
        })
        .collect()
}
