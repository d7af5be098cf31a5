// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::directory::RawEpisode;

use super::duration::format_duration;
use super::frequency::{self, LabelScheme};

/// Summary statistics derived from an episode collection.
///
/// Recomputed on every request; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeAnalytics {
    pub total_episodes: usize,
    pub average_duration_seconds: i64,
    pub average_duration_minutes: i64,
    pub average_duration_formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_episode_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_episode_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_days_between_episodes: Option<i64>,
    pub publishing_frequency: String,
}

/// Aggregate raw episodes into summary statistics.
///
/// Returns None for an empty collection. Episodes with missing or
/// non-positive durations are excluded from the duration average;
/// unparseable release dates are excluded from the date-derived fields.
pub fn analyze_episodes(
    episodes: &[RawEpisode],
    max_pairs: usize,
    scheme: LabelScheme,
) -> Option<EpisodeAnalytics> {
    if episodes.is_empty() {
        return None;
    }

    let durations: Vec<i64> = episodes
        .iter()
        .filter_map(|episode| episode.track_time_millis)
        .map(|ms| ms / 1000)
        .filter(|&seconds| seconds > 0)
        .collect();

    let average_duration_seconds = if durations.is_empty() {
        0
    } else {
        let total: i64 = durations.iter().sum();
        (total as f64 / durations.len() as f64).round() as i64
    };

    let dates = frequency::parse_release_dates(
        episodes
            .iter()
            .filter_map(|episode| episode.release_date.as_deref()),
    );
    let cadence = frequency::estimate(&dates, max_pairs);

    let to_timestamp =
        |date: &chrono::DateTime<chrono::Utc>| date.to_rfc3339_opts(SecondsFormat::Secs, true);

    Some(EpisodeAnalytics {
        total_episodes: episodes.len(),
        average_duration_seconds,
        average_duration_minutes: (average_duration_seconds as f64 / 60.0).round() as i64,
        average_duration_formatted: format_duration(Some(average_duration_seconds * 1000)),
        first_episode_date: dates.last().map(to_timestamp),
        latest_episode_date: dates.first().map(to_timestamp),
        average_days_between_episodes: cadence
            .average_days_between
            .map(|days| days.round() as i64),
        publishing_frequency: cadence.frequency.label(scheme).to_string(),
    })
}
