// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heuristic audience estimates derived from a podcast's genre and catalog
//! size. Two strategies exist: a cheap absolute figure attached to search
//! results, and a richer structured estimate for detail views. Both are
//! explicitly low-confidence guesses, not measured metrics.

use serde::Serialize;

/// Absolute listener bases per genre for the search strategy
const SEARCH_LISTENER_BASES: &[(&str, f64)] = &[
    ("True Crime", 15_000.0),
    ("News", 12_000.0),
    ("Comedy", 10_000.0),
    ("Society & Culture", 8_000.0),
    ("Sports", 7_000.0),
    ("Business", 6_500.0),
    ("Health & Fitness", 6_000.0),
    ("Technology", 5_500.0),
    ("Education", 5_000.0),
];
const DEFAULT_SEARCH_BASE: f64 = 4_000.0;

/// Multiplicative scale factors per genre for the detail strategy
const DETAIL_GENRE_SCALES: &[(&str, f64)] = &[
    ("True Crime", 2.5),
    ("News", 2.0),
    ("Comedy", 1.8),
    ("Society & Culture", 1.6),
    ("Sports", 1.5),
    ("Business", 1.3),
    ("Health & Fitness", 1.3),
    ("Technology", 1.2),
    ("Education", 1.1),
];
const DEFAULT_DETAIL_SCALE: f64 = 1.0;

const BASE_WEEKLY_LISTENERS: f64 = 5_000.0;
const DOWNLOADS_PER_LISTENER: f64 = 0.7;

const ESTIMATE_NOTE: &str =
    "Estimated from genre and catalog size; not a measured audience figure";

/// Which estimation strategy to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopularityContext {
    Search,
    Detail,
}

/// Structured audience estimate produced by the detail strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudienceEstimate {
    pub estimated_weekly_listeners: u64,
    pub estimated_downloads_per_episode: u64,
    pub confidence: &'static str,
    pub note: &'static str,
}

/// Output of either popularity strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PopularityEstimate {
    Search { estimated_listeners: u64 },
    Detail(AudienceEstimate),
}

fn table_lookup(table: &[(&str, f64)], genre: &str, default: f64) -> f64 {
    table
        .iter()
        .find(|(name, _)| *name == genre)
        .map(|(_, coefficient)| *coefficient)
        .unwrap_or(default)
}

/// Search-strategy estimate: a single listener figure.
///
/// Genre picks an absolute base; the catalog size adds up to a 6x boost,
/// saturating at 500 episodes.
pub fn estimate_search_listeners(genre: &str, episode_count: u64) -> u64 {
    let base = table_lookup(SEARCH_LISTENER_BASES, genre, DEFAULT_SEARCH_BASE);
    let episode_factor = (episode_count as f64 / 100.0).min(5.0);
    (base * (1.0 + episode_factor)).floor() as u64
}

/// Detail-strategy estimate: weekly listeners plus per-episode downloads.
///
/// Genre scales a fixed base; the catalog size contributes logarithmically
/// so back-catalog giants don't run away from newer shows.
pub fn estimate_detail_metrics(genre: &str, episode_count: u64) -> AudienceEstimate {
    let scale = table_lookup(DETAIL_GENRE_SCALES, genre, DEFAULT_DETAIL_SCALE);
    let episode_factor = ((episode_count + 1) as f64).log10();

    let weekly = (BASE_WEEKLY_LISTENERS * scale * episode_factor).floor() as u64;
    let downloads = (weekly as f64 * DOWNLOADS_PER_LISTENER).floor() as u64;

    AudienceEstimate {
        estimated_weekly_listeners: weekly,
        estimated_downloads_per_episode: downloads,
        confidence: "low",
        note: ESTIMATE_NOTE,
    }
}

/// Apply the strategy selected by `context`
pub fn estimate_popularity(
    genre: &str,
    episode_count: u64,
    context: PopularityContext,
) -> PopularityEstimate {
    match context {
        PopularityContext::Search => PopularityEstimate::Search {
            estimated_listeners: estimate_search_listeners(genre, episode_count),
        },
        PopularityContext::Detail => {
            PopularityEstimate::Detail(estimate_detail_metrics(genre, episode_count))
        }
    }
}
