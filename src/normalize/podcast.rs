// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

use crate::analytics::{
    AudienceEstimate, DETAIL_LOOKBACK_PAIRS, EpisodeAnalytics, LabelScheme, analyze_episodes,
    estimate_detail_metrics, estimate_search_listeners, parse_release_date,
};
use crate::directory::{RawEpisode, RawPodcast};

use super::episode::{ArtworkSet, EpisodeProfile, NormalizedEpisode, normalize_episode};

const COMPACT_DESCRIPTION_CHARS: usize = 200;

/// Options controlling the normalized podcast shape
#[derive(Debug, Clone)]
pub struct PodcastOptions {
    /// How many of the most recent episodes to embed
    pub recent_window: usize,
    /// Truncate embedded episode descriptions to 200 characters
    pub compact_descriptions: bool,
}

impl Default for PodcastOptions {
    fn default() -> Self {
        Self {
            recent_window: 10,
            compact_descriptions: false,
        }
    }
}

/// A podcast record in the service's stable output schema
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedPodcast {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork: Option<ArtworkSet>,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub explicit: bool,
    pub episode_count: u64,
    /// None exactly when the supplied episode list was empty
    pub episode_insights: Option<EpisodeAnalytics>,
    pub estimated_metrics: AudienceEstimate,
    pub recent_episodes: Vec<NormalizedEpisode>,
}

/// A search hit in the service's output schema: identity fields plus the
/// cheap search-strategy audience figure
#[derive(Debug, Clone, Serialize)]
pub struct SearchItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork: Option<ArtworkSet>,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_genre: Option<String>,
    pub episode_count: u64,
    pub explicit: bool,
    pub estimated_listeners: u64,
    /// Attached by the search handler when per-item enrichment succeeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_insights: Option<EpisodeAnalytics>,
}

fn podcast_artwork(raw: &RawPodcast) -> Option<ArtworkSet> {
    let set = ArtworkSet {
        small: raw.artwork_url_60.clone(),
        medium: raw.artwork_url_100.clone(),
        large: raw.artwork_url_600.clone(),
    };
    (set.small.is_some() || set.medium.is_some() || set.large.is_some()).then_some(set)
}

fn is_explicit(raw: &RawPodcast) -> bool {
    raw.content_advisory_rating.as_deref() == Some("Explicit")
}

/// Truncate to a character count, appending an ellipsis when cut
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Map a podcast record and its episode list into the normalized shape.
///
/// Episode insights use the detail lookback cap; the audience estimate uses
/// the detail strategy keyed by the podcast's primary genre. The embedded
/// episode list is sorted most-recent-first and truncated to the configured
/// window (episodes without a parseable release date sort last).
pub fn normalize_podcast(
    collection: &RawPodcast,
    episodes: &[RawEpisode],
    options: &PodcastOptions,
) -> NormalizedPodcast {
    let episode_insights = analyze_episodes(episodes, DETAIL_LOOKBACK_PAIRS, LabelScheme::Detail);

    let episode_count = collection.track_count.unwrap_or(episodes.len() as u64);
    let genre = collection.primary_genre_name.as_deref().unwrap_or("");
    let estimated_metrics = estimate_detail_metrics(genre, episode_count);

    let profile = EpisodeProfile::Detail {
        podcast_name: collection.collection_name.clone(),
        podcast_publisher: collection.artist_name.clone(),
    };

    let mut ordered: Vec<&RawEpisode> = episodes.iter().collect();
    ordered.sort_by_key(|episode| {
        std::cmp::Reverse(episode.release_date.as_deref().and_then(parse_release_date))
    });

    let recent_episodes = ordered
        .into_iter()
        .take(options.recent_window)
        .map(|raw| {
            let mut episode = normalize_episode(raw, &profile);
            if options.compact_descriptions {
                episode.description = episode
                    .description
                    .map(|text| truncate_chars(&text, COMPACT_DESCRIPTION_CHARS));
            }
            episode
        })
        .collect();

    NormalizedPodcast {
        id: collection
            .collection_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        name: collection.collection_name.clone(),
        publisher: collection.artist_name.clone(),
        description: collection.description.clone(),
        feed_url: collection.feed_url.clone(),
        website: collection.collection_view_url.clone(),
        artwork: podcast_artwork(collection),
        genres: collection.genres.clone(),
        primary_genre: collection.primary_genre_name.clone(),
        country: collection.country.clone(),
        language: collection.language.clone(),
        explicit: is_explicit(collection),
        episode_count,
        episode_insights,
        estimated_metrics,
        recent_episodes,
    }
}

/// Map a search result record into a search item
pub fn normalize_search_hit(raw: &RawPodcast) -> SearchItem {
    let episode_count = raw.track_count.unwrap_or(0);
    let genre = raw.primary_genre_name.as_deref().unwrap_or("");

    SearchItem {
        id: raw.collection_id.map(|id| id.to_string()).unwrap_or_default(),
        name: raw.collection_name.clone(),
        publisher: raw.artist_name.clone(),
        feed_url: raw.feed_url.clone(),
        website: raw.collection_view_url.clone(),
        artwork: podcast_artwork(raw),
        genres: raw.genres.clone(),
        primary_genre: raw.primary_genre_name.clone(),
        episode_count,
        explicit: is_explicit(raw),
        estimated_listeners: estimate_search_listeners(genre, episode_count),
        episode_insights: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_podcast() -> RawPodcast {
        RawPodcast {
            collection_id: Some(500),
            collection_name: Some("Crime Weekly".to_string()),
            artist_name: Some("Crime Media".to_string()),
            feed_url: Some("https://example.com/feed.xml".to_string()),
            collection_view_url: Some("https://example.com/show/500".to_string()),
            artwork_url_60: Some("https://example.com/art60.jpg".to_string()),
            artwork_url_100: Some("https://example.com/art100.jpg".to_string()),
            artwork_url_600: Some("https://example.com/art600.jpg".to_string()),
            primary_genre_name: Some("True Crime".to_string()),
            genres: vec!["True Crime".to_string(), "Podcasts".to_string()],
            track_count: Some(100),
            country: Some("USA".to_string()),
            content_advisory_rating: Some("Explicit".to_string()),
            ..RawPodcast::default()
        }
    }

    fn make_episodes(count: usize) -> Vec<RawEpisode> {
        (0..count)
            .map(|i| RawEpisode {
                track_id: Some(1000 + i as i64),
                track_name: Some(format!("Episode {i}")),
                release_date: Some(format!("2024-03-{:02}T09:00:00Z", 1 + i)),
                track_time_millis: Some(1_800_000),
                ..RawEpisode::default()
            })
            .collect()
    }

    #[test]
    fn converts_identity_and_metadata_fields() {
        let podcast = normalize_podcast(
            &make_podcast(),
            &make_episodes(3),
            &PodcastOptions::default(),
        );

        assert_eq!(podcast.id, "500");
        assert_eq!(podcast.name.as_deref(), Some("Crime Weekly"));
        assert_eq!(podcast.publisher.as_deref(), Some("Crime Media"));
        assert_eq!(podcast.primary_genre.as_deref(), Some("True Crime"));
        assert_eq!(podcast.country.as_deref(), Some("USA"));
        assert!(podcast.explicit);
        assert_eq!(podcast.episode_count, 100);

        let artwork = podcast.artwork.unwrap();
        assert_eq!(artwork.medium.as_deref(), Some("https://example.com/art100.jpg"));
    }

    #[test]
    fn explicit_flag_requires_exact_rating() {
        let mut raw = make_podcast();
        raw.content_advisory_rating = Some("Clean".to_string());
        let podcast = normalize_podcast(&raw, &[], &PodcastOptions::default());
        assert!(!podcast.explicit);

        raw.content_advisory_rating = None;
        let podcast = normalize_podcast(&raw, &[], &PodcastOptions::default());
        assert!(!podcast.explicit);
    }

    #[test]
    fn insights_are_none_exactly_for_empty_episode_list() {
        let raw = make_podcast();

        let empty = normalize_podcast(&raw, &[], &PodcastOptions::default());
        assert!(empty.episode_insights.is_none());

        let populated = normalize_podcast(&raw, &make_episodes(2), &PodcastOptions::default());
        assert!(populated.episode_insights.is_some());
    }

    #[test]
    fn estimated_metrics_use_detail_strategy() {
        let podcast = normalize_podcast(&make_podcast(), &[], &PodcastOptions::default());
        // True Crime scale 2.5 at 100 episodes
        assert_eq!(podcast.estimated_metrics.estimated_weekly_listeners, 25_054);
        assert_eq!(podcast.estimated_metrics.confidence, "low");
    }

    #[test]
    fn recent_episodes_are_newest_first_and_windowed() {
        let podcast = normalize_podcast(
            &make_podcast(),
            &make_episodes(15),
            &PodcastOptions::default(),
        );

        assert_eq!(podcast.recent_episodes.len(), 10);
        assert_eq!(podcast.recent_episodes[0].title.as_deref(), Some("Episode 14"));
        assert_eq!(podcast.recent_episodes[9].title.as_deref(), Some("Episode 5"));
        // Show-level context is attached by the detail profile
        assert_eq!(
            podcast.recent_episodes[0].podcast_name.as_deref(),
            Some("Crime Weekly")
        );
    }

    #[test]
    fn episodes_without_dates_sort_last() {
        let mut episodes = make_episodes(2);
        episodes.insert(
            0,
            RawEpisode {
                track_name: Some("Undated".to_string()),
                ..RawEpisode::default()
            },
        );

        let podcast = normalize_podcast(&make_podcast(), &episodes, &PodcastOptions::default());
        assert_eq!(
            podcast.recent_episodes.last().unwrap().title.as_deref(),
            Some("Undated")
        );
    }

    #[test]
    fn compact_descriptions_truncate_at_200_chars() {
        let mut episodes = make_episodes(1);
        episodes[0].description = Some("x".repeat(250));

        let options = PodcastOptions {
            compact_descriptions: true,
            ..PodcastOptions::default()
        };
        let podcast = normalize_podcast(&make_podcast(), &episodes, &options);

        let description = podcast.recent_episodes[0].description.as_deref().unwrap();
        assert_eq!(description.chars().count(), 203);
        assert!(description.ends_with("..."));
    }

    #[test]
    fn short_descriptions_are_not_touched() {
        let mut episodes = make_episodes(1);
        episodes[0].description = Some("short".to_string());

        let options = PodcastOptions {
            compact_descriptions: true,
            ..PodcastOptions::default()
        };
        let podcast = normalize_podcast(&make_podcast(), &episodes, &options);
        assert_eq!(
            podcast.recent_episodes[0].description.as_deref(),
            Some("short")
        );
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(300);
        let truncated = truncate_chars(&text, 200);
        assert_eq!(truncated.chars().count(), 203);
    }

    #[test]
    fn episode_count_falls_back_to_supplied_list() {
        let mut raw = make_podcast();
        raw.track_count = None;
        let podcast = normalize_podcast(&raw, &make_episodes(4), &PodcastOptions::default());
        assert_eq!(podcast.episode_count, 4);
    }

    #[test]
    fn search_hit_uses_search_strategy() {
        let item = normalize_search_hit(&make_podcast());

        assert_eq!(item.id, "500");
        assert_eq!(item.name.as_deref(), Some("Crime Weekly"));
        // True Crime base 15000, 100 episodes doubles it
        assert_eq!(item.estimated_listeners, 30_000);
        assert!(item.episode_insights.is_none());
        assert!(item.explicit);
    }

    #[test]
    fn search_hit_tolerates_empty_record() {
        let item = normalize_search_hit(&RawPodcast::default());

        assert_eq!(item.id, "");
        assert_eq!(item.episode_count, 0);
        // Default coefficient, zero episodes
        assert_eq!(item.estimated_listeners, 4_000);
    }
}
