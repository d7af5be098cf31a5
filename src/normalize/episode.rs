// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

use crate::analytics::format_duration;
use crate::directory::RawEpisode;

/// Artwork URL triple carried by the detail profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtworkSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
}

impl ArtworkSet {
    fn is_empty(&self) -> bool {
        self.small.is_none() && self.medium.is_none() && self.large.is_none()
    }
}

/// Episode artwork: the compact profile carries one URL, the detail
/// profile the full triple
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EpisodeArtwork {
    Single(String),
    Set(ArtworkSet),
}

/// Which call-site shape to produce
#[derive(Debug, Clone)]
pub enum EpisodeProfile {
    /// Podcast detail view: show-level context plus the artwork triple
    Detail {
        podcast_name: Option<String>,
        podcast_publisher: Option<String>,
    },
    /// Episode listings: slim shape with a single artwork URL,
    /// largest resolution preferred
    Compact,
}

/// An episode record in the service's stable output schema
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedEpisode {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    pub duration_formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork: Option<EpisodeArtwork>,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_genre: Option<String>,
}

fn decode_text(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

/// Map one raw episode record into the normalized shape.
///
/// Total over all input shapes: absent upstream fields become None, and
/// `duration_formatted` is always a valid clock string.
pub fn normalize_episode(raw: &RawEpisode, profile: &EpisodeProfile) -> NormalizedEpisode {
    let description = raw
        .description
        .as_deref()
        .or(raw.short_description.as_deref())
        .map(decode_text);

    let artwork = match profile {
        EpisodeProfile::Detail { .. } => {
            let set = ArtworkSet {
                small: raw.artwork_url_60.clone(),
                medium: raw.artwork_url_160.clone(),
                large: raw.artwork_url_600.clone(),
            };
            (!set.is_empty()).then_some(EpisodeArtwork::Set(set))
        }
        EpisodeProfile::Compact => raw
            .artwork_url_600
            .as_deref()
            .or(raw.artwork_url_160.as_deref())
            .or(raw.artwork_url_60.as_deref())
            .map(|url| EpisodeArtwork::Single(url.to_string())),
    };

    let (podcast_name, podcast_publisher) = match profile {
        EpisodeProfile::Detail {
            podcast_name,
            podcast_publisher,
        } => (
            podcast_name.clone().or_else(|| raw.collection_name.clone()),
            podcast_publisher.clone().or_else(|| raw.artist_name.clone()),
        ),
        EpisodeProfile::Compact => (None, None),
    };

    NormalizedEpisode {
        id: raw.track_id.map(|id| id.to_string()).unwrap_or_default(),
        podcast_id: raw.collection_id.map(|id| id.to_string()),
        title: raw.track_name.as_deref().map(decode_text),
        description,
        release_date: raw.release_date.clone(),
        duration_ms: raw.track_time_millis,
        duration_formatted: format_duration(raw.track_time_millis),
        url: raw.track_view_url.clone(),
        audio_url: raw.episode_url.clone(),
        podcast_name,
        podcast_publisher,
        artwork,
        genres: raw.genres.clone(),
        primary_genre: raw.genres.first().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_episode() -> RawEpisode {
        RawEpisode {
            track_id: Some(1001),
            collection_id: Some(500),
            track_name: Some("The Disappearance".to_string()),
            collection_name: Some("Crime Weekly".to_string()),
            artist_name: Some("Crime Media".to_string()),
            description: Some("A cold case reopened.".to_string()),
            short_description: Some("Cold case.".to_string()),
            release_date: Some("2024-03-01T09:00:00Z".to_string()),
            track_time_millis: Some(3_725_000),
            track_view_url: Some("https://example.com/episode/1001".to_string()),
            episode_url: Some("https://example.com/audio/1001.mp3".to_string()),
            artwork_url_60: Some("https://example.com/art60.jpg".to_string()),
            artwork_url_160: Some("https://example.com/art160.jpg".to_string()),
            artwork_url_600: Some("https://example.com/art600.jpg".to_string()),
            genres: vec!["True Crime".to_string(), "Podcasts".to_string()],
        }
    }

    fn detail_profile() -> EpisodeProfile {
        EpisodeProfile::Detail {
            podcast_name: Some("Crime Weekly".to_string()),
            podcast_publisher: Some("Crime Media".to_string()),
        }
    }

    #[test]
    fn detail_profile_converts_all_fields() {
        let episode = normalize_episode(&make_episode(), &detail_profile());

        assert_eq!(episode.id, "1001");
        assert_eq!(episode.podcast_id.as_deref(), Some("500"));
        assert_eq!(episode.title.as_deref(), Some("The Disappearance"));
        assert_eq!(episode.description.as_deref(), Some("A cold case reopened."));
        assert_eq!(episode.duration_ms, Some(3_725_000));
        assert_eq!(episode.duration_formatted, "1:02:05");
        assert_eq!(episode.podcast_name.as_deref(), Some("Crime Weekly"));
        assert_eq!(episode.podcast_publisher.as_deref(), Some("Crime Media"));
        assert_eq!(episode.primary_genre.as_deref(), Some("True Crime"));

        match episode.artwork {
            Some(EpisodeArtwork::Set(set)) => {
                assert_eq!(set.small.as_deref(), Some("https://example.com/art60.jpg"));
                assert_eq!(set.medium.as_deref(), Some("https://example.com/art160.jpg"));
                assert_eq!(set.large.as_deref(), Some("https://example.com/art600.jpg"));
            }
            other => panic!("expected artwork set, got {other:?}"),
        }
    }

    #[test]
    fn compact_profile_prefers_largest_artwork() {
        let episode = normalize_episode(&make_episode(), &EpisodeProfile::Compact);

        assert_eq!(
            episode.artwork,
            Some(EpisodeArtwork::Single(
                "https://example.com/art600.jpg".to_string()
            ))
        );
        assert!(episode.podcast_name.is_none());
        assert!(episode.podcast_publisher.is_none());
    }

    #[test]
    fn compact_artwork_falls_back_to_smaller_sizes() {
        let mut raw = make_episode();
        raw.artwork_url_600 = None;
        let episode = normalize_episode(&raw, &EpisodeProfile::Compact);
        assert_eq!(
            episode.artwork,
            Some(EpisodeArtwork::Single(
                "https://example.com/art160.jpg".to_string()
            ))
        );

        raw.artwork_url_160 = None;
        let episode = normalize_episode(&raw, &EpisodeProfile::Compact);
        assert_eq!(
            episode.artwork,
            Some(EpisodeArtwork::Single(
                "https://example.com/art60.jpg".to_string()
            ))
        );

        raw.artwork_url_60 = None;
        let episode = normalize_episode(&raw, &EpisodeProfile::Compact);
        assert!(episode.artwork.is_none());
    }

    #[test]
    fn handles_fully_empty_record() {
        let episode = normalize_episode(&RawEpisode::default(), &EpisodeProfile::Compact);

        assert_eq!(episode.id, "");
        assert!(episode.title.is_none());
        assert!(episode.duration_ms.is_none());
        assert_eq!(episode.duration_formatted, "0:00");
        assert!(episode.artwork.is_none());
        assert!(episode.genres.is_empty());
    }

    #[test]
    fn missing_duration_formats_as_zero() {
        let mut raw = make_episode();
        raw.track_time_millis = None;
        let episode = normalize_episode(&raw, &detail_profile());

        assert!(episode.duration_ms.is_none());
        assert_eq!(episode.duration_formatted, "0:00");
    }

    #[test]
    fn description_falls_back_to_short_description() {
        let mut raw = make_episode();
        raw.description = None;
        let episode = normalize_episode(&raw, &detail_profile());
        assert_eq!(episode.description.as_deref(), Some("Cold case."));
    }

    #[test]
    fn html_entities_are_decoded() {
        let mut raw = make_episode();
        raw.track_name = Some("Law &amp; Order".to_string());
        raw.description = Some("Crime &amp; punishment &#8212; part one".to_string());
        let episode = normalize_episode(&raw, &detail_profile());

        assert_eq!(episode.title.as_deref(), Some("Law & Order"));
        assert_eq!(
            episode.description.as_deref(),
            Some("Crime & punishment \u{2014} part one")
        );
    }

    #[test]
    fn detail_context_falls_back_to_record_fields() {
        let profile = EpisodeProfile::Detail {
            podcast_name: None,
            podcast_publisher: None,
        };
        let episode = normalize_episode(&make_episode(), &profile);

        assert_eq!(episode.podcast_name.as_deref(), Some("Crime Weekly"));
        assert_eq!(episode.podcast_publisher.as_deref(), Some("Crime Media"));
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let episode = normalize_episode(&RawEpisode::default(), &EpisodeProfile::Compact);
        let json = serde_json::to_value(&episode).unwrap();

        assert!(json.get("title").is_none());
        assert!(json.get("duration_ms").is_none());
        assert_eq!(json.get("duration_formatted").unwrap(), "0:00");
    }
}
