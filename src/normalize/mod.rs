mod episode;
mod podcast;

pub use episode::{
    ArtworkSet, EpisodeArtwork, EpisodeProfile, NormalizedEpisode, normalize_episode,
};
pub use podcast::{
    NormalizedPodcast, PodcastOptions, SearchItem, normalize_podcast, normalize_search_hit,
};
