pub mod analytics;
pub mod api;
pub mod directory;
pub mod error;
pub mod http;
pub mod normalize;

// Re-export main types for convenience
pub use analytics::{
    EpisodeAnalytics, LabelScheme, PopularityContext, PopularityEstimate, PublishingFrequency,
    analyze_episodes, estimate_popularity, format_duration,
};
pub use api::{AppContext, create_router, serve};
pub use directory::{DirectoryClient, RawEpisode, RawPodcast};
pub use error::{ApiError, DirectoryError, HttpError};
pub use http::{HttpClient, HttpResponse, ReqwestClient, SharedHttpClient};
pub use normalize::{
    EpisodeProfile, NormalizedEpisode, NormalizedPodcast, PodcastOptions, normalize_episode,
    normalize_podcast,
};
