mod duration;
mod frequency;
mod insights;
mod popularity;

pub use duration::format_duration;
pub use frequency::{
    CATALOG_LOOKBACK_PAIRS, CadenceEstimate, DETAIL_LOOKBACK_PAIRS, LabelScheme,
    PublishingFrequency, estimate, parse_release_date, parse_release_dates,
};
pub use insights::{EpisodeAnalytics, analyze_episodes};
pub use popularity::{
    AudienceEstimate, PopularityContext, PopularityEstimate, estimate_detail_metrics,
    estimate_popularity, estimate_search_listeners,
};
