mod client;
mod types;

pub use client::{DEFAULT_BASE_URL, DirectoryClient};
pub use types::{
    DirectoryResponse, LookupResults, RawEpisode, RawPodcast, decode_podcasts, partition_lookup,
};
