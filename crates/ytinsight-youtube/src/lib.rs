//! YouTube Data API v3 client used as the ytinsight comment source.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;
pub mod video_id;

pub use client::YoutubeClient;
pub use error::YoutubeError;
pub use video_id::extract_video_id;
