pub mod params;
pub mod provider;
pub mod response;

pub use provider::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, RestSettings, YouTubeRestProvider};
