//! Content fetching for dictation practice
//!
//! Turns a content page URL into the audio clip and transcript used for a
//! practice session. The page URL only carries the article id; the content
//! itself comes from the upstream mobile API.
//!
//! # Flow
//!
//! 1. `article_id_from_url` - last path segment, `.shtml` stripped
//! 2. `ContentRequest::for_article` - JSON envelope sent form-encoded as `Request=<json>`
//! 3. `Content::from_response` - audio URL + English transcript (+ title/description)
//!
//! # Example Usage
//!
//! ```no_run
//! use dictation_content::ContentClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ContentClient::default();
//!     let content = client
//!         .fetch_page("https://www.kekenet.com/broadcast/202503/704573.shtml")
//!         .await?;
//!
//!     println!("{}: {}", content.title, content.audio_url);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod content;
pub mod error;

// Re-exports
pub use api::{ContentRequest, ContentResponse};
pub use client::{ContentClient, DEFAULT_AUDIO_BASE, DEFAULT_ENDPOINT};
pub use content::{article_id_from_url, Content};
pub use error::{ContentError, Result};
