//! Dictation content extracted from an upstream article

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::api::ContentResponse;
use crate::error::{ContentError, Result};

/// Everything a practice session needs from a content page
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Content {
    pub article_id: u64,
    pub title: String,
    pub description: String,
    pub audio_url: String,
    pub original_text: String,
}

impl Content {
    /// Reshape an upstream response
    ///
    /// The audio URL is `audio_base` joined with `playurl`; the transcript is
    /// the English side of every content line joined by single spaces.
    pub fn from_response(article_id: u64, response: &ContentResponse, audio_base: &str) -> Result<Self> {
        let data = response.data.as_ref().ok_or(ContentError::InvalidData)?;
        let items = data.content.as_ref().ok_or(ContentError::NoContent)?;

        let audio_url = match data.playurl.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => join_url(audio_base, path),
            _ => return Err(ContentError::Missing("audio URL")),
        };

        let original_text = items
            .iter()
            .filter_map(|item| item.en.as_deref().map(str::trim))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if original_text.is_empty() {
            return Err(ContentError::Missing("transcript"));
        }

        Ok(Self {
            article_id,
            title: data.title.clone().unwrap_or_default(),
            description: data.description.clone().unwrap_or_default(),
            audio_url,
            original_text,
        })
    }
}

/// Article id from a page URL such as `https://www.kekenet.com/broadcast/202503/704573.shtml`
pub fn article_id_from_url(page_url: &str) -> Result<u64> {
    let url = Url::parse(page_url.trim()).map_err(|e| ContentError::InvalidUrl(format!("{page_url}: {e}")))?;

    let last = url
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .ok_or_else(|| ContentError::MissingArticleId(page_url.to_string()))?;

    let id = last.strip_suffix(".shtml").unwrap_or(last);

    id.parse::<u64>()
        .map_err(|_| ContentError::MissingArticleId(page_url.to_string()))
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
