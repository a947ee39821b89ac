use anyhow::{Context as _, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::config::Config,
    types::VideoRecord,
    youtube::{search_url, short_link, API_KEY_HEADER},
};

use super::VideoSearch;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("YouTube API error {code}: {message}")]
    Api { code: u16, message: String },
    #[error("YouTube API responded with HTTP {0}")]
    Status(u16),
    #[error("malformed search response: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub struct YouTubeSearch {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl YouTubeSearch {
    pub fn new(config: &Config) -> Self {
        YouTubeSearch::with_client(Client::new(), config.get_api_url(), config.get_api_key())
    }

    pub fn with_client(client: Client, api_url: String, api_key: Option<String>) -> Self {
        YouTubeSearch {
            client,
            api_url,
            api_key,
        }
    }
}

impl VideoSearch for YouTubeSearch {
    #[tracing::instrument(skip(self), err)]
    fn search(&self, query: &str, max_results: u32) -> Result<Vec<VideoRecord>> {
        let url = search_url(&self.api_url, query, max_results)?;

        debug!("Requesting {}", url.path());

        let mut request = self.client.get(url);

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .map_err(reqwest::Error::without_url)
            .context("Cannot reach the YouTube API")?;

        let status = response.status();
        let body = response
            .text()
            .map_err(reqwest::Error::without_url)
            .context("Cannot read the YouTube API response")?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body).into());
        }

        let videos = parse_search_response(&body)?;

        info!("Search returned {} videos", videos.len());

        Ok(videos)
    }
}

pub fn parse_search_response(body: &str) -> Result<Vec<VideoRecord>, SearchError> {
    let response: SearchListResponse = serde_json::from_str(body)?;

    Ok(response.items.into_iter().map(item_to_record).collect())
}

fn api_error(status: u16, body: &str) -> SearchError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error }) => SearchError::Api {
            code: error.code.unwrap_or(status),
            message: error.message,
        },
        Err(_) => SearchError::Status(status),
    }
}

fn item_to_record(item: SearchItem) -> VideoRecord {
    VideoRecord {
        title: item.snippet.title,
        url: short_link(&item.id.video_id),
        channel: item.snippet.channel_title,
        published: item.snippet.published_at,
    }
}

#[derive(Deserialize)]
struct SearchListResponse {
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchId,
    snippet: Snippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchId {
    video_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    channel_title: String,
    published_at: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<u16>,
    message: String,
}
