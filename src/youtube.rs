use anyhow::{anyhow, Result};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Carries the API key. Request urls never contain it.
pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";

const SHORT_LINK_BASE: &str = "https://youtu.be/";

pub fn short_link(video_id: &str) -> String {
    format!("{}{}", SHORT_LINK_BASE, video_id)
}

/// Builds the `search.list` request for a single page of video results,
/// ordered by relevance.
pub fn search_url(api_url: &str, query: &str, max_results: u32) -> Result<Url> {
    let mut url = Url::parse(api_url)?;

    url.path_segments_mut()
        .map_err(|_| anyhow!("API url \"{}\" cannot be a base", api_url))?
        .pop_if_empty()
        .push("search");

    url.query_pairs_mut()
        .append_pair("part", "id,snippet")
        .append_pair("q", query)
        .append_pair("maxResults", &max_results.to_string())
        .append_pair("type", "video")
        .append_pair("order", "relevance");

    Ok(url)
}
