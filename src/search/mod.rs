use anyhow::Result;

use crate::types::VideoRecord;

pub mod youtube_search;

pub trait VideoSearch {
    fn search(&self, query: &str, max_results: u32) -> Result<Vec<VideoRecord>>;
}
