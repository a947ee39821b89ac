use serde::Deserialize;

#[derive(Deserialize)]
pub struct AppConfig {
    pub(super) api_key: Option<String>,
    pub(super) output_dir: Option<String>,
    pub(super) max_results: Option<u32>,
    pub(super) api_url: Option<String>,
}

impl AppConfig {
    pub fn new_default() -> AppConfig {
        AppConfig {
            api_key: None,
            output_dir: Some("playlists".to_string()),
            max_results: Some(15),
            api_url: None,
        }
    }
}
