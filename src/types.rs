#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub title: String,
    pub url: String,
    pub channel: String,
    pub published: String,
}

impl VideoRecord {
    /// Date portion of `published` (first 10 characters).
    pub fn published_date(&self) -> String {
        self.published.chars().take(10).collect()
    }
}
