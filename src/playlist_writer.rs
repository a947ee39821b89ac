use std::{
    fmt::Write as _,
    fs::{File, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::types::VideoRecord;

const QUERY_SEGMENT_LENGTH: usize = 20;

pub struct PlaylistWriter {
    output_dir: PathBuf,
}

impl PlaylistWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        PlaylistWriter { output_dir }
    }

    pub fn save(&self, query: &str, videos: &[VideoRecord]) -> Result<PathBuf> {
        self.save_at(query, videos, Local::now().naive_local())
    }

    pub fn save_at(
        &self,
        query: &str,
        videos: &[VideoRecord],
        created_at: NaiveDateTime,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Cannot create output directory \"{}\"",
                self.output_dir.display()
            )
        })?;

        let (path, mut file) = create_unique(&self.output_dir, &file_stem(query, created_at))?;

        file.write_all(render(query, created_at, videos).as_bytes())
            .with_context(|| format!("Cannot write playlist \"{}\"", path.display()))?;

        info!("Saved {} videos to \"{}\"", videos.len(), path.display());

        Ok(path)
    }
}

pub fn render(query: &str, created_at: NaiveDateTime, videos: &[VideoRecord]) -> String {
    let mut document = String::new();

    let _ = write!(document, "# Playlist: {}\n\n", query);
    let _ = write!(
        document,
        "**Data de criação:** {}\n\n",
        created_at.format("%d/%m/%Y %H:%M")
    );

    for (idx, video) in videos.iter().enumerate() {
        // Trailing double spaces are markdown line breaks.
        let _ = write!(
            document,
            "{}. [{}]({})  \n   *Canal: {}*  \n   Publicado em: {}  \n\n",
            idx + 1,
            video.title,
            video.url,
            video.channel,
            video.published_date()
        );
    }

    document
}

/// `<YYYY-MM-DD_HH-MM>_<first 20 characters of the query>`
pub fn file_stem(query: &str, created_at: NaiveDateTime) -> String {
    let segment: String = query.chars().take(QUERY_SEGMENT_LENGTH).collect();

    format!(
        "{}_{}",
        created_at.format("%Y-%m-%d_%H-%M"),
        sanitize_filename(&segment)
    )
}

pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn create_unique(dir: &Path, stem: &str) -> Result<(PathBuf, File)> {
    let mut attempt = 1;

    loop {
        let name = if attempt == 1 {
            format!("{}.md", stem)
        } else {
            format!("{}-{}.md", stem, attempt)
        };
        let path = dir.join(name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(error) if error.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("Cannot create playlist \"{}\"", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{file_stem, render, sanitize_filename, PlaylistWriter};
    use crate::types::VideoRecord;

    fn created_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    fn video(title: &str, id: &str) -> VideoRecord {
        VideoRecord {
            title: title.to_string(),
            url: format!("https://youtu.be/{}", id),
            channel: "ChillChannel".to_string(),
            published: "2023-05-01T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn it_renders_exact_document() {
        let document = render(
            "lofi beats",
            created_at(),
            &[video("Lofi Hip Hop Radio", "abc123")],
        );

        assert_eq!(
            document,
            "# Playlist: lofi beats\n\n\
             **Data de criação:** 07/03/2024 09:05\n\n\
             1. [Lofi Hip Hop Radio](https://youtu.be/abc123)  \n   \
             *Canal: ChillChannel*  \n   \
             Publicado em: 2023-05-01  \n\n"
        );
    }

    #[test]
    fn it_renders_header_only_for_empty_list() {
        let document = render("lofi", created_at(), &[]);

        assert_eq!(
            document,
            "# Playlist: lofi\n\n**Data de criação:** 07/03/2024 09:05\n\n"
        );
    }

    #[test]
    fn it_indexes_entries_in_input_order() {
        let videos = vec![video("B", "b"), video("A", "a"), video("C", "c")];
        let document = render("q", created_at(), &videos);

        let entries: Vec<&str> = document
            .lines()
            .filter(|line| line.contains("](https://youtu.be/"))
            .collect();

        assert_eq!(
            entries,
            vec![
                "1. [B](https://youtu.be/b)  ",
                "2. [A](https://youtu.be/a)  ",
                "3. [C](https://youtu.be/c)  ",
            ]
        );
    }

    #[test]
    fn it_renders_deterministically() {
        let videos = vec![video("A", "a"), video("B", "b")];

        assert_eq!(
            render("q", created_at(), &videos),
            render("q", created_at(), &videos)
        );
    }

    #[test]
    fn it_keeps_markup_in_titles() {
        let document = render("q", created_at(), &[video("[Live] *24/7*", "x")]);

        assert!(document.contains("1. [[Live] *24/7*](https://youtu.be/x)  \n"));
    }

    #[test]
    fn it_truncates_query_to_twenty_characters() {
        let stem = file_stem("músicas para estudar à noite", created_at());

        assert_eq!(stem, "2024-03-07_09-05_músicas para estudar");
    }

    #[test]
    fn it_truncates_by_characters_not_bytes() {
        let query = "日本語の音楽".repeat(5);
        let stem = file_stem(&query, created_at());
        let segment = stem.trim_start_matches("2024-03-07_09-05_");

        assert_eq!(segment.chars().count(), 20);
        assert!(query.starts_with(segment));
    }

    #[test]
    fn it_keeps_short_query_whole() {
        assert_eq!(file_stem("lofi", created_at()), "2024-03-07_09-05_lofi");
    }

    #[test]
    fn it_sanitizes_reserved_characters() {
        assert_eq!(sanitize_filename("AC/DC: live? <best>"), "AC_DC_ live_ _best_");
        assert_eq!(sanitize_filename("a\\b|c*d\"e\nf"), "a_b_c_d_e_f");
    }

    #[test]
    fn it_saves_into_created_directory() {
        let root = tempfile::tempdir().unwrap();
        let output_dir = root.path().join("playlists");
        let writer = PlaylistWriter::new(output_dir.clone());

        let path = writer
            .save_at("lofi beats", &[video("Lofi Hip Hop Radio", "abc123")], created_at())
            .unwrap();

        assert_eq!(path, output_dir.join("2024-03-07_09-05_lofi beats.md"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("1. [Lofi Hip Hop Radio](https://youtu.be/abc123)"));
    }

    #[test]
    fn it_does_not_overwrite_within_same_minute() {
        let root = tempfile::tempdir().unwrap();
        let writer = PlaylistWriter::new(root.path().to_path_buf());

        let first = writer.save_at("lofi", &[video("A", "a")], created_at()).unwrap();
        let second = writer.save_at("lofi", &[video("B", "b")], created_at()).unwrap();
        let third = writer.save_at("lofi", &[], created_at()).unwrap();

        assert_eq!(first, root.path().join("2024-03-07_09-05_lofi.md"));
        assert_eq!(second, root.path().join("2024-03-07_09-05_lofi-2.md"));
        assert_eq!(third, root.path().join("2024-03-07_09-05_lofi-3.md"));
        assert!(std::fs::read_to_string(&first).unwrap().contains("[A]"));
        assert!(std::fs::read_to_string(&second).unwrap().contains("[B]"));
    }

    #[test]
    fn it_keeps_reserved_characters_out_of_path() {
        let root = tempfile::tempdir().unwrap();
        let writer = PlaylistWriter::new(root.path().to_path_buf());

        let path = writer.save_at("rock/pop", &[], created_at()).unwrap();

        assert_eq!(path.parent().unwrap(), root.path());
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "2024-03-07_09-05_rock_pop.md"
        );
    }

    #[test]
    fn it_writes_header_only_file_for_empty_list() {
        let root = tempfile::tempdir().unwrap();
        let writer = PlaylistWriter::new(root.path().to_path_buf());

        let path = writer.save_at("lofi", &[], created_at()).unwrap();

        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "# Playlist: lofi\n\n**Data de criação:** 07/03/2024 09:05\n\n"
        );
    }
}
