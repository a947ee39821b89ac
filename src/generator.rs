use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::Result;
use tracing::error;

use crate::{
    opener::FileOpener,
    playlist_writer::PlaylistWriter,
    search::VideoSearch,
    ui::{confirm, print_videos, prompt},
};

#[derive(Debug, PartialEq)]
pub enum Outcome {
    NoResults,
    Saved(PathBuf),
    Failed(String),
}

pub struct Generator<'a> {
    pub search: &'a dyn VideoSearch,
    pub writer: &'a PlaylistWriter,
    pub opener: &'a dyn FileOpener,
    pub max_results: u32,
    pub ask_to_open: bool,
}

impl<'a> Generator<'a> {
    /// Asks for the topic unless one is given, then searches, saves and
    /// optionally opens the playlist. Any failure on the way is printed and
    /// reported as `Outcome::Failed`.
    pub fn run<R: BufRead, W: Write>(
        &self,
        query: Option<String>,
        input: &mut R,
        output: &mut W,
    ) -> Result<Outcome> {
        match self.generate(query, input, output) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                let message = error_message(&e);

                error!("Playlist generation failed: {}", message);
                writeln!(output, "Erro: {}", message)?;

                Ok(Outcome::Failed(message))
            }
        }
    }

    fn generate<R: BufRead, W: Write>(
        &self,
        query: Option<String>,
        input: &mut R,
        output: &mut W,
    ) -> Result<Outcome> {
        let query = match query {
            Some(query) => query.trim().to_string(),
            None => prompt(input, output, "Digite o tema da playlist: ")?,
        };

        writeln!(output, "\n🔍 Buscando vídeos...")?;

        let videos = self.search.search(&query, self.max_results)?;

        if videos.is_empty() {
            writeln!(output, "Nenhum vídeo encontrado!")?;
            return Ok(Outcome::NoResults);
        }

        print_videos(output, &videos)?;

        let path = self.writer.save(&query, &videos)?;
        writeln!(output, "Playlist salva em: {}", path.display())?;

        if self.ask_to_open && confirm(input, output, "\nAbrir playlist? (s/n): ")? {
            self.opener.open(&path)?;
        }

        Ok(Outcome::Saved(path))
    }
}

/// Joins the error chain, skipping causes already spelled out by an outer
/// message.
fn error_message(error: &anyhow::Error) -> String {
    let mut message = String::new();

    for cause in error.chain() {
        let cause = cause.to_string();

        if message.contains(&cause) {
            continue;
        }

        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(&cause);
    }

    message
}
