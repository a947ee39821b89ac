use std::io;

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{
    api::cli::Cli,
    config::config::Config,
    generator::{Generator, Outcome},
    opener::default_opener,
    playlist_writer::PlaylistWriter,
    search::youtube_search::YouTubeSearch,
};

mod api;
mod config;
mod generator;
mod opener;
mod playlist_writer;
mod search;
mod types;
mod ui;
mod youtube;

fn main() -> Result<()> {
    let cli = Cli {};
    let program = cli.run();

    init_tracing(program.verbose);

    let mut config = Config::new_from_file(program.config)?;
    config.apply_overrides(program.output_dir, program.max_results);
    config.validate()?;

    let search = YouTubeSearch::new(&config);
    let writer = PlaylistWriter::new(config.get_output_dir());
    let opener = default_opener();

    let generator = Generator {
        search: &search,
        writer: &writer,
        opener: opener.as_ref(),
        max_results: config.get_max_results(),
        ask_to_open: !program.no_open,
    };

    let stdin = io::stdin();
    let outcome = generator.run(program.query, &mut stdin.lock(), &mut io::stdout())?;

    // Every outcome ends the run normally.
    match outcome {
        Outcome::Saved(path) => debug!("Finished with \"{}\"", path.display()),
        Outcome::NoResults => debug!("Finished without results"),
        Outcome::Failed(message) => debug!("Finished with error: {}", message),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("playlist_generator={}", default_level).into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
