use clap::Parser;

pub struct Cli;

impl Cli {
    pub fn run(&self) -> CliProgram {
        CliProgram::parse()
    }
}

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliProgram {
    #[arg(
        long,
        short,
        value_name = "TOPIC",
        help = "Playlist topic (asked interactively when omitted)"
    )]
    pub query: Option<String>,

    #[arg(
        long,
        short,
        value_name = "COUNT",
        help = "Number of videos to request, 1 to 50 (default: 15)"
    )]
    pub max_results: Option<u32>,

    #[arg(
        long,
        short,
        value_name = "DIR_PATH",
        help = "Directory the playlist is saved to (default: playlists)"
    )]
    pub output_dir: Option<String>,

    #[arg(
        long,
        short,
        value_name = "FILE_PATH",
        help = "Custom path to config file"
    )]
    pub config: Option<String>,

    #[arg(long, help = "Do not offer to open the saved playlist")]
    pub no_open: bool,

    #[arg(short, long, help = "Log progress to stderr")]
    pub verbose: bool,
}
