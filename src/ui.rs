use std::io::{BufRead, Write};

use anyhow::Result;

use crate::types::VideoRecord;

/// Prints `message` and reads one trimmed line. End of input reads as empty.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<String> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(line.trim().to_string())
}

/// Only a single `s` (any case) is a yes.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<bool> {
    let answer = prompt(input, output, message)?;

    Ok(answer.eq_ignore_ascii_case("s"))
}

pub fn print_videos<W: Write>(output: &mut W, videos: &[VideoRecord]) -> Result<()> {
    writeln!(output, "\n🎵 Vídeos encontrados:")?;

    for (idx, video) in videos.iter().enumerate() {
        writeln!(output, "{}. {} ({})", idx + 1, video.title, video.url)?;
    }

    Ok(())
}
