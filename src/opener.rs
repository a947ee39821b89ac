use std::{path::Path, process::Command};

use anyhow::{anyhow, Result};
use tracing::{info, warn};

pub trait FileOpener {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Hands the file to the desktop's default application.
pub struct SystemOpener {
    program: &'static str,
    args: &'static [&'static str],
}

/// Used where the platform has no default-open mechanism.
pub struct NoopOpener;

pub fn default_opener() -> Box<dyn FileOpener> {
    if cfg!(target_os = "windows") {
        Box::new(SystemOpener::windows())
    } else if cfg!(target_os = "macos") {
        Box::new(SystemOpener::macos())
    } else if cfg!(any(
        target_os = "linux",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    )) {
        Box::new(SystemOpener::xdg())
    } else {
        Box::new(NoopOpener)
    }
}

impl SystemOpener {
    /// Launched directly, never through `cmd`, so `&`, `^`, `%` and
    /// parentheses in file names stay literal.
    pub fn windows() -> Self {
        SystemOpener {
            program: "rundll32",
            args: &["url.dll,FileProtocolHandler"],
        }
    }

    pub fn macos() -> Self {
        SystemOpener {
            program: "open",
            args: &[],
        }
    }

    pub fn xdg() -> Self {
        SystemOpener {
            program: "xdg-open",
            args: &[],
        }
    }

    fn command(&self, path: &Path) -> Command {
        let mut command = Command::new(self.program);
        command.args(self.args).arg(path);
        command
    }
}

impl FileOpener for SystemOpener {
    fn open(&self, path: &Path) -> Result<()> {
        info!("Opening \"{}\" with {}", path.display(), self.program);

        let status = self
            .command(path)
            .status()
            .map_err(|e| anyhow!("Cannot run {}: {}", self.program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(anyhow!(
                "{} exited with {} while opening \"{}\"",
                self.program,
                status,
                path.display()
            ))
        }
    }
}

impl FileOpener for NoopOpener {
    fn open(&self, path: &Path) -> Result<()> {
        warn!(
            "No default file opener on this platform, open \"{}\" manually",
            path.display()
        );

        Ok(())
    }
}
