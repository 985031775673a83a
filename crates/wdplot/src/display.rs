//! Shows a plot in an external image viewer.
//!
//! The plot is rasterised to a PNG inside a private temporary directory, handed to the viewer,
//! and kept alive until the user presses Enter. The directory is removed when [`show`] returns,
//! on success and on error alike.

use crate::Plot;
use crate::raster::{RasterError, RasterOptions};
use std::ffi::OsString;
use std::io::BufRead;
use std::path::Path;
use std::process::{Command, ExitStatus};

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("display I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("viewer `{program}` exited with {status}")]
    Viewer { program: String, status: ExitStatus },
}

pub type Result<T> = std::result::Result<T, DisplayError>;

#[derive(Debug, Clone)]
pub struct DisplayOptions {
    /// Viewer program; `None` uses the platform opener.
    pub viewer: Option<OsString>,
    pub raster: RasterOptions,
    /// Block until a line is read before cleaning up.
    pub wait_for_enter: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            viewer: None,
            raster: RasterOptions {
                background: Some("white".to_string()),
                ..RasterOptions::default()
            },
            wait_for_enter: true,
        }
    }
}

/// Displays `plot` and waits for Enter on stdin.
pub fn show(plot: &Plot, options: &DisplayOptions) -> Result<()> {
    let stdin = std::io::stdin();
    show_with_input(plot, options, stdin.lock())
}

/// Like [`show`], reading the dismissal line from `input`.
pub fn show_with_input<R: BufRead>(
    plot: &Plot,
    options: &DisplayOptions,
    mut input: R,
) -> Result<()> {
    let png = plot.to_png(&options.raster)?;

    let dir = tempfile::Builder::new().prefix("wdplot-").tempdir()?;
    let path = dir.path().join("plot.png");
    std::fs::write(&path, png)?;

    let mut command = viewer_command(options.viewer.as_ref(), &path);
    let program = command.get_program().to_string_lossy().into_owned();
    tracing::debug!(%program, path = %path.display(), "launching viewer");
    let status = command.status()?;
    if !status.success() {
        return Err(DisplayError::Viewer { program, status });
    }

    if options.wait_for_enter {
        eprintln!("Press Enter to close the plot...");
        let mut line = String::new();
        input.read_line(&mut line)?;
    }
    dir.close()?;
    Ok(())
}

fn viewer_command(viewer: Option<&OsString>, path: &Path) -> Command {
    if let Some(program) = viewer {
        let mut cmd = Command::new(program);
        cmd.arg(path);
        return cmd;
    }

    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}
