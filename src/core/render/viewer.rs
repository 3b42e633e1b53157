//! Show a figure in an external image viewer
//!
//! The figure is rasterized to a temporary PNG, the viewer is started on it
//! and the call blocks until the viewer process exits.

use super::formats::{FigureExporter, PngExporter};
use super::Figure;
use crate::config::RenderConfig;
use crate::core::error::{NutrinetError, Result};
use crate::{debug, info, warn};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A viewer invocation: program, leading arguments, and whether it blocks
#[derive(Debug, Clone, PartialEq, Eq)]
struct Launcher {
    program: String,
    args: Vec<String>,
    /// The launcher returns before the image is displayed
    detaches: bool,
}

impl Launcher {
    fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_owned);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
            detaches: false,
        })
    }

    fn platform_default() -> Option<Self> {
        let candidates: &[(&str, &[&str], bool)] = if cfg!(target_os = "windows") {
            &[("cmd", &["/C", "start", "/WAIT", ""], false)]
        } else if cfg!(target_os = "macos") {
            &[("open", &["-W"], false)]
        } else {
            &[("xdg-open", &[], true), ("open", &["-W"], false)]
        };

        candidates
            .iter()
            .find(|(program, _, _)| find_in_path(program).is_some())
            .map(|(program, args, detaches)| Self {
                program: (*program).to_string(),
                args: args.iter().map(|a| (*a).to_string()).collect(),
                detaches: *detaches,
            })
    }
}

/// Locate an executable on `PATH`
fn find_in_path(program: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        let exe = candidate.with_extension("exe");
        exe.is_file().then_some(exe)
    })
}

/// Opens figures in an image viewer
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    /// Custom viewer command line; the image path is appended
    command: Option<String>,
}

impl Viewer {
    /// Create a viewer that auto-detects the platform opener
    #[must_use]
    pub const fn new() -> Self {
        Self { command: None }
    }

    /// Create a viewer with a custom command line (empty means auto-detect)
    #[must_use]
    pub fn with_command(command: &str) -> Self {
        let command = command.trim();
        Self {
            command: (!command.is_empty()).then(|| command.to_owned()),
        }
    }

    /// Viewer configured by `render.viewer`
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::with_command(&config.viewer)
    }

    fn launcher(&self) -> Result<Launcher> {
        match &self.command {
            Some(command) => Launcher::parse(command)
                .ok_or_else(|| NutrinetError::Viewer("empty viewer command".to_string())),
            None => Launcher::platform_default().ok_or_else(|| {
                NutrinetError::Viewer(
                    "no image viewer found; run `nutrinet config set viewer <cmd>` or use --save"
                        .to_string(),
                )
            }),
        }
    }

    /// Open an existing image file and wait for the viewer to exit
    ///
    /// # Errors
    /// Returns `Viewer` if no viewer is available, it cannot be started, or it
    /// exits with a failure status
    pub fn open(&self, image: &Path) -> Result<()> {
        Self::run(&self.launcher()?, image)
    }

    fn run(launcher: &Launcher, image: &Path) -> Result<()> {
        debug!(
            "Launching viewer: {} {} {}",
            launcher.program,
            launcher.args.join(" "),
            image.display()
        );
        let status = Command::new(&launcher.program)
            .args(&launcher.args)
            .arg(image)
            .status()
            .map_err(|e| {
                NutrinetError::Viewer(format!("failed to start '{}': {e}", launcher.program))
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(NutrinetError::Viewer(format!(
                "'{}' exited with {status}",
                launcher.program
            )))
        }
    }

    /// Render the figure to a temporary PNG and show it
    ///
    /// Blocks until the viewer exits, then removes the temporary file. Openers
    /// that hand the file to another process and return at once (`xdg-open`)
    /// leave it in the temp directory.
    ///
    /// # Errors
    /// Returns the PNG encoding error, an `Io` error for the temporary file,
    /// or a `Viewer` error
    pub fn show(&self, figure: &Figure) -> Result<()> {
        self.show_at(figure, &temp_image_path())
    }

    fn show_at(&self, figure: &Figure, image: &Path) -> Result<()> {
        let launcher = self.launcher()?;
        let bytes = PngExporter::new().encode(figure)?;
        fs::write(image, bytes).map_err(|e| NutrinetError::io(image, e))?;
        info!("Opening figure in {}", launcher.program);

        let result = Self::run(&launcher, image);

        if launcher.detaches {
            debug!("Leaving {} for the detached viewer", image.display());
        } else if let Err(e) = fs::remove_file(image) {
            warn!("Could not remove temporary file {}: {e}", image.display());
        }
        result
    }
}

fn temp_image_path() -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    env::temp_dir().join(format!("nutrinet_{}_{n}.png", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::Layout;
    use crate::core::models::Network;
    use crate::core::render::{FigureBuilder, RenderOptions};

    fn tiny_figure() -> Figure {
        let options = RenderOptions {
            width_in: 1.0,
            height_in: 1.0,
            dpi: 24,
            ..RenderOptions::default()
        };
        FigureBuilder::new(&options).build(&Network::default(), &Layout::default())
    }

    #[test]
    fn test_parse_command_line() {
        let launcher = Launcher::parse("feh --scale-down").unwrap();
        assert_eq!(launcher.program, "feh");
        assert_eq!(launcher.args, vec!["--scale-down".to_string()]);
        assert!(Launcher::parse("   ").is_none());
    }

    #[test]
    fn test_blank_command_falls_back_to_auto_detect() {
        assert!(Viewer::with_command("  ").command.is_none());
        assert_eq!(
            Viewer::with_command("eog").command.as_deref(),
            Some("eog")
        );
    }

    #[test]
    fn test_missing_viewer_is_viewer_error() {
        let viewer = Viewer::with_command("nutrinet-no-such-viewer-binary");
        assert!(matches!(
            viewer.show(&tiny_figure()),
            Err(NutrinetError::Viewer(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_show_waits_and_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("figure.png");
        let viewer = Viewer::with_command("true");
        viewer.show_at(&tiny_figure(), &image).unwrap();
        assert!(!image.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_viewer_receives_the_png() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("figure.png");
        // `test -s` fails unless the file exists and is non-empty
        let viewer = Viewer::with_command("test -s");
        viewer.show_at(&tiny_figure(), &image).unwrap();
    }

    #[test]
    fn test_temp_paths_are_unique() {
        assert_ne!(temp_image_path(), temp_image_path());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_viewer_is_reported() {
        let viewer = Viewer::with_command("false");
        let err = viewer.show(&tiny_figure()).unwrap_err();
        assert!(err.to_string().contains("false"));
    }
}
