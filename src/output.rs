use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::error::{FigureError, Result};

/// Where a rendered figure goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Render to a temporary image and open it in a viewer
    Show,
    /// Write the image to exactly this path
    Save(PathBuf),
}

impl From<Option<PathBuf>> for OutputTarget {
    fn from(out: Option<PathBuf>) -> Self {
        match out {
            Some(path) => OutputTarget::Save(path),
            None => OutputTarget::Show,
        }
    }
}

/// Opens a rendered image for interactive viewing
pub trait Viewer {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// The platform's default image viewer
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl Viewer for SystemViewer {
    fn open(&self, path: &Path) -> io::Result<()> {
        let mut command = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        } else {
            Command::new("xdg-open")
        };
        command.arg(path).spawn()?;
        Ok(())
    }
}

/// Temporary PNG that outlives the process so the viewer can still read it
fn persistent_temp_png() -> Result<PathBuf> {
    let temp = tempfile::Builder::new()
        .prefix("compat-figure-")
        .suffix(".png")
        .tempfile()
        .map_err(|source| FigureError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
    temp.into_temp_path().keep().map_err(|e| FigureError::Io {
        path: e.path.to_path_buf(),
        source: e.error,
    })
}

/// Draw a figure with `draw` and deliver it to `target`.
///
/// Returns the path of the written image.
pub fn deliver<F>(target: &OutputTarget, viewer: &dyn Viewer, draw: F) -> Result<PathBuf>
where
    F: FnOnce(&Path) -> std::result::Result<(), Box<dyn std::error::Error>>,
{
    match target {
        OutputTarget::Save(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|source| FigureError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            draw(path).map_err(|e| FigureError::Render(e.to_string()))?;
            info!(path = %path.display(), "figure written");
            Ok(path.clone())
        }
        OutputTarget::Show => {
            let path = persistent_temp_png()?;
            debug!(path = %path.display(), "rendering to temporary image");
            draw(&path).map_err(|e| FigureError::Render(e.to_string()))?;
            viewer.open(&path).map_err(|source| FigureError::Viewer {
                path: path.clone(),
                source,
            })?;
            println!("🖼️  Opened {} in the image viewer", path.display());
            Ok(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingViewer {
        opened: RefCell<Vec<PathBuf>>,
    }

    impl Viewer for RecordingViewer {
        fn open(&self, path: &Path) -> io::Result<()> {
            self.opened.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    struct BrokenViewer;

    impl Viewer for BrokenViewer {
        fn open(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no viewer"))
        }
    }

    fn fake_png(path: &Path) -> std::result::Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, b"\x89PNG")?;
        Ok(())
    }

    #[test]
    fn missing_out_means_show() {
        assert_eq!(OutputTarget::from(None), OutputTarget::Show);
        assert_eq!(
            OutputTarget::from(Some(PathBuf::from("/tmp/fig.png"))),
            OutputTarget::Save(PathBuf::from("/tmp/fig.png"))
        );
    }

    #[test]
    fn save_writes_exact_path_without_viewer() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested").join("fig.png");
        let viewer = RecordingViewer::default();

        let written = deliver(&OutputTarget::Save(out.clone()), &viewer, fake_png).unwrap();

        assert_eq!(written, out);
        assert!(out.is_file());
        assert!(viewer.opened.borrow().is_empty());
    }

    #[test]
    fn show_opens_the_rendered_image() {
        let viewer = RecordingViewer::default();

        let written = deliver(&OutputTarget::Show, &viewer, fake_png).unwrap();

        assert_eq!(viewer.opened.borrow().as_slice(), &[written.clone()]);
        assert!(written.is_file());
        assert_eq!(written.extension().and_then(|e| e.to_str()), Some("png"));
        std::fs::remove_file(written).unwrap();
    }

    #[test]
    fn draw_failure_skips_the_viewer() {
        let viewer = RecordingViewer::default();
        let result = deliver(&OutputTarget::Show, &viewer, |_| Err("no fonts".into()));
        assert!(result.is_err());
        assert!(viewer.opened.borrow().is_empty());
    }

    #[test]
    fn viewer_failure_is_reported() {
        let err = deliver(&OutputTarget::Show, &BrokenViewer, fake_png).unwrap_err();
        match err {
            FigureError::Viewer { path, .. } => {
                let _ = std::fs::remove_file(path);
            }
            other => panic!("expected viewer error, got {:?}", other),
        }
    }
}
