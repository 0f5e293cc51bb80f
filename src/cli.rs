use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::figure_config::FigureStyle;
use crate::figures::Figure;

#[derive(Parser, Debug)]
#[command(
    name = "compat-figures",
    version,
    about = "Figures for ECMAScript compatibility and transparency measurements"
)]
pub struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Raise log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one figure, to a viewer or to --out
    Render {
        #[arg(value_enum)]
        figure: Figure,
        /// Archive directory containing logfile.json
        archive: Option<PathBuf>,
        #[arg(long, help = "Write the image to this path instead of opening a viewer")]
        out: Option<PathBuf>,
        #[arg(long, help = "Also write the plotted aggregates as JSON")]
        summary: Option<PathBuf>,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Load an archive and check its invariants
    Check { archive: PathBuf },
    /// List the available figures
    List,
}

#[derive(Args, Debug, Clone)]
pub struct StyleArgs {
    #[arg(long, help = "Image width in pixels")]
    pub width: Option<u32>,
    #[arg(long, help = "Image height in pixels")]
    pub height: Option<u32>,
    #[arg(long, help = "Label font size")]
    pub font_size: Option<u32>,
}

impl StyleArgs {
    /// Defaults overridden by whatever flags were given
    pub fn to_style(&self) -> Result<FigureStyle, String> {
        let base = FigureStyle::default();
        let style = base
            .clone()
            .with_size(
                self.width.unwrap_or(base.width),
                self.height.unwrap_or(base.height),
            )
            .with_font_size(self.font_size.unwrap_or(base.font_size));
        style.validate()?;
        Ok(style)
    }
}

/// Tracing level for the number of `-v` flags
pub fn log_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    }
}

/// Install the stderr fmt subscriber used by both binaries
pub fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_max_level(log_level(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_with_style_flags() {
        let cli = Cli::try_parse_from([
            "compat-figures",
            "-vv",
            "render",
            "version-cdf",
            "archives/run1",
            "--out",
            "cdf.png",
            "--width",
            "1600",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Render {
                figure,
                archive,
                out,
                summary,
                style,
            } => {
                assert_eq!(figure, Figure::VersionCdf);
                assert_eq!(archive, Some(PathBuf::from("archives/run1")));
                assert_eq!(out, Some(PathBuf::from("cdf.png")));
                assert!(summary.is_none());
                let style = style.to_style().unwrap();
                assert_eq!((style.width, style.height), (1600, 800));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_figure() {
        assert!(Cli::try_parse_from(["compat-figures", "render", "fig9"]).is_err());
    }

    #[test]
    fn check_requires_archive() {
        assert!(Cli::try_parse_from(["compat-figures", "check"]).is_err());
    }

    #[test]
    fn tiny_images_are_rejected() {
        let args = StyleArgs {
            width: Some(10),
            height: None,
            font_size: None,
        };
        assert!(args.to_style().is_err());
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(log_level(0), tracing::Level::WARN);
        assert_eq!(log_level(1), tracing::Level::INFO);
        assert_eq!(log_level(5), tracing::Level::DEBUG);
    }
}
