use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::debug;

use compat_figures::cli::{init_logging, Cli, Commands, StyleArgs};
use compat_figures::figures::{render_figure, Figure};
use compat_figures::output::{OutputTarget, SystemViewer};
use compat_figures::verify::{verify_archive, PercentageVerificationConfig};
use compat_figures::Archive;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            figure,
            archive,
            out,
            summary,
            style,
        } => render(figure, archive.as_deref(), out, summary.as_deref(), &style),
        Commands::Check { archive } => check(&archive),
        Commands::List => {
            list();
            Ok(())
        }
    }
}

fn render(
    figure: Figure,
    archive: Option<&Path>,
    out: Option<PathBuf>,
    summary_path: Option<&Path>,
    style: &StyleArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let style = style.to_style()?;
    debug!(?style, "figure style");

    let archive = archive.map(Archive::open).transpose()?;
    if let Some(archive) = &archive {
        println!("📂 Loaded archive: {}", archive.root().display());
    }

    println!("🎨 Rendering {}...", figure.name());
    let target = OutputTarget::from(out);
    let (path, summary) = render_figure(figure, archive.as_ref(), &style, &target, &SystemViewer)?;
    debug!(path = %path.display(), "render finished");

    if let Some(summary_path) = summary_path {
        summary.save_json(summary_path)?;
        println!("💾 Summary saved to: {}", summary_path.display());
    }
    Ok(())
}

fn check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let archive = Archive::open(path)?;
    println!("📂 Loaded archive: {}", archive.root().display());

    let report = verify_archive(&archive, &PercentageVerificationConfig::default())?;

    println!("🔍 Archive {}", report.archive);
    println!(
        "  - Syntax report: {} versions over {} sites (shares sum to {:.2}%)",
        report.versions, report.percentages.total, report.percentages.percentage_sum
    );
    println!("  - Tools: {}", report.tools.len());
    for tool in &report.tools {
        let transparency = match tool.transparency {
            Some(b) => format!(
                "{} transparent / {} non-transparent / {} N/A",
                b.transparent, b.non_transparent, b.not_applicable
            ),
            None => "no transparency counts".to_string(),
        };
        let compatibility = if tool.compatibility_checked {
            "compatibility ok"
        } else {
            "no compatibility counts"
        };
        println!(
            "    {}: {}; {}; {} compatibility issues, {} transparency issues",
            tool.tool,
            transparency,
            compatibility,
            tool.compatibility_issues,
            tool.transparency_issues
        );
    }
    println!("✅ Archive is consistent");
    Ok(())
}

fn list() {
    println!("📋 Available figures:");
    for figure in Figure::ALL {
        let source = if figure.needs_archive() {
            "archive required"
        } else if figure.reads_archive() {
            "archive or embedded data"
        } else {
            "embedded data"
        };
        println!("  {:<26} {}", figure.name(), source);
    }
}
