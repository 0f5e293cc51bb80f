/// Render every figure into a directory, one subdirectory per archive
/// Usage: cargo run --bin generate_figures --release -- [ARCHIVE_OR_DIR] --out-dir figures
use clap::Parser;
use compat_figures::archive::{list_archives, LOGFILE_NAME};
use compat_figures::cli::init_logging;
use compat_figures::figure_config::FigureStyle;
use compat_figures::figures::{render_figure, Figure};
use compat_figures::output::{OutputTarget, SystemViewer};
use compat_figures::Archive;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "generate_figures", about = "Render all figures to PNG files")]
struct Args {
    /// An archive, a directory of archives, or nothing for the embedded data
    path: Option<PathBuf>,
    #[arg(long, default_value = "figures")]
    out_dir: PathBuf,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);
    let style = FigureStyle::default();

    println!("📊 Generating figures...");
    println!();

    let written = match &args.path {
        None => render_all(None, &args.out_dir, &style)?,
        Some(path) if path.join(LOGFILE_NAME).is_file() => {
            let archive = Archive::open(path)?;
            println!("📂 Loaded archive: {}", archive.root().display());
            render_all(Some(&archive), &args.out_dir, &style)?
        }
        Some(dir) => {
            let archives = list_archives(dir)?;
            if archives.is_empty() {
                return Err(format!("No archives with {} under {}", LOGFILE_NAME, dir.display()).into());
            }
            let mut written = Vec::new();
            for root in archives {
                let archive = Archive::open(&root)?;
                println!("📂 Loaded archive: {}", archive.name());
                let out_dir = args.out_dir.join(archive.name());
                written.extend(render_all(Some(&archive), &out_dir, &style)?);
            }
            written
        }
    };

    println!();
    println!("✅ All figures generated successfully!");
    println!();
    println!("📂 Output files:");
    for path in &written {
        println!("  {}", path.display());
    }
    println!();

    Ok(())
}

fn render_all(
    archive: Option<&Archive>,
    out_dir: &Path,
    style: &FigureStyle,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for figure in Figure::ALL {
        if figure.needs_archive() && archive.is_none() {
            warn!(figure = figure.name(), "skipping figure without an archive");
            continue;
        }
        println!("🎨 Generating {}...", figure.name());
        let target = OutputTarget::Save(out_dir.join(figure.file_name()));
        let (path, _) = render_figure(figure, archive, style, &target, &SystemViewer)?;
        written.push(path);
    }
    Ok(written)
}
