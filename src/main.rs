use clap::{Parser, Subcommand};
use lightgrid::imaging::RustBackend;
use lightgrid::{config, gallery, output, patch};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lightgrid")]
#[command(about = "Rebuilds a lightbox gallery grid from a directory of images")]
#[command(long_about = "\
Rebuilds a lightbox gallery grid from a directory of images

Your filesystem is the data source. Every image in the source directory
gets a bounded thumbnail (generated only when missing), a caption, and a
block in the generated HTML fragment. The fragment is then spliced into
the host page's grid container, in place.

Project layout:

  project/
  ├── config.toml              # Optional; stock values apply when absent
  ├── index.html               # Host document, patched in place
  ├── gallery_fragment.html    # Generated fragment (overwritten each run)
  └── assets/
      ├── 2024-dunes.jpg       # Source image
      ├── 2024-dunes.txt       # Sidecar caption (optional)
      └── thumb/
          └── 2024-dunes.jpg   # Generated thumbnail

Caption resolution (first available wins):
  sidecar .txt content (trimmed) → modification date as YYYY.MM.DD

Run 'lightgrid gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Path to the config file (stock values apply when the file is absent)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: thumbnails → fragment → document patch
    Build,
    /// Generate thumbnails and the fragment file only
    Gallery,
    /// Splice the existing fragment file into the host document
    Patch,
    /// List discovered images and their status without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load(&cli.config)?;

    match cli.command {
        Command::Build => {
            let result = run_gallery(&config)?;
            let status = patch::patch(&config, &result.fragment)?;
            println!(
                "{}",
                output::format_patch_status(&status, &config.document_file)
            );
        }
        Command::Gallery => {
            run_gallery(&config)?;
        }
        Command::Patch => {
            let fragment = std::fs::read_to_string(&config.fragment_file)?;
            let status = patch::patch(&config, &fragment)?;
            println!(
                "{}",
                output::format_patch_status(&status, &config.document_file)
            );
        }
        Command::Check => {
            let entries = gallery::inspect(&config)?;
            for line in output::format_check_output(&entries) {
                println!("{}", line);
            }
        }
        Command::GenConfig => unreachable!("handled above"),
    }

    Ok(())
}

/// Run the gallery stage with a printer thread draining progress events.
fn run_gallery(
    config: &config::GalleryConfig,
) -> Result<gallery::BuildResult, Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            println!("{}", output::format_build_event(&event));
        }
    });
    let result = gallery::build(config, &RustBackend::new(), Some(tx))?;
    printer.join().unwrap();
    Ok(result)
}
