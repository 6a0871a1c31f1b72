use branagram_media::config::{self, MediaConfig};
use branagram_media::imaging::{RustBackend, plan_meme};
use branagram_media::publish::{self, MemeDraft};
use branagram_media::{output, profile};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::Level;

/// Caption text and font override shared by `caption` and `layout`.
#[derive(clap::Args, Clone)]
struct CaptionArgs {
    /// Image file
    image: PathBuf,

    /// Top caption
    #[arg(long, default_value = "")]
    top: String,

    /// Bottom caption
    #[arg(long, default_value = "")]
    bottom: String,

    /// Caption font (overrides captions.font)
    #[arg(long)]
    font: Option<PathBuf>,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once; called only at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "branagram-media")]
#[command(about = "Meme captions and profile image fitting for branagram")]
#[command(long_about = "\
Meme captions and profile image fitting for branagram

Every command rewrites the image in place.

  caption   burn top/bottom captions into a photo, classic meme style:
            uppercase, white fill, black outline, centered, word-wrapped
  layout    show where the caption lines would go, without writing
  avatar    shrink an avatar to fit the configured square
  cover     shrink a cover image per the configured cover rule

Settings come from branagram.toml in the current directory, or --config.
Run 'branagram-media gen-config' to print a documented config file.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (default: ./branagram.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Burn a caption into an image
    Caption(CaptionArgs),
    /// Print the caption layout without writing
    Layout(CaptionArgs),
    /// Shrink an avatar image
    Avatar {
        /// Image file
        image: PathBuf,
    },
    /// Shrink a cover image
    Cover {
        /// Image file
        image: PathBuf,
    },
    /// Print a stock branagram.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;
    let backend = RustBackend::new();

    match cli.command {
        Command::Caption(args) => {
            let mut captions = config.captions.clone();
            if let Some(font) = args.font {
                captions.font = font;
            }
            let draft = MemeDraft {
                title: display_title(&args.image),
                top: args.top,
                bottom: args.bottom,
                photo: args.image,
            };
            let outcome = publish::publish_meme(&backend, &draft, &captions)?;
            output::print_publish_outcome(&draft.photo, &outcome);
        }
        Command::Layout(args) => {
            let font = args.font.unwrap_or(config.captions.font);
            let layout = plan_meme(&backend, &args.image, &args.top, &args.bottom, &font)?;
            output::print_caption_report(&args.image, &layout);
        }
        Command::Avatar { image } => {
            let resized = profile::fit_avatar(&backend, &image, &config.profile)?;
            println!("{}", output::format_resize(&image, resized));
        }
        Command::Cover { image } => {
            let resized = profile::fit_cover(&backend, &image, config.profile.cover_rule)?;
            println!("{}", output::format_resize(&image, resized));
        }
        Command::GenConfig => unreachable!("handled before config loading"),
    }

    Ok(())
}

/// Explicit `--config` must exist; otherwise fall back to the working dir.
fn load_config(explicit: Option<&Path>) -> Result<MediaConfig, config::ConfigError> {
    match explicit {
        Some(path) => config::load_config_file(path),
        None => config::load_config(Path::new(".")),
    }
}

/// Post title for command-line runs: the image's file stem.
fn display_title(image: &Path) -> String {
    image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string())
}
