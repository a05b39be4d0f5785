//! `stickers`: render lab sticker sheets and manage stored documents.
//!
//! Provides both human-friendly and script-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Parser;
use tracing::{debug, info};

use stickers::cli::{self, Cli, Commands, ConfigAction};
use stickers::config::{default_config_path, load_settings, write_default_config, LoadedSettings};
use stickers::error::{Result, StickerError};
use stickers::layout::render;
use stickers::logging::init_logging;
use stickers::output::{Output, OutputMode, RenderReport, VersionInfo};
use stickers::record::load_batch;
use stickers::refno::next_lab_ref_no;
use stickers::store::DocumentStore;

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> Option<&'static str> {
        option_env!("VERGEN_GIT_SHA")
    }

    pub fn build_timestamp() -> Option<&'static str> {
        option_env!("VERGEN_BUILD_TIMESTAMP")
    }

    pub fn rustc_semver() -> Option<&'static str> {
        option_env!("VERGEN_RUSTC_SEMVER")
    }

    pub fn target() -> Option<&'static str> {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE")
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.robot, cli.verbose, cli.quiet);

    let out = OutputMode::from_cli(&cli).into_output();
    if let Err(e) = run(&cli, out.as_ref()) {
        out.error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &dyn Output) -> Result<()> {
    match &cli.command {
        None => {
            out.info("No command given. Try: stickers render stickers.yaml -o sheet.pdf");
            Ok(())
        }
        Some(Commands::Render(args)) => cmd_render(cli, out, args),
        Some(Commands::Save(args)) => cmd_save(cli, out, args),
        Some(Commands::Load(args)) => cmd_load(cli, out, args),
        Some(Commands::Delete(args)) => cmd_delete(cli, out, args),
        Some(Commands::Refno(args)) => cmd_refno(cli, out, args),
        Some(Commands::Config(args)) => cmd_config(cli, out, args),
        Some(Commands::Version) => {
            cmd_version(out);
            Ok(())
        }
        Some(Commands::Completions(args)) => cmd_completions(args),
    }
}

fn settings(cli: &Cli) -> Result<LoadedSettings> {
    load_settings(cli.config.as_deref())
}

fn open_store(cli: &Cli) -> Result<DocumentStore> {
    DocumentStore::open(&settings(cli)?.settings.storage)
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn write_stdout(bytes: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()?;
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| StickerError::storage(path, e))
}

// === Commands ===

fn cmd_render(cli: &Cli, out: &dyn Output, args: &cli::RenderArgs) -> Result<()> {
    if args.store && args.output.as_deref().is_some_and(is_stdout) {
        // stdout carries only the PDF bytes
        return Err(StickerError::ConflictingOptions(
            "--store cannot be combined with -o -".to_string(),
        ));
    }
    let loaded = settings(cli)?;
    let mut records = load_batch(&args.input)?;

    if let Some(logo_path) = &args.logo {
        let logo = read_file(logo_path)?;
        debug!(path = %logo_path.display(), bytes = logo.len(), "Applying logo to every sticker");
        for record in &mut records {
            record.logo = Some(logo.clone());
        }
    }

    let bytes = render(&records, &loaded.settings.layout)?;
    info!(stickers = records.len(), bytes = bytes.len(), "Rendered sheet");

    let stored = if args.store {
        Some(DocumentStore::open(&loaded.settings.storage)?.save(&bytes)?)
    } else {
        None
    };

    let output = match &args.output {
        Some(path) if is_stdout(path) => {
            write_stdout(&bytes)?;
            return Ok(());
        }
        Some(path) => {
            std::fs::write(path, &bytes).map_err(|e| StickerError::storage(path, e))?;
            Some(path.display().to_string())
        }
        None if stored.is_none() => {
            let path = args.input.with_extension("pdf");
            std::fs::write(&path, &bytes).map_err(|e| StickerError::storage(&path, e))?;
            Some(path.display().to_string())
        }
        None => None,
    };

    out.rendered(&RenderReport {
        stickers: records.len(),
        bytes: bytes.len(),
        output,
        stored,
    });
    Ok(())
}

fn cmd_save(cli: &Cli, out: &dyn Output, args: &cli::SaveArgs) -> Result<()> {
    let bytes = read_file(&args.pdf)?;
    if !bytes.starts_with(b"%PDF-") {
        out.warning(&format!(
            "{} does not look like a PDF; storing it anyway",
            args.pdf.display()
        ));
    }
    let document = open_store(cli)?.save(&bytes)?;
    out.stored(&document);
    Ok(())
}

fn cmd_load(cli: &Cli, out: &dyn Output, args: &cli::LoadArgs) -> Result<()> {
    let bytes = open_store(cli)?.load(&args.relative)?;
    match &args.output {
        Some(path) if !is_stdout(path) => {
            std::fs::write(path, &bytes).map_err(|e| StickerError::storage(path, e))?;
            out.loaded(&args.relative, bytes.len(), path);
            Ok(())
        }
        _ => write_stdout(&bytes),
    }
}

fn cmd_delete(cli: &Cli, out: &dyn Output, args: &cli::DeleteArgs) -> Result<()> {
    let removed = open_store(cli)?.delete(&args.relative)?;
    out.deleted(&args.relative, removed);
    Ok(())
}

fn cmd_refno(cli: &Cli, out: &dyn Output, args: &cli::RefnoArgs) -> Result<()> {
    let timezone = settings(cli)?.settings.storage.timezone()?;
    let now = Utc::now().with_timezone(&timezone);
    let next = next_lab_ref_no(args.last.as_deref(), now)?;
    out.ref_no(&next);
    Ok(())
}

fn config_target(cli: &Cli) -> Result<PathBuf> {
    cli.config
        .clone()
        .or_else(default_config_path)
        .ok_or_else(|| StickerError::ConfigInvalid("Could not determine config directory".into()))
}

fn cmd_config(cli: &Cli, out: &dyn Output, args: &cli::ConfigArgs) -> Result<()> {
    match args.action.clone().unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let loaded = settings(cli)?;
            out.settings(&loaded.settings, loaded.source.as_deref());
        }
        ConfigAction::Init { path } => {
            let target = match path {
                Some(path) => path,
                None => config_target(cli)?,
            };
            write_default_config(&target)?;
            out.success(&format!("Wrote {}", target.display()));
        }
        ConfigAction::Path => {
            let target = config_target(cli)?;
            let exists = target.is_file();
            out.config_path(&target, exists);
        }
    }
    Ok(())
}

fn cmd_version(out: &dyn Output) {
    out.version_info(&VersionInfo {
        version: build_info::VERSION,
        git_sha: build_info::git_sha(),
        build_time: build_info::build_timestamp(),
        rustc: build_info::rustc_semver(),
        target: build_info::target(),
    });
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_completions(args: &cli::CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "stickers", &mut io::stdout());
    Ok(())
}
