//! Command-line interface implementation

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::atlas::Atlas;
use crate::config::{load_config, TexatlasConfig};
use crate::export::{DescriptorExporter, ExportOptions, Exporter, JsonExporter};
use crate::image_loader::{ImageTexture, ImageTextureLoader};
use crate::loader::LoadError;

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// texatlas - Inspect and convert texture atlas descriptors
#[derive(Parser)]
#[command(name = "texatlas")]
#[command(about = "texatlas - Inspect and convert texture atlas descriptors")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to texatlas.toml (default: search upwards from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the pages and regions of an atlas
    Inspect {
        /// Atlas descriptor file
        input: PathBuf,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Print a single region as JSON
    Find {
        /// Atlas descriptor file
        input: PathBuf,

        /// Region name (first match wins)
        name: String,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Convert an atlas to JSON or re-write it as a descriptor
    Export {
        /// Atlas descriptor file
        input: PathBuf,

        /// Output file. Printed to stdout if omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Write JSON on a single line
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Load every atlas matching the given glob patterns and report failures
    Check {
        /// Descriptor files or glob patterns (e.g. "assets/**/*.atlas")
        #[arg(required = true)]
        patterns: Vec<String>,

        #[command(flatten)]
        load: LoadArgs,
    },
}

/// Options shared by every command that loads an atlas
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Directory page images are resolved against (default: next to the descriptor)
    #[arg(long)]
    pub images_dir: Option<PathBuf>,

    /// Flip v coordinates after loading
    #[arg(long)]
    pub flip_v: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Atlas,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match cli.command {
        Commands::Inspect { input, load } => run_inspect(&input, &load, &config),
        Commands::Find { input, name, load } => run_find(&input, &name, &load, &config),
        Commands::Export { input, output, format, compact, load } => {
            run_export(&input, output.as_deref(), format, compact, &load, &config)
        }
        Commands::Check { patterns, load } => run_check(&patterns, &load, &config),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

/// Load an atlas, resolving page images per CLI flags, then config, then the
/// descriptor's own directory.
fn load_atlas(
    input: &Path,
    args: &LoadArgs,
    config: &TexatlasConfig,
) -> Result<Atlas<ImageTexture>, LoadError> {
    let mut loader = match args.images_dir.as_ref().or(config.atlas.images_dir.as_ref()) {
        Some(dir) => ImageTextureLoader::new(dir),
        None => ImageTextureLoader::beside(input),
    };
    let mut atlas = Atlas::load_file(input, &mut loader)?;
    if args.flip_v || config.atlas.flip_v {
        atlas.flip_v();
    }
    Ok(atlas)
}

/// Load an atlas or report the failure, returning the exit code to use.
fn load_or_report(
    input: &Path,
    args: &LoadArgs,
    config: &TexatlasConfig,
) -> Result<Atlas<ImageTexture>, ExitCode> {
    load_atlas(input, args, config).map_err(|e| match e {
        LoadError::Io(io) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), io);
            ExitCode::from(EXIT_INVALID_ARGS)
        }
        other => {
            eprintln!("Error: {}: {}", input.display(), other);
            ExitCode::from(EXIT_ERROR)
        }
    })
}

fn run_inspect(input: &Path, args: &LoadArgs, config: &TexatlasConfig) -> ExitCode {
    let atlas = match load_or_report(input, args, config) {
        Ok(atlas) => atlas,
        Err(code) => return code,
    };

    println!(
        "{}: {} pages, {} regions",
        input.display(),
        atlas.pages().len(),
        atlas.regions().len()
    );
    for (index, page) in atlas.pages().iter().enumerate() {
        println!(
            "page {} {}x{} filter {}/{} wrap {}/{}",
            page.name,
            page.width,
            page.height,
            page.min_filter.as_str(),
            page.mag_filter.as_str(),
            page.u_wrap.as_str(),
            page.v_wrap.as_str()
        );
        for region in atlas.regions().iter().filter(|r| r.page == index) {
            println!(
                "  {} xy {},{} size {}x{}{} uv {:.4},{:.4} {:.4},{:.4}",
                region.name,
                region.x,
                region.y,
                region.width,
                region.height,
                if region.rotate { " rotated" } else { "" },
                region.u,
                region.v,
                region.u2,
                region.v2
            );
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn run_find(input: &Path, name: &str, args: &LoadArgs, config: &TexatlasConfig) -> ExitCode {
    let atlas = match load_or_report(input, args, config) {
        Ok(atlas) => atlas,
        Err(code) => return code,
    };

    let Some(region) = atlas.find_region(name) else {
        eprintln!("Error: No region named '{}' found in {}", name, input.display());
        return ExitCode::from(EXIT_ERROR);
    };

    match serde_json::to_string_pretty(region) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run_export(
    input: &Path,
    output: Option<&Path>,
    format: ExportFormat,
    compact: bool,
    args: &LoadArgs,
    config: &TexatlasConfig,
) -> ExitCode {
    let atlas = match load_or_report(input, args, config) {
        Ok(atlas) => atlas,
        Err(code) => return code,
    };

    let options = ExportOptions { pretty: config.export.pretty && !compact };
    let result = match (format, output) {
        (ExportFormat::Json, Some(path)) => JsonExporter::new().export(&atlas, path, &options),
        (ExportFormat::Atlas, Some(path)) => DescriptorExporter::new().export(&atlas, path, &options),
        (ExportFormat::Json, None) => {
            JsonExporter::new().export_to_string(&atlas, &options).map(|s| println!("{}", s))
        }
        (ExportFormat::Atlas, None) => {
            DescriptorExporter::new().export_to_string(&atlas, &options).map(|s| print!("{}", s))
        }
    };

    match result {
        Ok(()) => {
            if let Some(path) = output {
                eprintln!("Wrote: {}", path.display());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Expand patterns into descriptor paths. Patterns matching nothing are
/// returned as-is so the missing file is reported.
fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, glob::PatternError> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let mut matched = false;
        for entry in glob::glob(pattern)?.flatten() {
            matched = true;
            paths.push(entry);
        }
        if !matched {
            paths.push(PathBuf::from(pattern));
        }
    }
    Ok(paths)
}

fn run_check(patterns: &[String], args: &LoadArgs, config: &TexatlasConfig) -> ExitCode {
    let paths = match expand_patterns(patterns) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Error: Invalid pattern: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut failures = 0;
    for path in &paths {
        match load_atlas(path, args, config) {
            Ok(atlas) => println!(
                "ok: {} ({} pages, {} regions)",
                path.display(),
                atlas.pages().len(),
                atlas.regions().len()
            ),
            Err(e) => {
                failures += 1;
                eprintln!("Error: {}: {}", path.display(), e);
            }
        }
    }

    if failures > 0 {
        eprintln!("{} of {} atlases failed to load", failures, paths.len());
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
