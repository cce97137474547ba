//! cubescan CLI — recognize Rubik's cube stickers from per-camera frames.

use clap::{Args, Parser, Subcommand};
use log::{info, warn, LevelFilter};
use std::path::{Path, PathBuf};

use cubescan::capture::{NullIlluminator, StillSource};
use cubescan::config::RigConfig;
use cubescan::recognize::{Recognizer, DEFAULT_MAX_ATTEMPTS};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "cubescan")]
#[command(about = "Recognize Rubik's cube facelet colors from HSV camera frames")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level instead of info.
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full recognition loop over still frames.
    Recognize(RecognizeArgs),

    /// Sample and classify a single round, printing per-facelet readings.
    Sample(RigArgs),

    /// Validate a rig configuration and print its summary.
    CheckConfig {
        /// Path to the rig configuration (JSON).
        #[arg(long)]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct RigArgs {
    /// Path to the rig configuration (JSON).
    #[arg(long)]
    config: PathBuf,

    /// Still frame image, one per configured camera, in camera-bank order.
    #[arg(long = "frame", value_name = "IMAGE", required = true)]
    frames: Vec<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct RecognizeArgs {
    #[command(flatten)]
    rig: RigArgs,

    /// Maximum recognition attempts before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    attempts: u32,

    /// LED brightness override for this run.
    #[arg(long)]
    brightness: Option<u8>,

    /// Path to write the recognition outcome (JSON).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    cubescan::core::init_with_level(level)?;

    match cli.command {
        Commands::Recognize(args) => run_recognize(&args),
        Commands::Sample(args) => run_sample(&args),
        Commands::CheckConfig { config } => run_check_config(&config),
    }
}

fn load_rig(args: &RigArgs) -> CliResult<(RigConfig, Vec<StillSource>)> {
    let config = RigConfig::load_json(&args.config).map_err(|e| -> CliError {
        format!("failed to read rig config {}: {}", args.config.display(), e).into()
    })?;

    if args.frames.len() != config.cameras.sources.len() {
        return Err(format!(
            "rig configures {} cameras but {} frames were given; pass one --frame per camera",
            config.cameras.sources.len(),
            args.frames.len(),
        )
        .into());
    }

    let mut sources = Vec::with_capacity(args.frames.len());
    for path in &args.frames {
        let frame = cubescan::hsv::load_hsv_frame(path).map_err(|e| -> CliError {
            format!("failed to load frame {}: {}", path.display(), e).into()
        })?;
        if frame.width != config.cameras.width as usize
            || frame.height != config.cameras.height as usize
        {
            warn!(
                "frame {} is {}x{}, rig expects {}x{}",
                path.display(),
                frame.width,
                frame.height,
                config.cameras.width,
                config.cameras.height,
            );
        }
        sources.push(StillSource::new(frame));
    }

    Ok((config, sources))
}

// ── recognize ──────────────────────────────────────────────────────────

fn run_recognize(args: &RecognizeArgs) -> CliResult<()> {
    let (config, mut sources) = load_rig(&args.rig)?;
    let mut recognizer = Recognizer::from_config(&config)?;

    info!(
        "recognizing from {} frames, up to {} attempts",
        sources.len(),
        args.attempts,
    );

    let outcome = recognizer.recognize(
        &mut sources,
        &mut NullIlluminator,
        args.attempts,
        args.brightness,
    );

    for line in outcome.cube.solver_lines() {
        println!("{line}");
    }

    if let Some(out) = &args.out {
        let json = serde_json::to_string_pretty(&outcome)?;
        std::fs::write(out, &json)?;
        info!("outcome written to {}", out.display());
    }

    if !outcome.success {
        return Err(format!("recognition failed after {} attempts", outcome.attempts).into());
    }
    Ok(())
}

// ── sample ─────────────────────────────────────────────────────────────

fn run_sample(args: &RigArgs) -> CliResult<()> {
    let (config, mut sources) = load_rig(args)?;
    let mut recognizer = Recognizer::from_config(&config)?;

    // One attempt is enough; the cube keeps the samples either way.
    let _ = recognizer.recognize(&mut sources, &mut NullIlluminator, 1, None);

    for face in recognizer.cube().faces() {
        let center = match face.center_color() {
            Some(color) => color.to_string(),
            None => "unresolved".to_string(),
        };
        println!("face {} on camera {}: center pigment {}", face.id(), face.camera(), center);
        for (i, facelet) in face.facelets().iter().enumerate() {
            let coord = facelet.coord();
            match facelet.sample() {
                Some(mean) => println!(
                    "  {} at ({}, {}): mean ({:.1}, {:.1}, {:.1})",
                    i, coord.x, coord.y, mean.x, mean.y, mean.z,
                ),
                None => println!("  {} at ({}, {}): no sample", i, coord.x, coord.y),
            }
        }
    }

    println!();
    for line in recognizer.cube().reading().solver_lines() {
        println!("{line}");
    }

    Ok(())
}

// ── check-config ───────────────────────────────────────────────────────

fn run_check_config(path: &Path) -> CliResult<()> {
    let config = RigConfig::load_json(path).map_err(|e| -> CliError {
        format!("failed to read rig config {}: {}", path.display(), e).into()
    })?;
    config.validate()?;

    println!("rig config {}", path.display());
    println!("  cameras:       {}", config.cameras.sources.len());
    for (i, source) in config.cameras.sources.iter().enumerate() {
        println!("    {i}: {source}");
    }
    println!(
        "  frame size:    {}x{}",
        config.cameras.width, config.cameras.height
    );
    println!("  read delay:    {} ms per round", config.cameras.read_delay_ms);
    println!("  window:        {} px", config.window);
    println!("  centroid gate: {}", config.classify.centroid_threshold);
    println!("  hue bounds:    {:?}", config.classify.profile.hue_bounds);
    println!("  faces:");
    for layout in &config.faces {
        let [x, y] = layout.facelets[cubescan::core::CENTER_FACELET];
        println!(
            "    {} on camera {}, center at ({}, {})",
            layout.id, layout.camera, x, y,
        );
    }
    println!("config is valid");

    Ok(())
}
