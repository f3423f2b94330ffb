use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use retrovision::models::{AppConfig, VideoFormat};
use retrovision::rendering::{
    encode_indexed_png, load_source, Canvas, DisplaySurface, TerminalSurface,
};
use retrovision::services::{
    describe_or_fallback, is_ffmpeg_on_path, ExportSettings, FfmpegSink, HttpCaptionService,
    Session, FALLBACK_CAPTION,
};
use retro_dither::PaletteCatalog;

#[derive(Parser)]
#[command(name = "retrovision")]
#[command(about = "Retrovision - convert images to the look of vintage home computers")]
struct Cli {
    /// Configuration file (overrides CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Source image (PNG, JPEG, GIF, BMP, WebP)
    input: PathBuf,

    /// Palette key, e.g. "c64", "ega", "amiga", "vga", "atari"
    #[arg(short, long)]
    system: Option<String>,

    /// Error diffusion strength, 0.0 to 1.2
    #[arg(long)]
    strength: Option<f64>,

    /// Multiplier on the platform's native width
    #[arg(long)]
    scale: Option<f32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image to an indexed PNG
    Convert {
        #[command(flatten)]
        args: ConvertArgs,

        /// Output PNG file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Ask the caption service for a period-style description
        #[arg(long)]
        caption: bool,
    },
    /// Play the loading animation in the terminal
    Preview {
        #[command(flatten)]
        args: ConvertArgs,

        /// Reveal block size in pixels
        #[arg(long)]
        block_size: Option<usize>,

        /// Reveal duration in milliseconds
        #[arg(long)]
        duration_ms: Option<u64>,

        /// Seconds to keep the finished image on screen
        #[arg(long, default_value_t = 3)]
        hold: u64,
    },
    /// Record the loading animation to a video file (requires ffmpeg)
    Export {
        #[command(flatten)]
        args: ConvertArgs,

        /// Output video file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Container format: webm or mp4
        #[arg(long)]
        format: Option<VideoFormat>,

        /// Frames per second
        #[arg(long)]
        fps: Option<u32>,

        /// Reveal block size in pixels
        #[arg(long)]
        block_size: Option<usize>,

        /// Reveal duration in milliseconds
        #[arg(long)]
        duration_ms: Option<u64>,
    },
    /// List available palettes
    Palettes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The terminal preview owns the screen, so keep the log quiet there
    let default_filter = match cli.command {
        Some(Commands::Preview { .. }) => "retrovision=warn",
        _ => "retrovision=info",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let config = AppConfig::load(config_path.as_deref());

    match cli.command {
        Some(Commands::Convert {
            args,
            output,
            caption,
        }) => run_convert_command(&config, &args, output, caption).await,
        Some(Commands::Preview {
            args,
            block_size,
            duration_ms,
            hold,
        }) => run_preview_command(&config, &args, block_size, duration_ms, hold).await,
        Some(Commands::Export {
            args,
            output,
            format,
            fps,
            block_size,
            duration_ms,
        }) => run_export_command(
            &config,
            &args,
            output,
            format,
            fps,
            block_size,
            duration_ms,
        ),
        Some(Commands::Palettes) => {
            run_palettes_command(&config.build_catalog());
            Ok(())
        }
        None => {
            run_status_command(&config, config_path.as_deref());
            Ok(())
        }
    }
}

/// Build a session with the source loaded and the settings applied
fn open_session<S: DisplaySurface>(
    config: &AppConfig,
    args: &ConvertArgs,
    surface: S,
) -> anyhow::Result<Session<S>> {
    let system = args.system.as_deref().unwrap_or(&config.system);
    let mut session = Session::new(config.build_catalog(), system, surface)?;
    session.set_strength(args.strength.unwrap_or(config.strength));
    session.set_reveal_options(config.reveal_options());

    let scale = args.scale.unwrap_or(config.resolution_scale);
    let source = load_source(&args.input, session.palette()?, scale)?;
    session.set_source(source);
    Ok(session)
}

async fn run_convert_command(
    config: &AppConfig,
    args: &ConvertArgs,
    output: Option<PathBuf>,
    caption: bool,
) -> anyhow::Result<()> {
    let mut session = open_session(config, args, Canvas::new())?;
    let image = session.convert()?;
    let png = encode_indexed_png(&image)?;

    let output = output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "retro-{}-{}.png",
            session.system(),
            chrono::Utc::now().timestamp_millis()
        ))
    });
    std::fs::write(&output, &png)?;
    println!(
        "Wrote {} ({}x{}, {} colors, {} bytes)",
        output.display(),
        image.width(),
        image.height(),
        image.palette().len(),
        png.len()
    );

    if caption {
        let text = match HttpCaptionService::from_config(&config.caption) {
            Ok(service) => describe_or_fallback(&service, &png, image.palette().name()).await,
            Err(e) => {
                tracing::warn!(%e, "Caption service unavailable");
                FALLBACK_CAPTION.to_string()
            }
        };
        println!("\n{text}");
    }
    Ok(())
}

async fn run_preview_command(
    config: &AppConfig,
    args: &ConvertArgs,
    block_size: Option<usize>,
    duration_ms: Option<u64>,
    hold: u64,
) -> anyhow::Result<()> {
    let mut session = open_session(config, args, TerminalSurface::new())?;
    if let Some(block_size) = block_size {
        session.set_block_size(block_size);
    }
    if let Some(duration_ms) = duration_ms {
        session.set_duration(Duration::from_millis(duration_ms));
    }
    session.convert()?;

    let now = session.renderer().now();
    session.start_reveal(now)?;

    let finished = tokio::select! {
        result = session.renderer_mut().run_realtime(Duration::from_millis(16)) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    let result = match finished {
        Some(Ok(())) => {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(hold)) => {}
                _ = tokio::signal::ctrl_c() => {}
            }
            Ok(())
        }
        Some(Err(e)) => Err(e),
        None => {
            tracing::info!("Preview interrupted");
            session.renderer_mut().cancel();
            Ok(())
        }
    };

    session.renderer_mut().release()?;
    result?;
    Ok(())
}

fn run_export_command(
    config: &AppConfig,
    args: &ConvertArgs,
    output: Option<PathBuf>,
    format: Option<VideoFormat>,
    fps: Option<u32>,
    block_size: Option<usize>,
    duration_ms: Option<u64>,
) -> anyhow::Result<()> {
    if !is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg not found on PATH; video export is unavailable");
    }

    let mut session = open_session(config, args, Canvas::new())?;
    if let Some(block_size) = block_size {
        session.set_block_size(block_size);
    }
    if let Some(duration_ms) = duration_ms {
        session.set_duration(Duration::from_millis(duration_ms));
    }
    session.convert()?;

    let format = format.unwrap_or(config.export.format);
    let settings = ExportSettings {
        fps: fps.unwrap_or(config.export.fps),
        hold: Duration::from_millis(config.export.hold_ms),
    };
    let mut sink = FfmpegSink::new(format)
        .pixel_scale(config.export.pixel_scale)
        .bitrate(config.export.bitrate.clone());
    let video = session.export(&mut sink, settings)?;

    let output = output.unwrap_or_else(|| {
        let seconds = session.reveal_options().duration.as_secs_f64();
        PathBuf::from(format!(
            "retro-load-{}-{}s.{}",
            session.system(),
            seconds,
            format.extension()
        ))
    });
    std::fs::write(&output, &video.bytes)?;
    println!(
        "Wrote {} ({} frames, {} bytes)",
        output.display(),
        video.total_frames(),
        video.bytes.len()
    );
    Ok(())
}

fn run_palettes_command(catalog: &PaletteCatalog) {
    println!("Available palettes:\n");
    for (key, palette) in catalog.iter() {
        let width = palette
            .native_width()
            .map(|w| format!("{w}px"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {key:<10} {:<20} {:>3} colors  {width:>6}  {}",
            palette.name(),
            palette.len(),
            palette.description()
        );
    }
}

/// Show configuration and environment status
fn run_status_command(config: &AppConfig, config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Retrovision v{VERSION}");
    println!("Retro computer image conversion and loading animations\n");

    println!("Configuration:");
    let config_source = match config_path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("  Source      = {config_source}");
    println!("  System      = {}", config.system);
    println!("  Strength    = {}", config.strength);
    println!("  Block size  = {}", config.block_size);
    println!("  Duration    = {} ms", config.duration_ms);

    let catalog = config.build_catalog();
    println!("\nPalettes: {}", catalog.keys().collect::<Vec<_>>().join(", "));

    println!("\nExternal tools:");
    println!(
        "  ffmpeg      = {}",
        if is_ffmpeg_on_path() {
            "found"
        } else {
            "not found (video export disabled)"
        }
    );
    let key_set = std::env::var(&config.caption.api_key_env).is_ok();
    println!(
        "  {:<11} = {}",
        config.caption.api_key_env,
        if key_set {
            "set"
        } else {
            "(not set, captions use the fallback text)"
        }
    );

    println!("\nCommands:");
    println!("  retrovision convert <image>   Convert to an indexed PNG");
    println!("  retrovision preview <image>   Play the loading animation in the terminal");
    println!("  retrovision export <image>    Record the loading animation with ffmpeg");
    println!("  retrovision palettes          List available palettes");
}
