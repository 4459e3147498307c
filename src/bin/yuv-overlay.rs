use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "yuv-overlay", version)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Overlay a BMP onto every frame of a raw YUV 4:2:0 stream.
    Overlay(OverlayArgs),
    /// Convert a BMP into a single raw YUV 4:2:0 frame.
    Convert(ConvertArgs),
    /// Decode a BMP and save it as PNG.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Config file (`key=value` lines, or JSON when the extension is `.json`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input YUV stream.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output YUV stream.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Overlay BMP.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Frame width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Frame height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Conversion worker threads (defaults to the hardware count).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input BMP.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output raw YUV 4:2:0 file.
    #[arg(long)]
    out: PathBuf,

    /// Conversion worker threads (defaults to the hardware count).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input BMP.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let started = Instant::now();
    let result = match cli.cmd {
        Command::Overlay(args) => cmd_overlay(args),
        Command::Convert(args) => cmd_convert(args),
        Command::Preview(args) => cmd_preview(args),
    };
    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        ok = result.is_ok(),
        "done"
    );
    result
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => yuv_overlay::Config::from_path(path)?,
        None => yuv_overlay::Config::default(),
    };
    if let Some(p) = args.input {
        cfg.input_video = p;
    }
    if let Some(p) = args.output {
        cfg.output_video = p;
    }
    if let Some(p) = args.overlay {
        cfg.overlay_image = p;
    }
    if let Some(w) = args.width {
        cfg.frame_width = w;
    }
    if let Some(h) = args.height {
        cfg.frame_height = h;
    }
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }

    ensure_parent_dir(&cfg.output_video)?;
    let stats = yuv_overlay::run_with_config(&cfg)?;

    eprintln!(
        "wrote {} ({} frames)",
        cfg.output_video.display(),
        stats.frames
    );
    Ok(())
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let image = yuv_overlay::decode_bmp(&args.in_path)?;
    let yuv = yuv_overlay::convert(
        &image,
        &yuv_overlay::ConvertOpts {
            threads: args.threads,
        },
    )?;

    ensure_parent_dir(&args.out)?;
    let file =
        File::create(&args.out).with_context(|| format!("create '{}'", args.out.display()))?;
    let mut out = BufWriter::new(file);
    yuv.write_planar(&mut out)?;
    out.flush()
        .with_context(|| format!("flush '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{} yuv420p)",
        args.out.display(),
        yuv.width,
        yuv.height
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let image = yuv_overlay::decode_bmp(&args.in_path)?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &image.to_rgb8_bytes(),
        image.width,
        image.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
