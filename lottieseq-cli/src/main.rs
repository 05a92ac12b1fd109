use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "lottieseq", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a Lottie animation from a zip of numbered frames.
    Convert(ConvertArgs),
    /// Summarize any Lottie animation and optionally export an image frame as PNG.
    Preview(PreviewArgs),
    /// Apply colour adjustments to every image in a zip.
    Adjust(AdjustArgs),
    /// Convert the PNGs in a zip to lossless WebP.
    Webp(WebpArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmbedArg {
    Png,
    Webp,
}

impl From<EmbedArg> for lottieseq::EmbedFormat {
    fn from(arg: EmbedArg) -> Self {
        match arg {
            EmbedArg::Png => Self::Png,
            EmbedArg::Webp => Self::WebpLossless,
        }
    }
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input zip archive.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frames per second; clamped to 1..=60.
    #[arg(long, default_value_t = 24, allow_negative_numbers = true)]
    fps: i64,

    /// Output Lottie JSON path.
    #[arg(long, default_value = lottieseq::ANIMATION_FILE_NAME)]
    out: PathBuf,

    /// Codec for embedded frames.
    #[arg(long, value_enum, default_value_t = EmbedArg::Png)]
    embed: EmbedArg,

    /// Animation name.
    #[arg(long)]
    name: Option<String>,

    /// Pretty-print the JSON.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("at").args(["frame", "time"])))]
struct PreviewArgs {
    /// Input Lottie JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: Option<u64>,

    /// Playback time in seconds.
    #[arg(long)]
    time: Option<f64>,

    /// Wrap `--time` around the animation instead of holding the last frame.
    #[arg(long = "loop", default_value_t = false)]
    looping: bool,

    /// Write the selected frame, flattened onto the background, as PNG.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Background colour for the exported frame.
    #[arg(long, default_value = "#ffffff")]
    bg: String,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Process images one at a time on the main thread.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Exit with an error if any image failed.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

impl BatchArgs {
    fn runner(&self) -> anyhow::Result<lottieseq::BatchRunner> {
        let opts = lottieseq::BatchOptions {
            parallel: !self.sequential,
            threads: self.threads,
        };
        Ok(lottieseq::BatchRunner::new(&opts)?)
    }
}

#[derive(Parser, Debug)]
struct AdjustArgs {
    /// Input zip archive.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output zip archive.
    #[arg(long, default_value = lottieseq::PROCESSED_ARCHIVE_NAME)]
    out: PathBuf,

    /// JSON file with adjustment parameters; flags below override single fields.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Exposure, -1..=1.
    #[arg(long, allow_negative_numbers = true)]
    exposure: Option<f64>,
    /// Contrast, 0..=3.
    #[arg(long, allow_negative_numbers = true)]
    contrast: Option<f64>,
    /// Saturation, 0..=3.
    #[arg(long, allow_negative_numbers = true)]
    saturation: Option<f64>,
    /// Temperature, -100..=100.
    #[arg(long, allow_negative_numbers = true)]
    temperature: Option<f64>,
    /// Tint, -100..=100.
    #[arg(long, allow_negative_numbers = true)]
    tint: Option<f64>,
    /// Highlights, -1..=1.
    #[arg(long, allow_negative_numbers = true)]
    highlights: Option<f64>,
    /// Shadows, -1..=1.
    #[arg(long, allow_negative_numbers = true)]
    shadows: Option<f64>,

    /// Also write the adjusted first image as PNG.
    #[arg(long)]
    preview_out: Option<PathBuf>,

    #[command(flatten)]
    batch: BatchArgs,
}

impl AdjustArgs {
    fn parameters(&self) -> anyhow::Result<lottieseq::AdjustmentParameters> {
        let mut p = match &self.params {
            Some(path) => lottieseq::AdjustmentParameters::from_path(path)?,
            None => lottieseq::AdjustmentParameters::default(),
        };
        let overrides = [
            (&mut p.exposure, self.exposure),
            (&mut p.contrast, self.contrast),
            (&mut p.saturation, self.saturation),
            (&mut p.temperature, self.temperature),
            (&mut p.tint, self.tint),
            (&mut p.highlights, self.highlights),
            (&mut p.shadows, self.shadows),
        ];
        for (dial, value) in overrides {
            if let Some(v) = value {
                *dial = v;
            }
        }
        if let Err(e) = p.validate() {
            tracing::warn!("{e}; clamping into range");
        }
        Ok(p.clamped())
    }
}

#[derive(Parser, Debug)]
struct WebpArgs {
    /// Input zip archive.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output zip archive.
    #[arg(long, default_value = lottieseq::CONVERTED_ARCHIVE_NAME)]
    out: PathBuf,

    /// Output size in percent of the source (1..=100).
    #[arg(long, default_value_t = 100)]
    scale: u32,

    #[command(flatten)]
    batch: BatchArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Adjust(args) => cmd_adjust(args),
        Command::Webp(args) => cmd_webp(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let fps = lottieseq::Fps::clamped(args.fps);
    if i64::from(fps.get()) != args.fps {
        tracing::warn!(requested = args.fps, used = fps.get(), "fps clamped");
    }

    let mut assemble = lottieseq::AssembleOptions {
        embed: args.embed.into(),
        ..lottieseq::AssembleOptions::default()
    };
    if let Some(name) = args.name {
        assemble.name = name;
    }
    let opts = lottieseq::UploadOptions {
        assemble,
        ..lottieseq::UploadOptions::default()
    };
    let req = lottieseq::UploadRequest::new(read_input(&args.in_path)?, args.fps.to_string());
    let doc = match lottieseq::handle_upload(&req, &opts) {
        lottieseq::UploadResponse::Lottie(doc) => doc,
        lottieseq::UploadResponse::Error(failure) => {
            anyhow::bail!("convert failed ({}): {}", failure.status, failure.message)
        }
    };

    write_output(&args.out, doc.to_json_string(args.pretty)?.as_bytes())?;
    eprintln!(
        "wrote {} ({} frames @ {} fps)",
        args.out.display(),
        doc.frame_count(),
        doc.frame_rate
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let view = lottieseq::AnimationView::from_path(&args.in_path)?;
    let summary = view.summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let Some(out) = args.out else {
        return Ok(());
    };
    let frame = match (args.frame, args.time) {
        (Some(f), _) => lottieseq::FrameIndex(f),
        (None, Some(secs)) => summary.frame_at(secs, args.looping),
        (None, None) => summary.first_frame(),
    };
    let bg = lottieseq::parse_hex_color(&args.bg)?;
    let image = lottieseq::flatten_over(&view.decode_frame(frame)?, bg);
    write_png(&out, &image)?;
    eprintln!("wrote {} (frame {})", out.display(), frame.0);
    Ok(())
}

fn cmd_adjust(args: AdjustArgs) -> anyhow::Result<()> {
    let params = args.parameters()?;
    let archive = read_input(&args.in_path)?;

    if let Some(preview_out) = &args.preview_out {
        let entries = lottieseq::read_archive(&archive)?;
        let preview = lottieseq::preview_first(&entries, &params)?;
        write_png(preview_out, &preview)?;
        eprintln!("wrote {}", preview_out.display());
    }

    let runner = args.batch.runner()?;
    let outcome =
        lottieseq::process_archive(&archive, &params, &runner, &lottieseq::CancelToken::new())?;
    finish_batch(&args.out, outcome, args.batch.strict)
}

fn cmd_webp(args: WebpArgs) -> anyhow::Result<()> {
    let archive = read_input(&args.in_path)?;
    let runner = args.batch.runner()?;
    let opts = lottieseq::WebpOptions {
        scale_percent: args.scale,
    };
    let outcome =
        lottieseq::convert_archive(&archive, &opts, &runner, &lottieseq::CancelToken::new())?;
    finish_batch(&args.out, outcome, args.batch.strict)
}

fn finish_batch(out: &Path, outcome: lottieseq::FilterOutcome, strict: bool) -> anyhow::Result<()> {
    for failure in &outcome.report.failures {
        eprintln!("skipped {}: {}", failure.name, failure.reason);
    }
    write_output(out, &outcome.archive)?;
    eprintln!(
        "wrote {} ({} of {} images)",
        out.display(),
        outcome.report.succeeded.len(),
        outcome.report.total()
    );
    if strict {
        outcome.report.ensure_complete()?;
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write output '{}'", path.display()))
}

fn write_png(path: &Path, frame: &lottieseq::DecodedImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        frame.pixels(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
