use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use stereoscopy::io::raw::RawFrameReader;
use stereoscopy::{
    CombineConfig, CombineOutcome, DiagnosticLog, Eye, EyeCombiner, EyeSplitter, EyeTag,
    FrameAllocator, FramePool, PixelFormat, SplitConfig, SplitOutcome, Timestamp,
};

#[derive(Parser, Debug)]
#[command(name = "stereoscopy", version)]
struct Cli {
    /// Log progress and per-frame diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a raw stream of combined stereo frames into left and right eye streams.
    Split(SplitArgs),
    /// Combine left and right eye streams into one anaglyph stream.
    Combine(CombineArgs),
}

#[derive(Parser, Debug)]
struct Geometry {
    /// Pixel format FourCC (I420, YV12, I422, ...).
    #[arg(long, default_value = "I420")]
    format: PixelFormat,

    /// Visible width in pixels.
    #[arg(long)]
    width: u32,

    /// Visible height in pixels.
    #[arg(long)]
    height: u32,

    /// Frame rate used to stamp input frames.
    #[arg(long, default_value_t = 25)]
    fps: u32,
}

#[derive(Parser, Debug)]
struct SplitArgs {
    /// Input raw planar file.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    geometry: Geometry,

    /// Left eye encoding (red, cyan-gray, yellow-fill, left, top, 2d, ...).
    #[arg(long)]
    left: Option<String>,

    /// Right eye encoding.
    #[arg(long)]
    right: Option<String>,

    /// JSON split configuration; `--left`/`--right` override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output path for the left eye.
    #[arg(long)]
    out_left: PathBuf,

    /// Output path for the right eye.
    #[arg(long)]
    out_right: PathBuf,

    /// Write PNG previews of the first pair instead of raw streams.
    #[arg(long)]
    png: bool,
}

#[derive(Parser, Debug)]
struct CombineArgs {
    /// Left eye raw planar file.
    #[arg(long)]
    left: PathBuf,

    /// Right eye raw planar file.
    #[arg(long)]
    right: PathBuf,

    #[command(flatten)]
    geometry: Geometry,

    /// Hue pair, left hue first (rc, cr, rg, gr, rb, br, gm, mg, gb, bg, by, yb).
    #[arg(long)]
    scheme: Option<String>,

    /// JSON combine configuration; `--scheme` overrides it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Write a PNG preview of the first combined frame instead of a raw stream.
    #[arg(long)]
    png: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Split(args) => cmd_split(args),
        Command::Combine(args) => cmd_combine(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read config '{}'", path.display()))
}

fn open_reader(path: &Path) -> anyhow::Result<BufReader<File>> {
    let f = File::open(path).with_context(|| format!("open input '{}'", path.display()))?;
    Ok(BufReader::new(f))
}

fn create_writer(path: &Path) -> anyhow::Result<BufWriter<File>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create output '{}'", path.display()))?;
    Ok(BufWriter::new(f))
}

fn timestamp(index: u64, fps: u32) -> Timestamp {
    let us = index.saturating_mul(1_000_000) / u64::from(fps.max(1));
    Timestamp(i64::try_from(us).unwrap_or(i64::MAX))
}

/// Raw stream or first-frame PNG output.
enum Output {
    Raw(BufWriter<File>, PathBuf),
    Png(PathBuf, bool),
}

impl Output {
    fn create(path: &Path, png: bool) -> anyhow::Result<Self> {
        if png {
            return Ok(Self::Png(path.to_path_buf(), false));
        }
        Ok(Self::Raw(create_writer(path)?, path.to_path_buf()))
    }

    fn write(&mut self, frame: &stereoscopy::Frame) -> anyhow::Result<()> {
        match self {
            Self::Raw(w, path) => stereoscopy::io::raw::write_frame(w, frame)
                .with_context(|| format!("write '{}'", path.display())),
            Self::Png(path, written) => {
                if *written {
                    return Ok(());
                }
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("create output dir '{}'", parent.display()))?;
                }
                stereoscopy::io::png::save_png(frame, path)?;
                *written = true;
                Ok(())
            }
        }
    }

    fn finish(self) -> anyhow::Result<()> {
        match self {
            Self::Raw(mut w, path) => w
                .flush()
                .with_context(|| format!("flush '{}'", path.display())),
            Self::Png(path, written) => {
                anyhow::ensure!(written, "no frame written to '{}'", path.display());
                Ok(())
            }
        }
    }
}

fn cmd_split(args: SplitArgs) -> anyhow::Result<()> {
    let mut log = DiagnosticLog::default();
    let mut config = match &args.config {
        Some(path) => SplitConfig::from_json(&read_config_text(path)?, &mut log)?,
        None => SplitConfig::default(),
    };
    if args.left.is_some() || args.right.is_some() {
        let left = args.left.as_deref().unwrap_or(config.left.as_str());
        let right = args.right.as_deref().unwrap_or(config.right.as_str());
        let pairing = config.pairing;
        config = SplitConfig::from_strings(left, right, &mut log);
        config.pairing = pairing;
    }

    let g = &args.geometry;
    let mut reader = RawFrameReader::new(open_reader(&args.in_path)?, g.format, g.width, g.height);
    let mut splitter = EyeSplitter::new(config, FramePool::default());
    let mut out_left = Output::create(&args.out_left, args.png)?;
    let mut out_right = Output::create(&args.out_right, args.png)?;

    let mut dropped = 0u64;
    while let Some(mut frame) = reader
        .next_frame(splitter.allocator_mut())
        .with_context(|| format!("read '{}'", args.in_path.display()))?
    {
        frame.props.timestamp = timestamp(reader.frames_read() - 1, g.fps);
        let outcome = match splitter.split(frame) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(frame = reader.frames_read() - 1, "dropped: {err}");
                dropped += 1;
                continue;
            }
        };
        match outcome {
            SplitOutcome::Pair { left, right } => {
                out_left.write(&left)?;
                out_right.write(&right)?;
                splitter.allocator_mut().release(left);
                splitter.allocator_mut().release(right);
            }
            SplitOutcome::PassThrough(frame) => {
                out_left.write(&frame)?;
                out_right.write(&frame)?;
                splitter.allocator_mut().release(frame);
            }
            SplitOutcome::Single(frame) => {
                if frame.eye.eye == Eye::Right {
                    out_right.write(&frame)?;
                } else {
                    out_left.write(&frame)?;
                }
                splitter.allocator_mut().release(frame);
            }
        }
    }

    let total = reader.frames_read();
    anyhow::ensure!(
        total == 0 || dropped < total,
        "every frame was dropped; last error is in the log above"
    );
    out_left.finish()?;
    out_right.finish()?;
    let stats = splitter.allocator().stats();
    tracing::debug!(
        frames = total,
        dropped,
        allocated = stats.alloc_frames,
        reused = stats.reused_frames,
        "split done"
    );
    eprintln!(
        "split {total} frame(s) into {} and {}",
        args.out_left.display(),
        args.out_right.display()
    );
    Ok(())
}

fn cmd_combine(args: CombineArgs) -> anyhow::Result<()> {
    let mut log = DiagnosticLog::default();
    let mut config = match &args.config {
        Some(path) => CombineConfig::from_json(&read_config_text(path)?, &mut log)?,
        None => CombineConfig::default(),
    };
    if let Some(scheme) = &args.scheme {
        config = CombineConfig::from_str_lenient(scheme, &mut log);
    }

    let g = &args.geometry;
    let mut left_in = RawFrameReader::new(open_reader(&args.left)?, g.format, g.width, g.height);
    let mut right_in = RawFrameReader::new(open_reader(&args.right)?, g.format, g.width, g.height);
    let mut combiner = EyeCombiner::new(config, FramePool::default());
    let mut out = Output::create(&args.out, args.png)?;

    let mut pairs = 0u64;
    let mut dropped = 0u64;
    loop {
        let left = left_in
            .next_frame(combiner.allocator_mut())
            .with_context(|| format!("read '{}'", args.left.display()))?;
        let right = right_in
            .next_frame(combiner.allocator_mut())
            .with_context(|| format!("read '{}'", args.right.display()))?;
        let (mut left, mut right) = match (left, right) {
            (Some(l), Some(r)) => (l, r),
            (l, r) => {
                for f in [l, r].into_iter().flatten() {
                    combiner.allocator_mut().release(f);
                }
                break;
            }
        };

        let ts = timestamp(pairs, g.fps);
        pairs += 1;
        left.props.timestamp = ts;
        left.eye = EyeTag::left_held();
        right.props.timestamp = ts;
        right.eye = EyeTag::right();

        // The new left eye meets the previous right eye first; only the matching pair is kept.
        let combined = combiner
            .push(left)
            .and_then(|stale| {
                if let CombineOutcome::Combined(f) = stale {
                    combiner.allocator_mut().release(f);
                }
                combiner.push(right)
            });
        match combined {
            Ok(CombineOutcome::Combined(frame)) => {
                out.write(&frame)?;
                combiner.allocator_mut().release(frame);
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(pair = pairs - 1, "dropped: {err}");
                dropped += 1;
            }
        }
    }

    anyhow::ensure!(
        pairs == 0 || dropped < pairs,
        "every frame pair was dropped; last error is in the log above"
    );
    out.finish()?;
    combiner.reset();
    eprintln!(
        "combined {} frame pair(s) into {}",
        pairs - dropped,
        args.out.display()
    );
    Ok(())
}
