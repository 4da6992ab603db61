use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

const EXAMPLE_SVG: &str = include_str!("../../assets/squiggle.svg");

#[derive(Parser, Debug)]
#[command(name = "epicycles", version)]
struct Cli {
    /// Log pipeline steps to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Approximate a closed curve and write it as SVG and/or PNG.
    Approximate(ApproximateArgs),
    /// Print the epicycle coefficient table of a closed curve.
    Coefficients(CoefficientsArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input file: SVG document, point list (JSON/CSV), or raster image.
    #[arg(long = "in", required_unless_present = "example", conflicts_with = "example")]
    in_path: Option<PathBuf>,

    /// Use the bundled example squiggle instead of an input file.
    #[arg(long, default_value_t = false)]
    example: bool,

    /// How to read the input; `auto` picks by file extension.
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    format: InputFormat,

    /// Session configuration JSON (viewport, resampling, term cap, ...).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of terms to keep (clamped to the valid range).
    #[arg(long, short = 'n')]
    terms: Option<usize>,

    /// Run synthesis on a rayon pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct ApproximateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output SVG path.
    #[arg(long)]
    out_svg: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out_png: Option<PathBuf>,

    /// Also write the coefficient table (CSV) here.
    #[arg(long)]
    out_csv: Option<PathBuf>,

    /// Draw the resampled source path underneath the approximation.
    #[arg(long, default_value_t = false)]
    show_source: bool,
}

#[derive(Args, Debug)]
struct CoefficientsArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Print JSON instead of CSV.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Use the single-argument arctangent for initial angles (legacy tables).
    #[arg(long, default_value_t = false)]
    legacy_phase: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Auto,
    Svg,
    /// Raw SVG path data (`d` attribute syntax) in a text file.
    PathData,
    Json,
    Csv,
    Image,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Approximate(args) => cmd_approximate(args),
        Command::Coefficients(args) => cmd_coefficients(args),
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

fn cmd_approximate(args: ApproximateArgs) -> anyhow::Result<()> {
    if args.out_svg.is_none() && args.out_png.is_none() && args.out_csv.is_none() {
        anyhow::bail!("nothing to write: pass --out-svg, --out-png and/or --out-csv");
    }

    let session = build_session(&args.input, None)?;
    let approx = session
        .approximation()
        .context("session has no approximation after commit (bug)")?;

    let source = args
        .show_source
        .then(|| session.path().map(epicycles::PointPath::to_bez_path))
        .flatten();
    let svg = epicycles::export::svg::render_svg(
        &approx.to_bez_path(),
        source.as_ref(),
        session.config().normalize.viewport,
        &epicycles::export::svg::SvgStyle::default(),
    );

    if let Some(out) = &args.out_svg {
        ensure_parent_dir(out)?;
        std::fs::write(out, &svg).with_context(|| format!("write svg '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }
    if let Some(out) = &args.out_png {
        ensure_parent_dir(out)?;
        epicycles::export::png::write_png(&svg, out)?;
        eprintln!("wrote {}", out.display());
    }
    if let Some(out) = &args.out_csv {
        let table = session
            .export_coefficients()
            .context("session has no coefficients after commit (bug)")?;
        ensure_parent_dir(out)?;
        std::fs::write(out, table.to_csv())
            .with_context(|| format!("write csv '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }

    eprintln!(
        "{} samples, {} terms",
        approx.len(),
        session.term_count().get()
    );
    Ok(())
}

fn cmd_coefficients(args: CoefficientsArgs) -> anyhow::Result<()> {
    let phase = args.legacy_phase.then_some(epicycles::PhaseMode::LegacyAtan);
    let session = build_session(&args.input, phase)?;
    let table = session
        .export_coefficients()
        .context("session has no coefficients after commit (bug)")?;

    if args.json {
        println!("{}", table.to_json_pretty()?);
    } else {
        print!("{}", table.to_csv());
    }
    Ok(())
}

fn build_session(
    input: &InputArgs,
    phase_mode: Option<epicycles::PhaseMode>,
) -> anyhow::Result<epicycles::Session> {
    let mut config = match &input.config {
        Some(path) => epicycles::SessionConfig::from_path(path)?,
        None => epicycles::SessionConfig::default(),
    };
    if input.parallel {
        config.parallel = true;
    }
    if input.threads.is_some() {
        config.threads = input.threads;
    }
    if let Some(mode) = phase_mode {
        config.phase_mode = mode;
    }

    let mut session = epicycles::Session::new(config)?;

    match &input.in_path {
        Some(path) => commit_file(&mut session, path, input.format)?,
        None => {
            let bez = epicycles::import::svg::load_svg_path(EXAMPLE_SVG.as_bytes())?;
            session.commit_bez_path(&bez)?;
        }
    }

    if let Some(n) = input.terms {
        session.set_term_count(n);
    }
    Ok(session)
}

fn commit_file(
    session: &mut epicycles::Session,
    path: &Path,
    format: InputFormat,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read input '{}'", path.display()))?;
    match resolve_format(format, path)? {
        InputFormat::Svg => {
            let bez = epicycles::import::svg::load_svg_path(&bytes)?;
            session.commit_bez_path(&bez)?;
        }
        InputFormat::PathData => {
            let text = utf8(&bytes, path)?;
            let bez = epicycles::import::svg::parse_path_data(text)?;
            session.commit_bez_path(&bez)?;
        }
        InputFormat::Json => {
            let text = utf8(&bytes, path)?;
            let points = epicycles::import::points::parse_points_json(text)?;
            session.commit_path(&points)?;
        }
        InputFormat::Csv => {
            let text = utf8(&bytes, path)?;
            let points = epicycles::import::points::parse_points_csv(text)?;
            session.commit_path(&points)?;
        }
        InputFormat::Image => {
            let points = epicycles::import::raster::trace_silhouette(
                &bytes,
                &epicycles::import::raster::SilhouetteOptions::default(),
            )?;
            session.commit_path(&points)?;
        }
        InputFormat::Auto => anyhow::bail!("input format was not resolved"),
    }
    Ok(())
}

fn resolve_format(format: InputFormat, path: &Path) -> anyhow::Result<InputFormat> {
    if format != InputFormat::Auto {
        return Ok(format);
    }
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    Ok(match ext.as_str() {
        "svg" => InputFormat::Svg,
        "json" => InputFormat::Json,
        "csv" => InputFormat::Csv,
        "txt" | "path" => InputFormat::PathData,
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "tif" | "tiff" => InputFormat::Image,
        _ => anyhow::bail!(
            "cannot infer input format from '{}'; pass --format",
            path.display()
        ),
    })
}

fn utf8<'a>(bytes: &'a [u8], path: &Path) -> anyhow::Result<&'a str> {
    std::str::from_utf8(bytes).with_context(|| format!("input '{}' is not UTF-8", path.display()))
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
