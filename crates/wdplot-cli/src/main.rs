use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;
use wdplot::display::{DisplayError, DisplayOptions};
use wdplot::raster::{RasterError, RasterOptions};
use wdplot::{LayoutChoice, Plot, PlotOptions, SvgRenderOptions};

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Plot(wdplot::Error),
    Raster(RasterError),
    Display(DisplayError),
    Json(serde_json::Error),
    Config { path: String, source: wdplot::Error },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) if msg.is_empty() => f.write_str(usage()),
            CliError::Usage(msg) => write!(f, "{msg}\n\n{}", usage()),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Plot(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Display(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Config { path, source } => write!(f, "invalid config {path}: {source}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<wdplot::Error> for CliError {
    fn from(value: wdplot::Error) -> Self {
        Self::Plot(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<DisplayError> for CliError {
    fn from(value: DisplayError) -> Self {
        Self::Display(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Svg,
    Png,
    Jpeg,
    Pdf,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

impl OutputFormat {
    fn from_path(path: &str) -> Option<Self> {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    weights: bool,
    layout: LayoutChoice,
    seed: Option<u64>,
    lenient: bool,
    out: Option<String>,
    format: Option<OutputFormat>,
    scale: Option<f32>,
    background: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    diagram_id: Option<String>,
    config: Option<String>,
    viewer: Option<String>,
    summary: bool,
    no_display: bool,
}

fn usage() -> &'static str {
    "wdplot\n\
\n\
USAGE:\n\
  wdplot [OPTIONS] <path|->\n\
\n\
OPTIONS:\n\
  -w, --weights                 draw arc weights\n\
  --layout auto|planar|spring   layout strategy (default: auto)\n\
  --seed <n>                    seed for the spring layout\n\
  --lenient                     accept arc endpoints beyond the declared vertex count\n\
  --out <path|->                write to a file (or stdout) instead of opening a viewer\n\
  --format svg|png|jpg|pdf|json output format (default: from --out extension, else svg)\n\
  --scale <n>                   raster scale factor (default: 1)\n\
  --background <css-color>      raster background (default: white for JPG)\n\
  --width <px> --height <px>    canvas size (default: 800x600)\n\
  --id <diagram-id>             root SVG id\n\
  --config <path>               render options as JSON\n\
  --viewer <program>            image viewer to launch (default: platform opener)\n\
  --summary                     print the parsed digraph to stdout\n\
  --no-display                  do not open a viewer\n\
\n\
NOTES:\n\
  - '-' reads the digraph from stdin.\n\
  - Without --out or --format the plot is shown in a viewer until Enter is pressed.\n\
  - Log verbosity follows RUST_LOG (default: warn); logs go to stderr.\n\
"
}

fn usage_error(msg: impl Into<String>) -> CliError {
    CliError::Usage(msg.into())
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        let mut value = |name: &str| {
            it.next()
                .cloned()
                .ok_or_else(|| usage_error(format!("missing value for {name}")))
        };
        match a.as_str() {
            "--help" | "-h" => return Err(usage_error("")),
            "--weights" | "-w" => args.weights = true,
            "--lenient" => args.lenient = true,
            "--summary" => args.summary = true,
            "--no-display" => args.no_display = true,
            "--layout" => {
                args.layout = match value("--layout")?.as_str() {
                    "auto" => LayoutChoice::Auto,
                    "planar" => LayoutChoice::Planar,
                    "spring" | "force-directed" => LayoutChoice::ForceDirected,
                    other => return Err(usage_error(format!("unknown layout `{other}`"))),
                };
            }
            "--seed" => {
                let seed = value("--seed")?;
                args.seed = Some(
                    seed.parse::<u64>()
                        .map_err(|_| usage_error(format!("invalid seed `{seed}`")))?,
                );
            }
            "--out" => args.out = Some(value("--out")?),
            "--format" => {
                let fmt = value("--format")?;
                args.format = Some(
                    fmt.parse::<OutputFormat>()
                        .map_err(|_| usage_error(format!("unknown format `{fmt}`")))?,
                );
            }
            "--scale" => {
                let scale = value("--scale")?;
                let parsed = scale
                    .parse::<f32>()
                    .ok()
                    .filter(|s| s.is_finite() && *s > 0.0)
                    .ok_or_else(|| usage_error(format!("invalid scale `{scale}`")))?;
                args.scale = Some(parsed);
            }
            "--background" => {
                let bg = value("--background")?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--width" => args.width = Some(parse_dimension("--width", &value("--width")?)?),
            "--height" => args.height = Some(parse_dimension("--height", &value("--height")?)?),
            "--id" => args.diagram_id = Some(value("--id")?),
            "--config" => args.config = Some(value("--config")?),
            "--viewer" => args.viewer = Some(value("--viewer")?),
            "-" => set_input(&mut args, "-")?,
            other if other.starts_with('-') => {
                return Err(usage_error(format!("unknown option `{other}`")));
            }
            path => set_input(&mut args, path)?,
        }
    }

    if args.input.is_none() {
        return Err(usage_error("missing input path"));
    }
    Ok(args)
}

fn set_input(args: &mut Args, path: &str) -> Result<(), CliError> {
    if args.input.is_some() {
        return Err(usage_error(format!("unexpected extra argument `{path}`")));
    }
    args.input = Some(path.to_string());
    Ok(())
}

fn parse_dimension(name: &str, raw: &str) -> Result<f64, CliError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| usage_error(format!("invalid {name} `{raw}`")))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn svg_options(args: &Args) -> Result<SvgRenderOptions, CliError> {
    let mut options = match args.config.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            SvgRenderOptions::from_json_str(&text).map_err(|err| CliError::Config {
                path: path.to_string(),
                source: err.into(),
            })?
        }
        None => SvgRenderOptions::default(),
    };
    if args.weights {
        options.show_weights = true;
    }
    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }
    if args.diagram_id.is_some() {
        options.diagram_id = args.diagram_id.clone();
    }
    Ok(options)
}

fn plot_options(args: &Args) -> Result<PlotOptions, CliError> {
    let mut options = PlotOptions {
        svg: svg_options(args)?,
        ..PlotOptions::default()
    };
    if args.lenient {
        options.parse = wdplot::ParseOptions::lenient();
    }
    options.layout.choice = args.layout;
    options.layout.spring.seed = args.seed;
    Ok(options)
}

fn raster_options(args: &Args) -> RasterOptions {
    RasterOptions {
        scale: args.scale.unwrap_or(1.0),
        background: args.background.clone(),
        ..RasterOptions::default()
    }
}

fn encode(plot: &Plot, format: OutputFormat, args: &Args) -> Result<Vec<u8>, CliError> {
    Ok(match format {
        OutputFormat::Svg => plot.svg.clone().into_bytes(),
        OutputFormat::Json => {
            let mut json = serde_json::to_vec_pretty(&plot.scene)?;
            json.push(b'\n');
            json
        }
        OutputFormat::Png => plot.to_png(&raster_options(args))?,
        OutputFormat::Jpeg => plot.to_jpeg(&raster_options(args))?,
        OutputFormat::Pdf => plot.to_pdf()?,
    })
}

fn write_output(bytes: &[u8], out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
        Some(path) => std::fs::write(path, bytes)?,
    }
    Ok(())
}

#[cfg(unix)]
fn terminal() -> Option<std::io::BufReader<std::fs::File>> {
    std::fs::File::open("/dev/tty")
        .ok()
        .map(std::io::BufReader::new)
}

#[cfg(not(unix))]
fn terminal() -> Option<std::io::BufReader<std::fs::File>> {
    None
}

fn show(plot: &Plot, args: &Args) -> Result<(), CliError> {
    let defaults = DisplayOptions::default();
    let options = DisplayOptions {
        viewer: args.viewer.as_ref().map(OsString::from),
        raster: RasterOptions {
            scale: args.scale.unwrap_or(defaults.raster.scale),
            background: args.background.clone().or(defaults.raster.background),
            ..defaults.raster
        },
        ..defaults
    };

    // Stdin is drained when the digraph came from it; wait on the terminal instead.
    if args.input.as_deref() == Some("-") {
        if let Some(tty) = terminal() {
            wdplot::display::show_with_input(plot, &options, tty)?;
            return Ok(());
        }
    }
    wdplot::display::show(plot, &options)?;
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let options = plot_options(&args)?;
    let plot = match args.input.as_deref() {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            wdplot::plot_text(&text, &options)?
        }
        Some(path) => wdplot::plot_file(path, &options)?,
    };

    if args.summary {
        print!("{}", plot.graph);
    }

    let format = args
        .format
        .or_else(|| args.out.as_deref().and_then(OutputFormat::from_path));
    if args.out.is_some() || format.is_some() {
        let bytes = encode(&plot, format.unwrap_or(OutputFormat::Svg), &args)?;
        write_output(&bytes, args.out.as_deref())?;
        return Ok(());
    }

    if !args.no_display {
        show(&plot, &args)?;
    }
    Ok(())
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(err @ CliError::Usage(_)) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
