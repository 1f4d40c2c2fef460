use anyhow::{Context, Result};
use chartprep::viz::SecondaryAxis;
use chartprep::{ChartConfig, ChartRenderer, HeadlessBrowser, RenderSettings, aggregate, storage};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "chartprep",
    version,
    about = "Aggregate tabular data and render ECharts charts as HTML, base64 or PNG"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chart described by a JSON config over a CSV/JSON dataset.
    Render(RenderArgs),
    /// Print the grouped sums for a config as CSV.
    Aggregate(AggregateArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutFormat {
    Html,
    Base64,
    Png,
}

#[derive(Args, Debug)]
struct Inputs {
    /// Chart config (JSON with id, type, title, xAxis, yAxis, ...).
    #[arg(short, long)]
    config: PathBuf,
    /// Dataset file (.csv with header row, or .json array of records).
    #[arg(short, long)]
    data: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    inputs: Inputs,
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutFormat::Html)]
    format: OutFormat,
    /// Write html/base64 output here instead of stdout; for png, the image path.
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Swap category and value axes (bar/line).
    #[arg(long, default_value_t = false)]
    horizontal: bool,
    /// Show value labels on bars / slices.
    #[arg(long, default_value_t = false)]
    show_label: bool,
    /// Pie: draw a full disc instead of a ring.
    #[arg(long, default_value_t = false)]
    no_donut: bool,
    /// Pie: share below which slices are folded into "Others".
    #[arg(long, default_value_t = chartprep::bucket::DEFAULT_THRESHOLD)]
    threshold: f64,
    /// Pie: label of the folded slice.
    #[arg(long, default_value = chartprep::bucket::DEFAULT_OTHERS_LABEL)]
    others_label: String,
    /// Palette override, comma separated #RRGGBB colors.
    #[arg(long)]
    palette: Option<String>,
    /// Secondary value axis as NAME:SUFFIX (e.g. "Weight:kg").
    #[arg(long)]
    secondary_axis: Option<String>,
    /// Headless browser used for png/base64.
    #[arg(long, default_value = "chromium")]
    browser: PathBuf,
    /// Seconds before the browser is killed.
    #[arg(long, default_value_t = 60)]
    timeout: u64,
    /// Remove intermediate files when rasterization fails.
    #[arg(long, default_value_t = false)]
    clean_on_failure: bool,
    /// Do not keep the .html page next to a png.
    #[arg(long, default_value_t = false)]
    discard_html: bool,
}

#[derive(Args, Debug)]
struct AggregateArgs {
    #[command(flatten)]
    inputs: Inputs,
}

fn parse_palette(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_secondary(s: &str) -> Result<SecondaryAxis> {
    let (name, suffix) = s
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("invalid --secondary-axis, expected NAME:SUFFIX"))?;
    Ok(SecondaryAxis {
        name: name.trim().to_string(),
        label_suffix: suffix.trim().to_string(),
    })
}

fn load_inputs(inputs: &Inputs) -> Result<(ChartConfig, chartprep::Dataset)> {
    let text = std::fs::read_to_string(&inputs.config)
        .with_context(|| format!("read {}", inputs.config.display()))?;
    let config = ChartConfig::from_json(&text)?;
    let data = storage::load_dataset(&inputs.data)?;
    Ok((config, data))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Aggregate(args) => cmd_aggregate(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let (config, data) = load_inputs(&args.inputs)?;
    let settings = RenderSettings {
        horizontal: args.horizontal,
        show_label: args.show_label,
        donut: !args.no_donut,
        threshold: args.threshold,
        others_label: args.others_label.clone(),
        palette: args.palette.as_deref().map(parse_palette),
        secondary_axis: args.secondary_axis.as_deref().map(parse_secondary).transpose()?,
        keep_temp_files_on_failure: !args.clean_on_failure,
        retain_png_html: !args.discard_html,
        ..RenderSettings::default()
    };
    let browser =
        HeadlessBrowser::new(&args.browser).with_timeout(Duration::from_secs(args.timeout));
    let renderer = ChartRenderer::new(config, &data)
        .with_settings(settings)
        .with_snapshotter(browser);

    match args.format {
        OutFormat::Html => emit(renderer.render_html()?, args.out.as_ref())?,
        OutFormat::Base64 => emit(renderer.render_base64()?, args.out.as_ref())?,
        OutFormat::Png => {
            let target = args.out.unwrap_or_else(|| PathBuf::from("chart.png"));
            let file_name = target
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("invalid --out path: {}", target.display()))?;
            let dir = target.parent().filter(|p| !p.as_os_str().is_empty());
            let path = renderer.render_png(dir, file_name)?;
            eprintln!("Wrote chart to {}", path.display());
        }
    }
    Ok(())
}

fn emit(text: String, out: Option<&PathBuf>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, &text).with_context(|| format!("write {}", path.display()))?;
            eprintln!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn cmd_aggregate(args: AggregateArgs) -> Result<()> {
    let (mut config, data) = load_inputs(&args.inputs)?;
    config.infer_default_axes(&data);
    config.validate()?;
    let series = aggregate(&data, &config.x_axis, &config.y_axis)?;
    storage::write_series_csv(&series, std::io::stdout().lock())?;
    Ok(())
}
