use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fancy_barchart::color::{Rgb, Target};
use fancy_barchart::mixing::MixSpace;
use fancy_barchart::registry::PoolPolicy;
use fancy_barchart::{ChartOptions, palettes, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fancy-barchart",
    version,
    about = "Grouped, stacked horizontal bar charts with consistent color pairs per category"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a dataset to SVG or PNG.
    Render(RenderArgs),
    /// Print the ordered drawing instructions as JSON.
    Plan(PlanArgs),
    /// List built-in colormaps.
    Colormaps,
}

/// Flags shared by `render` and `plan`.
#[derive(Args, Debug)]
struct ChartArgs {
    /// Dataset JSON: {"group": {"bar": {"category": [values...]}}}
    #[arg(short, long)]
    input: PathBuf,
    /// Chart options JSON; flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Built-in colormap (see `colormaps`).
    #[arg(long)]
    colormap: Option<String>,
    /// Blend target for secondaries (CSS color, e.g. white or #336699).
    #[arg(long)]
    target: Option<Rgb>,
    /// Target opacity in [0, 1] (default 0.5).
    #[arg(long)]
    opacity: Option<f32>,
    /// Mix colors in sRGB instead of CIELAB.
    #[arg(long, default_value_t = false)]
    linear: bool,
    /// Reuse color pairs when the pool runs out instead of failing.
    #[arg(long, default_value_t = false)]
    wrap: bool,
    /// Accept negative values, drawn by magnitude.
    #[arg(long, default_value_t = false)]
    allow_negative: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    chart: ChartArgs,
    /// Output path (.svg or .png).
    #[arg(short, long)]
    out: PathBuf,
    /// Also save the computed layout as JSON.
    #[arg(long)]
    layout: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    no_legend: bool,
    #[arg(long, default_value_t = false)]
    no_group_names: bool,
    #[arg(long, default_value_t = false)]
    no_bar_names: bool,
    /// Draw hatched segments as flat color only.
    #[arg(long, default_value_t = false)]
    no_hatch_lines: bool,
    /// Width of the image (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the image (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    chart: ChartArgs,
    /// Write the instructions here instead of stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn chart_options(args: &ChartArgs) -> Result<ChartOptions> {
    let mut opts = match &args.options {
        Some(path) => storage::load_options(path)?,
        None => ChartOptions::default(),
    };
    if let Some(name) = &args.colormap {
        let map = palettes::colormap(name)
            .with_context(|| format!("unknown colormap '{name}', try `fancy-barchart colormaps`"))?;
        opts.colormap = Some(map.name.to_string());
        opts.colors = None;
        opts.pairs = None;
        // Single-hue maps need a blend target to form pairs.
        if !map.paired && opts.target.is_none() {
            opts.target = Some(Target::default());
        }
    }
    if args.target.is_some() || args.opacity.is_some() {
        let mut target = opts.target.unwrap_or_default();
        if let Some(color) = args.target {
            target.color = color;
        }
        if let Some(opacity) = args.opacity {
            target.opacity = opacity;
        }
        target.validate()?;
        opts.target = Some(target);
    }
    if args.linear {
        opts.mix_space = MixSpace::Linear;
    }
    if args.wrap {
        opts.pool_policy = PoolPolicy::Wrap;
    }
    if args.allow_negative {
        opts.negative_values = fancy_barchart::layout::NegativeValues::Magnitude;
    }
    Ok(opts)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Colormaps => {
            for map in palettes::colormaps() {
                let kind = if map.paired { "paired" } else { "single" };
                println!("{:<8} {:>2} colors  {}", map.name, map.colors.len(), kind);
            }
            Ok(())
        }
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let dataset = storage::load_dataset(&args.chart.input)?;
    let mut opts = chart_options(&args.chart)?;
    if args.no_legend {
        opts.legend = false;
    }
    if args.no_group_names {
        opts.placement.group_names = false;
    }
    if args.no_bar_names {
        opts.placement.bar_names = false;
    }
    let render = viz::RenderOptions {
        hatch_overlay: !args.no_hatch_lines,
        ..viz::RenderOptions::default()
    };
    let plan = viz::render_chart_with(&dataset, &args.out, args.width, args.height, &opts, render)?;
    eprintln!("Wrote chart to {}", args.out.display());

    if let Some(path) = args.layout.as_ref() {
        storage::save_layout_json(&plan.layout, path)?;
        eprintln!("Saved layout to {}", path.display());
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> Result<()> {
    let dataset = storage::load_dataset(&args.chart.input)?;
    let opts = chart_options(&args.chart)?;
    let commands = fancy_barchart::instructions(&dataset, &opts)?;
    match args.out.as_ref() {
        Some(path) => {
            storage::save_instructions_json(&commands, path)?;
            eprintln!("Saved {} instructions to {}", commands.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&commands)?),
    }
    Ok(())
}
