use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use gridfx::{
    Canvas, ChoreographyDef, GridConfig, GridController, LayoutQuery as _, Point, RasterSurface,
    Rect, Rgba, ScrollDirector, SimHost, Size,
};

#[derive(Parser, Debug)]
#[command(name = "gridfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate pointer hovers over a grid and write the final frame as a PNG.
    Frame(FrameArgs),
    /// Drive a scroll choreography through scroll positions and print its values as JSON lines.
    Scroll(ScrollArgs),
    /// Print a built-in preset as JSON.
    Preset(PresetArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Grid config JSON. Overrides `--preset`.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = GridPreset::Viewport)]
    preset: GridPreset,

    #[arg(long, default_value_t = 800, value_parser = pixel_dim())]
    width: u32,

    #[arg(long, default_value_t = 480, value_parser = pixel_dim())]
    height: u32,

    /// Pointer position `x,y` in container coordinates; repeat to move along a path.
    #[arg(long = "pointer", value_parser = parse_point)]
    pointers: Vec<(f64, f64)>,

    /// Simulated time spent at each pointer position.
    #[arg(long, default_value_t = 250.0)]
    dwell_ms: f64,

    /// Page background behind the grid.
    #[arg(long, default_value = "#101010")]
    background: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ScrollArgs {
    /// Choreography JSON. Overrides `--preset`.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ChoreographyPreset::Cards)]
    preset: ChoreographyPreset,

    /// Page layout JSON: `{"viewport": [w, h], "elements": {"id": [x0, y0, x1, y1]}}`.
    #[arg(long)]
    layout: PathBuf,

    /// Scroll position to visit; repeat for several.
    #[arg(long = "at", required = true)]
    positions: Vec<f64>,

    /// Time allowed for lagged or time-based playback to settle at each position.
    #[arg(long, default_value_t = 2000.0)]
    settle_ms: f64,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    #[arg(long, value_enum, conflicts_with = "choreography")]
    grid: Option<GridPreset>,

    #[arg(long, value_enum)]
    choreography: Option<ChoreographyPreset>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GridPreset {
    Viewport,
    Block,
    Trail,
}

impl GridPreset {
    fn config(self) -> GridConfig {
        match self {
            Self::Viewport => GridConfig::viewport_background(),
            Self::Block => GridConfig::decorative_block(),
            Self::Trail => GridConfig::trail_background(),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChoreographyPreset {
    Benefits,
    Cards,
    Highlight,
}

impl ChoreographyPreset {
    fn def(self) -> ChoreographyDef {
        match self {
            Self::Benefits => ChoreographyDef::benefits_showcase(),
            Self::Cards => ChoreographyDef::cards_scroller(),
            Self::Highlight => ChoreographyDef::text_highlight("highlight"),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct PageLayout {
    viewport: [f64; 2],
    #[serde(default)]
    elements: BTreeMap<String, [f64; 4]>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Scroll(args) => cmd_scroll(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

/// Raster surfaces hold at most `u16::MAX` pixels per side.
fn pixel_dim() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=i64::from(u16::MAX))
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'x,y', got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok((x, y))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    const CONTAINER: &str = "grid";

    let config = match &args.config {
        Some(path) => GridConfig::from_path(path)?,
        None => args.preset.config(),
    };
    let canvas = Canvas::new(args.width, args.height)?;
    let background = Rgba::parse(&args.background)?;
    let bounds = Rect::new(0.0, 0.0, f64::from(args.width), f64::from(args.height));

    let mut host: SimHost<RasterSurface> =
        SimHost::new(Size::new(f64::from(args.width), f64::from(args.height)));
    host.insert_container(
        CONTAINER,
        Some(bounds),
        RasterSurface::with_background(canvas, background),
    );

    let mount_delay = config.lifecycle.mount_delay_ms;
    let mut controller = GridController::new(CONTAINER, config)?;
    controller.mount(&mut host);
    host.run_for(&mut controller, mount_delay + host.frame_interval_ms());
    anyhow::ensure!(
        controller.instance().geometry().is_some(),
        "grid did not become ready (phase {:?})",
        controller.phase()
    );

    for &(x, y) in &args.pointers {
        host.move_pointer(&mut controller, Point::new(x, y));
        host.run_for(&mut controller, args.dwell_ms);
    }

    let mut frame = host
        .surface_ref(CONTAINER)
        .context("grid surface missing after simulation")?
        .snapshot();
    frame.unpremultiply();
    controller.teardown(&mut host);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame
        .save_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn read_layout(path: &Path) -> anyhow::Result<SimHost> {
    let f = File::open(path).with_context(|| format!("open layout '{}'", path.display()))?;
    let layout: PageLayout =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse layout JSON")?;

    let [w, h] = layout.viewport;
    let mut host = SimHost::new(Size::new(w, h));
    for (id, [x0, y0, x1, y1]) in layout.elements {
        host.set_element(id, Rect::new(x0, y0, x1, y1));
    }
    Ok(host)
}

fn cmd_scroll(args: ScrollArgs) -> anyhow::Result<()> {
    let def = match &args.in_path {
        Some(path) => ChoreographyDef::from_path(path)?,
        None => args.preset.def(),
    };
    let mut host = read_layout(&args.layout)?;
    let mut director = ScrollDirector::new();
    let id = director.register(&mut host, def)?;
    director.mount(&mut host);

    let choreography = director.get(id).context("choreography vanished")?;
    anyhow::ensure!(
        choreography.region().is_some(),
        "choreography '{}' could not be resolved against the layout",
        choreography.name()
    );

    for &y in &args.positions {
        host.scroll_to(&mut director, y);
        host.run_for(&mut director, args.settle_ms);
        let transitions = director.take_transitions();

        let c = director.get(id).context("choreography vanished")?;
        let line = serde_json::json!({
            "scroll_y": host.scroll_y(),
            "progress": c.progress(),
            "playhead": c.playhead(),
            "phase": c.phase(),
            "pin_active": c.pin_active(),
            "events": transitions.iter().map(|t| t.event).collect::<Vec<_>>(),
            "values": c.values(),
        });
        println!("{line}");
    }

    director.teardown(&mut host);
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let json = match (args.grid, args.choreography) {
        (Some(g), _) => serde_json::to_string_pretty(&g.config())?,
        (None, Some(c)) => serde_json::to_string_pretty(&c.def())?,
        (None, None) => anyhow::bail!("pass --grid or --choreography"),
    };
    println!("{json}");
    Ok(())
}
