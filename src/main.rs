//! `gridfinity` command line: build a bin, baseplate or label shelf and
//! write it as STL.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gridfinity::Model;
use gridfinity::config::{BaseplateConfig, BaseplateStyle, BinConfig, LabelShelfConfig};
use gridfinity::io::StlFormat;
use gridfinity::layout::Layout;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gridfinity")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Generate Gridfinity bins and baseplates as STL")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a bin
    Bin {
        /// Starting parameter set, overridden by --config and the flags below
        #[arg(long, value_enum, default_value_t = BinPreset::Blank)]
        preset: BinPreset,
        #[command(flatten)]
        grid: GridArgs,
        /// Height in 7 mm units
        #[arg(short = 'z', long)]
        height_units: Option<u32>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build a baseplate
    Baseplate {
        #[arg(long, value_enum)]
        style: Option<PlateStyle>,
        #[command(flatten)]
        grid: GridArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build a standalone label shelf
    LabelShelf {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build whatever a tagged JSON model file describes
    Model {
        /// JSON file with a `type` of `bin`, `baseplate` or `label_shelf`
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the default parameters of a model as JSON
    Defaults {
        #[arg(value_enum)]
        kind: ModelKind,
    },
}

#[derive(Debug, Args)]
struct GridArgs {
    /// JSON parameter file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Width in grid units
    #[arg(short, long)]
    x_units: Option<usize>,
    /// Depth in grid units
    #[arg(short, long)]
    y_units: Option<usize>,
    /// Footprint as rows of `#` (occupied) and `.` (empty), separated by `/`
    #[arg(long)]
    layout: Option<String>,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Output STL file, defaults to `<model>.stl`
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Write ASCII instead of binary STL
    #[arg(long)]
    ascii: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BinPreset {
    Blank,
    Base,
    Storage,
    Eco,
    Parts,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlateStyle {
    Simple,
    Magnet,
    ScrewTogether,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelKind {
    Bin,
    Baseplate,
    LabelShelf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gridfinity=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Bin { preset, grid, height_units, output } => {
            let mut cfg = match &grid.config {
                Some(path) => BinConfig::from_json_file(path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => preset.config(),
            };
            if let Some(x) = grid.x_units {
                cfg.x_grid_units = x;
            }
            if let Some(y) = grid.y_units {
                cfg.y_grid_units = y;
            }
            if let Some(z) = height_units {
                cfg.height_units = z;
            }
            if let Some(layout) = grid.parse_layout()? {
                cfg.layout = Some(layout);
            }
            write_model(&Model::Bin(cfg), &output)
        },
        Command::Baseplate { style, grid, output } => {
            let mut cfg = match &grid.config {
                Some(path) => BaseplateConfig::from_json_file(path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => BaseplateConfig::default(),
            };
            if let Some(style) = style {
                cfg.style = style.into();
            }
            if let Some(x) = grid.x_units {
                cfg.x_grid_units = x;
            }
            if let Some(y) = grid.y_units {
                cfg.y_grid_units = y;
            }
            if let Some(layout) = grid.parse_layout()? {
                cfg.layout = Some(layout);
            }
            write_model(&Model::Baseplate(cfg), &output)
        },
        Command::LabelShelf { output } => {
            write_model(&Model::LabelShelf(LabelShelfConfig::default()), &output)
        },
        Command::Model { file, output } => {
            let model = Model::from_json_file(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            write_model(&model, &output)
        },
        Command::Defaults { kind } => {
            let model = match kind {
                ModelKind::Bin => Model::Bin(BinConfig::default()),
                ModelKind::Baseplate => Model::Baseplate(BaseplateConfig::default()),
                ModelKind::LabelShelf => Model::LabelShelf(LabelShelfConfig::default()),
            };
            println!("{}", serde_json::to_string_pretty(&model)?);
            Ok(())
        },
    }
}

fn write_model(model: &Model, output: &OutputArgs) -> Result<()> {
    let mesh = model.build().context("building the model")?;
    let path = output
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.stl", model.name())));
    let format = if output.ascii {
        StlFormat::Ascii
    } else {
        StlFormat::Binary
    };
    mesh.write_stl(&path, format)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        path = %path.display(),
        triangles = mesh.triangle_count(),
        "wrote model"
    );
    Ok(())
}

impl GridArgs {
    fn parse_layout(&self) -> Result<Option<Layout>> {
        self.layout
            .as_deref()
            .map(|rows| Layout::parse(&rows.replace('/', "\n")).context("parsing --layout"))
            .transpose()
    }
}

impl BinPreset {
    fn config(self) -> BinConfig {
        match self {
            BinPreset::Blank => BinConfig::bin_blank(),
            BinPreset::Base => BinConfig::bin_base(),
            BinPreset::Storage => BinConfig::simple_storage_bin(),
            BinPreset::Eco => BinConfig::eco_bin(),
            BinPreset::Parts => BinConfig::parts_bin(),
        }
    }
}

impl From<PlateStyle> for BaseplateStyle {
    fn from(style: PlateStyle) -> Self {
        match style {
            PlateStyle::Simple => BaseplateStyle::Simple,
            PlateStyle::Magnet => BaseplateStyle::Magnet,
            PlateStyle::ScrewTogether => BaseplateStyle::ScrewTogether,
        }
    }
}
