//! h5viz CLI
//!
//! Inspect HDF5 files, write JSON documents into HDF5, and render image grids
//! and colormaps to image files.
#![allow(clippy::uninlined_format_args)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use h5viz_core::figure::BASE_DPI;
use h5viz_core::grid::frame_views;
use h5viz_core::{
    auto_clim, colorbar, plot_image_grid, savefig, Clim, Colormap, Figure, GridOptions, Preset,
    RandomKind, RandomOptions, SaveOptions,
};
use h5viz_io::value::dtype_name;
use h5viz_io::{
    datasets, format_shape, load_by_suffix, read_frames, show_file_tree, show_group_items,
    write_tree, ShowOptions, Tree, WriteMode,
};
use log::{debug, info};
use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    H5vizIo(#[from] h5viz_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] h5viz_core::Error),

    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Colormap palette selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CmapArg {
    /// Black to white
    Grayscale,
    /// Black to bright green
    Green,
    /// Black to red to yellow to white
    Hot,
    /// Blue to teal to green to yellow
    Viridis,
    /// Twelve-step hue wheel
    Hues,
}

impl From<CmapArg> for Preset {
    fn from(arg: CmapArg) -> Self {
        match arg {
            CmapArg::Grayscale => Preset::Grayscale,
            CmapArg::Green => Preset::Green,
            CmapArg::Hot => Preset::Hot,
            CmapArg::Viridis => Preset::Viridis,
            CmapArg::Hues => Preset::Hues,
        }
    }
}

/// Random colormap flavor.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// Saturated colors
    Bright,
    /// Pastel colors
    Soft,
    /// Raw uniform RGB
    Random,
}

impl From<KindArg> for RandomKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Bright => RandomKind::Bright,
            KindArg::Soft => RandomKind::Soft,
            KindArg::Random => RandomKind::Random,
        }
    }
}

/// HDF5 write mode.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Fail if the output exists
    Create,
    /// Overwrite the output
    Truncate,
    /// Add to an existing output
    Append,
}

impl From<ModeArg> for WriteMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Create => WriteMode::Create,
            ModeArg::Truncate => WriteMode::Truncate,
            ModeArg::Append => WriteMode::Append,
        }
    }
}

/// Defaults read from `--config`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    cmap: Option<Preset>,
    dpi: Option<u32>,
    grid_rows: Option<usize>,
    grid_cols: Option<usize>,
    write_mode: Option<WriteMode>,
}

/// HDF5 inspection and image-grid tool.
#[derive(Parser)]
#[command(name = "h5viz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON or YAML file with default options
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full group/dataset tree of an HDF5 file
    Tree {
        /// Input HDF5 file
        file: PathBuf,

        /// Do not list attributes
        #[arg(long)]
        no_metadata: bool,

        /// Print attribute values instead of their shape and dtype
        #[arg(long, conflicts_with = "no_metadata")]
        print_metadata: bool,
    },

    /// Print the top-level members of an HDF5 file
    Items {
        /// Input HDF5 file
        file: PathBuf,
    },

    /// List every dataset with its full path
    Datasets {
        /// Input HDF5 file
        file: PathBuf,
    },

    /// Render a 2-D image or 3-D stack as an image grid
    Grid {
        /// Input HDF5 file
        file: PathBuf,

        /// Dataset path inside the file
        #[arg(short, long)]
        dataset: String,

        /// Output image file (format from suffix)
        #[arg(short, long)]
        output: PathBuf,

        /// Grid rows
        #[arg(long)]
        rows: Option<usize>,

        /// Grid columns
        #[arg(long)]
        cols: Option<usize>,

        /// Colormap palette
        #[arg(long, value_enum)]
        cmap: Option<CmapArg>,

        /// Lower color limit
        #[arg(long)]
        vmin: Option<f64>,

        /// Upper color limit
        #[arg(long)]
        vmax: Option<f64>,

        /// Output resolution
        #[arg(long)]
        dpi: Option<u32>,

        /// Do not frame the panels
        #[arg(long)]
        no_axis: bool,
    },

    /// Render a colormap as a color bar
    Colormap {
        /// Output image file (format from suffix)
        #[arg(short, long)]
        output: PathBuf,

        /// Palette
        #[arg(long, value_enum, conflicts_with_all = ["colors", "random"])]
        preset: Option<CmapArg>,

        /// Comma-separated colors (names, letters or #rrggbb)
        #[arg(long, value_delimiter = ',', conflicts_with = "random")]
        colors: Option<Vec<String>>,

        /// Random colormap with this many labels
        #[arg(long)]
        random: Option<usize>,

        /// Random colormap flavor
        #[arg(long, value_enum, default_value = "bright", requires = "random")]
        kind: KindArg,

        /// Seed for the random colormap
        #[arg(long, requires = "random")]
        seed: Option<u64>,

        /// Bar width in pixels
        #[arg(long, default_value = "256")]
        width: u32,

        /// Bar height in pixels
        #[arg(long, default_value = "32")]
        height: u32,
    },

    /// Write a JSON or YAML document into an HDF5 file
    Write {
        /// Input document (.json, .yaml or .yml)
        input: PathBuf,

        /// Output HDF5 file
        output: PathBuf,

        /// Write mode
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Do not print the resulting tree
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_by_suffix::<Config, _>(path)?
        }
        None => Config::default(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Tree {
            file,
            no_metadata,
            print_metadata,
        } => {
            let options = ShowOptions {
                show_metadata: !no_metadata,
                print_metadata,
            };
            show_file_tree(&file, &mut out, &options)?;
        }

        Commands::Items { file } => {
            let h5 = hdf5::File::open(&file)?;
            show_group_items(&*h5, &mut out)?;
        }

        Commands::Datasets { file } => {
            let h5 = hdf5::File::open(&file)?;
            for item in datasets(&h5)? {
                let (path, dataset) = item?;
                let dtype = dtype_name(&dataset.dtype()?.to_descriptor()?);
                writeln!(
                    out,
                    "{}:   shape={} , dtype={}",
                    path,
                    format_shape(&dataset.shape()),
                    dtype
                )?;
            }
        }

        Commands::Grid {
            file,
            dataset,
            output,
            rows,
            cols,
            cmap,
            vmin,
            vmax,
            dpi,
            no_axis,
        } => {
            let h5 = hdf5::File::open(&file)?;
            let frames = read_frames(&h5.dataset(&dataset)?)?;
            let views = frame_views(&frames);

            let options = GridOptions {
                grid_shape: grid_shape(
                    frames.len(),
                    rows.or(config.grid_rows),
                    cols.or(config.grid_cols),
                )?,
                preset: cmap.map(Preset::from).or(config.cmap).unwrap_or_default(),
                show_axis: !no_axis,
                clim: resolve_clim(&views, vmin, vmax),
                ..GridOptions::default()
            };
            info!(
                "Plotting {} frame(s) of {} in a {}x{} grid",
                frames.len(),
                dataset,
                options.grid_shape.0,
                options.grid_shape.1
            );
            let figure = plot_image_grid(&views, None, None, &options)?;
            let save = SaveOptions {
                dpi: dpi.or(config.dpi).unwrap_or(SaveOptions::default().dpi),
                mkdir: true,
            };
            savefig(&figure, &output, &save)?;
            println!("Saved {}", output.display());
        }

        Commands::Colormap {
            output,
            preset,
            colors,
            random,
            kind,
            seed,
            width,
            height,
        } => {
            let cmap = if let Some(colors) = colors {
                Colormap::from_names(colors.as_slice())?
            } else if let Some(n_labels) = random {
                let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
                let options = RandomOptions {
                    kind: kind.into(),
                    verbose: true,
                    ..RandomOptions::default()
                };
                Colormap::random(n_labels, options, &mut rng)?
            } else {
                preset
                    .map(Preset::from)
                    .or(config.cmap)
                    .unwrap_or_default()
                    .colormap()
            };
            save_colorbar(&cmap, &output, width, height)?;
            println!("Saved {}", output.display());
        }

        Commands::Write {
            input,
            output,
            mode,
            quiet,
        } => {
            let document: serde_json::Value = load_by_suffix(&input)?;
            let tree = Tree::from_json(&document)?;
            let mode = mode
                .map(WriteMode::from)
                .or(config.write_mode)
                .unwrap_or_default();
            write_tree(&output, &tree, mode, !quiet)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Resolve the grid shape, fitting a near-square grid to `n` images when
/// neither dimension is given.
fn grid_shape(n: usize, rows: Option<usize>, cols: Option<usize>) -> Result<(usize, usize)> {
    let n = n.max(1);
    let shape = match (rows, cols) {
        (Some(r), Some(c)) => (r, c),
        (Some(r), None) => (r, n.div_ceil(r.max(1))),
        (None, Some(c)) => (n.div_ceil(c.max(1)), c),
        (None, None) => {
            let mut cols = 1;
            while cols * cols < n {
                cols += 1;
            }
            (n.div_ceil(cols), cols)
        }
    };
    if shape.0 == 0 || shape.1 == 0 {
        return Err(CliError::InvalidArgument(format!(
            "grid shape must be non-zero, got {}x{}",
            shape.0, shape.1
        )));
    }
    Ok(shape)
}

/// Shared color limits; a missing bound comes from the whole stack.
fn resolve_clim(
    frames: &[ArrayView2<'_, f64>],
    vmin: Option<f64>,
    vmax: Option<f64>,
) -> Option<Clim> {
    if vmin.is_none() && vmax.is_none() {
        return None;
    }
    let (lo, hi) = frames
        .iter()
        .map(|frame| auto_clim(*frame))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });
    Some((vmin.unwrap_or(lo), vmax.unwrap_or(hi)))
}

fn save_colorbar(cmap: &Colormap, output: &Path, width: u32, height: u32) -> Result<()> {
    let bar = colorbar(cmap, width, height);
    let figure = Figure::from_image(bar, Some(cmap.name().to_string()));
    let options = SaveOptions {
        dpi: BASE_DPI,
        mkdir: true,
    };
    savefig(&figure, output, &options)?;
    Ok(())
}
