//! knet - command line utilities for kvadratnet tiles.

use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Builder;
use geojson::GeoJson;
use kvadratnet_rs::{
    KnetError, OrganizeConfig, RenameConfig, TileGrid, Unit, list_parents, organize_files,
    parents_of, parse_area, rename_files,
};
use log::Record;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// One tile name per line
    Names,
    /// Tile name and WKT polygon, separated by a semicolon
    Wkt,
    /// GeoJSON FeatureCollection
    Geojson,
}

#[derive(Parser)]
#[command(name = "knet")]
#[command(about = "CLI for kvadratnet", long_about = None, version)]
struct Cli {
    /// Be verbose
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Batch rename files with kvadratnet names in them.
    ///
    /// Without a prefix or postfix everything but the tile name is stripped
    /// from the file name.
    Rename {
        /// Files to rename
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Text before the tile name, e.g. prefix_1km_6666_444.tif
        #[arg(long, default_value = "")]
        prefix: String,

        /// Text after the tile name, e.g. 1km_6666_444_postfix.tif
        #[arg(long, default_value = "")]
        postfix: String,
    },

    /// Organize files into subfolders according to a list of tile units.
    Organize {
        /// Quoted list of units, e.g. "100km 10km"
        units: String,

        /// Files to organize
        files: Vec<PathBuf>,

        /// Directory to create the folder tree in
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// List parent tiles of child tiles. Reads stdin when no files are given.
    Parents {
        /// Child files or tile names
        files: Vec<String>,

        /// Only show unique parents
        #[arg(long)]
        unique: bool,

        /// Show number of children for each parent
        #[arg(long)]
        count: bool,
    },

    /// Create the tiles covering a bounding box or geometry.
    Create {
        /// Tile unit, e.g. 1km
        unit: String,

        /// "min_e,min_n,max_e,max_n", WKT or GeoJSON geometry
        area: String,

        /// Output format
        #[arg(long, value_enum, default_value = "names")]
        format: OutputFormat,
    },
}

fn init_logger(verbose: bool) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| writeln!(buf, "{}", record.args()));

    let rust_log_env = env::var("RUST_LOG");
    match rust_log_env {
        Ok(filters) if !verbose => builder.parse_filters(&filters),
        _ => builder.parse_filters(if verbose { "info" } else { "warn" }),
    };

    builder.init();
}

fn print_lines(lines: &[String]) -> Result<(), KnetError> {
    let mut out = io::stdout().lock();
    for line in lines {
        writeln!(out, "{}", line).map_err(|e| KnetError::IoError(e.to_string()))?;
    }
    Ok(())
}

fn run(command: Command) -> Result<(), KnetError> {
    match command {
        Command::Rename {
            files,
            prefix,
            postfix,
        } => {
            let config = RenameConfig::new().prefix(prefix).postfix(postfix);
            rename_files(&files, &config)?;
        }
        Command::Organize { units, files, root } => {
            let config = OrganizeConfig::from_units_str(&units)?.root(root);
            organize_files(&files, &config)?;
        }
        Command::Parents {
            files,
            unique,
            count,
        } => {
            let list = if files.is_empty() {
                list_parents(io::stdin().lock())?
            } else {
                parents_of(&files)?
            };
            print_lines(&list.render(unique, count))?;
        }
        Command::Create { unit, area, format } => {
            let unit: Unit = unit.parse()?;
            let grid = TileGrid::from_geometry(&parse_area(&area)?, unit)?;
            let lines = match format {
                OutputFormat::Names => grid.iter().map(|tile| tile.name.clone()).collect(),
                OutputFormat::Wkt => grid
                    .iter()
                    .map(|tile| format!("{};{}", tile.name, tile.to_wkt()))
                    .collect(),
                OutputFormat::Geojson => {
                    vec![GeoJson::from(grid.to_feature_collection()).to_string()]
                }
            };
            print_lines(&lines)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
