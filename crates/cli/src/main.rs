//! tilegraph command-line front end.
//!
//! This binary exposes the composer without a Python-driven simulator. It provides:
//! 1. **Plan:** Validate the environment and `--cmd` and print the planned topology.
//! 2. **Run:** Compose through the manifest framework and write the tile-graph manifest.
//! 3. **Recipes:** List the declarations of the tree's build recipes for a target.
//!
//! The sizing inputs come from the environment (`M3_TARGET`, `M3_GEM5_TILES`,
//! `M3_GEM5_FS`, `M3_GEM5_FSNUM`, `M3_ISA`); logging is controlled by `RUST_LOG`.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tilegraph_core::recipe::{BuildGraph, BuildTarget, Recipe, RecipeError, RecordingEnv};
use tilegraph_core::sim::{ManifestFramework, run_topology};
use tilegraph_core::{EnvConfig, Options, PlatformConfig, Topology};

#[derive(Parser, Debug)]
#[command(
    name = "tilegraph",
    author,
    version,
    about = "Compose the tile graph of a gem5 scratchpad-memory system",
    long_about = "Compose the tile graph of a gem5 scratchpad-memory system.\n\nSizing comes from M3_TARGET, M3_GEM5_TILES, M3_GEM5_FS, M3_GEM5_FSNUM and M3_ISA.\n\nExamples:\n  M3_GEM5_TILES=2 tilegraph plan --cmd 'boot,shell'\n  M3_GEM5_TILES=2 M3_GEM5_FS=build/default.img tilegraph run --cmd 'boot,shell' -o graph.json\n  tilegraph recipes --target host"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the planned topology as JSON without creating anything.
    Plan {
        /// Comma-separated command lines, one per compute tile.
        #[arg(short, long)]
        cmd: String,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compose the tile graph and write the manifest for the simulator.
    Run {
        /// Comma-separated command lines, one per compute tile.
        #[arg(short, long)]
        cmd: String,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the manifest on a single line.
        #[arg(long)]
        compact: bool,

        /// Further options passed through to the simulator front end.
        #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
        extra: Vec<String>,
    },

    /// List the declarations of the build recipes.
    Recipes {
        /// Build target (host, gem5, hw).
        #[arg(short, long, default_value_t = BuildTarget::Gem5)]
        target: BuildTarget,

        /// Only expand the recipe of this directory.
        #[arg(short, long)]
        dir: Option<String>,

        /// Print the declarations as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan { cmd, output } => cmd_plan(&Options::with_cmd(cmd), output.as_deref()),
        Commands::Run {
            cmd,
            output,
            compact,
            extra,
        } => {
            let options = Options { cmd, extra };
            cmd_run(&options, output.as_deref(), compact)
        }
        Commands::Recipes { target, dir, json } => cmd_recipes(target, dir.as_deref(), json),
    };

    if let Err(e) = result {
        eprintln!("tilegraph: {e}");
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Opens the output destination: the given file, or stdout.
fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Plans the topology from the environment and prints it.
fn cmd_plan(options: &Options, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let env = EnvConfig::from_env()?;
    let topology = Topology::plan(&PlatformConfig::from(&env), options)?;

    let mut out = open_output(output)?;
    serde_json::to_writer_pretty(&mut out, &topology)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Composes through the manifest framework.
fn cmd_run(options: &Options, output: Option<&Path>, compact: bool) -> Result<(), Box<dyn Error>> {
    let env = EnvConfig::from_env()?;
    run_manifest(&env, options, output, compact)
}

/// Plans the topology, then writes the manifest.
///
/// The output is opened only once the plan is valid, so a configuration error leaves an
/// existing file untouched.
fn run_manifest(
    env: &EnvConfig,
    options: &Options,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn Error>> {
    let topology = Topology::plan(&PlatformConfig::from(env), options)?;
    debug!(output = ?output, compact, tiles = topology.len(), "composing manifest");

    let out = open_output(output)?;
    let mut framework = ManifestFramework::new(out, env.isa);
    if compact {
        framework = framework.compact();
    }
    run_topology(&mut framework, &topology, options)?;
    Ok(())
}

/// Expands the recipes for `target` and prints their declarations.
fn cmd_recipes(target: BuildTarget, dir: Option<&str>, json: bool) -> Result<(), Box<dyn Error>> {
    let graph = expand_recipes(target, dir)?;

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, graph.decls())?;
        writeln!(out)?;
    } else {
        for decl in graph.decls() {
            writeln!(out, "{decl}")?;
        }
    }
    Ok(())
}

/// Runs the recipe of `dir`, or of every known directory, into a fresh graph.
fn expand_recipes(target: BuildTarget, dir: Option<&str>) -> Result<BuildGraph, RecipeError> {
    let env = RecordingEnv::new(target);
    let mut graph = BuildGraph::new();
    match dir {
        Some(dir) => {
            let _ = Recipe::require(dir)?;
            let ran = graph.expand(&env, dir);
            debug!(%dir, ran, "expanded recipes");
        }
        None => {
            for recipe in Recipe::ALL {
                let _ = graph.expand(&env, recipe.dir());
            }
        }
    }
    Ok(graph)
}
