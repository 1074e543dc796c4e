//! Tile-graph composition.
//!
//! This module drives a [`Framework`] through one composition run. It performs:
//! 1. **Planning:** Derives the platform parameters and plans the topology; configuration
//!    errors end the run before the framework is touched.
//! 2. **Construction:** Creates the root, then every tile on the root's NoC in
//!    construction order.
//! 3. **Hand-off:** Passes the root, the options and the tile list to the runner, but only
//!    once every tile has been created.

use tracing::{debug, info};

use crate::common::ComposeError;
use crate::config::{EnvConfig, Options, PlatformConfig};
use crate::soc::{TileSpec, Topology};

use super::framework::Framework;

/// Composes the tile graph from an environment snapshot and runs it.
///
/// # Arguments
///
/// * `framework` - Factories and runner to drive.
/// * `env` - Environment snapshot.
/// * `options` - Option bundle; `cmd` holds the per-tile command lines.
///
/// # Returns
///
/// `Ok(())` once the runner returns, `ComposeError::Config` if the inputs are invalid (no
/// framework call was made), or `ComposeError::Framework` with the framework's own error.
pub fn compose<F: Framework>(
    framework: &mut F,
    env: &EnvConfig,
    options: &Options,
) -> Result<(), ComposeError<F::Error>> {
    let platform = PlatformConfig::from(env);
    let topology = Topology::plan(&platform, options)?;
    run_topology(framework, &topology, options)
}

/// Builds the graph for an already planned topology and runs it.
pub fn run_topology<F: Framework>(
    framework: &mut F,
    topology: &Topology,
    options: &Options,
) -> Result<(), ComposeError<F::Error>> {
    let (root, tiles) = build_graph(framework, topology, options).map_err(ComposeError::Framework)?;

    info!(
        tiles = tiles.len(),
        mem_tile = %topology.mem_tile_no(),
        eps = topology.platform.num_eps,
        "handing tile graph to runner"
    );
    framework
        .run(root, options, tiles)
        .map_err(ComposeError::Framework)
}

/// Creates the root and every tile of `topology`, in order, without running anything.
///
/// # Returns
///
/// The root and the created tiles in construction order, or the first framework error.
/// On error the objects created so far are dropped.
pub fn build_graph<F: Framework>(
    framework: &mut F,
    topology: &Topology,
    options: &Options,
) -> Result<(F::Root, Vec<F::Tile>), F::Error> {
    let root = framework.create_root(options)?;
    let noc = framework.noc(&root)?;

    let mut tiles = Vec::with_capacity(topology.len());
    for spec in topology.tiles() {
        debug!(no = %spec.no(), kind = ?spec.kind(), eps = spec.ep_count(), "creating tile");
        let tile = match spec {
            TileSpec::Core(params) => framework.create_core_tile(&noc, options, params)?,
            TileSpec::KecAcc(params) => framework.create_kecacc_tile(&noc, options, params)?,
            TileSpec::Serial(params) => framework.create_serial_tile(&noc, options, params)?,
            TileSpec::Memory(params) => framework.create_mem_tile(&noc, options, params)?,
        };
        tiles.push(tile);
    }

    Ok((root, tiles))
}
