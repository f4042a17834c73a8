#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Flood Mesher
//!
//! Turns cubic voxel chunks into renderable triangle meshes, emitting only
//! the faces that can be reached from the air around the chunk.
//!
//! A breadth-first flood fill runs through the empty space of a chunk grown
//! by one voxel on every side. Every time it bumps into a solid voxel, the
//! face it bumped into becomes one quad. Faces that only look into sealed
//! cavities are never reached and never emitted.
//!
//! ## Key Modules
//!
//! * `application_state` - Command-line handling, configuration and sessions
//! * `core` - Shared-ownership utilities used throughout the engine
//! * `engine_state` - Chunks, world generation, meshing and the worker pool
//! * `error` - Error types
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_flood_mesher::{mesh_chunk, Chunk};
//!
//! let chunk = Chunk::solid(&Point3::new(0, 0, 0), 4);
//! let mesh = mesh_chunk(&chunk, 4, Some(chunk.solid_count())).unwrap();
//! assert_eq!(mesh.face_count(), 6 * 16);
//! assert_eq!(mesh.indices.len(), 6 * mesh.face_count());
//! ```
//!
//! The binary wraps a whole session:
//!
//! ```bash
//! RUST_LOG=debug voxel-flood-mesher --generation hollow_shell --render-distance 2
//! ```

use anyhow::Context;
use log::info;

mod application_state;
mod core;
mod engine_state;
pub mod error;

pub use application_state::{config::MesherConfig, ApplicationState, Cli};
pub use crate::core::MtResource;
pub use engine_state::{
    rendering::{
        meshing::{
            emit_face, mesh_chunk, Mesh, MeshManager, MeshPath, MeshStats, MeshingSummary,
            OccupancySource, PaddedArray, PaddedOccupancy, DIRT_BROWN, GRASS_GREEN,
            INDICES_PER_FACE, MAX_CHUNK_SIZE, VERTICES_PER_FACE,
        },
        Vertex,
    },
    task_management::{
        task::{Task, TaskResult},
        TaskManager,
    },
    voxels::{
        block::{block_side::BlockSide, Occupancy},
        chunk::{Chunk, PerlinSettings, CHUNK_DIMENSION},
        world::{GenerationMethod, GenerationSettings, World},
    },
    EngineState,
};
pub use error::{ConfigError, MeshError};

/// Runs one meshing session as described by the command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = cli
        .resolve_config()
        .context("could not build the mesher configuration")?;
    let mut state = ApplicationState::new(config).context("could not start the engine")?;
    let summary = state.run_session();

    if cli.json {
        let report = serde_json::to_string_pretty(&summary)
            .context("could not serialize the session summary")?;
        println!("{report}");
    }

    if summary.failures > 0 {
        anyhow::bail!("{} chunk(s) could not be meshed", summary.failures);
    }
    Ok(())
}
