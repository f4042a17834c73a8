//! # Application State Management
//!
//! This module handles the application's lifecycle:
//! - Command-line parsing and configuration loading
//! - Building the engine from the configuration
//! - Running a meshing session and reporting on it

pub mod config;

use std::path::PathBuf;

use clap::Parser;
use cgmath::Point3;
use log::info;
use web_time::Instant;

use config::MesherConfig;

use crate::engine_state::{
    rendering::meshing::MeshingSummary, voxels::world::GenerationMethod, EngineState,
};
use crate::error::ConfigError;

/// Generate a region of voxel chunks and mesh them with flood-fill face culling.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "voxel-flood-mesher", version, about)]
pub struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Edge length of each chunk in voxels
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Chunks loaded on each side of the origin chunk
    #[arg(short, long)]
    pub render_distance: Option<u32>,

    /// Worker threads used for generation and meshing
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// How chunk occupancy is generated
    #[arg(short, long, value_enum)]
    pub generation: Option<GenerationMethod>,

    /// Seed for the noise and random generators
    #[arg(long)]
    pub seed: Option<u64>,

    /// Meshes kept before the least recently meshed one is dropped
    #[arg(long)]
    pub cache_capacity: Option<usize>,

    /// Print the session summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Loads the configuration file, if any, and applies the flag overrides.
    pub fn resolve_config(&self) -> Result<MesherConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => MesherConfig::load(path)?,
            None => MesherConfig::default(),
        };

        if let Some(chunk_size) = self.chunk_size {
            config.chunk_dimension = chunk_size;
        }
        if let Some(render_distance) = self.render_distance {
            config.render_distance = render_distance;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(generation) = self.generation {
            config.generation = generation;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(cache_capacity) = self.cache_capacity {
            config.mesh_cache_capacity = cache_capacity;
        }

        config.validate()?;
        Ok(config)
    }
}

/// The application: a validated configuration and the engine built from it.
pub struct ApplicationState {
    /// The configuration the engine was built from
    pub config: MesherConfig,
    /// The core engine state
    pub engine_state: EngineState,
}

impl ApplicationState {
    /// Validates `config` and builds the engine.
    pub fn new(config: MesherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine_state = EngineState::new(
            config.generation_settings(),
            config.workers,
            config.mesh_cache_capacity()?,
        );
        Ok(ApplicationState {
            config,
            engine_state,
        })
    }

    /// Generates and meshes every chunk within the render distance of the
    /// origin chunk, waiting for all of them.
    pub fn run_session(&mut self) -> MeshingSummary {
        info!(
            "Meshing {} chunks of {}³ voxels ({} generation, {} workers)",
            (2 * self.config.render_distance as usize + 1).pow(3),
            self.config.chunk_dimension,
            self.config.generation,
            self.config.workers
        );

        let start = Instant::now();
        self.engine_state
            .load_region(Point3::new(0, 0, 0), self.config.render_distance);
        let summary = self.engine_state.run_until_idle();

        info!(
            "Meshed {} chunks in {:?}: {} faces, {} vertices, {} indices",
            summary.chunks_meshed,
            start.elapsed(),
            summary.faces,
            summary.vertices,
            summary.indices
        );
        info!(
            "Shortcuts: {} empty, {} full; {} flood iterations, {} failures, {} evictions",
            summary.empty_chunks,
            summary.full_chunks,
            summary.flood_iterations,
            summary.failures,
            summary.evictions
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "voxel-flood-mesher",
            "--chunk-size",
            "8",
            "--generation",
            "hollow_shell",
            "--workers",
            "2",
            "-r",
            "0",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.chunk_dimension, 8);
        assert_eq!(config.generation, GenerationMethod::HollowShell);
        assert_eq!(config.workers, 2);
        assert_eq!(config.render_distance, 0);
    }

    #[test]
    fn invalid_flags_are_rejected() {
        let cli = Cli::parse_from(["voxel-flood-mesher", "--workers", "0"]);
        assert!(matches!(cli.resolve_config(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn session_meshes_the_whole_region() {
        let config = MesherConfig {
            chunk_dimension: 4,
            render_distance: 1,
            workers: 2,
            generation: GenerationMethod::Solid,
            ..MesherConfig::default()
        };
        let mut app = ApplicationState::new(config).unwrap();
        let summary = app.run_session();
        assert_eq!(summary.chunks_meshed, 27);
        assert_eq!(summary.faces, 27 * 6 * 16);
        assert_eq!(summary.failures, 0);
    }
}
