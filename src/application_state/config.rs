//! # Mesher Configuration
//!
//! Settings are read from an optional JSON file and then overridden by
//! command-line flags. Every field has a default, so an empty object (or no
//! file at all) is a valid configuration.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::engine_state::rendering::meshing::{MeshManager, MAX_CHUNK_SIZE};
use crate::engine_state::voxels::chunk::{
    PerlinSettings, CHUNK_DIMENSION, PERLIN_NEGATIVE_THRESHOLD, PERLIN_POSITIVE_THRESHOLD,
    PERLIN_SCALE_FACTOR,
};
use crate::engine_state::voxels::world::{GenerationMethod, GenerationSettings};
use crate::error::ConfigError;

/// Everything a meshing session can be tuned with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MesherConfig {
    /// Edge length of each chunk in voxels
    pub chunk_dimension: usize,
    /// Chunks loaded on each side of the origin chunk
    pub render_distance: u32,
    /// Worker threads in the task pool
    pub workers: usize,
    pub generation: GenerationMethod,
    pub seed: u64,
    /// Probability that a randomly generated voxel is empty
    pub random_sparseness: f64,
    pub perlin_scale: f64,
    pub perlin_positive_threshold: f64,
    pub perlin_negative_threshold: f64,
    /// Wall thickness for hollow shell chunks
    pub shell_thickness: usize,
    /// Meshes kept before the least recently meshed one is dropped
    pub mesh_cache_capacity: usize,
}

impl Default for MesherConfig {
    fn default() -> Self {
        MesherConfig {
            chunk_dimension: CHUNK_DIMENSION,
            render_distance: 1,
            workers: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            generation: GenerationMethod::default(),
            seed: 0,
            random_sparseness: 0.5,
            perlin_scale: PERLIN_SCALE_FACTOR,
            perlin_positive_threshold: PERLIN_POSITIVE_THRESHOLD,
            perlin_negative_threshold: PERLIN_NEGATIVE_THRESHOLD,
            shell_thickness: 1,
            mesh_cache_capacity: MeshManager::DEFAULT_CAPACITY,
        }
    }
}

impl MesherConfig {
    /// Reads a configuration from a JSON file. Missing fields take their
    /// defaults; the result is not validated yet.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks that the values describe a session that can actually run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_dimension == 0 {
            return Err(ConfigError::Invalid("chunk_dimension must be at least 1".into()));
        }
        if self.chunk_dimension > MAX_CHUNK_SIZE {
            return Err(ConfigError::Invalid(format!(
                "chunk_dimension {} exceeds the maximum of {}",
                self.chunk_dimension, MAX_CHUNK_SIZE
            )));
        }
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.mesh_cache_capacity == 0 {
            return Err(ConfigError::Invalid("mesh_cache_capacity must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.random_sparseness) {
            return Err(ConfigError::Invalid(format!(
                "random_sparseness must be within [0, 1], got {}",
                self.random_sparseness
            )));
        }
        if self.perlin_negative_threshold > self.perlin_positive_threshold {
            return Err(ConfigError::Invalid(format!(
                "perlin_negative_threshold ({}) is above perlin_positive_threshold ({})",
                self.perlin_negative_threshold, self.perlin_positive_threshold
            )));
        }
        Ok(())
    }

    /// The chunk generation settings this configuration describes.
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            method: self.generation,
            chunk_dimension: self.chunk_dimension,
            seed: self.seed,
            random_sparseness: self.random_sparseness,
            perlin: PerlinSettings {
                // Perlin seeds are 32-bit; fold the high half in.
                seed: (self.seed ^ (self.seed >> 32)) as u32,
                scale: self.perlin_scale,
                positive_threshold: self.perlin_positive_threshold,
                negative_threshold: self.perlin_negative_threshold,
            },
            shell_thickness: self.shell_thickness,
        }
    }

    /// The mesh cache capacity as the type the cache wants.
    pub fn mesh_cache_capacity(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.mesh_cache_capacity)
            .ok_or_else(|| ConfigError::Invalid("mesh_cache_capacity must be at least 1".into()))
    }
}
