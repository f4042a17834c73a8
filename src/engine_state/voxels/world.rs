//! # World Module
//!
//! This module provides the `World` struct which manages a collection of chunks in the voxel world.
//!
//! ## Architecture
//!
//! The world uses sparse storage: only chunks that have been generated are
//! kept, keyed by their chunk coordinates.
//!
//! ## Chunk Generation
//!
//! Several generation strategies are supported (see [`GenerationMethod`]):
//! - Perlin noise for natural-looking terrain
//! - Random fill with a configurable sparseness
//! - Checkerboard pattern for testing
//! - Solid and empty chunks, which exercise the mesher's shortcuts
//! - Hollow shells, whose sealed cavities the mesher must skip

use std::collections::HashMap;
use std::fmt;

use cgmath::Point3;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::MtResource;
use crate::engine_state::voxels::chunk::{Chunk, PerlinSettings, CHUNK_DIMENSION};

/// The method used to generate new chunks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    /// Thresholded 3D Perlin noise
    #[default]
    Perlin,
    /// Independent coin flip per voxel
    Random,
    /// Alternating solid and empty voxels
    Checkerboard,
    /// Every voxel solid
    Solid,
    /// Every voxel empty
    Empty,
    /// Solid walls around a sealed empty cavity
    #[value(name = "hollow_shell")]
    HollowShell,
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationMethod::Perlin => "perlin",
            GenerationMethod::Random => "random",
            GenerationMethod::Checkerboard => "checkerboard",
            GenerationMethod::Solid => "solid",
            GenerationMethod::Empty => "empty",
            GenerationMethod::HollowShell => "hollow_shell",
        };
        f.write_str(name)
    }
}

/// Everything needed to generate a chunk at an arbitrary position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GenerationSettings {
    pub method: GenerationMethod,
    /// Edge length of every chunk in voxels
    pub chunk_dimension: usize,
    /// Seed for the random generator
    pub seed: u64,
    /// Probability that a randomly generated voxel is empty
    pub random_sparseness: f64,
    pub perlin: PerlinSettings,
    /// Wall thickness of hollow shells
    pub shell_thickness: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        GenerationSettings {
            method: GenerationMethod::default(),
            chunk_dimension: CHUNK_DIMENSION,
            seed: 0,
            random_sparseness: 0.5,
            perlin: PerlinSettings::default(),
            shell_thickness: 1,
        }
    }
}

impl GenerationSettings {
    /// Generates the chunk at `position`.
    pub fn generate(&self, position: &Point3<i32>) -> Chunk {
        let dimension = self.chunk_dimension;
        match self.method {
            GenerationMethod::Perlin => Chunk::perlin(position, dimension, &self.perlin),
            GenerationMethod::Random => {
                Chunk::random(position, dimension, self.random_sparseness, self.seed)
            }
            GenerationMethod::Checkerboard => Chunk::checkerboard(position, dimension),
            GenerationMethod::Solid => Chunk::solid(position, dimension),
            GenerationMethod::Empty => Chunk::empty(position, dimension),
            GenerationMethod::HollowShell => {
                Chunk::hollow_shell(position, dimension, self.shell_thickness)
            }
        }
    }
}

/// A voxel world composed of multiple chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_flood_mesher::{GenerationSettings, World};
///
/// let mut world = World::new(GenerationSettings::default());
/// world.add_chunk_at(Point3::new(0, 0, 0));
/// assert!(world.get_chunk_at(Point3::new(0, 0, 0)).is_some());
/// ```
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    pub chunks: HashMap<Point3<i32>, MtResource<Chunk>>,
    settings: GenerationSettings,
}

impl World {
    /// Creates a new world with no chunks loaded.
    pub fn new(settings: GenerationSettings) -> Self {
        World {
            chunks: HashMap::new(),
            settings,
        }
    }

    /// The settings new chunks are generated with.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Generates a chunk at the given chunk coordinates unless one already
    /// exists there.
    ///
    /// # Returns
    ///
    /// The chunk at `position`, freshly generated or not.
    pub fn add_chunk_at(&mut self, position: Point3<i32>) -> MtResource<Chunk> {
        let settings = self.settings;
        self.chunks
            .entry(position)
            .or_insert_with(|| MtResource::new(settings.generate(&position)))
            .clone()
    }

    /// Inserts an already built chunk, replacing any chunk at its position.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> MtResource<Chunk> {
        let position = chunk.position;
        let chunk = MtResource::new(chunk);
        self.chunks.insert(position, chunk.clone());
        chunk
    }

    /// Retrieves the chunk at the specified chunk coordinates.
    pub fn get_chunk_at(&self, pos: Point3<i32>) -> Option<MtResource<Chunk>> {
        self.chunks.get(&pos).cloned()
    }

    /// Number of chunks currently held.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_chunk_is_idempotent() {
        let mut world = World::new(GenerationSettings {
            method: GenerationMethod::Solid,
            chunk_dimension: 4,
            ..GenerationSettings::default()
        });
        let position = Point3::new(1, 2, 3);
        let first = world.add_chunk_at(position);
        first.get_mut().set(0, 0, 0, crate::engine_state::voxels::block::Occupancy::Empty);

        let second = world.add_chunk_at(position);
        assert_eq!(second.get().solid_count(), 63);
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn generated_chunks_follow_the_method() {
        let position = Point3::new(0, 0, 0);
        let settings = |method| GenerationSettings {
            method,
            chunk_dimension: 5,
            ..GenerationSettings::default()
        };
        assert_eq!(settings(GenerationMethod::Empty).generate(&position).solid_count(), 0);
        assert_eq!(settings(GenerationMethod::Solid).generate(&position).solid_count(), 125);
        assert_eq!(
            settings(GenerationMethod::HollowShell).generate(&position).solid_count(),
            125 - 27
        );
        assert_eq!(
            settings(GenerationMethod::Checkerboard).generate(&position).solid_count(),
            63
        );
    }

    #[test]
    fn method_names_round_trip_through_serde() {
        let json = serde_json::to_string(&GenerationMethod::HollowShell).unwrap();
        assert_eq!(json, "\"hollow_shell\"");
        let parsed: GenerationMethod = serde_json::from_str("\"checkerboard\"").unwrap();
        assert_eq!(parsed, GenerationMethod::Checkerboard);
        assert_eq!(GenerationMethod::Random.to_string(), "random");
    }
}
