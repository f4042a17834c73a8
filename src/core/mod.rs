//! # Core Module
//!
//! Shared-ownership primitives used by the meshing pipeline. Chunks and the
//! world are generated on worker threads and read again by mesh tasks, so
//! they travel between threads inside an [`MtResource`].
//!
//! ## Usage
//! ```rust
//! use voxel_flood_mesher::MtResource;
//!
//! let counter = MtResource::new(0);
//! *counter.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//! ```

pub mod mt_resource;

pub use mt_resource::MtResource;
