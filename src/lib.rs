/*
 * Wordflock - Module Definitions
 *
 * A boid flocking core: per-tick neighbor selection, weighted rule blending
 * and explicit Euler integration, plus a point field that converts a
 * rasterized density image into per-boid target coordinates so the flock
 * can settle into rendered text.
 *
 * Rendering, UI and input belong to the embedding application; this crate
 * is the computational core only.
 */

// Re-export key components for easier access
pub use boid::{spawn_flock, Boid};
pub use clock::StepClock;
pub use error::{ConfigError, FieldError, HeapError};
pub use heap::MaxHeap;
pub use params::SimulationParams;
pub use physics::{perceive, step};
pub use word::{extract_points, partition, CentroidTable, DensityMap, Rect, SummedArea};

// Define modules
pub mod boid;
pub mod clock;
pub mod error;
pub mod heap;
pub mod params;
pub mod physics;
pub mod vector;
pub mod word;
