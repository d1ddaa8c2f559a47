/*
 * Error Module
 *
 * This module defines the error types surfaced by the simulation core.
 * All of them are programming or configuration errors: the step function
 * and the point-field subdivision are deterministic, so nothing here is
 * retried or substituted with approximate data.
 */

use std::fmt;

/// Errors raised by the max-heap priority queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `pop` or `peek` was called on an empty heap.
    Empty,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Empty => write!(f, "pop/peek on an empty heap"),
        }
    }
}

impl std::error::Error for HeapError {}

/// Errors raised while turning a density raster into points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldError {
    /// A point count of zero was requested; the partition needs N >= 1.
    ZeroCount,
    /// Centroid correction was requested for a rectangle enclosing no mass.
    ZeroMassRegion { x: u32, y: u32, w: u32, h: u32 },
    /// The subdivision heap ran dry, which indicates a counting bug.
    Heap(HeapError),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::ZeroCount => write!(f, "point extraction requires a count of at least 1"),
            FieldError::ZeroMassRegion { x, y, w, h } => write!(
                f,
                "centroid of a zero-mass rectangle {}x{} at ({}, {})",
                w, h, x, y
            ),
            FieldError::Heap(e) => write!(f, "subdivision heap error: {}", e),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::Heap(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HeapError> for FieldError {
    fn from(e: HeapError) -> Self {
        FieldError::Heap(e)
    }
}

/// Errors raised by simulation parameter validation.
///
/// Validation runs at configuration time so a bad weight or toggle never
/// surfaces mid-tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric field is outside its allowed range.
    OutOfRange(&'static str),
    /// A weight attached to an active rule is NaN or negative.
    BadWeight(&'static str),
    /// The pointer-attraction toggle is set but the target is not finite.
    BadTarget,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfRange(field) => {
                write!(f, "parameter `{}` is outside its allowed range", field)
            }
            ConfigError::BadWeight(field) => {
                write!(f, "weight `{}` must be finite and non-negative", field)
            }
            ConfigError::BadTarget => {
                write!(f, "pointer attraction is enabled but the target is not finite")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
