/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct holding every knob the
 * driver can set. The kinematic constants are fixed when the flock is
 * spawned; the weights, toggles and targets may change between ticks. The
 * engine only ever reads this struct.
 */

use glam::Vec2;

use crate::error::ConfigError;

pub struct SimulationParams {
    // Constants, fixed at initialisation
    pub num_boids: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    pub max_accel: f32,
    pub view_radius: f32,
    /// Cosine threshold for the neighbor-heading visibility test.
    pub view_angle_cos: f32,
    pub world_size: Vec2,

    // Tunables, adjustable between ticks
    pub avoid_weight: f32,
    pub align_weight: f32,
    pub center_weight: f32,
    pub mouse_weight: f32,
    pub edges_weight: f32,
    pub words_weight: f32,
    pub use_mouse: bool,
    pub use_edges: bool,
    pub use_words: bool,
    /// Pointer-attraction target, in world coordinates.
    pub mouse_target: Vec2,
    /// Per-boid targets from the point field; boid i takes word_points[i].
    pub word_points: Vec<Vec2>,
    /// Free-text input the word points were derived from.
    pub word_text: String,

    // Performance settings
    pub enable_parallel: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 300,
            min_speed: 1.0,
            max_speed: 4.0,
            max_accel: 0.5,
            view_radius: 50.0,
            view_angle_cos: -0.5,
            world_size: Vec2::new(1280.0, 720.0),
            avoid_weight: 1.5,
            align_weight: 1.0,
            center_weight: 1.0,
            mouse_weight: 1.0,
            edges_weight: 1.0,
            words_weight: 1.0,
            use_mouse: false,
            use_edges: false,
            use_words: false,
            mouse_target: Vec2::new(640.0, 360.0),
            word_points: Vec::new(),
            word_text: String::new(),
            enable_parallel: false,
        }
    }
}

fn check_weight(value: f32, name: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::BadWeight(name))
    }
}

impl SimulationParams {
    // Validate the configuration up front so no error can surface mid-tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_boids == 0 {
            return Err(ConfigError::OutOfRange("num_boids"));
        }
        if !(self.world_size.x >= 2.0 && self.world_size.y >= 2.0) {
            // The hard boundary clamps into [1, dims - 1].
            return Err(ConfigError::OutOfRange("world_size"));
        }
        if !(self.view_radius > 0.0 && self.view_radius.is_finite()) {
            return Err(ConfigError::OutOfRange("view_radius"));
        }
        if !(self.min_speed >= 0.0 && self.min_speed <= self.max_speed) {
            return Err(ConfigError::OutOfRange("min_speed"));
        }
        if !(self.max_speed > 0.0 && self.max_speed.is_finite()) {
            return Err(ConfigError::OutOfRange("max_speed"));
        }
        if !(self.max_accel > 0.0 && self.max_accel.is_finite()) {
            return Err(ConfigError::OutOfRange("max_accel"));
        }
        if !(-1.0..=1.0).contains(&self.view_angle_cos) {
            return Err(ConfigError::OutOfRange("view_angle_cos"));
        }

        check_weight(self.avoid_weight, "avoid_weight")?;
        check_weight(self.align_weight, "align_weight")?;
        check_weight(self.center_weight, "center_weight")?;
        if self.use_mouse {
            check_weight(self.mouse_weight, "mouse_weight")?;
            if !(self.mouse_target.x.is_finite() && self.mouse_target.y.is_finite()) {
                return Err(ConfigError::BadTarget);
            }
        }
        if self.use_edges {
            check_weight(self.edges_weight, "edges_weight")?;
        }
        if self.use_words {
            check_weight(self.words_weight, "words_weight")?;
        }
        Ok(())
    }
}
