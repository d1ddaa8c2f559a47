/*
 * Boid Module
 *
 * This module defines the Boid value type and the desired-velocity rules.
 * Each rule maps a neighbor set (or a target point) to the velocity the boid
 * would like to have; the physics module converts those into weighted
 * steering forces, blends them, and integrates.
 *
 * Boids are plain values: a step produces a fresh snapshot, it never mutates
 * the previous one.
 */

use glam::Vec2;

use crate::params::SimulationParams;
use crate::vector;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

impl Boid {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
        }
    }

    // Avoidance over the near set: mean of unit offsets to each neighbor,
    // each scaled by -1/distance so closer neighbors repel harder.
    pub fn avoid(&self, boids: &[Boid], near: &[usize]) -> Vec2 {
        let nudges: Vec<Vec2> = near
            .iter()
            .map(|&i| {
                let offset = boids[i].position - self.position;
                vector::with_magnitude(offset, -1.0 / offset.length())
            })
            .collect();
        vector::mean(&nudges)
    }

    // Alignment over the seen set: the mean velocity of visible neighbors.
    pub fn align(&self, boids: &[Boid], seen: &[usize]) -> Vec2 {
        let velocities: Vec<Vec2> = seen.iter().map(|&i| boids[i].velocity).collect();
        vector::mean(&velocities)
    }

    // Cohesion over the seen set: head for the centroid of visible neighbors.
    pub fn center(&self, boids: &[Boid], seen: &[usize]) -> Vec2 {
        if seen.is_empty() {
            return Vec2::ZERO;
        }
        let positions: Vec<Vec2> = seen.iter().map(|&i| boids[i].position).collect();
        self.seek(vector::mean(&positions))
    }

    // The velocity that would reach a target position in one unit step.
    pub fn seek(&self, target: Vec2) -> Vec2 {
        target - self.position
    }

    // Soft boundary repulsion: zero while the boid stays inside the world
    // inset by the view radius, otherwise head for the world's center.
    pub fn edges(&self, params: &SimulationParams) -> Vec2 {
        let inset = Vec2::splat(params.view_radius);
        if vector::inside_box(self.position, inset, params.world_size - inset) {
            return Vec2::ZERO;
        }
        self.seek(params.world_size / 2.0)
    }
}

/// Spawns the flock: N boids with position uniform in [0, dims), velocity
/// uniform in [-max_speed, max_speed]^2 then clamped into the speed band,
/// and zero acceleration. The sole source of randomness in the system.
pub fn spawn_flock(params: &SimulationParams) -> Vec<Boid> {
    let mut rng = rand::thread_rng();
    let vel_span = Vec2::splat(params.max_speed);
    (0..params.num_boids)
        .map(|_| {
            let position = vector::random_in_box(&mut rng, Vec2::ZERO, params.world_size);
            let velocity = vector::clamp_magnitude(
                vector::random_in_box(&mut rng, -vel_span, vel_span),
                params.min_speed,
                params.max_speed,
            );
            Boid::new(position, velocity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn spawn_produces_n_boids_inside_the_world() {
        let params = SimulationParams::default();
        let flock = spawn_flock(&params);

        assert_eq!(flock.len(), params.num_boids);
        for boid in &flock {
            assert!(vector::inside_box(boid.position, Vec2::ZERO, params.world_size));
            let speed = boid.velocity.length();
            assert!(speed >= params.min_speed - EPS && speed <= params.max_speed + EPS);
            assert_eq!(boid.acceleration, Vec2::ZERO);
        }
    }

    #[test]
    fn avoid_points_away_from_a_single_neighbor() {
        // Neighbor at offset (3, 4), distance 5: the desired velocity is the
        // unit offset scaled by -1/5.
        let boid = Boid::new(Vec2::ZERO, Vec2::ZERO);
        let boids = [boid, Boid::new(Vec2::new(3.0, 4.0), Vec2::ZERO)];

        let desired = boid.avoid(&boids, &[1]);
        assert!((desired.x - (-0.12)).abs() < EPS);
        assert!((desired.y - (-0.16)).abs() < EPS);
    }

    #[test]
    fn rules_yield_zero_for_an_empty_neighbor_set() {
        let boid = Boid::new(Vec2::new(5.0, 5.0), Vec2::new(1.0, 0.0));
        let boids = [boid];
        assert_eq!(boid.avoid(&boids, &[]), Vec2::ZERO);
        assert_eq!(boid.align(&boids, &[]), Vec2::ZERO);
        assert_eq!(boid.center(&boids, &[]), Vec2::ZERO);
    }

    #[test]
    fn align_averages_seen_velocities() {
        let boid = Boid::new(Vec2::ZERO, Vec2::ZERO);
        let boids = [
            boid,
            Boid::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)),
            Boid::new(Vec2::new(0.0, 1.0), Vec2::new(0.0, 4.0)),
        ];
        assert_eq!(boid.align(&boids, &[1, 2]), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn center_heads_for_the_seen_centroid() {
        let boid = Boid::new(Vec2::new(1.0, 1.0), Vec2::ZERO);
        let boids = [
            boid,
            Boid::new(Vec2::new(3.0, 1.0), Vec2::ZERO),
            Boid::new(Vec2::new(3.0, 5.0), Vec2::ZERO),
        ];
        // Centroid of the seen set is (3, 3).
        assert_eq!(boid.center(&boids, &[1, 2]), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn edges_is_quiet_inside_the_inset_world() {
        let params = SimulationParams {
            view_radius: 50.0,
            world_size: Vec2::new(1000.0, 1000.0),
            ..Default::default()
        };
        let inside = Boid::new(Vec2::new(500.0, 500.0), Vec2::ZERO);
        assert_eq!(inside.edges(&params), Vec2::ZERO);

        let outside = Boid::new(Vec2::new(10.0, 500.0), Vec2::ZERO);
        assert_eq!(outside.edges(&params), Vec2::new(490.0, 0.0));
    }
}
