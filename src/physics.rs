/*
 * Physics Module
 *
 * This module drives the per-tick flocking update. Every boid perceives the
 * previous snapshot only, so the per-boid computation is a pure map over the
 * flock: the sequential and parallel paths produce identical output, in
 * input order.
 *
 * The update pipeline per boid:
 *   1. select the near and seen neighbor sets,
 *   2. evaluate the active rules from a fixed rule table,
 *   3. blend the weighted steering contributions and cap the result once,
 *   4. integrate with explicit Euler and clamp/wrap the position.
 */

use glam::Vec2;
use rayon::prelude::*;

use crate::boid::Boid;
use crate::params::SimulationParams;
use crate::vector;

// The full rule set, statically enumerated; toggles decide which entries
// take part in a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Avoid,
    Align,
    Center,
    Mouse,
    Edges,
    Words,
}

const RULES: [Rule; 6] = [
    Rule::Avoid,
    Rule::Align,
    Rule::Center,
    Rule::Mouse,
    Rule::Edges,
    Rule::Words,
];

impl Rule {
    fn enabled(self, params: &SimulationParams) -> bool {
        match self {
            Rule::Avoid | Rule::Align | Rule::Center => true,
            Rule::Mouse => params.use_mouse,
            Rule::Edges => params.use_edges,
            Rule::Words => params.use_words,
        }
    }

    fn weight(self, params: &SimulationParams) -> f32 {
        match self {
            Rule::Avoid => params.avoid_weight,
            Rule::Align => params.align_weight,
            Rule::Center => params.center_weight,
            Rule::Mouse => params.mouse_weight,
            Rule::Edges => params.edges_weight,
            Rule::Words => params.words_weight,
        }
    }

    // The velocity this rule would like boid `index` to have.
    fn desired(
        self,
        index: usize,
        boid: &Boid,
        boids: &[Boid],
        near: &[usize],
        seen: &[usize],
        params: &SimulationParams,
    ) -> Vec2 {
        match self {
            Rule::Avoid => boid.avoid(boids, near),
            Rule::Align => boid.align(boids, seen),
            Rule::Center => boid.center(boids, seen),
            Rule::Mouse => boid.seek(params.mouse_target),
            Rule::Edges => boid.edges(params),
            Rule::Words => match params.word_points.get(index) {
                Some(&target) => boid.seek(target),
                None => Vec2::ZERO,
            },
        }
    }
}

/// Advances the whole flock by one tick. Pure: identical inputs produce
/// bit-identical output, and the input snapshot is never mutated.
pub fn step(boids: &[Boid], dt: f32, params: &SimulationParams) -> Vec<Boid> {
    if params.enable_parallel {
        boids
            .par_iter()
            .enumerate()
            .map(|(i, boid)| advance(i, boid, boids, dt, params))
            .collect()
    } else {
        boids
            .iter()
            .enumerate()
            .map(|(i, boid)| advance(i, boid, boids, dt, params))
            .collect()
    }
}

fn advance(index: usize, boid: &Boid, boids: &[Boid], dt: f32, params: &SimulationParams) -> Boid {
    let acceleration = blended_acceleration(index, boid, boids, params);
    integrate(boid, acceleration, dt, params)
}

/// Selects the neighbor sets for one boid against the previous snapshot.
///
/// `near` holds all other boids within (0, view_radius] of `boid`; the
/// strict lower bound excludes the boid itself. `seen` keeps the near boids
/// whose own heading, relative to the offset, clears the cosine threshold:
/// visibility is gated on the neighbor's heading, not the observer's.
pub fn perceive(boid: &Boid, boids: &[Boid], params: &SimulationParams) -> (Vec<usize>, Vec<usize>) {
    let mut near = Vec::new();
    let mut seen = Vec::new();

    for (i, other) in boids.iter().enumerate() {
        let offset = other.position - boid.position;
        let d = offset.length();
        if !(d > 0.0 && d <= params.view_radius) {
            continue;
        }
        near.push(i);

        // A motionless neighbor has no heading and is never "seen".
        let denom = d * other.velocity.length();
        if denom > 0.0 && offset.dot(other.velocity) / denom > params.view_angle_cos {
            seen.push(i);
        }
    }
    (near, seen)
}

// Converts a rule's desired velocity into a weighted steering contribution:
// cap the desired speed, and steer from the current velocity towards it. A
// zero desire contributes nothing regardless of weight.
fn steering(desired: Vec2, velocity: Vec2, weight: f32, max_speed: f32) -> Vec2 {
    let capped = vector::clamp_magnitude(desired, 0.0, max_speed);
    if capped == Vec2::ZERO {
        return capped;
    }
    (capped - velocity) * weight
}

fn blended_acceleration(
    index: usize,
    boid: &Boid,
    boids: &[Boid],
    params: &SimulationParams,
) -> Vec2 {
    let (near, seen) = perceive(boid, boids, params);

    let mut total = Vec2::ZERO;
    let mut active = 0u32;
    for rule in RULES {
        if !rule.enabled(params) {
            continue;
        }
        let desired = rule.desired(index, boid, boids, &near, &seen, params);
        total = vector::nan_add(
            total,
            steering(desired, boid.velocity, rule.weight(params), params.max_speed),
        );
        active += 1;
    }

    let blended = if active == 0 {
        Vec2::ZERO
    } else {
        total / active as f32
    };
    // The magnitude cap is applied exactly once, to the blended mean.
    vector::clamp_magnitude(blended, 0.0, params.max_accel)
}

// Explicit Euler step with the speed band enforced after the velocity
// update. With edge avoidance the position is hard-clamped into
// [1, dims - 1], which makes the toroidal wrap a no-op.
fn integrate(boid: &Boid, acceleration: Vec2, dt: f32, params: &SimulationParams) -> Boid {
    let velocity = vector::clamp_magnitude(
        boid.velocity + acceleration * dt,
        params.min_speed,
        params.max_speed,
    );
    let mut position = boid.position + velocity * dt;
    if params.use_edges {
        position = position.clamp(Vec2::ONE, params.world_size - Vec2::ONE);
    }
    Boid {
        position: vector::wrap(position, params.world_size),
        velocity,
        acceleration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boid::spawn_flock;

    const EPS: f32 = 1e-5;

    fn test_params() -> SimulationParams {
        SimulationParams {
            num_boids: 40,
            world_size: Vec2::new(200.0, 200.0),
            view_radius: 30.0,
            ..Default::default()
        }
    }

    #[test]
    fn step_is_pure() {
        let params = test_params();
        let flock = spawn_flock(&params);

        let once = step(&flock, 0.5, &params);
        let twice = step(&flock, 0.5, &params);
        assert_eq!(once, twice);
    }

    #[test]
    fn parallel_and_sequential_steps_agree() {
        let mut params = test_params();
        let flock = spawn_flock(&params);

        let sequential = step(&flock, 1.0, &params);
        params.enable_parallel = true;
        let parallel = step(&flock, 1.0, &params);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn near_excludes_self_and_seen_is_a_subset() {
        let params = test_params();
        let flock = spawn_flock(&params);

        for (i, boid) in flock.iter().enumerate() {
            let (near, seen) = perceive(boid, &flock, &params);
            assert!(!near.contains(&i));
            assert!(seen.iter().all(|j| near.contains(j)));
        }
    }

    #[test]
    fn visibility_is_gated_on_the_neighbors_heading() {
        let params = SimulationParams {
            view_radius: 100.0,
            view_angle_cos: 0.0,
            ..test_params()
        };
        let observer = Boid::new(Vec2::ZERO, Vec2::new(1.0, 0.0));

        // A neighbor moving further away along the offset direction clears
        // the threshold; one moving back toward the observer does not.
        let fleeing = Boid::new(Vec2::new(10.0, 0.0), Vec2::new(2.0, 0.0));
        let boids = [observer, fleeing];
        let (near, seen) = perceive(&observer, &boids, &params);
        assert_eq!(near, vec![1]);
        assert_eq!(seen, vec![1]);

        let returning = Boid::new(Vec2::new(10.0, 0.0), Vec2::new(-2.0, 0.0));
        let boids = [observer, returning];
        let (near, seen) = perceive(&observer, &boids, &params);
        assert_eq!(near, vec![1]);
        assert!(seen.is_empty());
    }

    #[test]
    fn speed_stays_in_band_after_a_step() {
        let params = test_params();
        let flock = spawn_flock(&params);

        for boid in step(&flock, 2.0, &params) {
            let speed = boid.velocity.length();
            assert!(speed >= params.min_speed - EPS);
            assert!(speed <= params.max_speed + EPS);
        }
    }

    #[test]
    fn blended_acceleration_is_capped_once() {
        let params = SimulationParams {
            use_mouse: true,
            mouse_weight: 100.0,
            mouse_target: Vec2::new(190.0, 190.0),
            ..test_params()
        };
        let boid = Boid::new(Vec2::new(10.0, 10.0), Vec2::new(1.0, 0.0));
        let boids = [boid];

        let accel = blended_acceleration(0, &boid, &boids, &params);
        assert!(accel.length() <= params.max_accel + EPS);
    }

    #[test]
    fn lone_boid_with_no_active_targets_keeps_drifting() {
        // No neighbors and no optional rules: every contribution is zero, so
        // the boid integrates its current velocity unchanged.
        let params = test_params();
        let boid = Boid::new(Vec2::new(50.0, 50.0), Vec2::new(2.0, 0.0));
        let next = step(&[boid], 1.0, &params);

        assert_eq!(next[0].acceleration, Vec2::ZERO);
        assert_eq!(next[0].velocity, boid.velocity);
        assert_eq!(next[0].position, Vec2::new(52.0, 50.0));
    }

    #[test]
    fn toroidal_wrap_without_edge_avoidance() {
        let params = SimulationParams {
            min_speed: 0.0,
            max_speed: 10.0,
            ..test_params()
        };
        let boid = Boid::new(Vec2::new(199.5, 100.0), Vec2::new(4.0, 0.0));
        let next = step(&[boid], 1.0, &params);

        assert!((next[0].position.x - 3.5).abs() < EPS);
        assert!((next[0].position.y - 100.0).abs() < EPS);
    }

    #[test]
    fn edge_avoidance_clamps_the_position_hard() {
        let params = SimulationParams {
            use_edges: true,
            min_speed: 0.0,
            max_speed: 50.0,
            ..test_params()
        };
        let boid = Boid::new(Vec2::new(199.0, 100.0), Vec2::new(40.0, 0.0));
        let next = step(&[boid], 1.0, &params);

        assert!(next[0].position.x <= params.world_size.x - 1.0);
        assert!(next[0].position.x >= 1.0);
    }

    #[test]
    fn word_points_attract_their_assigned_boid() {
        let params = SimulationParams {
            use_words: true,
            word_points: vec![Vec2::new(150.0, 150.0)],
            min_speed: 0.0,
            ..test_params()
        };
        let boid = Boid::new(Vec2::new(50.0, 50.0), Vec2::ZERO);
        let next = step(&[boid], 1.0, &params);

        // The only non-zero contribution points at the word target.
        let towards = (next[0].position - boid.position).normalize();
        let expected = (params.word_points[0] - boid.position).normalize();
        assert!((towards - expected).length() < 1e-3);
    }

    #[test]
    fn boid_without_an_assigned_word_point_gets_no_pull() {
        let params = SimulationParams {
            use_words: true,
            word_points: vec![Vec2::new(150.0, 150.0)],
            ..test_params()
        };
        let lone = Boid::new(Vec2::new(50.0, 50.0), Vec2::new(2.0, 0.0));
        let flock = [Boid::new(Vec2::new(150.0, 150.0), Vec2::ZERO), lone];

        // Boid 1 has no word point; with no neighbors in range either, its
        // acceleration stays zero.
        let far_params = SimulationParams { view_radius: 10.0, ..params };
        let next = step(&flock, 1.0, &far_params);
        assert_eq!(next[1].acceleration, Vec2::ZERO);
    }
}
