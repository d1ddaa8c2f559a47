/*
 * Vector Math Module
 *
 * This module provides the 2D vector operations the flocking rules and the
 * point field are built on. The base type is glam's Vec2; everything here is
 * a pure free function producing a new value.
 *
 * The NaN-tolerant addition exists so that folding a sequence of vectors can
 * start from an undefined accumulator and degrade to the identity instead of
 * poisoning the whole sum.
 */

use glam::Vec2;
use rand::Rng;

fn nan_add_component(x: f32, y: f32) -> f32 {
    if x.is_nan() {
        return y;
    }
    if y.is_nan() {
        return x;
    }
    x + y
}

// Componentwise addition that treats a NaN operand as absent.
pub fn nan_add(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(nan_add_component(a.x, b.x), nan_add_component(a.y, b.y))
}

// Sum of a sequence of vectors, starting from zero.
pub fn sum(vs: &[Vec2]) -> Vec2 {
    vs.iter().fold(Vec2::ZERO, |acc, &v| nan_add(acc, v))
}

// Arithmetic mean of a sequence of vectors; the empty sequence maps to zero
// rather than an undefined average.
pub fn mean(vs: &[Vec2]) -> Vec2 {
    if vs.is_empty() {
        return Vec2::ZERO;
    }
    sum(vs) / vs.len() as f32
}

// Rescale a vector to the given magnitude. The zero vector has no direction
// and stays zero.
pub fn with_magnitude(v: Vec2, c: f32) -> Vec2 {
    v.normalize_or_zero() * c
}

// Clamp a vector's magnitude into [lo, hi] while keeping its direction.
pub fn clamp_magnitude(v: Vec2, lo: f32, hi: f32) -> Vec2 {
    with_magnitude(v, v.length().clamp(lo, hi))
}

fn wrap_component(x: f32, c: f32) -> f32 {
    x.rem_euclid(c)
}

// Componentwise non-negative modulo: wraps each component into [0, c).
pub fn wrap(v: Vec2, c: Vec2) -> Vec2 {
    Vec2::new(wrap_component(v.x, c.x), wrap_component(v.y, c.y))
}

// Uniform random point with each component drawn from [lo, hi).
pub fn random_in_box(rng: &mut impl Rng, lo: Vec2, hi: Vec2) -> Vec2 {
    Vec2::new(rng.gen_range(lo.x..hi.x), rng.gen_range(lo.y..hi.y))
}

// Half-open containment test: lo <= v < hi per component.
pub fn inside_box(v: Vec2, lo: Vec2, hi: Vec2) -> bool {
    v.x >= lo.x && v.x < hi.x && v.y >= lo.y && v.y < hi.y
}
