/*
 * Word Module
 *
 * This module turns a rasterized density image (typically the alpha channel
 * of rendered text) into N representative coordinates. A summed-area table
 * gives O(1) mass queries; a max-heap of boxes, scored by enclosed mass,
 * drives a greedy subdivision that always refines the heaviest box next.
 *
 * The greedy split is not a globally optimal equal-mass partition, but it is
 * adequate for a visual density match: the flock only needs one target per
 * point, in roughly the right place.
 */

use glam::Vec2;
use image::GrayImage;

use crate::error::FieldError;
use crate::heap::MaxHeap;

/// A width x height grid of non-negative scalar mass values, row-major.
#[derive(Debug, Clone)]
pub struct DensityMap {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl DensityMap {
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), (width * height) as usize);
        Self {
            width,
            height,
            data,
        }
    }

    // Build a grid by sampling a function at every pixel.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> f32) -> Self {
        let mut data = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    // Build a grid from a grayscale raster, e.g. a pre-rendered glyph image
    // where ink is white on black.
    pub fn from_image(img: &GrayImage) -> Self {
        Self::from_fn(img.width(), img.height(), |x, y| {
            img.get_pixel(x, y).0[0] as f32
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn at(&self, x: u32, y: u32) -> f32 {
        self.data[(y * self.width + x) as usize]
    }
}

/// An integer rectangle in raster-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Cuts the rectangle in half along its longer side at the integer-floor
    /// midpoint. A width/height tie splits along width.
    pub fn split(self) -> (Rect, Rect) {
        let Rect { x, y, w, h } = self;
        if w >= h {
            let v = w / 2;
            (Rect::new(x, y, v, h), Rect::new(x + v, y, w - v, h))
        } else {
            let v = h / 2;
            (Rect::new(x, y, w, v), Rect::new(x, y + v, w, h - v))
        }
    }

    /// Geometric center, floored to the pixel grid.
    pub fn center(self) -> Vec2 {
        Vec2::new((self.x + self.w / 2) as f32, (self.y + self.h / 2) as f32)
    }
}

// 2D inclusive prefix sum with an explicit zero border row and column, so a
// query touching the raster edge reads zero beyond it.
fn prefix_table(width: u32, height: u32, value: impl Fn(u32, u32) -> f32) -> Vec<f32> {
    let (w, h) = (width as usize, height as usize);
    let stride = w + 1;
    let mut table = vec![0.0f32; stride * (h + 1)];
    for y in 0..h {
        for x in 0..w {
            table[(y + 1) * stride + (x + 1)] = value(x as u32, y as u32)
                + table[y * stride + (x + 1)]
                + table[(y + 1) * stride + x]
                - table[y * stride + x];
        }
    }
    table
}

/// Summed-area table over a density map: O(1) total-mass queries for any
/// axis-aligned rectangle.
pub struct SummedArea {
    stride: usize,
    table: Vec<f32>,
}

impl SummedArea {
    pub fn new(map: &DensityMap) -> Self {
        Self {
            stride: map.width as usize + 1,
            table: prefix_table(map.width, map.height, |x, y| map.at(x, y)),
        }
    }

    fn corner(&self, x: u32, y: u32) -> f32 {
        self.table[y as usize * self.stride + x as usize]
    }

    /// Total mass inside a rectangle via four-corner inclusion-exclusion.
    pub fn mass(&self, rect: Rect) -> f32 {
        let (x0, y0) = (rect.x, rect.y);
        let (x1, y1) = (rect.x + rect.w, rect.y + rect.h);
        self.corner(x1, y1) - self.corner(x0, y1) - self.corner(x1, y0) + self.corner(x0, y0)
    }
}

/// Greedily partitions the map's bounding box into `n` mass-balanced
/// rectangles: repeatedly split the heaviest box until `n` remain.
pub fn partition(map: &DensityMap, n: usize) -> Result<Vec<Rect>, FieldError> {
    if n == 0 {
        return Err(FieldError::ZeroCount);
    }
    let areas = SummedArea::new(map);
    let whole = Rect::new(0, 0, map.width, map.height);
    let seed = (whole, areas.mass(whole));
    let mut heap = MaxHeap::from_vec(vec![seed], |item: &(Rect, f32)| item.1);

    while heap.len() < n {
        let (rect, mass) = heap.pop()?;
        let (first, second) = rect.split();
        let first_mass = areas.mass(first);
        heap.push((first, first_mass));
        // The sibling's mass is the remainder; no second table query needed.
        heap.push((second, mass - first_mass));
    }

    Ok(heap.into_vec().into_iter().map(|(rect, _)| rect).collect())
}

/// Partitions the map into `n` boxes and returns each box's center:
/// `n` coordinates, each within `[0, width) x [0, height)`.
pub fn extract_points(map: &DensityMap, n: usize) -> Result<Vec<Vec2>, FieldError> {
    Ok(partition(map, n)?.into_iter().map(Rect::center).collect())
}

/// Mass and first-moment prefix tables supporting centroid queries.
///
/// The point field places a target at each box's geometric center; the
/// correction from that center to the box's true mass centroid lets a caller
/// nudge targets onto the ink.
pub struct CentroidTable {
    mass: SummedArea,
    moment_x: Vec<f32>,
    moment_y: Vec<f32>,
    stride: usize,
}

impl CentroidTable {
    pub fn new(map: &DensityMap) -> Self {
        Self {
            mass: SummedArea::new(map),
            moment_x: prefix_table(map.width, map.height, |x, y| x as f32 * map.at(x, y)),
            moment_y: prefix_table(map.width, map.height, |x, y| y as f32 * map.at(x, y)),
            stride: map.width as usize + 1,
        }
    }

    fn moments(&self, rect: Rect) -> (f32, f32) {
        let (x0, y0) = (rect.x as usize, rect.y as usize);
        let (x1, y1) = ((rect.x + rect.w) as usize, (rect.y + rect.h) as usize);
        let corner = |t: &[f32], x: usize, y: usize| t[y * self.stride + x];
        let query = |t: &[f32]| {
            corner(t, x1, y1) - corner(t, x0, y1) - corner(t, x1, y0) + corner(t, x0, y0)
        };
        (query(&self.moment_x), query(&self.moment_y))
    }

    /// Offset from `reference` to the rectangle's mass centroid.
    ///
    /// A rectangle enclosing no mass has no centroid; callers typically skip
    /// the correction in that case.
    pub fn correction(&self, rect: Rect, reference: Vec2) -> Result<Vec2, FieldError> {
        let mass = self.mass.mass(rect);
        if mass <= 0.0 {
            return Err(FieldError::ZeroMassRegion {
                x: rect.x,
                y: rect.y,
                w: rect.w,
                h: rect.h,
            });
        }
        let (mx, my) = self.moments(rect);
        Ok(Vec2::new(mx / mass, my / mass) - reference)
    }
}
