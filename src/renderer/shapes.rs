//! Shape generation for the show
//!
//! Builds one frame's triangle list from simulation state: a circle fan
//! and a trailing streak per rocket, a translucent circle fan per spark.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::color;
use crate::consts::{ROCKET_HEAD_RADIUS, ROCKET_TAIL_LENGTH, ROCKET_TAIL_WIDTH};
use crate::sim::ShowState;

/// Fan resolution for rocket heads
const ROCKET_SEGMENTS: u32 = 16;
/// Sparks are small; a coarser fan is invisible at their size
const SPARK_SEGMENTS: u32 = 10;

/// Palette entries resolved from hex once per session.
///
/// Malformed entries resolve to white here, so a bad config shows up as
/// white fireworks rather than a failed draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPalette {
    colors: Vec<[f32; 3]>,
}

impl ResolvedPalette {
    pub fn new(entries: &[String]) -> Self {
        Self {
            colors: entries
                .iter()
                .map(|hex| {
                    let [r, g, b, _] = color::rgba(hex, 1.0);
                    [r, g, b]
                })
                .collect(),
        }
    }

    /// Render color for a palette index at the given opacity.
    /// Out-of-range indices also fall back to white.
    pub fn rgba(&self, index: u32, alpha: f32) -> [f32; 4] {
        match self.colors.get(index as usize) {
            Some(&[r, g, b]) => [r, g, b, alpha],
            None => [1.0, 1.0, 1.0, alpha],
        }
    }
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a line segment drawn as a quad of the given width
pub fn streak(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = from + perp;
    let a2 = from - perp;
    let b1 = to + perp;
    let b2 = to - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Build the frame's full triangle list from current show state.
///
/// Reads the simulation without touching it; calling this twice on
/// unchanged state yields identical geometry.
pub fn frame_vertices(state: &ShowState, palette: &ResolvedPalette) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        state.rockets.len() * ((ROCKET_SEGMENTS * 3 + 6) as usize)
            + state.sparks.len() * (SPARK_SEGMENTS * 3) as usize,
    );

    for rocket in &state.rockets {
        let rgba = palette.rgba(rocket.color, 1.0);
        vertices.extend(circle(rocket.pos, ROCKET_HEAD_RADIUS, rgba, ROCKET_SEGMENTS));
        // Tail points back toward the launch edge
        vertices.extend(streak(
            rocket.pos,
            rocket.pos + Vec2::new(0.0, ROCKET_TAIL_LENGTH),
            ROCKET_TAIL_WIDTH,
            rgba,
        ));
    }

    for spark in &state.sparks {
        let rgba = palette.rgba(spark.color, spark.alpha);
        vertices.extend(circle(spark.pos, spark.size, rgba, SPARK_SEGMENTS));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DEFAULT_PALETTE;
    use crate::sim::{Spark, tick};

    fn palette() -> ResolvedPalette {
        let entries: Vec<String> = DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect();
        ResolvedPalette::new(&entries)
    }

    #[test]
    fn test_circle_vertex_count() {
        let v = circle(Vec2::ZERO, 5.0, [1.0; 4], 12);
        assert_eq!(v.len(), 36);
    }

    #[test]
    fn test_streak_is_one_quad() {
        let v = streak(Vec2::ZERO, Vec2::new(0.0, 20.0), 2.0, [1.0; 4]);
        assert_eq!(v.len(), 6);
        // Endpoints spread half the width to each side
        assert_eq!(v[0].position, [-1.0, 0.0]);
        assert_eq!(v[1].position, [1.0, 0.0]);
    }

    #[test]
    fn test_empty_show_empty_geometry() {
        let state = ShowState::new(800.0, 600.0, 6, 1);
        assert!(frame_vertices(&state, &palette()).is_empty());
    }

    #[test]
    fn test_rocket_geometry_head_plus_tail() {
        let mut state = ShowState::new(800.0, 600.0, 6, 1);
        state.spawn_rocket();
        let v = frame_vertices(&state, &palette());
        assert_eq!(v.len(), (ROCKET_SEGMENTS * 3 + 6) as usize);
        // Rockets draw fully opaque
        assert!(v.iter().all(|vert| vert.color[3] == 1.0));
    }

    #[test]
    fn test_spark_geometry_carries_alpha() {
        let mut state = ShowState::new(800.0, 600.0, 6, 1);
        state.sparks.push(Spark {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::ZERO,
            color: 3,
            alpha: 0.4,
            decay: 0.02,
            size: 2.5,
        });
        let v = frame_vertices(&state, &palette());
        assert_eq!(v.len(), (SPARK_SEGMENTS * 3) as usize);
        assert!(v.iter().all(|vert| vert.color[3] == 0.4));
    }

    #[test]
    fn test_frame_vertices_idempotent() {
        let mut state = ShowState::new(800.0, 600.0, 6, 9);
        state.spawn_rocket();
        state.explode(300.0, 200.0, 2);
        for _ in 0..3 {
            tick(&mut state);
        }

        let p = palette();
        assert_eq!(frame_vertices(&state, &p), frame_vertices(&state, &p));
    }

    #[test]
    fn test_malformed_palette_entry_renders_white() {
        let entries = vec!["#d4af37".to_string(), "garbage".to_string()];
        let p = ResolvedPalette::new(&entries);
        assert_eq!(p.rgba(1, 1.0), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(p.rgba(7, 0.5), [1.0, 1.0, 1.0, 0.5]);
        // The valid entry still resolves
        assert!((p.rgba(0, 1.0)[0] - 0xd4 as f32 / 255.0).abs() < 1e-6);
    }
}
