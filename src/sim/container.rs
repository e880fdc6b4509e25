//! Convex polygon container
//!
//! Built once from a vertex list; each edge carries a precomputed inward
//! unit normal derived against the vertex centroid, so winding order does
//! not matter. Convexity is assumed, not checked: a concave input yields
//! normals that disagree with each other and bounces that make no sense.

use glam::Vec2;

use super::geometry::{derive_inward_normal, signed_distance_to_line};
use crate::error::{Error, Result};

/// One polygon edge from `a` to `b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: Vec2,
    pub b: Vec2,
    /// Unit normal pointing into the polygon (zero for a degenerate edge)
    pub normal: Vec2,
}

impl Edge {
    /// Zero-length edges have no usable collision direction
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec2::ZERO
    }
}

/// Immutable closed polygon holding the ball
#[derive(Debug, Clone)]
pub struct Container {
    vertices: Vec<Vec2>,
    edges: Vec<Edge>,
    centroid: Vec2,
}

impl Container {
    /// Minimum number of vertices for a closed polygon
    pub const MIN_VERTICES: usize = 3;

    /// Build the container; edge `i` joins vertex `i` to vertex `(i + 1) % n`
    pub fn new(vertices: &[Vec2]) -> Result<Self> {
        if vertices.len() < Self::MIN_VERTICES {
            return Err(Error::InvalidGeometry {
                vertices: vertices.len(),
            });
        }

        let centroid = vertices.iter().copied().sum::<Vec2>() / vertices.len() as f32;

        let edges: Vec<Edge> = (0..vertices.len())
            .map(|i| {
                let a = vertices[i];
                let b = vertices[(i + 1) % vertices.len()];
                Edge {
                    a,
                    b,
                    normal: derive_inward_normal(a, b, centroid),
                }
            })
            .collect();

        for (i, edge) in edges.iter().enumerate() {
            if edge.is_degenerate() {
                log::warn!("Edge {} is degenerate at {:?}; it will never collide", i, edge.a);
            }
        }

        Ok(Self {
            vertices: vertices.to_vec(),
            edges,
            centroid,
        })
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    #[inline]
    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether `p` lies on the inner side of every non-degenerate edge line
    pub fn contains(&self, p: Vec2) -> bool {
        self.edges
            .iter()
            .filter(|e| !e.is_degenerate())
            .all(|e| signed_distance_to_line(p, e.a, e.normal) >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn triangle() -> Vec<Vec2> {
        vec![
            Vec2::new(100.0, 500.0),
            Vec2::new(500.0, 500.0),
            Vec2::new(300.0, 100.0),
        ]
    }

    #[test]
    fn test_build_triangle() {
        let container = Container::new(&triangle()).unwrap();
        assert_eq!(container.len(), 3);
        assert!((container.centroid() - Vec2::new(300.0, 1100.0 / 3.0)).length() < 1e-3);

        // Bottom edge faces up (screen coords, y grows downward)
        let bottom = container.edges()[0];
        assert!((bottom.normal - Vec2::new(0.0, -1.0)).length() < 1e-6);

        // Closing edge wraps back to vertex 0
        let last = container.edges()[2];
        assert_eq!(last.a, Vec2::new(300.0, 100.0));
        assert_eq!(last.b, Vec2::new(100.0, 500.0));
    }

    #[test]
    fn test_too_few_vertices() {
        let err = Container::new(&triangle()[..2]).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { vertices: 2 }));

        let err = Container::new(&[]).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { vertices: 0 }));
    }

    #[test]
    fn test_degenerate_edge_has_zero_normal() {
        let verts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, 100.0),
        ];
        let container = Container::new(&verts).unwrap();
        assert!(container.edges()[1].is_degenerate());
        assert_eq!(container.edges().iter().filter(|e| e.is_degenerate()).count(), 1);
    }

    #[test]
    fn test_contains() {
        let container = Container::new(&triangle()).unwrap();
        assert!(container.contains(container.centroid()));
        assert!(!container.contains(Vec2::new(300.0, 520.0)));
        assert!(!container.contains(Vec2::new(50.0, 50.0)));
    }

    /// Regular n-gon with an arbitrary rotation, optionally wound clockwise
    fn regular_polygon(n: usize, radius: f32, rotation: f32, clockwise: bool) -> Vec<Vec2> {
        let center = Vec2::new(400.0, 300.0);
        let mut verts: Vec<Vec2> = (0..n)
            .map(|i| {
                let theta = rotation + i as f32 * std::f32::consts::TAU / n as f32;
                center + Vec2::new(theta.cos(), theta.sin()) * radius
            })
            .collect();
        if clockwise {
            verts.reverse();
        }
        verts
    }

    proptest! {
        #[test]
        fn prop_normals_unit_and_inward(
            n in 3usize..12,
            radius in 10.0f32..500.0,
            rotation in 0.0f32..std::f32::consts::TAU,
            clockwise in any::<bool>(),
        ) {
            let container = Container::new(&regular_polygon(n, radius, rotation, clockwise)).unwrap();
            for edge in container.edges() {
                prop_assert!((edge.normal.length() - 1.0).abs() < 1e-4);
                let to_centroid = container.centroid() - (edge.a + edge.b) * 0.5;
                prop_assert!(edge.normal.dot(to_centroid) > 0.0);
            }
        }
    }
}
