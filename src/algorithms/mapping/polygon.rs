//! Floor-plan polygon with containment and edge queries.

use crate::core::types::Point2D;
use crate::error::{Error, Result};

/// Simple closed polygon given as an ordered vertex list.
///
/// The boundary closes implicitly from the last vertex back to the
/// first. Holes and self-intersections are not supported.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<Point2D>,
}

impl Polygon {
    /// Create a polygon; fails for fewer than three vertices.
    pub fn new(vertices: Vec<Point2D>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::InvalidInput(format!(
                "floor plan needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        Ok(Self { vertices })
    }

    /// Vertex list in input order.
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Axis-aligned bounding box as (min, max) corners.
    pub fn bounding_box(&self) -> (Point2D, Point2D) {
        let mut min = Point2D::new(f32::INFINITY, f32::INFINITY);
        let mut max = Point2D::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for v in &self.vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        (min, max)
    }

    /// Even-odd ray-cast containment test.
    pub fn contains(&self, p: &Point2D) -> bool {
        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.y > p.y) != (b.y > p.y)
                && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// True if any polygon edge touches the closed square with minimum
    /// corner `min` and side length `side`.
    pub fn intersects_square(&self, min: &Point2D, side: f32) -> bool {
        let max = Point2D::new(min.x + side, min.y + side);
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            if segment_intersects_box(&self.vertices[j], &self.vertices[i], min, &max) {
                return true;
            }
            j = i;
        }
        false
    }
}

/// Liang-Barsky clip of segment a-b against the closed box [min, max].
fn segment_intersects_box(a: &Point2D, b: &Point2D, min: &Point2D, max: &Point2D) -> bool {
    let d = *b - *a;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for (p, q) in [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ] {
        if p.abs() < f32::EPSILON {
            // Parallel to this boundary; outside means no hit at all.
            if q < 0.0 {
                return false;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return false;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return false;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 4.0),
            Point2D::new(0.0, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_too_few_vertices() {
        let result = Polygon::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_contains_square() {
        let poly = square();
        assert!(poly.contains(&Point2D::new(2.0, 2.0)));
        assert!(poly.contains(&Point2D::new(0.5, 3.5)));
        assert!(!poly.contains(&Point2D::new(-0.5, 2.0)));
        assert!(!poly.contains(&Point2D::new(2.0, 4.5)));
    }

    #[test]
    fn test_contains_concave() {
        // L shape with a notch in the upper right quadrant.
        let poly = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 2.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(2.0, 4.0),
            Point2D::new(0.0, 4.0),
        ])
        .unwrap();

        assert!(poly.contains(&Point2D::new(1.0, 3.0)));
        assert!(poly.contains(&Point2D::new(3.0, 1.0)));
        assert!(!poly.contains(&Point2D::new(3.0, 3.0)));
    }

    #[test]
    fn test_bounding_box() {
        let poly = Polygon::new(vec![
            Point2D::new(-1.0, 2.0),
            Point2D::new(3.0, -0.5),
            Point2D::new(2.0, 4.0),
        ])
        .unwrap();

        let (min, max) = poly.bounding_box();
        assert_eq!(min, Point2D::new(-1.0, -0.5));
        assert_eq!(max, Point2D::new(3.0, 4.0));
    }

    #[test]
    fn test_intersects_square() {
        let poly = square();
        // Square straddling the left edge.
        assert!(poly.intersects_square(&Point2D::new(-0.5, 1.0), 1.0));
        // Square fully inside, away from all edges.
        assert!(!poly.intersects_square(&Point2D::new(1.5, 1.5), 1.0));
        // Square fully outside.
        assert!(!poly.intersects_square(&Point2D::new(10.0, 10.0), 1.0));
        // Square containing a whole edge run.
        assert!(poly.intersects_square(&Point2D::new(-1.0, -1.0), 6.0));
    }

    #[test]
    fn test_segment_intersects_box() {
        let min = Point2D::new(0.0, 0.0);
        let max = Point2D::new(1.0, 1.0);

        // Crossing diagonally.
        assert!(segment_intersects_box(
            &Point2D::new(-1.0, -1.0),
            &Point2D::new(2.0, 2.0),
            &min,
            &max
        ));
        // Fully inside.
        assert!(segment_intersects_box(
            &Point2D::new(0.2, 0.2),
            &Point2D::new(0.8, 0.8),
            &min,
            &max
        ));
        // Missing on one side.
        assert!(!segment_intersects_box(
            &Point2D::new(2.0, 0.0),
            &Point2D::new(2.0, 1.0),
            &min,
            &max
        ));
        // Touching a corner exactly.
        assert!(segment_intersects_box(
            &Point2D::new(1.0, 1.0),
            &Point2D::new(2.0, 2.0),
            &min,
            &max
        ));
    }
}
