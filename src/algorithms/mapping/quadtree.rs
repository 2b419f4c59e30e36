//! Quadtree occupancy index over a floor-plan polygon.
//!
//! The floor plan is compressed into a quadtree over a square region
//! covering its bounding box. Uniform areas collapse into single leaves,
//! so open rooms cost one node while walls resolve down to `cell_size`.
//! The tree is built once and never mutated; queries need no locking.

use crate::core::types::Point2D;
use crate::error::{Error, Result};

use super::polygon::Polygon;

/// One quadtree node.
///
/// `Quad` children are ordered NW, NE, SW, SE, where north is +Y.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Entirely outside the floor plan.
    Empty,
    /// Entirely inside the floor plan.
    Full,
    /// Mixed occupancy, resolved by the four children.
    Quad(Box<[Node; 4]>),
}

impl Node {
    /// Total node count including this one.
    pub fn count(&self) -> usize {
        match self {
            Node::Empty | Node::Full => 1,
            Node::Quad(children) => 1 + children.iter().map(Node::count).sum::<usize>(),
        }
    }

    /// Leaf count below and including this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Empty | Node::Full => 1,
            Node::Quad(children) => children.iter().map(Node::leaf_count).sum(),
        }
    }
}

/// Immutable inside/outside index for a floor-plan polygon.
///
/// Safe to share read-only across threads; pose search queries it
/// concurrently without synchronization.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    root: Node,
    /// Minimum corner of the covered square region (bounding box min).
    origin: Point2D,
    /// Side length of the covered square region, meters.
    side: f32,
    /// Leaf resolution, meters.
    cell_size: f32,
    /// Bounding-box width in cells.
    width: usize,
    /// Bounding-box height in cells.
    height: usize,
}

impl OccupancyGrid {
    /// Build the index for a floor plan.
    ///
    /// Fails with `InvalidInput` for fewer than three vertices, a
    /// non-positive cell size, or a polygon without any extent.
    pub fn from_polygon(vertices: &[Point2D], cell_size: f32) -> Result<Self> {
        if !(cell_size > 0.0) {
            return Err(Error::InvalidInput(format!(
                "cell size must be positive, got {cell_size}"
            )));
        }
        let polygon = Polygon::new(vertices.to_vec())?;
        let (min, max) = polygon.bounding_box();
        let bbox_w = max.x - min.x;
        let bbox_h = max.y - min.y;
        let extent = bbox_w.max(bbox_h);
        if !(extent > 0.0) {
            return Err(Error::InvalidInput(
                "floor plan has no spatial extent".to_string(),
            ));
        }

        // Round the square region up to a whole number of cells.
        let side = (extent / cell_size).ceil() * cell_size;
        let root = build(&polygon, min, side, cell_size);

        Ok(Self {
            root,
            origin: min,
            side,
            cell_size,
            width: ((bbox_w / cell_size).ceil() as usize).max(1),
            height: ((bbox_h / cell_size).ceil() as usize).max(1),
        })
    }

    /// Leaf resolution, meters.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Minimum corner of the covered region.
    pub fn origin(&self) -> Point2D {
        self.origin
    }

    /// Side length of the covered square region, meters.
    pub fn extent(&self) -> f32 {
        self.side
    }

    /// Floor-plan bounding-box width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Floor-plan bounding-box height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total node count, a measure of how well the plan compressed.
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Leaf count.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// True if world position (x, y) lies inside the floor plan.
    ///
    /// Positions outside the covered region are simply unoccupied,
    /// never an error.
    pub fn is_occupied(&self, x: f32, y: f32) -> bool {
        if x < self.origin.x
            || y < self.origin.y
            || x > self.origin.x + self.side
            || y > self.origin.y + self.side
        {
            return false;
        }

        let mut node = &self.root;
        let mut min = self.origin;
        let mut side = self.side;
        loop {
            match node {
                Node::Empty => return false,
                Node::Full => return true,
                Node::Quad(children) => {
                    side *= 0.5;
                    let mid_x = min.x + side;
                    let mid_y = min.y + side;
                    let idx = match (x < mid_x, y < mid_y) {
                        (true, false) => 0,  // NW
                        (false, false) => 1, // NE
                        (true, true) => 2,   // SW
                        (false, true) => 3,  // SE
                    };
                    if x >= mid_x {
                        min.x = mid_x;
                    }
                    if y >= mid_y {
                        min.y = mid_y;
                    }
                    node = &children[idx];
                }
            }
        }
    }
}

/// Recursively classify the square at `min` with side `side`.
///
/// A square no polygon edge touches is uniformly inside or outside, so
/// its center decides the leaf. Squares at or below the cell size stop
/// subdividing and are resolved by their center as well.
fn build(polygon: &Polygon, min: Point2D, side: f32, cell_size: f32) -> Node {
    let crossed = polygon.intersects_square(&min, side);
    if !crossed || side <= cell_size {
        let center = Point2D::new(min.x + side * 0.5, min.y + side * 0.5);
        return if polygon.contains(&center) {
            Node::Full
        } else {
            Node::Empty
        };
    }

    let half = side * 0.5;
    let mid_x = min.x + half;
    let mid_y = min.y + half;
    Node::Quad(Box::new([
        build(polygon, Point2D::new(min.x, mid_y), half, cell_size),
        build(polygon, Point2D::new(mid_x, mid_y), half, cell_size),
        build(polygon, Point2D::new(min.x, min.y), half, cell_size),
        build(polygon, Point2D::new(mid_x, min.y), half, cell_size),
    ]))
}
