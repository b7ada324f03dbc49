//! Border following with full hierarchy retrieval.
//!
//! Borders are traced by `imageproc::contours::find_contours` (Suzuki & Abe,
//! 1985): every outer border and hole border of the 8-connected foreground
//! is found once, together with the border that immediately encloses it.
//! The result is re-packed as a flat arena ([`ContourTree`]) with index
//! links.
//!
//! The mask is copied into a raster with a one-pixel background frame, so
//! foreground touching the image edge still yields closed borders.

use imageproc::contours::BorderType;
use serde::{Deserialize, Serialize};

use crate::mask::BinaryMask;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Integer pixel coordinate on a traced border.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContourPoint {
    pub x: i32,
    pub y: i32,
}

impl ContourPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Ordered closed polyline; point order is the trace order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<ContourPoint>,
}

impl Contour {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Which side of the foreground a border separates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContourKind {
    /// Border between a foreground component and the background surrounding it.
    Outer,
    /// Border between a foreground component and a background hole inside it.
    Hole,
}

impl From<BorderType> for ContourKind {
    fn from(border: BorderType) -> Self {
        match border {
            BorderType::Outer => ContourKind::Outer,
            BorderType::Hole => ContourKind::Hole,
        }
    }
}

/// How many border pixels are kept per traced contour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContourApproximation {
    /// Every border pixel, in trace order.
    None,
    /// Only the trace start and the pixels where the step direction changes.
    #[default]
    Simple,
}

/// One traced border plus its hierarchy links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContourNode {
    pub contour: Contour,
    pub kind: ContourKind,
    /// Index of the immediately enclosing border, `None` for topmost borders.
    pub parent: Option<usize>,
    /// `true` if at least one other border names this one as its parent.
    pub has_child: bool,
}

impl ContourNode {
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Arena of traced borders in extraction (raster-scan) order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContourTree {
    nodes: Vec<ContourNode>,
}

impl ContourTree {
    #[inline]
    pub fn nodes(&self) -> &[ContourNode] {
        &self.nodes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<ContourNode> {
        self.nodes
    }
}

/// Copy `mask` into an 8-bit raster with a one-pixel background frame.
fn padded_raster(mask: &BinaryMask) -> ::image::GrayImage {
    let (w, h) = (mask.width as u32, mask.height as u32);
    ::image::GrayImage::from_fn(w + 2, h + 2, |x, y| {
        let inside = (1..=w).contains(&x) && (1..=h).contains(&y);
        if inside && mask.get((x - 1) as usize, (y - 1) as usize) {
            ::image::Luma([255])
        } else {
            ::image::Luma([0])
        }
    })
}

/// Keep the trace start and every pixel where the step direction changes.
fn compress_chain(points: Vec<ContourPoint>) -> Vec<ContourPoint> {
    let n = points.len();
    if n <= 2 {
        return points;
    }
    let delta = |a: ContourPoint, b: ContourPoint| (b.x - a.x, b.y - a.y);
    let mut out = Vec::with_capacity(n / 2 + 1);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        if i == 0 || delta(prev, cur) != delta(cur, next) {
            out.push(cur);
        }
    }
    out
}

/// Trace every border of `mask` and build the nesting hierarchy.
///
/// Borders are returned in raster-scan discovery order. A mask without any
/// foreground yields an empty tree.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(mask), fields(width = mask.width, height = mask.height))
)]
pub fn find_contours(mask: &BinaryMask, approximation: ContourApproximation) -> ContourTree {
    let raster = padded_raster(mask);
    let traced = imageproc::contours::find_contours::<i32>(&raster);

    let mut nodes: Vec<ContourNode> = traced
        .into_iter()
        .map(|c| {
            let points: Vec<ContourPoint> = c
                .points
                .iter()
                .map(|p| ContourPoint::new(p.x - 1, p.y - 1))
                .collect();
            ContourNode {
                contour: Contour {
                    points: match approximation {
                        ContourApproximation::None => points,
                        ContourApproximation::Simple => compress_chain(points),
                    },
                },
                kind: c.border_type.into(),
                parent: c.parent,
                has_child: false,
            }
        })
        .collect();

    let parents: Vec<usize> = nodes.iter().filter_map(|n| n.parent).collect();
    for parent in parents {
        nodes[parent].has_child = true;
    }

    log::trace!("traced {} borders", nodes.len());
    ContourTree { nodes }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ring(size: usize, outer: (usize, usize), inner: (usize, usize)) -> BinaryMask {
        BinaryMask::from_fn(size, size, |x, y| {
            let in_outer = (outer.0..=outer.1).contains(&x) && (outer.0..=outer.1).contains(&y);
            let in_inner = (inner.0..=inner.1).contains(&x) && (inner.0..=inner.1).contains(&y);
            in_outer && !in_inner
        })
    }

    #[test]
    fn empty_mask_has_no_contours() {
        let tree = find_contours(&BinaryMask::new(16, 16), ContourApproximation::None);
        assert!(tree.is_empty());
    }

    #[test]
    fn single_pixel_is_one_point_contour() {
        let mut mask = BinaryMask::new(5, 5);
        mask.set(2, 3, true);
        let tree = find_contours(&mask, ContourApproximation::None);
        assert_eq!(tree.len(), 1);
        let node = &tree.nodes()[0];
        assert_eq!(node.kind, ContourKind::Outer);
        assert_eq!(node.contour.points, vec![ContourPoint::new(2, 3)]);
        assert!(node.parent.is_none());
        assert!(!node.has_child);
    }

    #[test]
    fn filled_rectangle_traces_its_perimeter() {
        let mask = BinaryMask::from_fn(10, 10, |x, y| (2..=6).contains(&x) && (3..=5).contains(&y));
        let tree = find_contours(&mask, ContourApproximation::None);
        assert_eq!(tree.len(), 1);
        let node = &tree.nodes()[0];
        // 5x3 block: 2*5 + 2*(3-2) border pixels.
        assert_eq!(node.contour.len(), 12);
        assert_eq!(node.contour.points[0], ContourPoint::new(2, 3));
        assert!(!node.has_child);

        let simple = find_contours(&mask, ContourApproximation::Simple);
        let mut corners = simple.nodes()[0].contour.points.clone();
        corners.sort_by_key(|p| (p.y, p.x));
        assert_eq!(
            corners,
            vec![
                ContourPoint::new(2, 3),
                ContourPoint::new(6, 3),
                ContourPoint::new(2, 5),
                ContourPoint::new(6, 5),
            ]
        );
    }

    #[test]
    fn consecutive_points_are_eight_neighbours() {
        let mask = square_ring(24, (3, 20), (9, 14));
        let tree = find_contours(&mask, ContourApproximation::None);
        for node in tree.nodes() {
            let pts = &node.contour.points;
            for i in 0..pts.len() {
                let a = pts[i];
                let b = pts[(i + 1) % pts.len()];
                let (dx, dy) = ((b.x - a.x).abs(), (b.y - a.y).abs());
                assert!(dx <= 1 && dy <= 1 && (dx, dy) != (0, 0), "{a:?} -> {b:?}");
            }
        }
    }

    #[test]
    fn ring_produces_outer_with_hole_child() {
        let mask = square_ring(20, (2, 17), (7, 12));
        let tree = find_contours(&mask, ContourApproximation::None);
        assert_eq!(tree.len(), 2);

        let outer = &tree.nodes()[0];
        assert_eq!(outer.kind, ContourKind::Outer);
        assert!(outer.parent.is_none());
        assert!(outer.has_child);

        let hole = &tree.nodes()[1];
        assert_eq!(hole.kind, ContourKind::Hole);
        assert_eq!(hole.parent, Some(0));
        assert!(!hole.has_child);

        // Pixels 4-adjacent to the 6x6 gap; the diagonal corners are skipped.
        assert_eq!(hole.contour.len(), 4 * 6);
    }

    #[test]
    fn island_inside_hole_nests_three_levels() {
        let mut mask = square_ring(30, (1, 28), (6, 23));
        for y in 12..=17 {
            for x in 12..=17 {
                mask.set(x, y, true);
            }
        }
        let tree = find_contours(&mask, ContourApproximation::Simple);
        assert_eq!(tree.len(), 3);
        let kinds: Vec<_> = tree.nodes().iter().map(|n| (n.kind, n.parent)).collect();
        assert_eq!(
            kinds,
            vec![
                (ContourKind::Outer, None),
                (ContourKind::Hole, Some(0)),
                (ContourKind::Outer, Some(1)),
            ]
        );
        assert!(tree.nodes()[0].has_child);
        assert!(tree.nodes()[1].has_child);
        assert!(!tree.nodes()[2].has_child);
    }

    #[test]
    fn disjoint_blobs_are_separate_roots_in_scan_order() {
        let mask = BinaryMask::from_fn(20, 10, |x, y| {
            ((1..=4).contains(&x) && (5..=8).contains(&y)) || ((10..=15).contains(&x) && (1..=3).contains(&y))
        });
        let tree = find_contours(&mask, ContourApproximation::Simple);
        assert_eq!(tree.len(), 2);
        assert!(tree.nodes().iter().all(|n| n.is_root() && !n.has_child));
        // The upper blob is met first by the raster scan.
        assert_eq!(tree.nodes()[0].contour.points[0], ContourPoint::new(10, 1));
    }

    #[test]
    fn foreground_touching_the_edge_is_closed() {
        let mask = BinaryMask::from_fn(6, 6, |_, _| true);
        let tree = find_contours(&mask, ContourApproximation::None);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.nodes()[0].contour.len(), 20);
        assert!(tree.nodes()[0].is_root());
    }

    #[test]
    fn ring_filling_the_frame_keeps_mask_coordinates() {
        let mask = square_ring(12, (0, 11), (4, 7));
        let tree = find_contours(&mask, ContourApproximation::None);
        assert_eq!(tree.len(), 2);

        let outer = &tree.nodes()[0];
        assert_eq!(outer.kind, ContourKind::Outer);
        assert!(outer.is_root() && outer.has_child);
        assert_eq!(outer.contour.points[0], ContourPoint::new(0, 0));
        assert_eq!(outer.contour.len(), 4 * 11);
        assert!(outer
            .contour
            .points
            .iter()
            .all(|p| (0..12).contains(&p.x) && (0..12).contains(&p.y)));

        let hole = &tree.nodes()[1];
        assert_eq!(hole.kind, ContourKind::Hole);
        assert_eq!(hole.parent, Some(0));
    }
}
