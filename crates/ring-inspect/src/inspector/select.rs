use ring_inspect_core::{ContourNode, ContourTree};

use super::InspectError;

/// `true` for a topmost border that encloses at least one nested border.
#[inline]
pub(crate) fn is_ring_outer(node: &ContourNode) -> bool {
    node.parent.is_none() && node.has_child
}

/// Index of the ring's outer rim: the first node, in extraction order, with
/// no parent and at least one child (the centre hole).
///
/// First match wins. With several ring-like shapes only the first one met
/// by the raster scan is inspected.
pub fn select_outer(tree: &ContourTree) -> Result<usize, InspectError> {
    tree.nodes()
        .iter()
        .position(is_ring_outer)
        .ok_or(InspectError::NoRingDetected {
            contours: tree.len(),
        })
}
