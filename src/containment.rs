use crate::geometry::Rect;

/// Trait for node geometry data needed for containment queries
pub trait NodeGeometry {
    fn id(&self) -> i32;
    fn rect(&self) -> Rect;
}

/// Simple implementation of NodeGeometry
#[derive(Debug, Clone, Copy)]
pub struct SimpleNodeGeometry {
    pub id: i32,
    pub rect: Rect,
}

impl NodeGeometry for SimpleNodeGeometry {
    fn id(&self) -> i32 { self.id }
    fn rect(&self) -> Rect { self.rect }
}

/// Check whether `inner` lies entirely within `outer`.
///
/// Touching edges count as inside. A rectangle never contains itself, so
/// `is_contained(a, a)` is `false`.
pub fn is_contained(outer: &Rect, inner: &Rect) -> bool {
    outer != inner && outer.contains_rect(inner)
}

/// Find all nodes fully contained in a group rectangle.
///
/// The group node itself is skipped by id even when it appears in `candidates`.
pub fn contained_nodes<N, I>(group_id: i32, group_rect: &Rect, candidates: I) -> Vec<i32>
where
    N: NodeGeometry,
    I: IntoIterator<Item = N>,
{
    candidates
        .into_iter()
        .filter(|node| node.id() != group_id && is_contained(group_rect, &node.rect()))
        .map(|node| node.id())
        .collect()
}

/// Smallest rectangle covering every given node, or `None` for no nodes.
pub fn bounding_rect<N, I>(nodes: I) -> Option<Rect>
where
    N: NodeGeometry,
    I: IntoIterator<Item = N>,
{
    nodes
        .into_iter()
        .map(|node| node.rect())
        .reduce(|acc, r| acc.union(&r))
}
