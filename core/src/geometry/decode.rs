use crate::types::{BoundingExtent, ChainCode, Point};

/// Lazily walks a chain code, yielding the anchor and then one point per step
///
/// Each step is applied to the running position. Points outside the image
/// are yielded as-is; clipping is up to the consumer.
pub fn trace_iter(code: &ChainCode) -> impl Iterator<Item = Point> + '_ {
    let anchor = code.anchor();
    std::iter::once(anchor).chain(code.directions().iter().scan(anchor, |position, &d| {
        *position = position.step(d);
        Some(*position)
    }))
}

/// Decodes a chain code into its full point sequence
///
/// # Example
///
/// ```
/// use mammoprep_core::{geometry::trace, ChainCode, Point};
///
/// let code: ChainCode = "10 20 2 2 4".parse().unwrap();
/// assert_eq!(
///     trace(&code),
///     vec![Point::new(10, 20), Point::new(11, 20), Point::new(12, 20), Point::new(12, 21)]
/// );
/// ```
pub fn trace(code: &ChainCode) -> Vec<Point> {
    trace_iter(code).collect()
}

/// Computes the bounding extent of a traced chain code, anchor included
pub fn bounding_extent(code: &ChainCode) -> BoundingExtent {
    let mut extent = BoundingExtent::at(code.anchor());
    for point in trace_iter(code).skip(1) {
        extent.include(point);
    }
    extent
}
