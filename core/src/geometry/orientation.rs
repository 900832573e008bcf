use crate::types::{ChainCode, Direction, OrientationDecision, Point, Side};

/// Direction remap under reflection across the vertical axis, indexed by digit
///
/// 1<->7, 2<->6 and 3<->5 swap; 0 and 4 have no horizontal component.
pub const MIRROR_TABLE: [Direction; 8] = [
    Direction::Up,
    Direction::UpLeft,
    Direction::Left,
    Direction::DownLeft,
    Direction::Down,
    Direction::DownRight,
    Direction::Right,
    Direction::UpRight,
];

/// Reflects one direction across the vertical axis
pub fn mirror_direction(direction: Direction) -> Direction {
    MIRROR_TABLE[direction.digit() as usize]
}

/// Reflects a chain code horizontally inside an image of width `image_width`
///
/// The anchor column becomes `image_width - column`; the row is kept. Each
/// step is looked up once in [`MIRROR_TABLE`], so a mirrored digit is never
/// remapped a second time.
pub fn mirror_chain_code(code: &ChainCode, image_width: u32) -> ChainCode {
    let anchor = code.anchor();
    let directions = code.directions().iter().copied().map(mirror_direction).collect();
    ChainCode::new(
        Point::new(i64::from(image_width) - anchor.column, anchor.row),
        directions,
    )
}

/// Normalizes a chain code so the breast sits on the left of the frame
///
/// Returns the (possibly mirrored) chain code together with the decision, so
/// the caller can flip the image the same way.
///
/// # Example
///
/// ```
/// use mammoprep_core::geometry::normalize_orientation;
/// use mammoprep_core::{ChainCode, OrientationDecision, Side};
///
/// let code: ChainCode = "10 40 1 2 3 6".parse().unwrap();
/// let (mirrored, decision) = normalize_orientation(&code, Side::Left, 100);
/// assert_eq!(decision, OrientationDecision::Mirror);
/// assert_eq!(mirrored.to_string(), "90 40 7 6 5 2");
/// ```
pub fn normalize_orientation(
    code: &ChainCode,
    blank_side: Side,
    image_width: u32,
) -> (ChainCode, OrientationDecision) {
    let decision = OrientationDecision::from_blank_side(blank_side);
    let code = match decision {
        OrientationDecision::Mirror => mirror_chain_code(code, image_width),
        OrientationDecision::NoMirror => code.clone(),
    };
    (code, decision)
}
