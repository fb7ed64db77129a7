// ── Link routing ──

use crate::model::{CubicCurve, LayoutNode};

/// Gap between a node glyph and where its link starts.
pub const ANCHOR_PADDING: f64 = 18.0;

/// Minimum horizontal pull of a control point.
const MIN_CONTROL_OFFSET: f64 = 60.0;

/// Share of the vertical separation used as control-point bend.
const VERTICAL_BEND: f64 = 0.25;

/// S-curve from `from` to `to`, anchored just outside both glyphs.
///
/// Anchors move horizontally toward the other node; nodes stacked in the same
/// column anchor vertically instead.
pub fn route(from: &LayoutNode, to: &LayoutNode, scale_factor: f64) -> CubicCurve {
    let from_reach = from.kind.footprint() * scale_factor / 2.0 + ANCHOR_PADDING;
    let to_reach = to.kind.footprint() * scale_factor / 2.0 + ANCHOR_PADDING;

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let horizontal = if dx < 0.0 { -1.0 } else { 1.0 };

    let ((start_x, start_y), (end_x, end_y)) = if dx.abs() > f64::EPSILON {
        (
            (from.x + horizontal * from_reach, from.y),
            (to.x - horizontal * to_reach, to.y),
        )
    } else {
        let vertical = if dy < 0.0 { -1.0 } else { 1.0 };
        (
            (from.x, from.y + vertical * from_reach),
            (to.x, to.y - vertical * to_reach),
        )
    };

    let span_x = end_x - start_x;
    let span_y = end_y - start_y;
    let pull = horizontal * f64::max(MIN_CONTROL_OFFSET, span_x.abs() / 2.0);
    let bend = VERTICAL_BEND * span_y;

    CubicCurve {
        start_x,
        start_y,
        ctrl1_x: start_x + pull,
        ctrl1_y: start_y + bend,
        ctrl2_x: end_x - pull,
        ctrl2_y: end_y - bend,
        end_x,
        end_y,
    }
}
