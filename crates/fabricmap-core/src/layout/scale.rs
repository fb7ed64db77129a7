// ── Density-driven scale ──
//
// Pure functions of node count, AP count and level count.

/// Glyph scale and vertical slot gap for a given density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    pub scale_factor: f64,
    pub vertical_gap: f64,
}

/// Sites with this many APs get at least [`CROWDED_AP_GAP`] between slots.
const CROWDED_AP_COUNT: usize = 40;
const CROWDED_AP_GAP: f64 = 90.0;

pub fn density(node_count: usize, ap_count: usize) -> Density {
    let (scale_factor, mut vertical_gap) = match node_count {
        0..=10 => (0.65, 50.0),
        11..=30 => (0.70, 48.0),
        31..=60 => (1.00, 80.0),
        _ => (1.10, 85.0),
    };
    if ap_count > CROWDED_AP_COUNT {
        vertical_gap = f64::max(vertical_gap, CROWDED_AP_GAP);
    }
    Density {
        scale_factor,
        vertical_gap,
    }
}

/// Horizontal distance between adjacent depth levels.
pub fn horizontal_gap(level_count: usize) -> f64 {
    match level_count {
        0..=3 => 650.0,
        4 => 700.0,
        _ => 750.0,
    }
}
