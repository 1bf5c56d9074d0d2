//! Row offset legend.

use crate::model::Geometry;

/// Byte offsets of the first column of each visible row.
///
/// The i-th value is `(starting_row + i) * cols`. Always `rows` long, even when
/// the chunk behind it is short. Computed fresh for every render pass.
pub fn legend_offsets(starting_row: u64, geometry: Geometry) -> Vec<u64> {
    let cols = u64::from(geometry.cols());
    (0..u64::from(geometry.rows()))
        .map(|i| starting_row.saturating_add(i).saturating_mul(cols))
        .collect()
}

/// Legend label: eight uppercase hex digits, wider when the offset needs it.
pub fn format_offset(offset: u64) -> String {
    format!("{:08X}", offset)
}
