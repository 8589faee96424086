//! Battery level mapping.

use crate::config::{VBAT_EMPTY_MV, VBAT_FULL_MV};

/// Map a cell voltage linearly onto 0..=100 %, clamping outside the range.
pub fn percent(millivolts: u16) -> u8 {
    if millivolts <= VBAT_EMPTY_MV {
        return 0;
    }
    if millivolts >= VBAT_FULL_MV {
        return 100;
    }

    let span = u32::from(VBAT_FULL_MV - VBAT_EMPTY_MV);
    let above = u32::from(millivolts - VBAT_EMPTY_MV);
    (above * 100 / span) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_below_empty_and_above_full() {
        assert_eq!(percent(0), 0);
        assert_eq!(percent(VBAT_EMPTY_MV), 0);
        assert_eq!(percent(VBAT_FULL_MV), 100);
        assert_eq!(percent(4200), 100);
    }

    #[test]
    fn maps_linearly_in_between() {
        assert_eq!(percent(3050), 50);
        assert_eq!(percent(2925), 25);
        assert_eq!(percent(3299), 99);
    }
}
