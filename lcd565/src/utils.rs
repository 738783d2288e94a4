use crate::consts::{GREEN_FIELD_MASK, HIGH_FIELD_MASK, LOW_FIELD_MASK};

/// Keeps the top 5 bits of an 8-bit channel.
#[inline]
pub const fn truncate_5(channel: u8) -> u16 {
    (channel >> 3) as u16
}

/// Keeps the top 6 bits of an 8-bit channel.
#[inline]
pub const fn truncate_6(channel: u8) -> u16 {
    (channel >> 2) as u16
}

/// Packs an RGB888 pixel as RGB565: red in the high field, blue in the low field.
#[inline]
pub const fn pack_rgb565([r, g, b]: [u8; 3]) -> u16 {
    (truncate_5(r) << 11) | (truncate_6(g) << 5) | truncate_5(b)
}

/// Packs an RGB888 pixel as BGR565: blue in the high field, red in the low field.
#[inline]
pub const fn pack_bgr565([r, g, b]: [u8; 3]) -> u16 {
    (truncate_5(b) << 11) | (truncate_6(g) << 5) | truncate_5(r)
}

/// Splits a 16-bit pixel into its high 5-bit, middle 6-bit and low 5-bit fields.
#[inline]
pub const fn split_565(pixel: u16) -> [u8; 3] {
    let high = (pixel & HIGH_FIELD_MASK) >> 11;
    let mid = (pixel & GREEN_FIELD_MASK) >> 5;
    let low = pixel & LOW_FIELD_MASK;

    [high as u8, mid as u8, low as u8]
}

/// Expands 5-bit red, 6-bit green and 5-bit blue fields back to 8 bits per channel.
///
/// Only meant for previews: the bits lost to truncation don't come back.
#[inline]
pub const fn expand_565_to_888([r, g, b]: [u8; 3]) -> [u8; 3] {
    // https://stackoverflow.com/questions/2442576/how-does-one-convert-16-bit-rgb565-to-24-bit-rgb888
    let r = (r as u32 * 527 + 23) >> 6;
    let g = (g as u32 * 259 + 33) >> 6;
    let b = (b as u32 * 527 + 23) >> 6;

    [r as u8, g as u8, b as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_hits_both_ends() {
        assert_eq!(expand_565_to_888([0, 0, 0]), [0, 0, 0]);
        assert_eq!(expand_565_to_888([31, 63, 31]), [255, 255, 255]);
    }

    #[test]
    fn expand_is_monotonic() {
        for v in 1..32u8 {
            assert!(expand_565_to_888([v, 0, 0])[0] > expand_565_to_888([v - 1, 0, 0])[0]);
        }
        for v in 1..64u8 {
            assert!(expand_565_to_888([0, v, 0])[1] > expand_565_to_888([0, v - 1, 0])[1]);
        }
    }

    #[test]
    fn split_undoes_pack() {
        assert_eq!(split_565(pack_rgb565([0xF8, 0xFC, 0xF8])), [31, 63, 31]);
        assert_eq!(split_565(pack_rgb565([0x80, 0x04, 0x08])), [16, 1, 1]);
        assert_eq!(split_565(pack_bgr565([0x80, 0x04, 0x08])), [1, 1, 16]);
    }
}
