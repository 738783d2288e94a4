use crate::{
    consts::TARGET_BYTES_PER_PIXEL,
    convert::{output_len, ConvertError, InvalidInputLengthSnafu},
    utils::expand_565_to_888,
    FrameInfo, PixelLayout,
};
use alloc::vec::Vec;
use snafu::ensure;

/// Converts to RGB565 words in host byte order.
///
/// The output of this function differs between little- and big-endian hosts. Use
/// [`convert_big_endian_swapped`] for bytes that go to a display controller.
pub fn convert_packed_native(input: &[u8]) -> Result<Vec<u8>, ConvertError> {
    PixelLayout::PACKED_NATIVE.convert(input)
}

/// Converts to big-endian BGR565, the byte stream ILI-family controllers expect.
pub fn convert_big_endian_swapped(input: &[u8]) -> Result<Vec<u8>, ConvertError> {
    PixelLayout::ILI_WIRE.convert(input)
}

impl PixelLayout {
    /// Converts `input` into a newly allocated buffer of half its length.
    pub fn convert(self, input: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let mut output = Vec::new();
        self.convert_to_vec(input, &mut output)?;
        Ok(output)
    }

    /// Appends the converted `input` to `w`.
    ///
    /// Returns the number of bytes appended. `w` is left unchanged on error.
    pub fn convert_to_vec(self, input: &[u8], w: &mut Vec<u8>) -> Result<usize, ConvertError> {
        let needed = output_len(input)?;

        let start = w.len();
        w.resize(start + needed, 0);
        self.convert_to_slice(input, &mut w[start..])
    }

    /// Converts a frame whose dimensions are known, checking them against the buffer length.
    pub fn convert_frame(self, frame: &FrameInfo, input: &[u8]) -> Result<Vec<u8>, ConvertError> {
        frame.check_input(input)?;
        self.convert(input)
    }

    /// Turns a buffer in this layout back into RGB888 (3 bytes per pixel), for previews.
    pub fn expand_to_rgb888(self, encoded: &[u8]) -> Result<Vec<u8>, ConvertError> {
        ensure!(
            encoded.len() % TARGET_BYTES_PER_PIXEL == 0,
            InvalidInputLengthSnafu { len: encoded.len() }
        );

        let mut rgb888 = Vec::with_capacity(encoded.len() / TARGET_BYTES_PER_PIXEL * 3);
        for pixel in encoded.chunks_exact(TARGET_BYTES_PER_PIXEL) {
            let value = self.from_bytes([pixel[0], pixel[1]]);
            rgb888.extend_from_slice(&expand_565_to_888(self.unpack(value)));
        }

        Ok(rgb888)
    }
}
