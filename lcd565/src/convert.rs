use crate::{
    consts::{SOURCE_BYTES_PER_PIXEL, TARGET_BYTES_PER_PIXEL},
    utils::{pack_bgr565, pack_rgb565},
    ChannelOrder, Endianness, FrameInfo, PixelLayout,
};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use itertools::Itertools;
use snafu::{ensure, Snafu};

#[cfg(feature = "alloc")]
mod alloc_api;
#[cfg(feature = "alloc")]
pub use alloc_api::*;

#[cfg(feature = "std")]
mod std_api;
#[cfg(feature = "std")]
pub use std_api::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
pub enum ConvertError {
    /// The input is not a byte buffer, e.g. a null pointer handed over a C boundary.
    #[snafu(display("input is not a byte buffer"))]
    InvalidArgumentType,

    #[snafu(display("input length {len} does not hold a whole number of pixels"))]
    InvalidInputLength { len: usize },

    #[snafu(display("output buffer holds {len} bytes, but {needed} bytes are required"))]
    OutputTooSmall { needed: usize, len: usize },

    #[snafu(display(
        "a {width}x{height} frame needs {needed} input bytes, but {len} bytes were given"
    ))]
    InvalidDimensions {
        width: u16,
        height: u16,
        needed: usize,
        len: usize,
    },
}

impl PixelLayout {
    /// Converts `input` into the start of `output`.
    ///
    /// Returns the number of bytes written, always `input.len() / 2`. Bytes of `output` past that
    /// are left untouched.
    pub fn convert_to_slice(self, input: &[u8], output: &mut [u8]) -> Result<usize, ConvertError> {
        let needed = output_len(input)?;
        ensure!(
            output.len() >= needed,
            OutputTooSmallSnafu {
                needed,
                len: output.len()
            }
        );

        log::debug!(
            "converting {} pixels to {:?}",
            input.len() / SOURCE_BYTES_PER_PIXEL,
            self
        );

        self.convert_validated(input, &mut output[..needed]);
        Ok(needed)
    }

    /// Runs the pixel loop. `input` must be a whole number of pixels and `output` exactly half
    /// as long.
    pub(crate) fn convert_validated(self, input: &[u8], output: &mut [u8]) {
        match (self.channel_order, self.endianness) {
            (ChannelOrder::Rgb, Endianness::Little) => {
                convert_pixels::<LittleEndian>(input, output, pack_rgb565)
            }
            (ChannelOrder::Rgb, Endianness::Big) => {
                convert_pixels::<BigEndian>(input, output, pack_rgb565)
            }
            (ChannelOrder::Bgr, Endianness::Little) => {
                convert_pixels::<LittleEndian>(input, output, pack_bgr565)
            }
            (ChannelOrder::Bgr, Endianness::Big) => {
                convert_pixels::<BigEndian>(input, output, pack_bgr565)
            }
        }
    }
}

impl FrameInfo {
    /// Checks that `input` holds exactly one frame of these dimensions.
    pub fn check_input(&self, input: &[u8]) -> Result<(), ConvertError> {
        ensure!(
            self.input_len() == input.len(),
            InvalidDimensionsSnafu {
                width: self.width,
                height: self.height,
                needed: self.input_len(),
                len: input.len(),
            }
        );

        Ok(())
    }
}

/// Validates the input length and returns the length of the converted buffer.
pub(crate) fn output_len(input: &[u8]) -> Result<usize, ConvertError> {
    ensure!(
        input.len() % SOURCE_BYTES_PER_PIXEL == 0,
        InvalidInputLengthSnafu { len: input.len() }
    );

    Ok(input.len() / SOURCE_BYTES_PER_PIXEL * TARGET_BYTES_PER_PIXEL)
}

#[inline(always)]
fn convert_pixels<B: ByteOrder>(input: &[u8], output: &mut [u8], pack: impl Fn([u8; 3]) -> u16) {
    let pixels = input.chunks_exact(SOURCE_BYTES_PER_PIXEL);
    let targets = output.chunks_exact_mut(TARGET_BYTES_PER_PIXEL);

    for (pixel, target) in pixels.zip_eq(targets) {
        // 4th byte is alpha or padding
        B::write_u16(target, pack([pixel[0], pixel[1], pixel[2]]));
    }
}
