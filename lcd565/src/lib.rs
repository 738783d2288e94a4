//! RGBA8888 to RGB565-family framebuffer conversion for small LCD controllers.
//!
//! Renderers usually hand out frames as 32-bit pixels (`[R, G, B, X]`, the fourth byte being
//! alpha or padding). SPI and parallel TFT controllers want 16 bits per pixel instead. This crate
//! does that reduction in one linear pass and nothing else: no dithering, no scaling, no
//! transport.
//!
//! # Pixel layouts
//!
//! Every conversion is described by a [`PixelLayout`]: which channel goes into the high 5-bit
//! field ([`ChannelOrder`]) and in which order the two bytes of the resulting 16-bit word are
//! written ([`Endianness`]).
//!
//! ```plain
//! .- RGB565 --------------------------------------.
//! | 15 14 13 12 11 | 10  9  8  7  6  5 | 4 3 2 1 0 |
//! |----------------+-------------------+-----------|
//! |      red       |       green       |   blue    |
//! `------------------------------------------------`
//!
//! .- BGR565 --------------------------------------.
//! | 15 14 13 12 11 | 10  9  8  7  6  5 | 4 3 2 1 0 |
//! |----------------+-------------------+-----------|
//! |      blue      |       green       |    red    |
//! `------------------------------------------------`
//! ```
//!
//! Channels are truncated, never rounded: the low 3 (red, blue) or 2 (green) bits are dropped.
//!
//! Two layouts have names of their own:
//!
//! - [`PixelLayout::ILI_WIRE`]: BGR565, big-endian. This is what ILI-family controllers read off
//!   their data bus, and the layout to use unless something else is known to be needed.
//! - [`PixelLayout::PACKED_NATIVE`]: RGB565 in the host's byte order. The output of this layout
//!   differs between little- and big-endian hosts, so it only makes sense for consumers living on
//!   the same machine. Prefer [`PixelLayout::RGB565_LE`] or [`PixelLayout::RGB565_BE`] when the
//!   bytes leave the process.
//!
//! # Buffers
//!
//! Input is a plain byte slice whose length must be a multiple of 4; it carries no header and no
//! dimensions. Output is always exactly half as long as the input.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod convert;
pub mod utils;

#[cfg(feature = "alloc")]
pub use convert::{convert_big_endian_swapped, convert_packed_native};
pub use convert::ConvertError;
#[cfg(feature = "std")]
pub use convert::WriteError;

use utils::{pack_bgr565, pack_rgb565, split_565};

pub mod consts {
    /// Bytes per source pixel: `[R, G, B, X]`.
    pub const SOURCE_BYTES_PER_PIXEL: usize = 4;

    /// Bytes per converted pixel.
    pub const TARGET_BYTES_PER_PIXEL: usize = 2;

    /// Mask of the high 5-bit field (bits 15..11).
    pub const HIGH_FIELD_MASK: u16 = 0b1111_1000_0000_0000;

    /// Mask of the 6-bit green field (bits 10..5).
    pub const GREEN_FIELD_MASK: u16 = 0b0000_0111_1110_0000;

    /// Mask of the low 5-bit field (bits 4..0).
    pub const LOW_FIELD_MASK: u16 = 0b0000_0000_0001_1111;
}

/// Which source channel ends up in the high 5-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    /// Red in bits 15..11, blue in bits 4..0.
    Rgb,
    /// Blue in bits 15..11, red in bits 4..0.
    Bgr,
}

/// Byte order of a serialized 16-bit pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// The byte order of the host.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = Endianness::Little;
    /// The byte order of the host.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = Endianness::Big;
}

/// Describes how a 32-bit source pixel is packed and serialized into 2 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelLayout {
    pub channel_order: ChannelOrder,
    pub endianness: Endianness,
}

impl PixelLayout {
    /// RGB565 words in host byte order. Not portable across hosts.
    pub const PACKED_NATIVE: Self = Self::new(ChannelOrder::Rgb, Endianness::NATIVE);

    /// BGR565, most significant byte first, as streamed to ILI-family display controllers.
    pub const ILI_WIRE: Self = Self::new(ChannelOrder::Bgr, Endianness::Big);

    pub const RGB565_LE: Self = Self::new(ChannelOrder::Rgb, Endianness::Little);
    pub const RGB565_BE: Self = Self::new(ChannelOrder::Rgb, Endianness::Big);

    pub const fn new(channel_order: ChannelOrder, endianness: Endianness) -> Self {
        Self {
            channel_order,
            endianness,
        }
    }

    /// Packs an RGB888 triple into a 16-bit value according to the channel order.
    #[inline]
    pub const fn pack(self, rgb: [u8; 3]) -> u16 {
        match self.channel_order {
            ChannelOrder::Rgb => pack_rgb565(rgb),
            ChannelOrder::Bgr => pack_bgr565(rgb),
        }
    }

    /// Splits a packed value back into its 5-bit red, 6-bit green and 5-bit blue fields.
    #[inline]
    pub const fn unpack(self, value: u16) -> [u8; 3] {
        let [high, green, low] = split_565(value);
        match self.channel_order {
            ChannelOrder::Rgb => [high, green, low],
            ChannelOrder::Bgr => [low, green, high],
        }
    }

    #[inline]
    pub const fn to_bytes(self, value: u16) -> [u8; 2] {
        match self.endianness {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        }
    }

    #[inline]
    pub const fn from_bytes(self, bytes: [u8; 2]) -> u16 {
        match self.endianness {
            Endianness::Little => u16::from_le_bytes(bytes),
            Endianness::Big => u16::from_be_bytes(bytes),
        }
    }
}

impl Default for PixelLayout {
    fn default() -> Self {
        Self::ILI_WIRE
    }
}

/// Dimensions of a frame, for callers that track them next to the raw buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    pub width: u16,
    pub height: u16,
}

impl FrameInfo {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Expected length of the source buffer, in bytes.
    pub const fn input_len(&self) -> usize {
        self.pixel_count() * consts::SOURCE_BYTES_PER_PIXEL
    }

    /// Length of the converted buffer, in bytes.
    pub const fn output_len(&self) -> usize {
        self.pixel_count() * consts::TARGET_BYTES_PER_PIXEL
    }
}
