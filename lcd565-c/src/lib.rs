#![cfg_attr(not(test), no_std)]

use lcd565::{ChannelOrder, ConvertError, Endianness, PixelLayout};

#[cfg(not(test))]
#[panic_handler]
fn panic_handler(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

/// The input or output pointer is null with a non-zero length, or a layout argument is out of
/// range.
pub const LCD565_ERR_INVALID_ARGUMENT_TYPE: isize = -1;
/// The input length is not a multiple of 4.
pub const LCD565_ERR_INVALID_INPUT_LENGTH: isize = -2;
/// The output buffer is shorter than half the input.
pub const LCD565_ERR_OUTPUT_TOO_SMALL: isize = -3;

pub const LCD565_CHANNELS_RGB: u32 = 0;
pub const LCD565_CHANNELS_BGR: u32 = 1;

pub const LCD565_ENDIAN_LITTLE: u32 = 0;
pub const LCD565_ENDIAN_BIG: u32 = 1;
pub const LCD565_ENDIAN_NATIVE: u32 = 2;

fn error_code(err: ConvertError) -> isize {
    match err {
        ConvertError::InvalidArgumentType => LCD565_ERR_INVALID_ARGUMENT_TYPE,
        ConvertError::InvalidInputLength { .. } | ConvertError::InvalidDimensions { .. } => {
            LCD565_ERR_INVALID_INPUT_LENGTH
        }
        ConvertError::OutputTooSmall { .. } => LCD565_ERR_OUTPUT_TOO_SMALL,
    }
}

fn layout_from_raw(channel_order: u32, endianness: u32) -> Result<PixelLayout, ConvertError> {
    let channel_order = match channel_order {
        LCD565_CHANNELS_RGB => ChannelOrder::Rgb,
        LCD565_CHANNELS_BGR => ChannelOrder::Bgr,
        _ => return Err(ConvertError::InvalidArgumentType),
    };
    let endianness = match endianness {
        LCD565_ENDIAN_LITTLE => Endianness::Little,
        LCD565_ENDIAN_BIG => Endianness::Big,
        LCD565_ENDIAN_NATIVE => Endianness::NATIVE,
        _ => return Err(ConvertError::InvalidArgumentType),
    };

    Ok(PixelLayout::new(channel_order, endianness))
}

unsafe fn convert_raw(
    layout: PixelLayout,
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
) -> isize {
    // (NULL, 0) is an empty buffer, as handed out by e.g. `malloc(0)`
    let input: &[u8] = match (input.is_null(), input_len) {
        (true, 0) => &[],
        (true, _) => return LCD565_ERR_INVALID_ARGUMENT_TYPE,
        (false, _) => unsafe { core::slice::from_raw_parts(input, input_len) },
    };
    let output: &mut [u8] = match (output.is_null(), output_len) {
        (true, 0) => &mut [],
        (true, _) => return LCD565_ERR_INVALID_ARGUMENT_TYPE,
        (false, _) => unsafe { core::slice::from_raw_parts_mut(output, output_len) },
    };

    match layout.convert_to_slice(input, output) {
        Ok(len) => len as isize,
        Err(err) => error_code(err),
    }
}

/// Converts 32-bit `[R, G, B, X]` pixels into 16-bit pixels of the given layout.
///
/// - `input`: Pointer to the source pixels
/// - `input_len`: Length of the input buffer, in bytes. Must be a multiple of 4.
/// - `output`: Pointer to the output buffer
/// - `output_len`: Length of the output buffer, in bytes. Must be at least `input_len / 2`.
/// - `channel_order`: `LCD565_CHANNELS_RGB` or `LCD565_CHANNELS_BGR`
/// - `endianness`: `LCD565_ENDIAN_LITTLE`, `LCD565_ENDIAN_BIG` or `LCD565_ENDIAN_NATIVE`
///
/// Returns the number of bytes written to the output buffer, or one of the negative
/// `LCD565_ERR_*` codes.
///
/// # Safety
///
/// Non-null `input` and `output` must be valid for `input_len` and `output_len` bytes
/// respectively, and must not overlap. A null pointer is only accepted with a length of 0.
#[no_mangle]
pub unsafe extern "C" fn lcd565_convert(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
    channel_order: u32,
    endianness: u32,
) -> isize {
    match layout_from_raw(channel_order, endianness) {
        Ok(layout) => unsafe { convert_raw(layout, input, input_len, output, output_len) },
        Err(err) => error_code(err),
    }
}

/// Converts to RGB565 in host byte order. See [`lcd565_convert`] for the arguments and return
/// value.
///
/// # Safety
///
/// See [`lcd565_convert`].
#[no_mangle]
pub unsafe extern "C" fn lcd565_convert_packed_native(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
) -> isize {
    unsafe {
        convert_raw(
            PixelLayout::PACKED_NATIVE,
            input,
            input_len,
            output,
            output_len,
        )
    }
}

/// Converts to big-endian BGR565, ready to be streamed to an ILI-family controller. See
/// [`lcd565_convert`] for the arguments and return value.
///
/// # Safety
///
/// See [`lcd565_convert`].
#[no_mangle]
pub unsafe extern "C" fn lcd565_convert_big_endian_swapped(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
) -> isize {
    unsafe { convert_raw(PixelLayout::ILI_WIRE, input, input_len, output, output_len) }
}
