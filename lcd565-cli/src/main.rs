use argh::FromArgs;
use image::{DynamicImage, ImageFormat, RgbImage};
use lcd565::{ChannelOrder, Endianness, FrameInfo, PixelLayout};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    str::FromStr,
};

/// RGB565 framebuffer converter for small LCD controllers.
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Convert(Convert),
    Preview(Preview),
}

/// Converts an image, or a raw dump of 32-bit pixels, into 16-bit framebuffer data.
#[derive(FromArgs)]
#[argh(subcommand, name = "convert")]
struct Convert {
    /// input format, optional (png, jpg, bmp). Not allowed with --raw.
    #[argh(option)]
    format: Option<Format>,

    /// read the input as raw [R, G, B, X] pixels instead of an image file
    #[argh(switch)]
    raw: bool,
    /// frame width, checked against the raw input length. Only allowed with --raw.
    #[argh(option)]
    width: Option<u16>,
    /// frame height, checked against the raw input length. Only allowed with --raw.
    #[argh(option)]
    height: Option<u16>,

    /// channel order (rgb, bgr), defaults to bgr
    #[argh(option, default = "Channels::Bgr")]
    channels: Channels,
    /// byte order of each pixel (le, be, native), defaults to be
    #[argh(option, default = "Endian::Big")]
    endian: Endian,

    /// the input file
    #[argh(positional)]
    input: String,
    /// the output file or framebuffer device, written from offset 0
    #[argh(positional)]
    output: String,
}

/// Turns converted framebuffer data back into a viewable image.
#[derive(FromArgs)]
#[argh(subcommand, name = "preview")]
struct Preview {
    /// output format (png, jpg, bmp)
    #[argh(option)]
    format: Format,

    /// frame width
    #[argh(option)]
    width: u16,
    /// frame height
    #[argh(option)]
    height: u16,

    /// channel order the data was converted with (rgb, bgr), defaults to bgr
    #[argh(option, default = "Channels::Bgr")]
    channels: Channels,
    /// byte order the data was converted with (le, be, native), defaults to be
    #[argh(option, default = "Endian::Big")]
    endian: Endian,

    /// the converted framebuffer dump
    #[argh(positional)]
    input: String,
    /// the output image
    #[argh(positional)]
    output: String,
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Png,
    Jpg,
    Bmp,
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(format) = s.eq_ignore_ascii_case("png").then_some(Format::Png)
               .or_else(|| s.eq_ignore_ascii_case("jpg").then_some(Format::Jpg))
               .or_else(|| s.eq_ignore_ascii_case("bmp").then_some(Format::Bmp))
        else { return Err("invalid format, expected png, jpg or bmp"); };

        Ok(format)
    }
}

impl From<Format> for ImageFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => ImageFormat::Png,
            Format::Jpg => ImageFormat::Jpeg,
            Format::Bmp => ImageFormat::Bmp,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Channels {
    Rgb,
    Bgr,
}

impl FromStr for Channels {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(channels) = s.eq_ignore_ascii_case("rgb").then_some(Channels::Rgb)
               .or_else(|| s.eq_ignore_ascii_case("bgr").then_some(Channels::Bgr))
        else { return Err("invalid channel order, expected rgb or bgr"); };

        Ok(channels)
    }
}

impl From<Channels> for ChannelOrder {
    fn from(channels: Channels) -> Self {
        match channels {
            Channels::Rgb => ChannelOrder::Rgb,
            Channels::Bgr => ChannelOrder::Bgr,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Endian {
    Little,
    Big,
    Native,
}

impl FromStr for Endian {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(endian) = s.eq_ignore_ascii_case("le").then_some(Endian::Little)
               .or_else(|| s.eq_ignore_ascii_case("be").then_some(Endian::Big))
               .or_else(|| s.eq_ignore_ascii_case("native").then_some(Endian::Native))
        else { return Err("invalid byte order, expected le, be or native"); };

        Ok(endian)
    }
}

impl From<Endian> for Endianness {
    fn from(endian: Endian) -> Self {
        match endian {
            Endian::Little => Endianness::Little,
            Endian::Big => Endianness::Big,
            Endian::Native => Endianness::NATIVE,
        }
    }
}

fn layout(channels: Channels, endian: Endian) -> PixelLayout {
    PixelLayout::new(channels.into(), endian.into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();

    let Cli { command } = argh::from_env();

    match command {
        Command::Convert(options) => convert(options),
        Command::Preview(options) => preview(options),
    }
}

fn read_image(
    input: &str,
    format: Option<Format>,
) -> Result<DynamicImage, Box<dyn std::error::Error>> {
    let image = match format {
        Some(format) => {
            image::io::Reader::with_format(BufReader::new(File::open(input)?), format.into())
                .decode()?
        }
        None => image::io::Reader::open(input)?
            .with_guessed_format()?
            .decode()?,
    };

    Ok(image)
}

/// Rejects flag combinations that would otherwise be ignored.
fn check_convert_flags(options: &Convert) -> Result<(), &'static str> {
    if options.raw {
        if options.format.is_some() {
            return Err("--format can't be used with --raw");
        }
        if options.width.is_some() != options.height.is_some() {
            return Err("--width and --height must be given together");
        }
    } else if options.width.is_some() || options.height.is_some() {
        return Err("--width and --height are only allowed with --raw");
    }

    Ok(())
}

fn convert(options: Convert) -> Result<(), Box<dyn std::error::Error>> {
    check_convert_flags(&options)?;

    let Convert {
        format,
        raw,
        width,
        height,
        channels,
        endian,
        input,
        output,
    } = options;

    let layout = layout(channels, endian);
    log::debug!("converting `{input}` with {layout:?}");

    let (pixels, frame) = if raw {
        let pixels = std::fs::read(&input)?;
        let frame = width
            .zip(height)
            .map(|(width, height)| FrameInfo::new(width, height));
        (pixels, frame)
    } else {
        let image = read_image(&input, format)?;
        if image.width() > u16::MAX as u32 || image.height() > u16::MAX as u32 {
            return Err("image dimensions are too large".into());
        }

        let frame = FrameInfo::new(image.width() as u16, image.height() as u16);
        (image.into_rgba8().into_raw(), Some(frame))
    };

    match frame {
        Some(frame) => {
            frame.check_input(&pixels)?;
            println!("Converting {}x{} frame", frame.width, frame.height);
        }
        None => println!("Converting {} bytes of raw pixels", pixels.len()),
    }

    let mut w = BufWriter::new(File::create(&output)?);
    let written = layout.convert_to_writer(&pixels, &mut w)?;
    w.flush()?;

    println!("Written {written} bytes to `{output}`");

    Ok(())
}

fn preview(options: Preview) -> Result<(), Box<dyn std::error::Error>> {
    let Preview {
        format,
        width,
        height,
        channels,
        endian,
        input,
        output,
    } = options;

    let layout = layout(channels, endian);
    let frame = FrameInfo::new(width, height);

    let encoded = std::fs::read(&input)?;
    if encoded.len() != frame.output_len() {
        return Err(format!(
            "`{input}` holds {} bytes, but a {width}x{height} frame needs {}",
            encoded.len(),
            frame.output_len()
        )
        .into());
    }

    println!("Expanding `{input}` with {layout:?}");

    let rgb888 = layout.expand_to_rgb888(&encoded)?;
    RgbImage::from_vec(u32::from(width), u32::from(height), rgb888)
        .ok_or("failed to create image")?
        .save_with_format(&output, format.into())?;

    println!("Written {width}x{height} image to `{output}`");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_convert(args: &[&str]) -> Convert {
        match Convert::from_args(&["convert"], args) {
            Ok(options) => options,
            Err(early_exit) => panic!("failed to parse {args:?}: {}", early_exit.output),
        }
    }

    #[test]
    fn accepts_consistent_flags() {
        for args in [
            &["in.png", "out.bin"][..],
            &["--format", "png", "in.png", "out.bin"],
            &["--raw", "in.raw", "out.bin"],
            &["--raw", "--width", "320", "--height", "240", "in.raw", "/dev/fb1"],
        ] {
            assert_eq!(check_convert_flags(&parse_convert(args)), Ok(()), "{args:?}");
        }
    }

    #[test]
    fn rejects_ignored_flags() {
        for args in [
            &["--raw", "--format", "png", "in.raw", "out.bin"][..],
            &["--raw", "--width", "320", "in.raw", "out.bin"],
            &["--raw", "--height", "240", "in.raw", "out.bin"],
            &["--width", "320", "--height", "240", "in.png", "out.bin"],
            &["--width", "320", "in.png", "out.bin"],
        ] {
            assert!(check_convert_flags(&parse_convert(args)).is_err(), "{args:?}");
        }
    }
}
