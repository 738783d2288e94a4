use crate::{
    consts::{SOURCE_BYTES_PER_PIXEL, TARGET_BYTES_PER_PIXEL},
    convert::{output_len, ConvertError},
    PixelLayout,
};
use snafu::{ResultExt, Snafu};
use std::io::Write;

/// Pixels converted per `write_all` call.
const CHUNK_PIXELS: usize = 1024;

#[derive(Debug, Snafu)]
pub enum WriteError {
    #[snafu(context(false), display("{source}"))]
    Convert { source: ConvertError },
    #[snafu(display("failed to write converted pixels: {source}"))]
    WriteIo { source: std::io::Error },
}

impl PixelLayout {
    /// Converts `input` and writes the result to `w` in chunks, without allocating the whole
    /// output.
    ///
    /// Returns the number of bytes written. The input length is validated before anything is
    /// written.
    pub fn convert_to_writer<W: Write>(self, input: &[u8], mut w: W) -> Result<usize, WriteError> {
        let total = output_len(input)?;

        log::debug!(
            "streaming {} pixels as {:?}",
            input.len() / SOURCE_BYTES_PER_PIXEL,
            self
        );

        let mut buf = [0u8; CHUNK_PIXELS * TARGET_BYTES_PER_PIXEL];
        for chunk in input.chunks(CHUNK_PIXELS * SOURCE_BYTES_PER_PIXEL) {
            let len = chunk.len() / SOURCE_BYTES_PER_PIXEL * TARGET_BYTES_PER_PIXEL;
            let buf = &mut buf[..len];

            self.convert_validated(chunk, buf);
            w.write_all(buf).context(WriteIoSnafu)?;
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device gone"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn spans_multiple_chunks() {
        let input: Vec<u8> = (0..(CHUNK_PIXELS * 2 + 3) * 4).map(|i| i as u8).collect();

        let mut streamed = Vec::new();
        let written = PixelLayout::ILI_WIRE
            .convert_to_writer(&input, &mut streamed)
            .unwrap();

        assert_eq!(written, input.len() / 2);
        assert_eq!(streamed, PixelLayout::ILI_WIRE.convert(&input).unwrap());
    }

    #[test]
    fn bad_length_writes_nothing() {
        let mut streamed = Vec::new();
        let err = PixelLayout::ILI_WIRE
            .convert_to_writer(&[0; 4097], &mut streamed)
            .unwrap_err();

        assert!(matches!(
            err,
            WriteError::Convert {
                source: ConvertError::InvalidInputLength { len: 4097 }
            }
        ));
        assert!(streamed.is_empty());
    }

    #[test]
    fn io_errors_surface() {
        let err = PixelLayout::ILI_WIRE
            .convert_to_writer(&[0; 8], FailingWriter)
            .unwrap_err();

        assert!(matches!(err, WriteError::WriteIo { .. }));
    }
}
