//! Frame encoding for transfer to the host

use image::{codecs::jpeg::JpegEncoder, DynamicImage, ImageEncoder, RgbaImage};

use super::shared_state::Frame;
use crate::error::{CoverError, Result};

/// Wrap a frame's bytes as an image, checking they match its size
pub fn to_rgba_image(frame: &Frame) -> Result<RgbaImage> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.rgba.len() != expected {
        return Err(CoverError::FrameSize {
            width: frame.width,
            height: frame.height,
            expected,
            actual: frame.rgba.len(),
        });
    }

    RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone()).ok_or(
        CoverError::FrameSize {
            width: frame.width,
            height: frame.height,
            expected,
            actual: frame.rgba.len(),
        },
    )
}

/// Compress a frame to JPEG - reduces ~1MB of RGBA to ~50KB
pub fn encode_jpeg(frame: &Frame, quality: u8) -> Result<Vec<u8>> {
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgba8(to_rgba_image(frame)?).to_rgb8();

    let mut jpeg_data = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_data, quality).write_image(
        rgb.as_raw(),
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(jpeg_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32) -> Frame {
        Frame {
            width,
            height,
            rgba: [200, 80, 20, 255].repeat((width * height) as usize),
        }
    }

    #[test]
    fn encodes_jpeg_with_magic_bytes() {
        let jpeg = encode_jpeg(&solid_frame(16, 24), 85).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn rejects_short_frame() {
        let mut frame = solid_frame(4, 4);
        frame.rgba.truncate(10);
        match encode_jpeg(&frame, 85) {
            Err(CoverError::FrameSize { expected, actual, .. }) => {
                assert_eq!(expected, 64);
                assert_eq!(actual, 10);
            }
            other => panic!("expected size error, got {other:?}"),
        }
    }
}
