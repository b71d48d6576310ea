use crate::bitmap::{frame_len, MAX_FRAME_LEN};
use crate::error::InvalidImageError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

/// The channel layout of an image's pixel buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum PixelFormat {
    /// Red, green, blue; every pixel is fully opaque.  Encoded at 24 bpp.
    Rgb,
    /// Red, green, blue, alpha.  Encoded at 32 bpp.
    Rgba,
}

impl PixelFormat {
    /// Returns the number of bytes per pixel in this format.
    pub fn channels(&self) -> usize {
        match *self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

//===========================================================================//

/// An uncompressed image, ready to be encoded into an ICO file.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Image {
    /// Creates a new image with the given dimensions, format, and pixel
    /// data.  The `width` and `height` must be nonzero, and `data` must have
    /// `format.channels() * width * height` bytes and be in row-major order
    /// from top to bottom.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Image, InvalidImageError> {
        let image = Image { width, height, format, data };
        image.validate()?;
        Ok(image)
    }

    /// Creates a new image from RGBA data (4 bytes per pixel).
    pub fn from_rgba_data(
        width: u32,
        height: u32,
        rgba_data: Vec<u8>,
    ) -> Result<Image, InvalidImageError> {
        Image::new(width, height, PixelFormat::Rgba, rgba_data)
    }

    /// Creates a new image from RGB data (3 bytes per pixel).
    pub fn from_rgb_data(
        width: u32,
        height: u32,
        rgb_data: Vec<u8>,
    ) -> Result<Image, InvalidImageError> {
        Image::new(width, height, PixelFormat::Rgb, rgb_data)
    }

    /// Creates a new image by calling `pixel(x, y)` for every pixel, with
    /// `(0, 0)` at the top-left corner.  The alpha component of each
    /// returned color is dropped when `format` is `PixelFormat::Rgb`.
    pub fn from_fn<F>(
        width: u32,
        height: u32,
        format: PixelFormat,
        mut pixel: F,
    ) -> Result<Image, InvalidImageError>
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        check_dimensions(width, height)?;
        check_frame_len(width, height, format)?;
        let channels = format.channels();
        let mut data =
            vec![0u8; (width as usize) * (height as usize) * channels];
        let mut start = 0;
        for y in 0..height {
            for x in 0..width {
                let color = pixel(x, y);
                data[start..start + channels]
                    .copy_from_slice(&color[..channels]);
                start += channels;
            }
        }
        Image::new(width, height, format, data)
    }

    /// Checks that the dimensions are nonzero, that the encoded frame fits in
    /// an ICO file, and that the pixel buffer has the right length.
    pub(crate) fn validate(&self) -> Result<(), InvalidImageError> {
        check_dimensions(self.width, self.height)?;
        check_frame_len(self.width, self.height, self.format)?;
        let expected = (self.width as u64)
            * (self.height as u64)
            * (self.format.channels() as u64);
        if (self.data.len() as u64) != expected {
            return Err(InvalidImageError::DataLength {
                width: self.width,
                height: self.height,
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the channel layout of the pixel data.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the raw pixel data, in row-major order from top to bottom.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the RGBA color of the pixel at `(x, y)`, counting from the
    /// top-left corner.  RGB pixels are reported as fully opaque.  Panics if
    /// the coordinates are out of range.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height);
        let channels = self.format.channels();
        let start =
            ((y as usize) * (self.width as usize) + (x as usize)) * channels;
        let bytes = &self.data[start..start + channels];
        match self.format {
            PixelFormat::Rgb => [bytes[0], bytes[1], bytes[2], u8::MAX],
            PixelFormat::Rgba => [bytes[0], bytes[1], bytes[2], bytes[3]],
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), InvalidImageError> {
    if width == 0 {
        return Err(InvalidImageError::ZeroWidth);
    }
    if height == 0 {
        return Err(InvalidImageError::ZeroHeight);
    }
    Ok(())
}

// Rejects images whose BMP frame can't be addressed by an ICO directory.
// This also bounds the pixel buffer, so it runs before any allocation.
fn check_frame_len(
    width: u32,
    height: u32,
    format: PixelFormat,
) -> Result<(), InvalidImageError> {
    match frame_len(width, height, format) {
        Some(len) if len <= MAX_FRAME_LEN => Ok(()),
        _ => Err(InvalidImageError::TooLarge),
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{Image, PixelFormat};
    use crate::error::InvalidImageError;

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            Image::from_rgba_data(0, 1, Vec::new()),
            Err(InvalidImageError::ZeroWidth)
        );
        assert_eq!(
            Image::from_rgb_data(1, 0, Vec::new()),
            Err(InvalidImageError::ZeroHeight)
        );
    }

    #[test]
    fn rejects_short_buffer() {
        // 2x2 RGBA needs 16 bytes; this is only three pixels' worth.
        let result = Image::from_rgba_data(2, 2, vec![0; 12]);
        assert_eq!(
            result,
            Err(InvalidImageError::DataLength {
                width: 2,
                height: 2,
                expected: 16,
                actual: 12,
            })
        );
    }

    #[test]
    fn rgb_buffer_uses_three_channels() {
        assert!(Image::from_rgb_data(2, 2, vec![0; 12]).is_ok());
        assert!(Image::from_rgb_data(2, 2, vec![0; 16]).is_err());
    }

    #[test]
    fn from_fn_is_row_major_from_top() {
        let image = Image::from_fn(3, 2, PixelFormat::Rgb, |x, y| {
            [x as u8, y as u8, 7, 0]
        })
        .unwrap();
        assert_eq!(
            image.data(),
            &[0, 0, 7, 1, 0, 7, 2, 0, 7, 0, 1, 7, 1, 1, 7, 2, 1, 7]
        );
        assert_eq!(image.pixel(2, 1), [2, 1, 7, 255]);
    }

    #[test]
    fn from_fn_rejects_oversized_images_before_drawing() {
        let mut calls = 0;
        let result =
            Image::from_fn(u32::MAX, u32::MAX, PixelFormat::Rgba, |_, _| {
                calls += 1;
                [0; 4]
            });
        assert_eq!(result, Err(InvalidImageError::TooLarge));
        let result =
            Image::from_fn(100_000, 100_000, PixelFormat::Rgb, |_, _| {
                calls += 1;
                [0; 4]
            });
        assert_eq!(result, Err(InvalidImageError::TooLarge));
        assert_eq!(calls, 0);
    }

    #[test]
    fn rejects_oversized_buffer_claims() {
        // The frame size check comes before the buffer length check.
        assert_eq!(
            Image::from_rgb_data(70_000, 70_000, Vec::new()),
            Err(InvalidImageError::TooLarge)
        );
    }

    #[test]
    fn pixel_reports_alpha_for_rgba() {
        let image =
            Image::from_rgba_data(1, 1, vec![10, 20, 30, 40]).unwrap();
        assert_eq!(image.format(), PixelFormat::Rgba);
        assert_eq!(image.pixel(0, 0), [10, 20, 30, 40]);
    }
}

//===========================================================================//
