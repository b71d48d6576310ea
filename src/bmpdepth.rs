use crate::image::PixelFormat;

//===========================================================================//

/// Color depths that we read and write for uncompressed BMP frames.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BmpDepth {
    TwentyFour,
    ThirtyTwo,
}

impl BmpDepth {
    pub(crate) fn from_bits_per_pixel(
        bits_per_pixel: u16,
    ) -> Option<BmpDepth> {
        match bits_per_pixel {
            24 => Some(BmpDepth::TwentyFour),
            32 => Some(BmpDepth::ThirtyTwo),
            _ => None,
        }
    }

    pub(crate) fn for_format(format: PixelFormat) -> BmpDepth {
        match format {
            PixelFormat::Rgb => BmpDepth::TwentyFour,
            PixelFormat::Rgba => BmpDepth::ThirtyTwo,
        }
    }

    pub(crate) fn bits_per_pixel(&self) -> u16 {
        match *self {
            BmpDepth::TwentyFour => 24,
            BmpDepth::ThirtyTwo => 32,
        }
    }

    pub(crate) fn bytes_per_pixel(&self) -> usize {
        self.bits_per_pixel() as usize / 8
    }

    /// Returns the length of one color-plane row, padded up to a multiple
    /// of four bytes.
    pub(crate) fn row_size(&self, width: u32) -> usize {
        ((width as usize) * self.bytes_per_pixel() + 3) / 4 * 4
    }
}

/// Returns the length of one AND-mask row (1 bit per pixel, padded to a
/// 32-bit boundary).
pub(crate) fn mask_row_size(width: u32) -> usize {
    ((width as usize) + 31) / 32 * 4
}

//===========================================================================//


//===========================================================================//
