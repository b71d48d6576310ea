//! The stylized clipboard drawn into generated icons.

use crate::error::InvalidImageError;
use crate::image::{Image, PixelFormat};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

const CLIP_COLOR: [u8; 3] = [70, 70, 75];
const ACTIVE_ITEM_COLOR: [u8; 3] = [102, 126, 234];
const BODY_COLOR: [u8; 3] = [245, 245, 245];

// Side length of the grid that `ClipboardArt::Grid` shapes are laid out on.
const GRID_SIZE: u32 = 32;

//===========================================================================//

/// A clipboard on a purple gradient background.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum ClipboardArt {
    /// Shapes placed at fractions of the image size; looks the same at any
    /// size.
    Scaled,
    /// Shapes placed on a 32x32 pixel grid, which is stretched to the image
    /// size.
    Grid,
}

impl ClipboardArt {
    /// Parses a style name (`"scaled"` or `"grid"`).
    pub fn from_name(name: &str) -> Option<ClipboardArt> {
        match name {
            "scaled" => Some(ClipboardArt::Scaled),
            "grid" => Some(ClipboardArt::Grid),
            _ => None,
        }
    }

    /// Returns the RGBA color of pixel `(x, y)` (from the top-left corner)
    /// in a `width` by `height` rendering.  Always fully opaque.
    pub fn pixel(&self, x: u32, y: u32, width: u32, height: u32) -> [u8; 4] {
        let [red, green, blue] = match *self {
            ClipboardArt::Scaled => scaled_pixel(x, y, width, height),
            ClipboardArt::Grid => grid_pixel(x, y, width, height),
        };
        [red, green, blue, u8::MAX]
    }

    /// Renders a square image of the given size.
    pub fn render(
        &self,
        size: u32,
        format: PixelFormat,
    ) -> Result<Image, InvalidImageError> {
        Image::from_fn(size, size, format, |x, y| self.pixel(x, y, size, size))
    }
}

//===========================================================================//

fn scaled_pixel(x: u32, y: u32, width: u32, height: u32) -> [u8; 3] {
    let fx = x as f64 / width as f64;
    let fy = y as f64 / height as f64;
    let inside = |left: f64, right: f64, top: f64, bottom: f64| {
        left <= fx && fx <= right && top <= fy && fy <= bottom
    };
    if inside(0.3, 0.75, 0.2, 0.85) {
        if inside(0.4, 0.6, 0.15, 0.35) {
            return CLIP_COLOR;
        } else if inside(0.35, 0.7, 0.55, 0.7) {
            return ACTIVE_ITEM_COLOR;
        }
        return BODY_COLOR;
    }
    // Float-to-int casts truncate toward zero, and every channel stays
    // positive here.
    let red = 102.0 + (118.0 - 102.0) * fx;
    let green = 126.0 + (75.0 - 126.0) * fy;
    let blue = 234.0 + (162.0 - 234.0) * (fx + fy) / 2.0;
    [red as u8, green as u8, blue as u8]
}

fn grid_pixel(x: u32, y: u32, width: u32, height: u32) -> [u8; 3] {
    let gx = (x as u64 * GRID_SIZE as u64 / width as u64) as u32;
    let gy = (y as u64 * GRID_SIZE as u64 / height as u64) as u32;
    let inside = |left: u32, right: u32, top: u32, bottom: u32| {
        left <= gx && gx <= right && top <= gy && gy <= bottom
    };
    if inside(10, 22, 6, 26) {
        if inside(13, 19, 5, 10) {
            return CLIP_COLOR;
        } else if inside(12, 20, 18, 22) {
            return ACTIVE_ITEM_COLOR;
        }
        return BODY_COLOR;
    }
    let (x, y) = (x as f64, y as f64);
    let (w, h) = (width as f64, height as f64);
    let red = 102.0 + (118.0 - 102.0) * x / w;
    let green = 126.0 + (75.0 - 126.0) * y / h;
    let blue = 234.0 + (162.0 - 234.0) * (x + y) / (w + h);
    [red as u8, green as u8, blue as u8]
}

//===========================================================================//


//===========================================================================//
