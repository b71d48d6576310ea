//! A library for generating Windows ICO files from uncompressed images.
//!
//! Each image is stored as a legacy BMP frame (a BITMAPINFOHEADER, the
//! color plane stored bottom-up in BGR(A) order, and a 1-bpp AND mask).
//! RGB images are encoded at 24 bpp and RGBA images at 32 bpp.
//!
//! ```
//! let red = icogen::Image::from_rgba_data(1, 1, vec![255, 0, 0, 255])?;
//! let bytes = icogen::encode(&[red])?;
//! assert_eq!(&bytes[..6], b"\x00\x00\x01\x00\x01\x00");
//! # Ok::<(), icogen::InvalidImageError>(())
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod bitmap;
mod bmpdepth;
mod clipboard;
mod error;
mod icondir;
mod image;

pub use crate::clipboard::ClipboardArt;
pub use crate::error::InvalidImageError;
pub use crate::icondir::{IconDir, IconDirEntry};
pub use crate::image::{Image, PixelFormat};

//===========================================================================//

/// Encodes the images, in order, as the bytes of an ICO file.  Returns an
/// error if `images` is empty or holds an invalid image.  No I/O is
/// performed, and the output depends only on the input.
pub fn encode(images: &[Image]) -> Result<Vec<u8>, InvalidImageError> {
    Ok(IconDir::from_images(images)?.to_bytes())
}

//===========================================================================//
