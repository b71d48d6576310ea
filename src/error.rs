use thiserror::Error;

//===========================================================================//

/// An error describing why a set of images can't be encoded as an ICO file.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvalidImageError {
    /// The image has a width of zero.
    #[error("Invalid width (was 0, but must be at least 1)")]
    ZeroWidth,
    /// The image has a height of zero.
    #[error("Invalid height (was 0, but must be at least 1)")]
    ZeroHeight,
    /// The pixel buffer doesn't match the declared dimensions and format.
    #[error(
        "Invalid data length (was {actual}, but must be {expected} for \
         {width}x{height} image)"
    )]
    DataLength {
        /// Declared width, in pixels.
        width: u32,
        /// Declared height, in pixels.
        height: u32,
        /// Number of bytes the dimensions call for.
        expected: u64,
        /// Number of bytes actually supplied.
        actual: usize,
    },
    /// The image list was empty.
    #[error("No images to encode")]
    NoImages,
    /// More images than an ICO directory can count.
    #[error("Too many images (was {0}, but max is 65535)")]
    TooManyImages(usize),
    /// The encoded file would not be addressable with 32-bit offsets.
    #[error("Encoded ICO data would exceed 4 GiB")]
    TooLarge,
}

//===========================================================================//
