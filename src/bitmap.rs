use crate::bmpdepth::{mask_row_size, BmpDepth};
use crate::image::{Image, PixelFormat};
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use std::io::{self, Read};

//===========================================================================//

// The size of a BITMAPINFOHEADER struct, in bytes.
pub(crate) const BMP_HEADER_LEN: u32 = 40;

// The only compression method we read or write (BI_RGB).
const BI_RGB: u32 = 0;

//===========================================================================//

// The largest frame that still leaves room for an ICONDIR and one
// ICONDIRENTRY within the 32-bit offsets of an ICO file.
pub(crate) const MAX_FRAME_LEN: u64 = u32::MAX as u64 - 6 - 16;

/// Returns the number of bytes in a BMP frame of the given size and format,
/// or `None` if that number doesn't fit in a `u64`.
pub(crate) fn frame_len(
    width: u32,
    height: u32,
    format: PixelFormat,
) -> Option<u64> {
    let bytes_per_pixel = format.channels() as u64;
    let row_size = (width as u64 * bytes_per_pixel + 3) / 4 * 4;
    let mask_row_size = (width as u64 + 31) / 32 * 4;
    (height as u64)
        .checked_mul(row_size + mask_row_size)?
        .checked_add(BMP_HEADER_LEN as u64)
}

/// Returns the number of bytes that `write_bitmap` will produce for `image`.
pub(crate) fn encoded_len(image: &Image) -> u64 {
    frame_len(image.width(), image.height(), image.format())
        .unwrap_or(u64::MAX)
}

/// Encodes a validated image as a BMP frame for an ICO file: a
/// BITMAPINFOHEADER, then the color plane, then the AND mask.
pub(crate) fn write_bitmap(image: &Image) -> Vec<u8> {
    let depth = BmpDepth::for_format(image.format());
    let width = image.width();
    let height = image.height() as usize;
    let channels = image.format().channels();
    let row_size = depth.row_size(width);
    let data_size = encoded_len(image) as usize;
    let mut data = vec![0u8; data_size];

    // Write the BITMAPINFOHEADER struct.  The height field counts the rows
    // of both the color plane and the AND mask, so it is doubled.
    LittleEndian::write_u32(&mut data[0..4], BMP_HEADER_LEN);
    LittleEndian::write_i32(&mut data[4..8], width as i32);
    LittleEndian::write_i32(&mut data[8..12], 2 * height as i32);
    LittleEndian::write_u16(&mut data[12..14], 1); // planes
    LittleEndian::write_u16(&mut data[14..16], depth.bits_per_pixel());
    LittleEndian::write_u32(&mut data[16..20], BI_RGB);
    // Image size, pixels-per-meter, and color counts are all left zero.

    // Write the color data, which is stored row by row, starting from the
    // *bottom* row, with each pixel in BGR(A) order.  The row padding is
    // already zero.
    let pixels = image.data();
    let src_row_len = (width as usize) * channels;
    let mut dest_start = BMP_HEADER_LEN as usize;
    for row in (0..height).rev() {
        let src = &pixels[row * src_row_len..][..src_row_len];
        let dest = &mut data[dest_start..][..src_row_len];
        for (out, pixel) in
            dest.chunks_exact_mut(channels).zip(src.chunks_exact(channels))
        {
            out[0] = pixel[2];
            out[1] = pixel[1];
            out[2] = pixel[0];
            if channels == 4 {
                out[3] = pixel[3];
            }
        }
        dest_start += row_size;
    }

    // The AND mask follows and is left all zero: a 24-bpp frame is fully
    // opaque, and a 32-bpp frame carries its opacity in the alpha channel.
    debug_assert_eq!(
        data.len() - dest_start,
        mask_row_size(width) * height
    );
    data
}

//===========================================================================//

pub(crate) fn read_bitmap_size<R: Read>(
    reader: &mut R,
) -> io::Result<(u32, u32)> {
    let header_size = reader.read_u32::<LittleEndian>()?;
    if header_size != BMP_HEADER_LEN {
        invalid_data!(
            "Invalid BMP header size (was {}, must be {})",
            header_size,
            BMP_HEADER_LEN
        );
    }
    let width = reader.read_i32::<LittleEndian>()?;
    if width < 1 {
        invalid_data!("Invalid BMP width (was {}, but must be at least 1)",
                      width);
    }
    let height = reader.read_i32::<LittleEndian>()?;
    if height % 2 != 0 {
        // The height is stored doubled, counting the rows of both the
        // color data and the AND mask, so it should be divisible by 2.
        invalid_data!(
            "Invalid height field in BMP header \
             (was {}, but must be divisible by 2)",
            height
        );
    }
    let height = height / 2;
    if height < 1 {
        invalid_data!("Invalid BMP height (was {}, but must be at least 1)",
                      height);
    }
    Ok((width as u32, height as u32))
}

/// Decodes a BMP frame written by `write_bitmap` (or any other uncompressed
/// 24- or 32-bpp icon frame).
pub(crate) fn read_bitmap(data: &[u8]) -> io::Result<Image> {
    let mut reader = data;
    let (width, height) = read_bitmap_size(&mut reader)?;
    let _planes = reader.read_u16::<LittleEndian>()?;
    let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
    let compression = reader.read_u32::<LittleEndian>()?;
    if compression != BI_RGB {
        invalid_data!("Unsupported BMP compression ({})", compression);
    }
    let _image_size = reader.read_u32::<LittleEndian>()?;
    let _horz_ppm = reader.read_i32::<LittleEndian>()?;
    let _vert_ppm = reader.read_i32::<LittleEndian>()?;
    let _colors_used = reader.read_u32::<LittleEndian>()?;
    let _colors_important = reader.read_u32::<LittleEndian>()?;
    let depth = match BmpDepth::from_bits_per_pixel(bits_per_pixel) {
        Some(depth) => depth,
        None => {
            invalid_data!("Unsupported BMP bits-per-pixel ({})",
                          bits_per_pixel);
        }
    };

    // Make sure the data is all there before allocating anything sized by
    // the header fields.
    let row_size = depth.row_size(width);
    let mask_row_size = mask_row_size(width);
    let needed = (height as u64) * ((row_size + mask_row_size) as u64);
    if (reader.len() as u64) < needed {
        invalid_data!(
            "BMP data is truncated (has {} bytes after header, \
             but {}x{} image at {} bpp needs {})",
            reader.len(),
            width,
            height,
            bits_per_pixel,
            needed
        );
    }

    // Read in the color data, which is stored row by row, starting from
    // the *bottom* row:
    let bytes_per_pixel = depth.bytes_per_pixel();
    let width = width as usize;
    let height_px = height as usize;
    let mut rgba = vec![u8::MAX; width * height_px * 4];
    let mut row_buffer = vec![0u8; row_size];
    for row in (0..height_px).rev() {
        reader.read_exact(&mut row_buffer)?;
        let dest = &mut rgba[row * width * 4..][..width * 4];
        for (out, pixel) in dest
            .chunks_exact_mut(4)
            .zip(row_buffer.chunks_exact(bytes_per_pixel))
        {
            out[0] = pixel[2];
            out[1] = pixel[1];
            out[2] = pixel[0];
            if bytes_per_pixel == 4 {
                out[3] = pixel[3];
            }
        }
    }

    if depth == BmpDepth::ThirtyTwo {
        return to_image(width as u32, height, PixelFormat::Rgba, rgba);
    }

    // For 24 bpp, the AND mask (1 bit per pixel, again stored from the
    // bottom row up) is the only source of transparency.
    let mut mask_buffer = vec![0u8; mask_row_size];
    let mut any_transparent = false;
    for row in (0..height_px).rev() {
        reader.read_exact(&mut mask_buffer)?;
        for col in 0..width {
            let byte = mask_buffer[col / 8];
            if (byte >> (7 - (col % 8))) & 0x1 == 1 {
                rgba[(row * width + col) * 4 + 3] = 0;
                any_transparent = true;
            }
        }
    }
    if any_transparent {
        to_image(width as u32, height, PixelFormat::Rgba, rgba)
    } else {
        let rgb: Vec<u8> = rgba
            .chunks_exact(4)
            .flat_map(|pixel| pixel[..3].iter().copied())
            .collect();
        to_image(width as u32, height, PixelFormat::Rgb, rgb)
    }
}

fn to_image(
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
) -> io::Result<Image> {
    match Image::new(width, height, format, data) {
        Ok(image) => Ok(image),
        Err(error) => invalid_data!("Malformed BMP data: {}", error),
    }
}

//===========================================================================//


//===========================================================================//
