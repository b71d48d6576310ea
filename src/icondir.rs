use crate::bitmap::{read_bitmap, read_bitmap_size, write_bitmap};
use crate::bmpdepth::BmpDepth;
use crate::error::InvalidImageError;
use crate::image::Image;
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Seek, SeekFrom, Write};

//===========================================================================//

// The resource type number for icons (as opposed to cursors, which are 2).
const ICO_RESOURCE_TYPE: u16 = 1;

// The sizes of the ICONDIR and ICONDIRENTRY structs, in bytes.
const ICONDIR_LEN: usize = 6;
const ICONDIRENTRY_LEN: usize = 16;

//===========================================================================//

/// A collection of images; the contents of a single ICO file.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDir {
    entries: Vec<IconDirEntry>,
    // Sum of the entries' encoded data lengths.
    data_len: u64,
}

impl IconDir {
    /// Creates a new, empty collection of icons.
    pub fn new() -> IconDir {
        IconDir { entries: Vec::new(), data_len: 0 }
    }

    /// Encodes each of the images, in order, into a new collection.  Returns
    /// an error if `images` is empty, if any image is invalid, or if the
    /// result wouldn't fit in an ICO file.
    pub fn from_images(
        images: &[Image],
    ) -> Result<IconDir, InvalidImageError> {
        if images.is_empty() {
            return Err(InvalidImageError::NoImages);
        }
        if images.len() > (u16::MAX as usize) {
            return Err(InvalidImageError::TooManyImages(images.len()));
        }
        let mut icondir = IconDir::new();
        for image in images {
            icondir.add_entry(IconDirEntry::encode(image)?)?;
        }
        debug!(
            "Assembled ICO with {} images ({} bytes)",
            icondir.entries.len(),
            icondir.encoded_len()
        );
        Ok(icondir)
    }

    /// Returns the entries in this collection.
    pub fn entries(&self) -> &[IconDirEntry] {
        &self.entries
    }

    /// Adds an entry to the end of the collection.  Returns an error if the
    /// collection is already full, or if the entry's data would push the file
    /// past what 32-bit offsets can address.
    pub fn add_entry(
        &mut self,
        entry: IconDirEntry,
    ) -> Result<(), InvalidImageError> {
        if self.entries.len() >= (u16::MAX as usize) {
            return Err(InvalidImageError::TooManyImages(
                self.entries.len() + 1,
            ));
        }
        let new_len = self.encoded_len()
            + ICONDIRENTRY_LEN as u64
            + entry.data.len() as u64;
        if new_len > u32::MAX as u64 {
            return Err(InvalidImageError::TooLarge);
        }
        self.data_len += entry.data.len() as u64;
        self.entries.push(entry);
        Ok(())
    }

    /// Returns the total size of the ICO file, in bytes.
    pub fn encoded_len(&self) -> u64 {
        self.header_len() as u64 + self.data_len
    }

    fn header_len(&self) -> usize {
        ICONDIR_LEN + ICONDIRENTRY_LEN * self.entries.len()
    }

    /// Returns the ICONDIR header followed by one ICONDIRENTRY per image.
    fn header_bytes(&self) -> Vec<u8> {
        let mut header = vec![0u8; self.header_len()];
        // The first two bytes are reserved and stay zero.
        LittleEndian::write_u16(&mut header[2..4], ICO_RESOURCE_TYPE);
        LittleEndian::write_u16(&mut header[4..6], self.entries.len() as u16);
        let mut data_offset = self.header_len() as u32;
        for (index, entry) in self.entries.iter().enumerate() {
            let field = &mut header[ICONDIR_LEN + index * ICONDIRENTRY_LEN..]
                [..ICONDIRENTRY_LEN];
            // A width/height byte of zero indicates a size of 256 or more.
            field[0] = if entry.width > 255 { 0 } else { entry.width as u8 };
            field[1] = if entry.height > 255 { 0 } else { entry.height as u8 };
            // Color count and reserved bytes (2 and 3) stay zero.
            LittleEndian::write_u16(&mut field[4..6], 1); // color planes
            LittleEndian::write_u16(&mut field[6..8], entry.bits_per_pixel);
            let data_size = entry.data.len() as u32;
            LittleEndian::write_u32(&mut field[8..12], data_size);
            LittleEndian::write_u32(&mut field[12..16], data_offset);
            data_offset += data_size;
        }
        header
    }

    /// Serializes the whole ICO file into memory.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut output = self.header_bytes();
        output.reserve_exact(self.encoded_len() as usize - output.len());
        for entry in self.entries.iter() {
            output.extend_from_slice(&entry.data);
        }
        output
    }

    /// Writes an ICO file out to disk.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.header_bytes())?;
        for entry in self.entries.iter() {
            writer.write_all(&entry.data)?;
        }
        Ok(())
    }

    /// Reads an ICO file into memory.
    pub fn read<R: Read + Seek>(mut reader: R) -> io::Result<IconDir> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            invalid_data!(
                "Invalid reserved field value in ICONDIR \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let restype = reader.read_u16::<LittleEndian>()?;
        if restype != ICO_RESOURCE_TYPE {
            invalid_data!(
                "Invalid resource type (was {}, but must be {})",
                restype,
                ICO_RESOURCE_TYPE
            );
        }
        let num_entries = reader.read_u16::<LittleEndian>()? as usize;
        let mut entries = Vec::<IconDirEntry>::with_capacity(num_entries);
        let mut spans = Vec::<(u32, u32)>::with_capacity(num_entries);
        for _ in 0..num_entries {
            let width_byte = reader.read_u8()?;
            let height_byte = reader.read_u8()?;
            let _num_colors = reader.read_u8()?;
            let reserved = reader.read_u8()?;
            if reserved != 0 {
                invalid_data!(
                    "Invalid reserved field value in ICONDIRENTRY \
                     (was {}, but must be 0)",
                    reserved
                );
            }
            let _color_planes = reader.read_u16::<LittleEndian>()?;
            let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
            let data_size = reader.read_u32::<LittleEndian>()?;
            let data_offset = reader.read_u32::<LittleEndian>()?;
            // Treat a zero byte as 256 for now; the real size comes from the
            // BMP header below, once the data has been read.
            let width = if width_byte == 0 { 256 } else { width_byte as u32 };
            let height =
                if height_byte == 0 { 256 } else { height_byte as u32 };
            spans.push((data_offset, data_size));
            entries.push(IconDirEntry {
                width,
                height,
                bits_per_pixel,
                data: Vec::new(),
            });
        }
        let total_len: u64 = spans.iter().map(|&(_, size)| size as u64).sum();
        if total_len > u32::MAX as u64 {
            invalid_data!("Image data in ICO file exceeds 4 GiB");
        }
        // Check every span against the stream length before allocating
        // buffers sized by the directory.
        let stream_len = reader.seek(SeekFrom::End(0))?;
        for (index, &(data_offset, data_size)) in spans.iter().enumerate() {
            let end = data_offset as u64 + data_size as u64;
            if end > stream_len {
                invalid_data!(
                    "Image data for entry {} runs past end of file \
                     (ends at {}, but file is {} bytes)",
                    index,
                    end,
                    stream_len
                );
            }
        }
        for (index, &(data_offset, data_size)) in spans.iter().enumerate() {
            reader.seek(SeekFrom::Start(data_offset as u64))?;
            let mut data = vec![0u8; data_size as usize];
            reader.read_exact(&mut data)?;
            entries[index].data = data;
        }
        for entry in entries.iter_mut() {
            // Errors in malformed entries are deferred until the caller
            // actually tries to decode them.
            if let Ok((width, height)) =
                read_bitmap_size(&mut entry.data.as_slice())
            {
                entry.width = width;
                entry.height = height;
            }
        }
        debug!("Read ICO with {} images", entries.len());
        Ok(IconDir { entries, data_len: total_len })
    }
}

//===========================================================================//

/// One entry in an ICO file; a single image, encoded as a BMP frame.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDirEntry {
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    data: Vec<u8>,
}

impl IconDirEntry {
    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the bits-per-pixel (color depth) of the image.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns the raw, encoded image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Encodes an image as a BMP frame in a new entry.  RGB images are
    /// encoded at 24 bpp, and RGBA images at 32 bpp.
    pub fn encode(image: &Image) -> Result<IconDirEntry, InvalidImageError> {
        image.validate()?;
        let data = write_bitmap(image);
        let bits_per_pixel =
            BmpDepth::for_format(image.format()).bits_per_pixel();
        debug!(
            "Encoded {}x{} image at {} bpp ({} bytes)",
            image.width(),
            image.height(),
            bits_per_pixel,
            data.len()
        );
        Ok(IconDirEntry {
            width: image.width(),
            height: image.height(),
            bits_per_pixel,
            data,
        })
    }

    /// Decodes this entry into an image.  Returns an error if the data is
    /// malformed or uses a format other than uncompressed 24 or 32 bpp.
    pub fn decode(&self) -> io::Result<Image> {
        let image = read_bitmap(&self.data)?;
        if image.width() != self.width || image.height() != self.height {
            invalid_data!(
                "Encoded image has wrong dimensions \
                 (was {}x{}, but should be {}x{})",
                image.width(),
                image.height(),
                self.width,
                self.height
            );
        }
        Ok(image)
    }
}

//===========================================================================//


//===========================================================================//
