use crate::error::{Error, Result};
use crate::image::RenderedImage;
use crate::size::IconSize;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

//===========================================================================//

// Sizes of the fixed-layout ICONDIR and ICONDIRENTRY structs, in bytes.
const ICONDIR_LEN: u32 = 6;
const ICONDIRENTRY_LEN: u32 = 16;

// The ICONDIR resource type for icons (as opposed to 2, for cursors).
const RESOURCE_TYPE_ICON: u16 = 1;

// Every payload is a PNG, which ICO consumers treat as 32bpp ARGB.
const COLOR_PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 32;

//===========================================================================//

/// A collection of rendered images; the contents of a single ICO file.
#[derive(Clone, Debug, Default)]
pub struct IconDir {
    entries: Vec<RenderedImage>,
}

impl IconDir {
    /// Creates a new, empty collection of icons.
    pub fn new() -> IconDir {
        IconDir { entries: Vec::new() }
    }

    /// Returns the images in this collection, in directory order.
    pub fn entries(&self) -> &[RenderedImage] {
        &self.entries
    }

    /// Adds an image to the end of the collection.
    pub fn add_entry(&mut self, image: RenderedImage) {
        self.entries.push(image);
    }

    /// Adds PNG `data` rendered at `size` pixels.  Returns an error (and
    /// leaves the collection unchanged) if `size` is not between 1 and 256.
    pub fn add_png(&mut self, data: Vec<u8>, size: u32) -> Result<()> {
        let size = IconSize::new(size)?;
        self.add_entry(RenderedImage::new(data, size));
        Ok(())
    }

    /// Returns the number of bytes that `write` will produce.
    pub fn encoded_len(&self) -> Result<u32> {
        encoded_len(&self.entries)
    }

    /// Writes an ICO file.  All validation happens before the first byte is
    /// written, so an error other than `Error::Io` means `writer` received
    /// nothing.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        write_images(&self.entries, writer)
    }

    /// Encodes the collection into a new ICO buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(self.encoded_len()? as usize);
        self.write(&mut output)?;
        Ok(output)
    }
}

impl From<Vec<RenderedImage>> for IconDir {
    fn from(entries: Vec<RenderedImage>) -> IconDir {
        IconDir { entries }
    }
}

//===========================================================================//

/// Encodes `images`, in order, as a single ICO file.
pub fn encode(images: &[RenderedImage]) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(encoded_len(images)? as usize);
    write_images(images, &mut bytes)?;
    tracing::debug!(
        images = images.len(),
        bytes = bytes.len(),
        "encoded ICO file"
    );
    Ok(bytes)
}

fn encoded_len(images: &[RenderedImage]) -> Result<u32> {
    let mut total = data_offset_start(images)?;
    for image in images.iter() {
        total = checked_advance(total, image)?;
    }
    Ok(total)
}

// Offset of the first payload, just past the header and directory.
fn data_offset_start(images: &[RenderedImage]) -> Result<u32> {
    if images.is_empty() {
        return Err(Error::NoImages);
    }
    if images.len() > (u16::MAX as usize) {
        return Err(Error::TooManyImages(images.len()));
    }
    Ok(ICONDIR_LEN + ICONDIRENTRY_LEN * (images.len() as u32))
}

fn write_images<W>(images: &[RenderedImage], mut writer: W) -> Result<()>
where
    W: Write,
{
    let total_len = encoded_len(images)?;
    writer.write_u16::<LittleEndian>(0)?; // reserved
    writer.write_u16::<LittleEndian>(RESOURCE_TYPE_ICON)?;
    writer.write_u16::<LittleEndian>(images.len() as u16)?;
    let mut data_offset = data_offset_start(images)?;
    for image in images.iter() {
        let dimension = image.logical_size().dimension_byte();
        writer.write_u8(dimension)?; // width
        writer.write_u8(dimension)?; // height
        writer.write_u8(0)?; // palette size
        writer.write_u8(0)?; // reserved
        writer.write_u16::<LittleEndian>(COLOR_PLANES)?;
        writer.write_u16::<LittleEndian>(BITS_PER_PIXEL)?;
        writer.write_u32::<LittleEndian>(image.data().len() as u32)?;
        writer.write_u32::<LittleEndian>(data_offset)?;
        data_offset = checked_advance(data_offset, image)?;
    }
    debug_assert_eq!(data_offset, total_len);
    for image in images.iter() {
        writer.write_all(image.data())?;
    }
    Ok(())
}

fn checked_advance(offset: u32, image: &RenderedImage) -> Result<u32> {
    u32::try_from(image.data().len())
        .ok()
        .and_then(|len| offset.checked_add(len))
        .ok_or(Error::ImageTooLarge)
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{encode, IconDir};
    use crate::error::Error;
    use crate::image::RenderedImage;
    use crate::size::IconSize;
    use std::io::{self, Write};

    fn image(data: &[u8], size: u32) -> RenderedImage {
        RenderedImage::new(data.to_vec(), IconSize::new(size).unwrap())
    }

    #[test]
    fn write_empty_icon_set_fails() {
        let icondir = IconDir::new();
        let mut output = Vec::<u8>::new();
        match icondir.write(&mut output) {
            Err(Error::NoImages) => {}
            other => panic!("expected NoImages, got {:?}", other),
        }
        assert!(output.is_empty());
    }

    #[test]
    fn write_single_png_entry() {
        let output = encode(&[image(b"\x89PNG", 32)]).unwrap();
        let expected: &[u8] = b"\
            \x00\x00\x01\x00\x01\x00\
            \
            \x20\x20\x00\x00\x01\x00\x20\x00\
            \x04\x00\x00\x00\x16\x00\x00\x00\
            \
            \x89PNG";
        assert_eq!(output.as_slice(), expected);
    }

    #[test]
    fn write_two_entries_with_256() {
        let output = encode(&[image(b"abc", 16), image(b"de", 256)]).unwrap();
        let expected: &[u8] = b"\
            \x00\x00\x01\x00\x02\x00\
            \
            \x10\x10\x00\x00\x01\x00\x20\x00\
            \x03\x00\x00\x00\x26\x00\x00\x00\
            \
            \x00\x00\x00\x00\x01\x00\x20\x00\
            \x02\x00\x00\x00\x29\x00\x00\x00\
            \
            abcde";
        assert_eq!(output.as_slice(), expected);
    }

    #[test]
    fn add_png_rejects_bad_size() {
        let mut icondir = IconDir::new();
        match icondir.add_png(vec![1, 2, 3], 257) {
            Err(Error::InvalidSize(257)) => {}
            other => panic!("expected InvalidSize, got {:?}", other),
        }
        match icondir.add_png(vec![1, 2, 3], 0) {
            Err(Error::InvalidSize(0)) => {}
            other => panic!("expected InvalidSize, got {:?}", other),
        }
        assert!(icondir.entries().is_empty());
        icondir.add_png(vec![1, 2, 3], 256).unwrap();
        assert_eq!(icondir.entries().len(), 1);
    }

    #[test]
    fn too_many_entries_fails_before_writing() {
        let entries = vec![image(b"", 1); (u16::MAX as usize) + 1];
        let icondir = IconDir::from(entries);
        let mut output = Vec::<u8>::new();
        match icondir.write(&mut output) {
            Err(Error::TooManyImages(65536)) => {}
            other => panic!("expected TooManyImages, got {:?}", other),
        }
        assert!(output.is_empty());
    }

    #[test]
    fn encoded_len_matches_output() {
        let icondir = IconDir::from(vec![
            image(&[7; 100], 48),
            image(&[8; 33], 64),
            image(&[9; 1], 128),
        ]);
        let output = icondir.to_bytes().unwrap();
        assert_eq!(icondir.encoded_len().unwrap() as usize, output.len());
        assert_eq!(output.len(), 6 + 16 * 3 + 134);
    }

    // Accepts `capacity` bytes, then fails every write.
    struct ShortWriter {
        capacity: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.capacity == 0 {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "full"));
            }
            let len = buf.len().min(self.capacity);
            self.capacity -= len;
            Ok(len)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_failures_are_io_errors() {
        let icondir = IconDir::from(vec![image(b"abc", 16), image(b"de", 32)]);
        for &capacity in &[0, 4, 20, 39] {
            match icondir.write(ShortWriter { capacity }) {
                Err(Error::Io(error)) => {
                    assert_eq!(error.kind(), io::ErrorKind::WriteZero)
                }
                other => panic!("expected Io error, got {:?}", other),
            }
        }
        assert!(icondir.write(ShortWriter { capacity: 43 }).is_ok());
    }

    #[test]
    fn encode_leaves_input_untouched() {
        let images = vec![image(b"abc", 16), image(b"de", 256)];
        let output = encode(&images).unwrap();
        assert_eq!(IconDir::from(images.clone()).to_bytes().unwrap(), output);
        assert_eq!(images[0].data(), b"abc");
        assert_eq!(images[1].data(), b"de");
    }
}

//===========================================================================//
