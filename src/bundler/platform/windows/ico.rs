//! ICO file parsing and `GRPICON` directory assembly.
//!
//! An ICO file is a 6-byte header (reserved, type, count) followed by one
//! 16-byte directory entry per image, each pointing at the image bytes by file
//! offset. A PE executable stores the same images as individual `RT_ICON`
//! resources plus one `RT_GROUP_ICON` directory whose 14-byte entries refer to
//! the images by resource id instead of file offset.
//!
//! All multi-byte fields are little-endian.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};

/// Size of the ICO / GRPICON header.
pub const HEADER_LEN: usize = 6;

/// Size of one directory entry in an ICO file.
pub const ICO_ENTRY_LEN: usize = 16;

/// Size of one directory entry in a `GRPICON` resource.
pub const GRPICON_ENTRY_LEN: usize = 14;

/// Header `type` value for icons (2 would be cursors).
const ICON_TYPE: u16 = 1;

/// One image directory entry of an ICO file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcoDirectoryEntry {
    /// Width in pixels; 0 means 256.
    pub width: u8,
    /// Height in pixels; 0 means 256.
    pub height: u8,
    /// Palette size; 0 for true-color images.
    pub color_count: u8,
    /// Color planes.
    pub planes: u16,
    /// Bits per pixel.
    pub bit_count: u16,
    /// Size of the image data in bytes.
    pub bytes_in_res: u32,
    /// Offset of the image data from the start of the file.
    pub image_offset: u32,
}

impl IcoDirectoryEntry {
    fn parse(raw: &[u8]) -> Self {
        // raw[3] is reserved
        Self {
            width: raw[0],
            height: raw[1],
            color_count: raw[2],
            planes: u16_at(raw, 4),
            bit_count: u16_at(raw, 6),
            bytes_in_res: u32_at(raw, 8),
            image_offset: u32_at(raw, 12),
        }
    }

    fn byte_range(&self) -> Option<std::ops::Range<usize>> {
        let start = usize::try_from(self.image_offset).ok()?;
        let len = usize::try_from(self.bytes_in_res).ok()?;
        Some(start..start.checked_add(len)?)
    }
}

/// An image from an ICO file together with its raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcoImage {
    /// Directory entry as read from the file.
    pub entry: IcoDirectoryEntry,
    /// Image bytes (BMP DIB or PNG), exactly `entry.bytes_in_res` long.
    pub data: Vec<u8>,
}

/// A fully parsed and validated ICO file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFile {
    path: PathBuf,
    image_type: u16,
    images: Vec<IcoImage>,
}

impl IconFile {
    /// Reads and parses the ICO file at `path`.
    pub async fn read(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .fs_context("reading icon file", path)?;
        Self::parse(path, &bytes)
    }

    /// Parses ICO bytes; `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// [`Error::BinaryFormat`] if the header is not an icon header, the
    /// directory is truncated, or any image lies outside the file.
    pub fn parse(path: &Path, bytes: &[u8]) -> Result<Self> {
        let invalid = |reason: String| Error::BinaryFormat {
            path: path.to_path_buf(),
            reason,
        };

        if bytes.len() < HEADER_LEN {
            return Err(invalid(format!(
                "header needs {HEADER_LEN} bytes, file has {}",
                bytes.len()
            )));
        }

        let reserved = u16_at(bytes, 0);
        let image_type = u16_at(bytes, 2);
        let count = u16_at(bytes, 4);

        if reserved != 0 {
            return Err(invalid(format!("reserved header field is {reserved}, expected 0")));
        }
        if image_type != ICON_TYPE {
            return Err(invalid(format!(
                "image type is {image_type}, expected {ICON_TYPE} (icon)"
            )));
        }
        if count == 0 {
            return Err(invalid("file contains no images".to_string()));
        }

        let directory_end = HEADER_LEN + ICO_ENTRY_LEN * usize::from(count);
        if bytes.len() < directory_end {
            return Err(invalid(format!(
                "directory of {count} images needs {directory_end} bytes, file has {}",
                bytes.len()
            )));
        }

        let images = bytes[HEADER_LEN..directory_end]
            .chunks_exact(ICO_ENTRY_LEN)
            .enumerate()
            .map(|(index, raw)| -> Result<IcoImage> {
                let entry = IcoDirectoryEntry::parse(raw);
                let data = entry
                    .byte_range()
                    .and_then(|range| bytes.get(range))
                    .ok_or_else(|| {
                        invalid(format!(
                            "image {} ({} bytes at offset {}) extends past end of file ({} bytes)",
                            index + 1,
                            entry.bytes_in_res,
                            entry.image_offset,
                            bytes.len()
                        ))
                    })?;
                log::debug!(
                    "icon image {}: {}x{} {}bpp, {} bytes",
                    index + 1,
                    entry.width,
                    entry.height,
                    entry.bit_count,
                    entry.bytes_in_res
                );
                Ok(IcoImage {
                    entry,
                    data: data.to_vec(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            path: path.to_path_buf(),
            image_type,
            images,
        })
    }

    /// Path the file was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Header `type` field.
    pub fn image_type(&self) -> u16 {
        self.image_type
    }

    /// Images in directory order.
    pub fn images(&self) -> &[IcoImage] {
        &self.images
    }
}

/// Icon images with the resource ids they are stored under in a PE file.
///
/// Ids are assigned sequentially from 1 in directory order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconGroup {
    image_type: u16,
    images: Vec<(u16, IcoImage)>,
}

impl IconGroup {
    /// Assigns resource ids `1..=N` to the images of `file`.
    pub fn new(file: IconFile) -> Self {
        let images = (1u16..).zip(file.images).collect();
        Self {
            image_type: file.image_type,
            images,
        }
    }

    /// `(resource id, image bytes)` pairs to store as `RT_ICON` resources.
    pub fn icons(&self) -> impl Iterator<Item = (u16, &[u8])> {
        self.images
            .iter()
            .map(|(id, image)| (*id, image.data.as_slice()))
    }

    /// Number of images in the group.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the group has no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Serialises the `RT_GROUP_ICON` directory.
    ///
    /// Same layout as the ICO directory, except each entry is 14 bytes and
    /// ends with a 16-bit resource id where the ICO file has a 32-bit offset.
    pub fn to_grpicon(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + GRPICON_ENTRY_LEN * self.images.len());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&self.image_type.to_le_bytes());
        // count fits: it came from a u16 header field
        out.extend_from_slice(&(self.images.len() as u16).to_le_bytes());

        for (id, image) in &self.images {
            let entry = &image.entry;
            out.push(entry.width);
            out.push(entry.height);
            out.push(entry.color_count);
            out.push(0);
            out.extend_from_slice(&entry.planes.to_le_bytes());
            out.extend_from_slice(&entry.bit_count.to_le_bytes());
            out.extend_from_slice(&entry.bytes_in_res.to_le_bytes());
            out.extend_from_slice(&id.to_le_bytes());
        }
        out
    }
}

fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds an ICO file whose image data is laid out in reverse directory
    /// order, so file offsets and directory order disagree.
    pub(crate) fn sample_ico() -> Vec<u8> {
        let first = vec![0xAA; 8];
        let second = vec![0xBB; 4];
        let directory_end = HEADER_LEN + 2 * ICO_ENTRY_LEN;
        let second_offset = directory_end as u32;
        let first_offset = second_offset + second.len() as u32;

        let mut bytes = vec![0, 0, 1, 0, 2, 0];
        // 16x16, 16 colors, 1 plane, 4bpp
        bytes.extend_from_slice(&[16, 16, 16, 0, 1, 0, 4, 0]);
        bytes.extend_from_slice(&(first.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&first_offset.to_le_bytes());
        // 32x32, true color, 1 plane, 32bpp
        bytes.extend_from_slice(&[32, 32, 0, 0xFF, 1, 0, 32, 0]);
        bytes.extend_from_slice(&(second.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&second_offset.to_le_bytes());
        bytes.extend_from_slice(&second);
        bytes.extend_from_slice(&first);
        bytes
    }

    fn parse(bytes: &[u8]) -> Result<IconFile> {
        IconFile::parse(Path::new("app.ico"), bytes)
    }

    #[test]
    fn parses_directory_entries() {
        let file = parse(&sample_ico()).unwrap();
        assert_eq!(file.image_type(), 1);
        let images = file.images();
        assert_eq!(images.len(), 2);
        assert_eq!(
            images[0].entry,
            IcoDirectoryEntry {
                width: 16,
                height: 16,
                color_count: 16,
                planes: 1,
                bit_count: 4,
                bytes_in_res: 8,
                image_offset: 42,
            }
        );
        assert_eq!(images[0].data, vec![0xAA; 8]);
        assert_eq!(images[1].entry.bit_count, 32);
        assert_eq!(images[1].entry.image_offset, 38);
        assert_eq!(images[1].data, vec![0xBB; 4]);
    }

    #[test]
    fn grpicon_uses_sequential_ids_instead_of_offsets() {
        let group = IconGroup::new(parse(&sample_ico()).unwrap());
        let blob = group.to_grpicon();
        assert_eq!(blob.len(), HEADER_LEN + GRPICON_ENTRY_LEN * 2);
        assert_eq!(&blob[..6], &[0, 0, 1, 0, 2, 0]);

        let first = &blob[6..20];
        assert_eq!(&first[..8], &[16, 16, 16, 0, 1, 0, 4, 0]);
        assert_eq!(&first[8..12], &8u32.to_le_bytes());
        assert_eq!(&first[12..14], &1u16.to_le_bytes());

        let second = &blob[20..34];
        // reserved byte is zeroed even though the file had 0xFF
        assert_eq!(&second[..8], &[32, 32, 0, 0, 1, 0, 32, 0]);
        assert_eq!(&second[8..12], &4u32.to_le_bytes());
        assert_eq!(&second[12..14], &2u16.to_le_bytes());

        let icons: Vec<_> = group.icons().collect();
        assert_eq!(icons[0], (1, &[0xAA; 8][..]));
        assert_eq!(icons[1], (2, &[0xBB; 4][..]));
    }

    #[test]
    fn rejects_short_header() {
        let err = parse(&[0, 0, 1]).unwrap_err();
        assert!(matches!(err, Error::BinaryFormat { .. }));
        assert!(err.to_string().contains("app.ico"));
    }

    #[test]
    fn rejects_cursor_files() {
        let mut bytes = sample_ico();
        bytes[2] = 2;
        let err = parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("image type is 2"));
    }

    #[test]
    fn rejects_empty_directory() {
        let err = parse(&[0, 0, 1, 0, 0, 0]).unwrap_err();
        assert!(err.to_string().contains("no images"));
    }

    #[test]
    fn rejects_count_larger_than_directory() {
        let mut bytes = sample_ico();
        bytes[4] = 9;
        let err = parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("directory of 9 images"));
    }

    #[test]
    fn rejects_truncated_image_data() {
        let mut bytes = sample_ico();
        bytes.truncate(bytes.len() - 1);
        let err = parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("image 1"));
    }
}
