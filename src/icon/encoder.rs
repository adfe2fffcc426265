//! PNG-in-ICO encoder
//!
//! Produces the smallest icon container Windows accepts: a 6-byte header,
//! a single 16-byte directory entry and one PNG stream as the image payload.
//! Readers since Vista decode the PNG directly, so no BMP/AND-mask conversion
//! is needed.

use crate::utils::error::{RandomizerError, Result};
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::{Cursor, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::debug;

/// Size of the ICONDIR header
pub const HEADER_LEN: usize = 6;

/// Size of one ICONDIRENTRY
pub const DIR_ENTRY_LEN: usize = 16;

/// Offset of the payload; fixed because there is exactly one entry
pub const PAYLOAD_OFFSET: u32 = (HEADER_LEN + DIR_ENTRY_LEN) as u32;

/// Resource type stored in the header (1 = icon, 2 = cursor)
const RESOURCE_TYPE_ICON: u16 = 1;

/// Position of the payload-length field inside the file
const PAYLOAD_LEN_POS: u64 = (HEADER_LEN + 8) as u64;

/// Encoded icon container bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconArtifact {
    bytes: Vec<u8>,
}

impl IconArtifact {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Width byte of the directory entry (0 means 256 or more)
    pub fn width_byte(&self) -> u8 {
        self.bytes[HEADER_LEN]
    }

    /// Height byte of the directory entry (0 means 256 or more)
    pub fn height_byte(&self) -> u8 {
        self.bytes[HEADER_LEN + 1]
    }

    /// Payload length as declared in the directory entry
    pub fn declared_payload_len(&self) -> u32 {
        let pos = PAYLOAD_LEN_POS as usize;
        u32::from_le_bytes([
            self.bytes[pos],
            self.bytes[pos + 1],
            self.bytes[pos + 2],
            self.bytes[pos + 3],
        ])
    }

    /// The embedded PNG stream
    pub fn payload(&self) -> &[u8] {
        &self.bytes[PAYLOAD_OFFSET as usize..]
    }
}

/// Decode a raster image from disk.
///
/// The format is sniffed from the file content, so a PNG named `.jpg`
/// still decodes.
pub fn decode_image(path: &Path) -> Result<DynamicImage> {
    let decode_error = |message: String| RandomizerError::Decode {
        path: path.to_path_buf(),
        message,
    };

    image::io::Reader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_error(e.to_string()))?
        .decode()
        .map_err(|e| decode_error(e.to_string()))
}

/// Directory entries store dimensions in one byte; 256 and above wrap to 0.
pub fn dimension_byte(value: u32) -> u8 {
    if value >= 256 {
        0
    } else {
        value as u8
    }
}

/// Encode an image into a single-entry icon container.
pub fn encode_icon(image: &DynamicImage) -> Result<IconArtifact> {
    let (width, height) = image.dimensions();
    let mut cursor = Cursor::new(Vec::new());

    write_container(&mut cursor, width, height).map_err(encode_io_error)?;

    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| RandomizerError::Encode(e.to_string()))?;

    let payload_len = cursor.get_ref().len() - PAYLOAD_OFFSET as usize;
    let payload_len = u32::try_from(payload_len).map_err(|_| {
        RandomizerError::Encode(format!(
            "payload of {} bytes does not fit the directory entry",
            payload_len
        ))
    })?;

    // Back-patch the size now that the PNG stream is written
    cursor
        .seek(SeekFrom::Start(PAYLOAD_LEN_POS))
        .and_then(|_| cursor.write_all(&payload_len.to_le_bytes()))
        .map_err(encode_io_error)?;

    debug!(
        "Encoded {}x{} image into icon ({} byte payload)",
        width, height, payload_len
    );

    Ok(IconArtifact {
        bytes: cursor.into_inner(),
    })
}

fn write_container<W: Write>(w: &mut W, width: u32, height: u32) -> std::io::Result<()> {
    // ICONDIR
    w.write_all(&0u16.to_le_bytes())?; // reserved
    w.write_all(&RESOURCE_TYPE_ICON.to_le_bytes())?;
    w.write_all(&1u16.to_le_bytes())?; // image count

    // ICONDIRENTRY
    w.write_all(&[dimension_byte(width), dimension_byte(height)])?;
    w.write_all(&[0u8, 0u8])?; // palette size, reserved
    w.write_all(&0u16.to_le_bytes())?; // color planes
    w.write_all(&0u16.to_le_bytes())?; // bits per pixel, taken from the payload
    w.write_all(&0u32.to_le_bytes())?; // payload length, patched later
    w.write_all(&PAYLOAD_OFFSET.to_le_bytes())?;
    Ok(())
}

fn encode_io_error(e: std::io::Error) -> RandomizerError {
    RandomizerError::Encode(e.to_string())
}
