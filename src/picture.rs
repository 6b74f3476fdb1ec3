//! Cover art decoding and the payloads handed back to callers

use crate::error::Result;
use crate::macros::err;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use lofty::picture::{MimeType, Picture};

/// A picture read out of a bound file
///
/// The payload is an owned copy; it stays valid after the session moves on
/// or rewrites the picture list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverArt {
	pub(crate) data: Vec<u8>,
	pub(crate) mime_type: MimeType,
}

impl CoverArt {
	/// The raw image bytes
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// The MIME type recorded alongside the payload
	pub fn mime_type(&self) -> &MimeType {
		&self.mime_type
	}

	/// Consume the picture, returning its bytes
	pub fn into_data(self) -> Vec<u8> {
		self.data
	}
}

/// Read and validate an image file before it goes anywhere near a tag
///
/// Only JPEG and PNG payloads are accepted; the content decides, not the
/// extension.
///
/// # Errors
///
/// * `path` does not exist or cannot be opened
/// * The content is not a JPEG or PNG image
pub(crate) fn read_image(path: impl AsRef<Path>) -> Result<Picture> {
	let file = File::open(path.as_ref())?;
	let mut reader = BufReader::new(file);

	let Ok(picture) = Picture::from_reader(&mut reader) else {
		err!(Unsupported)
	};

	if !matches!(picture.mime_type(), Some(MimeType::Jpeg | MimeType::Png)) {
		err!(Unsupported)
	}

	Ok(picture)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ErrorKind;

	use std::io::Write as _;

	// Enough of a PNG for MIME sniffing
	const PNG_STUB: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

	#[test_log::test]
	fn png_stub_is_accepted() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(PNG_STUB).unwrap();

		let picture = read_image(file.path()).unwrap();
		assert_eq!(picture.mime_type(), Some(&MimeType::Png));
	}

	#[test_log::test]
	fn non_image_content_is_unsupported() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(b"not an image at all").unwrap();

		let err = read_image(file.path()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::Unsupported));
	}

	#[test_log::test]
	fn gif_content_is_unsupported() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(b"GIF89a\x01\x00\x01\x00").unwrap();

		let err = read_image(file.path()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::Unsupported));
	}

	#[test_log::test]
	fn missing_file_is_not_found() {
		let err = read_image("no/such/image.png").unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::NotFound));
	}
}
