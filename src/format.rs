//! Container format classification

use crate::error::Result;

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use lofty::file::FileType;
use lofty::probe::Probe;

/// The container formats an [`Editor`](crate::Editor) can bind to
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileFormat {
	/// MPEG audio carrying ID3v2 and/or ID3v1 tags
	Mpeg,
	/// An MP4 container carrying an `ilst` item list
	Mp4,
	/// Anything else; such files cannot be bound
	Unsupported,
}

impl Display for FileFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FileFormat::Mpeg => f.write_str("MPEG"),
			FileFormat::Mp4 => f.write_str("MP4"),
			FileFormat::Unsupported => f.write_str("unsupported"),
		}
	}
}

impl FileFormat {
	fn from_file_type(file_type: FileType) -> Self {
		match file_type {
			FileType::Mpeg => FileFormat::Mpeg,
			FileType::Mp4 => FileFormat::Mp4,
			_ => FileFormat::Unsupported,
		}
	}
}

/// Classify the file at `path` by its content, falling back to the extension
///
/// Content sniffing skips over any leading ID3v2 block, so a tagged MPEG
/// stream classifies by its audio data rather than its tag.
///
/// # Errors
///
/// * `path` cannot be opened
/// * Reading the file header fails
pub fn detect(path: impl AsRef<Path>) -> Result<FileFormat> {
	let mut file = File::open(path.as_ref())?;
	detect_from(&mut file, path.as_ref())
}

/// Classify an already open `reader`, rewinding it afterwards
///
/// `path` only contributes its extension, consulted when the content is
/// inconclusive (for example a tag-only file with no audio frames yet).
pub(crate) fn detect_from<R>(reader: &mut R, path: &Path) -> Result<FileFormat>
where
	R: Read + Seek,
{
	let by_extension = FileType::from_path(path);

	let probe = Probe::new(&mut *reader).guess_file_type()?;
	let file_type = probe.file_type().or(by_extension);

	reader.seek(SeekFrom::Start(0))?;

	let format = file_type.map_or(FileFormat::Unsupported, FileFormat::from_file_type);
	log::debug!("Classified {} as {}", path.display(), format);

	Ok(format)
}

#[cfg(test)]
mod tests {
	use super::*;

	use std::io::Cursor;

	#[test_log::test]
	fn extension_fallback_for_tag_only_file() {
		// An ID3v2 header with an empty body and no audio frames behind it
		let mut bytes = vec![b'I', b'D', b'3', 4, 0, 0, 0, 0, 0, 0];
		bytes.resize(256, 0);

		let mut reader = Cursor::new(bytes);
		let format = detect_from(&mut reader, Path::new("tag_only.mp3")).unwrap();

		assert_eq!(format, FileFormat::Mpeg);
		assert_eq!(reader.position(), 0);
	}

	#[test_log::test]
	fn unknown_content_and_extension_is_unsupported() {
		let mut reader = Cursor::new(vec![0u8; 64]);
		let format = detect_from(&mut reader, Path::new("noise.bin")).unwrap();

		assert_eq!(format, FileFormat::Unsupported);
	}
}
