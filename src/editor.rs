//! The edit session tying a bound file to its container backend

use crate::attribute::Attribute;
use crate::error::Result;
use crate::format::{self, FileFormat};
use crate::macros::err;
use crate::mp4::Mp4Editor;
use crate::mpeg::MpegEditor;
use crate::picture::{self, CoverArt};

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom};
use std::path::Path;

/// The container backend, chosen once when a file is bound
///
/// Every operation after [`Editor::bind`] dispatches on this; the format of
/// a session never changes until the next bind.
enum Backend {
	Mpeg(MpegEditor),
	Mp4(Mp4Editor),
}

struct Bound {
	handle: File,
	format: FileFormat,
	backend: Backend,
}

/// An attribute editing session over a single audio file
///
/// An `Editor` starts out unbound; [`Editor::bind`] attaches it to a file,
/// decoding the entire tag model up front. All mutations stay in memory
/// until [`Editor::commit`] serializes them back through the same handle.
/// Dropping the editor, or binding another file, discards uncommitted
/// changes.
///
/// # Examples
///
/// ```rust,no_run
/// use metaedit::{Attribute, Editor};
///
/// # fn main() -> metaedit::error::Result<()> {
/// let mut editor = Editor::new();
/// editor.bind("foo.mp3")?;
///
/// editor.set(Attribute::Artist, Some("Foo performer"))?;
/// editor.commit()?;
/// # Ok(()) }
/// ```
#[derive(Default)]
pub struct Editor {
	bound: Option<Bound>,
	read_only: bool,
}

impl Editor {
	/// Create an unbound session
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Bind the session to the file at `path`
	///
	/// The file is opened read-write when possible, falling back to
	/// read-only (see [`Editor::is_read_only`]). The container is then
	/// classified by content and decoded eagerly. Any previously bound file
	/// is released first, along with uncommitted changes.
	///
	/// # Errors
	///
	/// * `path` does not exist ([`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound))
	/// * `path` cannot be opened at all ([`ErrorKind::PermissionDenied`](crate::error::ErrorKind::PermissionDenied))
	/// * The file is not MPEG or MP4 audio ([`ErrorKind::Unsupported`](crate::error::ErrorKind::Unsupported))
	/// * The container fails to parse
	pub fn bind(&mut self, path: impl AsRef<Path>) -> Result<()> {
		let path = path.as_ref();

		self.bound = None;
		self.read_only = false;

		let (mut handle, read_only) = open_handle(path)?;

		let format = format::detect_from(&mut handle, path)?;
		let backend = match format {
			FileFormat::Mpeg => Backend::Mpeg(MpegEditor::read_from(&mut handle)?),
			FileFormat::Mp4 => Backend::Mp4(Mp4Editor::read_from(&mut handle)?),
			FileFormat::Unsupported => err!(Unsupported),
		};

		log::debug!("Bound {} as {}", path.display(), format);

		self.bound = Some(Bound {
			handle,
			format,
			backend,
		});
		self.read_only = read_only;

		Ok(())
	}

	/// Read an attribute from the in-memory model
	///
	/// `Ok(None)` means the attribute is absent, which includes a present
	/// but empty value; the two are indistinguishable on purpose.
	/// [`Attribute::PictureCount`] reads as absent when no pictures are
	/// attached.
	///
	/// # Errors
	///
	/// * No file is bound
	/// * [`Attribute::PictureCount`] is read from an MPEG file with no
	///   ID3v2 tag
	pub fn get(&self, attribute: Attribute) -> Result<Option<String>> {
		let bound = self.bound()?;

		if attribute == Attribute::PictureCount {
			let count = match &bound.backend {
				Backend::Mpeg(mpeg) => {
					if !mpeg.has_id3v2() {
						err!(OperationFailed("the file has no ID3v2 tag"))
					}

					mpeg.picture_count()
				},
				Backend::Mp4(mp4) => mp4.picture_count(),
			};
			return Ok((count > 0).then(|| count.to_string()));
		}

		let value = match &bound.backend {
			Backend::Mpeg(mpeg) => mpeg.get(attribute),
			Backend::Mp4(mp4) => mp4.get(attribute),
		};

		Ok(value)
	}

	/// Write or delete an attribute in the in-memory model
	///
	/// `None` and `Some("")` both delete. Nothing reaches the file until
	/// [`Editor::commit`].
	///
	/// # Errors
	///
	/// * No file is bound, or `attribute` is [`Attribute::PictureCount`]
	/// * The session is read-only
	/// * The value cannot be represented (a non-numeric MP4 track number,
	///   an unparseable date)
	pub fn set(&mut self, attribute: Attribute, value: Option<&str>) -> Result<()> {
		let read_only = self.read_only;
		let bound = self.bound_mut()?;

		if read_only {
			err!(OperationFailed("the file was opened read-only"))
		}

		if attribute == Attribute::PictureCount {
			err!(InvalidParameter("picture count is read-only"))
		}

		match value {
			None | Some("") => match &mut bound.backend {
				Backend::Mpeg(mpeg) => mpeg.remove(attribute),
				Backend::Mp4(mp4) => mp4.remove(attribute),
			},
			Some(value) => match &mut bound.backend {
				Backend::Mpeg(mpeg) => mpeg.set(attribute, value)?,
				Backend::Mp4(mp4) => mp4.set(attribute, value)?,
			},
		}

		Ok(())
	}

	/// Serialize the in-memory model back to the bound file
	///
	/// # Errors
	///
	/// * No file is bound
	/// * The session is read-only
	/// * Writing the container fails
	pub fn commit(&mut self) -> Result<()> {
		let read_only = self.read_only;
		let bound = self.bound_mut()?;

		if read_only {
			err!(OperationFailed("the file was opened read-only"))
		}

		bound.handle.seek(SeekFrom::Start(0))?;
		match &mut bound.backend {
			Backend::Mpeg(mpeg) => mpeg.save_to(&mut bound.handle)?,
			Backend::Mp4(mp4) => mp4.save_to(&mut bound.handle)?,
		}

		log::debug!("Committed changes");
		Ok(())
	}

	/// The number of pictures attached to the bound file
	///
	/// # Errors
	///
	/// * No file is bound
	pub fn picture_count(&self) -> Result<usize> {
		let bound = self.bound()?;

		let count = match &bound.backend {
			Backend::Mpeg(mpeg) => mpeg.picture_count(),
			Backend::Mp4(mp4) => mp4.picture_count(),
		};

		Ok(count)
	}

	/// Copy the picture at `index` out of the bound file
	///
	/// # Errors
	///
	/// * No file is bound
	/// * The file carries no pictures, or the stored payload is empty
	/// * `index` is past the end of the picture list
	pub fn picture(&self, index: usize) -> Result<CoverArt> {
		let bound = self.bound()?;

		match &bound.backend {
			Backend::Mpeg(mpeg) => mpeg.picture(index),
			Backend::Mp4(mp4) => mp4.picture(index),
		}
	}

	/// Append the image at `image_path` to the picture list
	///
	/// The image is decoded and validated before the tag model is touched;
	/// a rejected image leaves the list exactly as it was.
	///
	/// # Errors
	///
	/// * No file is bound
	/// * The session is read-only
	/// * The image is missing, unreadable, or not a JPEG/PNG
	pub fn append_picture(&mut self, image_path: impl AsRef<Path>) -> Result<()> {
		let read_only = self.read_only;
		self.bound_mut()?;

		if read_only {
			err!(OperationFailed("the file was opened read-only"))
		}

		let picture = picture::read_image(image_path)?;

		let bound = self.bound_mut()?;
		match &mut bound.backend {
			Backend::Mpeg(mpeg) => mpeg.append_picture(picture),
			Backend::Mp4(mp4) => mp4.append_picture(picture),
		}

		Ok(())
	}

	/// Remove the picture at `index`, keeping the rest in order
	///
	/// # Errors
	///
	/// * No file is bound
	/// * The session is read-only
	/// * `index` is past the end of the picture list (the list is untouched)
	pub fn remove_picture(&mut self, index: usize) -> Result<()> {
		let read_only = self.read_only;
		let bound = self.bound_mut()?;

		if read_only {
			err!(OperationFailed("the file was opened read-only"))
		}

		match &mut bound.backend {
			Backend::Mpeg(mpeg) => mpeg.remove_picture(index),
			Backend::Mp4(mp4) => mp4.remove_picture(index),
		}
	}

	/// The format of the bound file, if any
	pub fn format(&self) -> Option<FileFormat> {
		self.bound.as_ref().map(|bound| bound.format)
	}

	/// Whether the bound file was opened without write access
	pub fn is_read_only(&self) -> bool {
		self.read_only
	}

	/// Whether a file is currently bound
	pub fn is_bound(&self) -> bool {
		self.bound.is_some()
	}

	fn bound(&self) -> Result<&Bound> {
		match &self.bound {
			Some(bound) => Ok(bound),
			None => err!(InvalidParameter("no file is bound")),
		}
	}

	fn bound_mut(&mut self) -> Result<&mut Bound> {
		match &mut self.bound {
			Some(bound) => Ok(bound),
			None => err!(InvalidParameter("no file is bound")),
		}
	}
}

fn open_handle(path: &Path) -> Result<(File, bool)> {
	match OpenOptions::new().read(true).write(true).open(path) {
		Ok(handle) => Ok((handle, false)),
		Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
			log::warn!(
				"No write access to {}, falling back to read-only",
				path.display()
			);

			let handle = File::open(path)?;
			Ok((handle, true))
		},
		Err(e) => Err(e.into()),
	}
}
