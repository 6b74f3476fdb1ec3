//! The MP4 backend: a single flat `ilst` item list

use crate::attribute::Attribute;
use crate::error::Result;
use crate::macros::err;
use crate::picture::CoverArt;

use std::fs::File;
use std::io::{Read, Seek};

use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::AudioFile;
use lofty::mp4::{Atom, AtomData, AtomIdent, Ilst, Mp4File};
use lofty::picture::{MimeType, Picture};
use lofty::tag::Accessor;

const ARTIST: AtomIdent<'static> = AtomIdent::Fourcc(*b"\xa9ART");
const TITLE: AtomIdent<'static> = AtomIdent::Fourcc(*b"\xa9nam");
const ALBUM: AtomIdent<'static> = AtomIdent::Fourcc(*b"\xa9alb");
const GENRE: AtomIdent<'static> = AtomIdent::Fourcc(*b"\xa9gen");
const AUTHOR: AtomIdent<'static> = AtomIdent::Fourcc(*b"\xa9wrt");
const COPYRIGHT: AtomIdent<'static> = AtomIdent::Fourcc(*b"cprt");
const DATE: AtomIdent<'static> = AtomIdent::Fourcc(*b"\xa9day");
const DESCRIPTION: AtomIdent<'static> = AtomIdent::Fourcc(*b"desc");
const COMMENT: AtomIdent<'static> = AtomIdent::Fourcc(*b"\xa9cmt");
const LYRICS: AtomIdent<'static> = AtomIdent::Fourcc(*b"\xa9lyr");
// Nonstandard, but the only fourcc in circulation for a conductor
const CONDUCTOR: AtomIdent<'static> = AtomIdent::Fourcc(*b"cond");
const COVER: AtomIdent<'static> = AtomIdent::Fourcc(*b"covr");

/// An MP4 file decoded into its item list
pub(crate) struct Mp4Editor {
	file: Mp4File,
}

impl Mp4Editor {
	pub(crate) fn read_from<R>(reader: &mut R) -> Result<Self>
	where
		R: Read + Seek,
	{
		let file = Mp4File::read_from(reader, ParseOptions::new().read_properties(false))?;
		Ok(Self { file })
	}

	pub(crate) fn get(&self, attribute: Attribute) -> Option<String> {
		let ilst = self.file.ilst()?;

		if attribute == Attribute::TrackNumber {
			return ilst.track().map(|track| track.to_string());
		}

		item_text(ilst, &item_ident(attribute))
	}

	pub(crate) fn set(&mut self, attribute: Attribute, value: &str) -> Result<()> {
		if attribute == Attribute::TrackNumber {
			let track = parse_track(value)?;
			self.ilst_mut().set_track(track);
			return Ok(());
		}

		let ident = item_ident(attribute);
		self.ilst_mut()
			.replace_atom(Atom::new(ident, AtomData::UTF8(value.to_owned())));

		Ok(())
	}

	pub(crate) fn remove(&mut self, attribute: Attribute) {
		let Some(ilst) = self.file.ilst_mut() else {
			return;
		};

		if attribute == Attribute::TrackNumber {
			ilst.remove_track();
			return;
		}

		let _ = ilst.remove(&item_ident(attribute));
	}

	pub(crate) fn picture_count(&self) -> usize {
		self.file
			.ilst()
			.and_then(Ilst::pictures)
			.map_or(0, Iterator::count)
	}

	pub(crate) fn picture(&self, index: usize) -> Result<CoverArt> {
		let Some(ilst) = self.file.ilst() else {
			err!(OperationFailed("the file has no item list"))
		};

		let pictures: Vec<&Picture> = ilst.pictures().into_iter().flatten().collect();
		if pictures.is_empty() {
			err!(OperationFailed("the item list has no pictures"))
		}

		let Some(picture) = pictures.get(index) else {
			err!(InvalidParameter("picture index out of range"))
		};

		if picture.data().is_empty() {
			err!(OperationFailed("the stored picture is empty"))
		}

		Ok(CoverArt {
			data: picture.data().to_vec(),
			mime_type: picture
				.mime_type()
				.cloned()
				.unwrap_or_else(|| MimeType::Unknown(String::new())),
		})
	}

	pub(crate) fn append_picture(&mut self, picture: Picture) {
		self.ilst_mut().insert_picture(picture);
	}

	pub(crate) fn remove_picture(&mut self, index: usize) -> Result<()> {
		if index >= self.picture_count() {
			err!(InvalidParameter("picture index out of range"))
		}

		let ilst = self.ilst_mut();
		let data: Vec<AtomData> = ilst
			.remove(&COVER)
			.flat_map(Atom::into_data)
			.collect();

		let mut seen = 0_usize;
		let remaining: Vec<AtomData> = data
			.into_iter()
			.filter(|data| {
				if matches!(data, AtomData::Picture(_)) {
					seen += 1;
					seen - 1 != index
				} else {
					true
				}
			})
			.collect();

		if let Some(atom) = Atom::from_collection(COVER, remaining) {
			ilst.insert(atom);
		}

		Ok(())
	}

	pub(crate) fn save_to(&mut self, file: &mut File) -> Result<()> {
		self.file.save_to(file, WriteOptions::default())?;
		Ok(())
	}

	fn ilst_mut(&mut self) -> &mut Ilst {
		if self.file.ilst().is_none() {
			self.file.set_ilst(Ilst::new());
		}

		self.file.ilst_mut().expect("item list was just inserted")
	}
}

fn item_ident(attribute: Attribute) -> AtomIdent<'static> {
	match attribute {
		Attribute::Artist => ARTIST,
		Attribute::Title => TITLE,
		Attribute::Album => ALBUM,
		Attribute::Genre => GENRE,
		Attribute::Author => AUTHOR,
		Attribute::Copyright => COPYRIGHT,
		Attribute::Date => DATE,
		Attribute::Description => DESCRIPTION,
		Attribute::Comment => COMMENT,
		Attribute::Lyrics => LYRICS,
		Attribute::Conductor => CONDUCTOR,
		Attribute::TrackNumber | Attribute::PictureCount => {
			unreachable!("handled before ident lookup")
		},
	}
}

/// The first renderable data value of the item with `ident`, if non-empty
fn item_text(ilst: &Ilst, ident: &AtomIdent<'_>) -> Option<String> {
	let atom = ilst.get(ident)?;

	let text = match atom.data().next()? {
		AtomData::UTF8(text) | AtomData::UTF16(text) => text.clone(),
		AtomData::SignedInteger(int) => int.to_string(),
		AtomData::UnsignedInteger(int) => int.to_string(),
		_ => return None,
	};

	(!text.is_empty()).then_some(text)
}

/// Track numbers must be plain digit sequences; there is no `atoi`-style
/// salvage of a numeric prefix here
fn parse_track(value: &str) -> Result<u32> {
	if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
		err!(InvalidParameter("track number is not a digit sequence"))
	}

	match value.parse::<u32>() {
		Ok(track) => Ok(track),
		Err(_) => err!(InvalidParameter("track number out of range")),
	}
}
