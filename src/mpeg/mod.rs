//! The MPEG backend: ID3v2 frames with an ID3v1 shadow

mod twin;

use crate::attribute::Attribute;
use crate::error::Result;
use crate::macros::err;
use crate::picture::CoverArt;

use std::fs::File;
use std::io::{Read, Seek};

use lofty::TextEncoding;
use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::AudioFile;
use lofty::id3::v2::{
	CommentFrame, Frame, FrameId, Id3v2Tag, TextInformationFrame, TimestampFrame,
	UnsynchronizedTextFrame,
};
use lofty::mpeg::MpegFile;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::tag::TagExt;
use lofty::tag::items::{Timestamp, UNKNOWN_LANGUAGE};

/// An MPEG file decoded into its two tags
pub(crate) struct MpegEditor {
	file: MpegFile,
}

impl MpegEditor {
	pub(crate) fn read_from<R>(reader: &mut R) -> Result<Self>
	where
		R: Read + Seek,
	{
		let file = MpegFile::read_from(reader, ParseOptions::new().read_properties(false))?;
		Ok(Self { file })
	}

	pub(crate) fn get(&self, attribute: Attribute) -> Option<String> {
		let id = twin::frame_id(attribute);

		if let Some(value) = self.file.id3v2().and_then(|tag| frame_text(tag, &id)) {
			return Some(value);
		}

		if twin::has_legacy_field(attribute) {
			if let Some(tag) = self.file.id3v1().filter(|tag| !tag.is_empty()) {
				return twin::legacy_value(tag, attribute);
			}
		}

		None
	}

	pub(crate) fn set(&mut self, attribute: Attribute, value: &str) -> Result<()> {
		{
			let tag = self.tag_mut();
			match attribute {
				Attribute::Comment => insert_comment(tag, value),
				Attribute::Lyrics => insert_lyrics(tag, value),
				Attribute::Date => insert_timestamp(tag, value)?,
				_ => insert_text(tag, twin::frame_id(attribute), value),
			}
		}

		if twin::has_legacy_field(attribute) {
			if let Some(legacy) = self.file.id3v1_mut().filter(|tag| !tag.is_empty()) {
				twin::mirror_write(legacy, attribute, value);
			}
		}

		Ok(())
	}

	pub(crate) fn remove(&mut self, attribute: Attribute) {
		if let Some(tag) = self.file.id3v2_mut() {
			let _ = tag.remove(&twin::frame_id(attribute));
		}

		if twin::has_legacy_field(attribute) {
			if let Some(legacy) = self.file.id3v1_mut() {
				twin::mirror_clear(legacy, attribute);
			}
		}
	}

	pub(crate) fn has_id3v2(&self) -> bool {
		self.file.id3v2().is_some()
	}

	pub(crate) fn picture_count(&self) -> usize {
		self.file.id3v2().map_or(0, |tag| {
			tag.into_iter()
				.filter(|frame| matches!(frame, Frame::Picture(_)))
				.count()
		})
	}

	pub(crate) fn picture(&self, index: usize) -> Result<CoverArt> {
		let Some(tag) = self.file.id3v2() else {
			err!(OperationFailed("the file has no ID3v2 tag"))
		};

		let pictures: Vec<&Picture> = tag
			.into_iter()
			.filter_map(|frame| match frame {
				Frame::Picture(apic) => Some(&apic.picture),
				_ => None,
			})
			.collect();

		if pictures.is_empty() {
			err!(OperationFailed("the tag has no attached pictures"))
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

	pub(crate) fn append_picture(&mut self, mut picture: Picture) {
		picture.set_pic_type(PictureType::CoverFront);
		let _ = self.tag_mut().insert_picture(picture);
	}

	pub(crate) fn remove_picture(&mut self, index: usize) -> Result<()> {
		if index >= self.picture_count() {
			err!(InvalidParameter("picture index out of range"))
		}

		let mut seen = 0_usize;
		if let Some(tag) = self.file.id3v2_mut() {
			tag.retain(|frame| {
				if matches!(frame, Frame::Picture(_)) {
					seen += 1;
					seen - 1 != index
				} else {
					true
				}
			});
		}

		Ok(())
	}

	/// Serialize both tags back through `file`
	///
	/// An empty ID3v1 tag is dropped first so that editing never conjures a
	/// legacy tag the file did not already carry.
	pub(crate) fn save_to(&mut self, file: &mut File) -> Result<()> {
		if self.file.id3v1().is_some_and(|tag| tag.is_empty()) {
			log::debug!("Dropping empty ID3v1 tag before write");
			self.file.remove_id3v1();
		}

		self.file.save_to(file, WriteOptions::default())?;
		Ok(())
	}

	fn tag_mut(&mut self) -> &mut Id3v2Tag {
		if self.file.id3v2().is_none() {
			self.file.set_id3v2(Id3v2Tag::new());
		}

		self.file.id3v2_mut().expect("tag was just inserted")
	}
}

/// The renderable text of the first frame with `id`, if it is non-empty
fn frame_text(tag: &Id3v2Tag, id: &FrameId<'_>) -> Option<String> {
	let text = match tag.get(id)? {
		Frame::Text(frame) => frame.value.to_string(),
		Frame::Comment(frame) => frame.content.to_string(),
		Frame::UnsynchronizedText(frame) => frame.content.to_string(),
		Frame::Timestamp(frame) => frame.timestamp.to_string(),
		_ => return None,
	};

	(!text.is_empty()).then_some(text)
}

fn insert_text(tag: &mut Id3v2Tag, id: FrameId<'static>, value: &str) {
	// A rewrite keeps whatever encoding the frame already uses
	let encoding = match tag.get(&id) {
		Some(Frame::Text(frame)) => frame.encoding,
		_ => TextEncoding::UTF8,
	};

	let _ = tag.insert(Frame::Text(TextInformationFrame::new(
		id,
		encoding,
		value.to_owned(),
	)));
}

fn insert_comment(tag: &mut Id3v2Tag, value: &str) {
	let (encoding, language, description) = match tag.get(&twin::COMMENT_ID) {
		Some(Frame::Comment(frame)) => {
			(frame.encoding, frame.language, frame.description.to_string())
		},
		_ => (TextEncoding::UTF8, UNKNOWN_LANGUAGE, String::new()),
	};

	let _ = tag.insert(Frame::Comment(CommentFrame::new(
		encoding,
		language,
		description,
		value.to_owned(),
	)));
}

fn insert_lyrics(tag: &mut Id3v2Tag, value: &str) {
	let (encoding, language, description) = match tag.get(&twin::LYRICS_ID) {
		Some(Frame::UnsynchronizedText(frame)) => {
			(frame.encoding, frame.language, frame.description.to_string())
		},
		_ => (TextEncoding::UTF8, UNKNOWN_LANGUAGE, String::new()),
	};

	let _ = tag.insert(Frame::UnsynchronizedText(UnsynchronizedTextFrame::new(
		encoding,
		language,
		description,
		value.to_owned(),
	)));
}

fn insert_timestamp(tag: &mut Id3v2Tag, value: &str) -> Result<()> {
	let Ok(timestamp) = value.parse::<Timestamp>() else {
		err!(InvalidParameter("date is not a valid timestamp"))
	};

	// Timestamp frames compare by value, so a plain insert would stack a
	// second TDRC next to the old one
	let _ = tag.remove(&twin::DATE_ID);
	let _ = tag.insert(Frame::Timestamp(TimestampFrame::new(
		twin::DATE_ID,
		TextEncoding::UTF8,
		timestamp,
	)));

	Ok(())
}
