//! Legacy-tag side of the dual-tag model
//!
//! Seven attributes are "twins": they live in an ID3v2 frame and have a
//! counterpart field in ID3v1. Reads fall back to the legacy field when the
//! frame is absent, writes mirror into the legacy tag when one already
//! exists on the file. Everything here operates on the legacy half only.

use crate::attribute::Attribute;

use std::borrow::Cow;

use lofty::id3::v1::Id3v1Tag;
use lofty::id3::v2::FrameId;
use lofty::tag::Accessor;

pub(super) const ARTIST_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("TPE1"));
pub(super) const TITLE_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("TIT2"));
pub(super) const ALBUM_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("TALB"));
pub(super) const GENRE_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("TCON"));
pub(super) const AUTHOR_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("TCOM"));
pub(super) const COPYRIGHT_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("TCOP"));
pub(super) const DATE_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("TDRC"));
pub(super) const DESCRIPTION_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("TIT3"));
pub(super) const COMMENT_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("COMM"));
pub(super) const TRACK_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("TRCK"));
pub(super) const CONDUCTOR_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("TPE3"));
pub(super) const LYRICS_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("USLT"));

/// The ID3v2 frame carrying `attribute`
///
/// [`Attribute::PictureCount`] has no single frame; callers handle it before
/// coming here.
pub(super) fn frame_id(attribute: Attribute) -> FrameId<'static> {
	match attribute {
		Attribute::Artist => ARTIST_ID,
		Attribute::Title => TITLE_ID,
		Attribute::Album => ALBUM_ID,
		Attribute::Genre => GENRE_ID,
		Attribute::Author => AUTHOR_ID,
		Attribute::Copyright => COPYRIGHT_ID,
		Attribute::Date => DATE_ID,
		Attribute::Description => DESCRIPTION_ID,
		Attribute::Comment => COMMENT_ID,
		Attribute::TrackNumber => TRACK_ID,
		Attribute::Conductor => CONDUCTOR_ID,
		Attribute::Lyrics => LYRICS_ID,
		Attribute::PictureCount => unreachable!("handled by the picture store"),
	}
}

/// Whether `attribute` has an ID3v1 counterpart field
pub(super) fn has_legacy_field(attribute: Attribute) -> bool {
	matches!(
		attribute,
		Attribute::Artist
			| Attribute::Title
			| Attribute::Album
			| Attribute::Genre
			| Attribute::Date
			| Attribute::Comment
			| Attribute::TrackNumber
	)
}

/// The decimal prefix of `value`, `atoi` style
///
/// Non-numeric input maps to zero, which the legacy tag cannot tell apart
/// from "unset".
pub(super) fn leading_number(value: &str) -> u32 {
	let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
	digits.parse().unwrap_or(0)
}

/// Read the legacy field backing a twin attribute
///
/// Numeric fields render as decimal even when unset, matching the fixed
/// layout of the legacy tag where zero and absent are the same byte.
pub(super) fn legacy_value(tag: &Id3v1Tag, attribute: Attribute) -> Option<String> {
	let value = match attribute {
		Attribute::Artist => tag.artist().map(Cow::into_owned),
		Attribute::Title => tag.title().map(Cow::into_owned),
		Attribute::Album => tag.album().map(Cow::into_owned),
		Attribute::Genre => tag.genre().map(Cow::into_owned),
		Attribute::Comment => tag.comment().map(Cow::into_owned),
		Attribute::TrackNumber => Some(u32::from(tag.track_number.unwrap_or(0)).to_string()),
		Attribute::Date => {
			let year = tag.year.clone().unwrap_or_default();
			Some(if year.is_empty() {
				String::from("0")
			} else {
				year
			})
		},
		_ => None,
	};

	value.filter(|value| !value.is_empty())
}

/// Mirror a freshly written twin value into an existing legacy tag
///
/// Free-form genre text has no place in the fixed genre index table, so a
/// genre write always clears the legacy byte instead of guessing.
pub(super) fn mirror_write(tag: &mut Id3v1Tag, attribute: Attribute, value: &str) {
	match attribute {
		Attribute::Artist => tag.set_artist(value.to_owned()),
		Attribute::Title => tag.set_title(value.to_owned()),
		Attribute::Album => tag.set_album(value.to_owned()),
		Attribute::Comment => tag.set_comment(value.to_owned()),
		Attribute::Genre => tag.genre = None,
		Attribute::TrackNumber => tag.track_number = Some(leading_number(value) as u8),
		Attribute::Date => tag.year = Some(leading_number(value).to_string()),
		_ => {},
	}
}

/// Reset the legacy field backing a deleted twin attribute
pub(super) fn mirror_clear(tag: &mut Id3v1Tag, attribute: Attribute) {
	match attribute {
		Attribute::Artist => tag.remove_artist(),
		Attribute::Title => tag.remove_title(),
		Attribute::Album => tag.remove_album(),
		Attribute::Comment => tag.remove_comment(),
		Attribute::Genre => tag.genre = None,
		Attribute::TrackNumber => tag.track_number = None,
		Attribute::Date => tag.year = None,
		_ => {},
	}
}
