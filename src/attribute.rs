//! The attribute vocabulary shared by every container backend

use std::fmt::{Display, Formatter};

/// A metadata attribute addressable through an [`Editor`](crate::Editor)
///
/// The same vocabulary applies to every supported container; each backend
/// maps an attribute onto its native frame or item. [`Attribute::PictureCount`]
/// is read-only and is rejected by [`Editor::set`](crate::Editor::set).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
	/// Lead performer
	Artist,
	/// Track title
	Title,
	/// Album name
	Album,
	/// Free-form genre text
	Genre,
	/// Composer
	Author,
	/// Copyright notice
	Copyright,
	/// Recording date
	Date,
	/// Subtitle or content description
	Description,
	/// Free-form comment
	Comment,
	/// Position of the track
	TrackNumber,
	/// Number of attached pictures (read-only)
	PictureCount,
	/// Conductor
	Conductor,
	/// Unsynchronized lyrics
	Lyrics,
}

impl Display for Attribute {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Attribute::Artist => "artist",
			Attribute::Title => "title",
			Attribute::Album => "album",
			Attribute::Genre => "genre",
			Attribute::Author => "author",
			Attribute::Copyright => "copyright",
			Attribute::Date => "date",
			Attribute::Description => "description",
			Attribute::Comment => "comment",
			Attribute::TrackNumber => "track number",
			Attribute::PictureCount => "picture count",
			Attribute::Conductor => "conductor",
			Attribute::Lyrics => "lyrics",
		};

		f.write_str(name)
	}
}
