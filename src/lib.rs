//! Edit audio metadata attribute by attribute.
//!
//! `metaedit` exposes a format-agnostic vocabulary of [`Attribute`]s over
//! MPEG (ID3v2 with an ID3v1 shadow) and MP4 (`ilst`) files. A session
//! binds one file at a time, keeps every change in memory, and writes the
//! whole model back in a single commit.
//!
//! # Examples
//!
//! ## Editing a file
//!
//! ```rust,no_run
//! # fn main() -> metaedit::error::Result<()> {
//! use metaedit::{Attribute, Editor};
//!
//! let mut editor = Editor::new();
//! editor.bind("test.mp3")?;
//!
//! if let Some(artist) = editor.get(Attribute::Artist)? {
//! 	println!("Currently credited to {artist}");
//! }
//!
//! editor.set(Attribute::Artist, Some("Foo performer"))?;
//! editor.set(Attribute::Comment, None)?; // Deletes the comment
//! editor.commit()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Working with cover art
//!
//! ```rust,no_run
//! # fn main() -> metaedit::error::Result<()> {
//! use metaedit::Editor;
//!
//! let mut editor = Editor::new();
//! editor.bind("test.m4a")?;
//!
//! // Only JPEG and PNG images are accepted
//! editor.append_picture("cover.png")?;
//!
//! let front = editor.picture(0)?;
//! assert!(!front.data().is_empty());
//!
//! editor.commit()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod format;

pub(crate) mod macros;

mod attribute;
mod editor;
mod mp4;
mod mpeg;
mod picture;

pub use attribute::Attribute;
pub use editor::Editor;
pub use format::FileFormat;
pub use picture::CoverArt;
