//! Contains the errors that can arise within metaedit

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, Error>`
pub type Result<T> = std::result::Result<T, Error>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	/// An argument was rejected before anything was touched, or the session
	/// is not bound to a file
	InvalidParameter(&'static str),
	/// The path handed to [`Editor::bind`](crate::Editor::bind) does not exist
	NotFound,
	/// The path exists but could not be opened
	PermissionDenied,
	/// The file is not an MPEG or MP4 audio container, or an image payload
	/// is neither JPEG nor PNG
	Unsupported,
	/// The session state does not allow the operation
	OperationFailed(&'static str),
	/// A fault from the tag container library
	Container(lofty::error::LoftyError),
	/// Represents all cases of [`std::io::Error`]
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// Errors that could occur within metaedit
pub struct Error {
	pub(crate) kind: ErrorKind,
}

impl Error {
	/// Create a new error from an [`ErrorKind`]
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match &self.kind {
			ErrorKind::Container(err) => Some(err),
			ErrorKind::Io(err) => Some(err),
			ErrorKind::Alloc(err) => Some(err),
			_ => None,
		}
	}
}

impl From<lofty::error::LoftyError> for Error {
	fn from(input: lofty::error::LoftyError) -> Self {
		Self {
			kind: ErrorKind::Container(input),
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(input: std::io::Error) -> Self {
		let kind = match input.kind() {
			std::io::ErrorKind::NotFound => ErrorKind::NotFound,
			std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
			_ => ErrorKind::Io(input),
		};

		Self { kind }
	}
}

impl From<TryReserveError> for Error {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl Debug for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.kind {
			ErrorKind::InvalidParameter(reason) => write!(f, "Invalid parameter: {reason}"),
			ErrorKind::NotFound => write!(f, "File not found"),
			ErrorKind::PermissionDenied => write!(f, "Permission denied"),
			ErrorKind::Unsupported => write!(f, "Unsupported content"),
			ErrorKind::OperationFailed(reason) => write!(f, "Operation failed: {reason}"),
			ErrorKind::Container(err) => write!(f, "{err}"),
			ErrorKind::Io(err) => write!(f, "{err}"),
			ErrorKind::Alloc(err) => write!(f, "{err}"),
		}
	}
}
