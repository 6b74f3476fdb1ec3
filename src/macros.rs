// Shorthand for return Err(crate::error::Error::new(crate::error::ErrorKind::Variant))
//
// Usage:
// - err!(Variant)          -> Used for unit variants
// - err!(Variant("Message")) -> Used for variants with a message
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::Error::new(crate::error::ErrorKind::$variant))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::Error::new(crate::error::ErrorKind::$variant(
			$reason,
		)))
	};
}

pub(crate) use err;
