//! Hand-built container fixtures small enough to construct inline
#![allow(dead_code)]

use std::io::Write as _;

use tempfile::NamedTempFile;

/// Just enough of a PNG for content sniffing
pub const PNG_STUB: &[u8] = &[
	0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D,
];

/// Just enough of a JPEG for content sniffing
pub const JPEG_STUB: &[u8] = &[
	0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01,
];

fn synchsafe(size: u32) -> [u8; 4] {
	[
		((size >> 21) & 0x7F) as u8,
		((size >> 14) & 0x7F) as u8,
		((size >> 7) & 0x7F) as u8,
		(size & 0x7F) as u8,
	]
}

/// An ID3v2.4 tag holding UTF-8 text frames
pub fn id3v2_with(frames: &[([u8; 4], &str)]) -> Vec<u8> {
	let mut body = Vec::new();
	for (id, text) in frames {
		body.extend_from_slice(id);
		body.extend_from_slice(&synchsafe(1 + text.len() as u32));
		body.extend_from_slice(&[0, 0]);
		body.push(3); // UTF-8
		body.extend_from_slice(text.as_bytes());
	}

	let mut bytes = Vec::new();
	bytes.extend_from_slice(b"ID3");
	bytes.extend_from_slice(&[4, 0, 0]);
	bytes.extend_from_slice(&synchsafe(body.len() as u32));
	bytes.extend_from_slice(&body);
	bytes
}

/// A silent MPEG-1 Layer III frame, 128 kbps at 44.1 kHz (417 bytes)
fn mpeg_frame() -> Vec<u8> {
	let mut frame = vec![0xFF, 0xFB, 0x90, 0x00];
	frame.resize(417, 0);
	frame
}

/// An MPEG stream: an optional ID3v2 tag, two audio frames, an optional
/// ID3v1 trailer
///
/// Two frames because sync detection confirms a candidate header against
/// the header that follows it.
pub fn mpeg_file(frames: &[([u8; 4], &str)], trailer: Option<[u8; 128]>) -> Vec<u8> {
	let mut bytes = if frames.is_empty() {
		Vec::new()
	} else {
		id3v2_with(frames)
	};

	bytes.extend_from_slice(&mpeg_frame());
	bytes.extend_from_slice(&mpeg_frame());

	if let Some(trailer) = trailer {
		bytes.extend_from_slice(&trailer);
	}

	bytes
}

fn put(field: &mut [u8], text: &str) {
	let text = text.as_bytes();
	field[..text.len()].copy_from_slice(text);
}

/// An ID3v1 trailer; empty strings leave their field zeroed, `track` zero
/// and `genre` `0xFF` mean unset
pub fn id3v1_trailer(
	title: &str,
	artist: &str,
	album: &str,
	year: &str,
	comment: &str,
	track: u8,
	genre: u8,
) -> [u8; 128] {
	let mut bytes = [0_u8; 128];
	bytes[..3].copy_from_slice(b"TAG");
	put(&mut bytes[3..33], title);
	put(&mut bytes[33..63], artist);
	put(&mut bytes[63..93], album);
	put(&mut bytes[93..97], year);
	put(&mut bytes[97..125], comment);
	bytes[126] = track;
	bytes[127] = genre;
	bytes
}

/// A trailer whose marker is present but every field is unset
pub fn empty_id3v1_trailer() -> [u8; 128] {
	id3v1_trailer("", "", "", "", "", 0, 0xFF)
}

/// An MP4 container: an `M4A ` ftyp and an empty moov
pub fn m4a_file() -> Vec<u8> {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(&16_u32.to_be_bytes());
	bytes.extend_from_slice(b"ftyp");
	bytes.extend_from_slice(b"M4A ");
	bytes.extend_from_slice(&0_u32.to_be_bytes());
	bytes.extend_from_slice(&8_u32.to_be_bytes());
	bytes.extend_from_slice(b"moov");
	bytes
}

/// Write `bytes` to a temp file whose name ends in `suffix`
pub fn temp_file(bytes: &[u8], suffix: &str) -> NamedTempFile {
	let mut file = tempfile::Builder::new()
		.suffix(suffix)
		.tempfile()
		.unwrap();
	file.write_all(bytes).unwrap();
	file.flush().unwrap();
	file
}
