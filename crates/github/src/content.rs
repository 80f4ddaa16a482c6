//! Transport encoding of file contents.
//!
//! The contents api sends and receives file bodies as standard (RFC 4648) base64.
//! Bodies received from GitHub are wrapped every 60 characters, so whitespace
//! must be stripped before decoding.

use crate::Error;
use base64ct::{Base64, Encoding};

/// Encodes text as base64 of its UTF-8 bytes.
pub fn encode_content(content: &str) -> String {
	Base64::encode_string(content.as_bytes())
}

/// Decodes a base64 blob returned by the contents api into text.
pub fn decode_content(encoded: &str) -> Result<String, Error> {
	let stripped = encoded
		.chars()
		.filter(|c| !c.is_ascii_whitespace())
		.collect::<String>();
	let bytes = Base64::decode_vec(&stripped)?;
	Ok(decode_utf8_or_fallback(bytes))
}

/// Decodes bytes as UTF-8, or maps each byte to the char of the same code point
/// when they are not valid UTF-8. Never fails.
///
/// Older reflections were committed with a per-byte encoding, those still need to be readable.
pub fn decode_utf8_or_fallback(bytes: Vec<u8>) -> String {
	match String::from_utf8(bytes) {
		Ok(text) => text,
		Err(err) => {
			log::warn!(target: "github", "content is not valid utf-8, falling back to per-byte decode: {err}");
			err.into_bytes().into_iter().map(char::from).collect()
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn encode_ascii() {
		assert_eq!(encode_content("# Hi"), "IyBIaQ==");
	}

	#[test]
	fn decode_with_newlines() {
		let text = "# 2024-06-01\n\nToday I learned about optimistic locking. 今日は良い日でした。\n";
		let encoded = encode_content(text);
		let wrapped = encoded
			.as_bytes()
			.chunks(8)
			.map(|chunk| std::str::from_utf8(chunk).unwrap())
			.collect::<Vec<_>>()
			.join("\n");
		assert!(wrapped.contains('\n'));
		assert_eq!(decode_content(&wrapped).unwrap(), decode_content(&encoded).unwrap());
		assert_eq!(decode_content(&wrapped).unwrap(), text);
	}

	#[test]
	fn decode_trailing_newline() {
		assert_eq!(decode_content("IyBI\naQ==\n").unwrap(), "# Hi");
	}

	#[test]
	fn decode_invalid_base64() {
		assert!(decode_content("not base64!").is_err());
	}

	#[test]
	fn fallback_decode() {
		// "caf\xe9" is latin-1 and invalid as utf-8
		let bytes = vec![b'c', b'a', b'f', 0xE9];
		assert_eq!(decode_utf8_or_fallback(bytes), "café");
	}

	#[test]
	fn fallback_decode_through_base64() {
		let encoded = Base64::encode_string(&[0x48, 0x69, 0xFF]);
		assert_eq!(decode_content(&encoded).unwrap(), "Hi\u{ff}");
	}
}
