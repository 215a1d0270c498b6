//! Status lines
//!
//! Handlers and exception rules speak in full status lines such as
//! `"200 OK"` or `"666 Armaggedon"`; the text is kept verbatim and handed to
//! the host adapter as is.

use std::borrow::Cow;
use std::fmt;

use http::StatusCode;

/// An HTTP status line, code followed by reason phrase
///
/// # Examples
///
/// ```
/// use mimerender_http::StatusLine;
///
/// let status = StatusLine::from("666 Armaggedon");
/// assert_eq!(status.code(), Some(666));
/// assert_eq!(status.as_str(), "666 Armaggedon");
///
/// assert_eq!(StatusLine::from(http::StatusCode::NOT_FOUND).as_str(), "404 Not Found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusLine(Cow<'static, str>);

impl StatusLine {
	pub const OK: StatusLine = StatusLine::from_static("200 OK");
	pub const BAD_REQUEST: StatusLine = StatusLine::from_static("400 Bad Request");
	pub const NOT_ACCEPTABLE: StatusLine = StatusLine::from_static("406 Not Acceptable");
	pub const INTERNAL_SERVER_ERROR: StatusLine =
		StatusLine::from_static("500 Internal Server Error");

	/// Creates a status line from a static string
	pub const fn from_static(line: &'static str) -> Self {
		Self(Cow::Borrowed(line))
	}

	/// Returns the line verbatim
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns the leading three-digit code, if there is one
	pub fn code(&self) -> Option<u16> {
		let digits = self.0.split(' ').next()?;
		if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
			return None;
		}
		digits.parse().ok()
	}

	/// Converts to an [`http::StatusCode`], if the code is in range
	pub fn status_code(&self) -> Option<StatusCode> {
		self.code().and_then(|code| StatusCode::from_u16(code).ok())
	}

	/// Returns the text after the code
	pub fn reason(&self) -> &str {
		self.0
			.split_once(' ')
			.map(|(_, reason)| reason)
			.unwrap_or_default()
	}
}

impl Default for StatusLine {
	fn default() -> Self {
		Self::OK
	}
}

impl fmt::Display for StatusLine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for StatusLine {
	fn from(line: &str) -> Self {
		Self(Cow::Owned(line.to_string()))
	}
}

impl From<String> for StatusLine {
	fn from(line: String) -> Self {
		Self(Cow::Owned(line))
	}
}

impl From<StatusCode> for StatusLine {
	fn from(code: StatusCode) -> Self {
		match code.canonical_reason() {
			Some(reason) => Self(Cow::Owned(format!("{} {}", code.as_u16(), reason))),
			None => Self(Cow::Owned(code.as_u16().to_string())),
		}
	}
}
