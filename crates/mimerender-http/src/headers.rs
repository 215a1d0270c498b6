//! Response header lists and the `Content-Type`/`Vary` fixup
//!
//! Headers travel as an ordered list of `(name, value)` pairs so that
//! handler-provided duplicates survive until the host adapter emits them.
//! [`fixup_headers`] is the only place the negotiated representation is
//! written into that list.
//!
//! # Examples
//!
//! ```
//! use mimerender_http::headers::{HeaderList, fixup_headers};
//!
//! let mut headers: HeaderList = vec![("Vary".into(), "Cookie".into())];
//! fixup_headers(&mut headers, "application/json");
//! assert_eq!(
//!     headers,
//!     vec![
//!         ("Vary".to_string(), "Cookie,Accept".to_string()),
//!         ("Content-Type".to_string(), "application/json".to_string()),
//!     ]
//! );
//! ```

use std::collections::{BTreeMap, HashMap};

use http::HeaderMap;

/// Ordered response headers, duplicates allowed
pub type HeaderList = Vec<(String, String)>;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const VARY: &str = "Vary";
const ACCEPT: &str = "Accept";

/// Conversion of handler-provided headers into a [`HeaderList`]
pub trait IntoHeaderList {
	fn into_header_list(self) -> HeaderList;
}

impl<K: Into<String>, V: Into<String>> IntoHeaderList for Vec<(K, V)> {
	fn into_header_list(self) -> HeaderList {
		self.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
	}
}

impl<K: Into<String>, V: Into<String>, const N: usize> IntoHeaderList for [(K, V); N] {
	fn into_header_list(self) -> HeaderList {
		self.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
	}
}

impl<K: Into<String>, V: Into<String>, S> IntoHeaderList for HashMap<K, V, S> {
	fn into_header_list(self) -> HeaderList {
		self.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
	}
}

impl<K: Into<String>, V: Into<String>> IntoHeaderList for BTreeMap<K, V> {
	fn into_header_list(self) -> HeaderList {
		self.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
	}
}

impl IntoHeaderList for HeaderMap {
	fn into_header_list(self) -> HeaderList {
		self.iter()
			.filter_map(|(name, value)| match value.to_str() {
				Ok(value) => Some((name.as_str().to_string(), value.to_string())),
				Err(_) => {
					tracing::warn!(header = %name, "dropping non-UTF-8 header value");
					None
				}
			})
			.collect()
	}
}

/// Builds a `Content-Type` value, adding a charset parameter when given
///
/// # Examples
///
/// ```
/// use mimerender_http::headers::content_type_value;
///
/// assert_eq!(content_type_value("text/html", None), "text/html");
/// assert_eq!(content_type_value("text/html", Some("utf-8")), "text/html; charset=utf-8");
/// ```
pub fn content_type_value(media_type: &str, charset: Option<&str>) -> String {
	match charset.filter(|c| !c.is_empty()) {
		Some(charset) => format!("{}; charset={}", media_type, charset),
		None => media_type.to_string(),
	}
}

/// Returns true if a header with this name is present, ignoring case
pub fn has_header(headers: &[(String, String)], name: &str) -> bool {
	headers.iter().any(|(key, _)| key.eq_ignore_ascii_case(name))
}

fn vary_includes_accept(value: &str) -> bool {
	value
		.split(',')
		.any(|token| token.trim().eq_ignore_ascii_case(ACCEPT))
}

/// Adds the negotiated `Content-Type` and an `Accept`-inclusive `Vary`
///
/// Appends `Content-Type` only when the handler did not set one. Appends
/// `Vary: Accept` when there is no `Vary`; otherwise appends `,Accept` to the
/// first `Vary` value unless some `Vary` already lists `Accept`. Existing
/// entries are never removed or reordered, so calling this twice changes
/// nothing the second time.
pub fn fixup_headers(headers: &mut HeaderList, content_type: &str) {
	if !has_header(headers, CONTENT_TYPE) {
		headers.push((CONTENT_TYPE.to_string(), content_type.to_string()));
	}

	if !has_header(headers, VARY) {
		headers.push((VARY.to_string(), ACCEPT.to_string()));
		return;
	}
	if headers
		.iter()
		.any(|(key, value)| key.eq_ignore_ascii_case(VARY) && vary_includes_accept(value))
	{
		return;
	}

	if let Some((_, value)) = headers
		.iter_mut()
		.find(|(key, _)| key.eq_ignore_ascii_case(VARY))
	{
		if value.trim().is_empty() {
			*value = ACCEPT.to_string();
		} else {
			value.push(',');
			value.push_str(ACCEPT);
		}
	}
}
