//! Format registry
//!
//! Maps short format names (`json`, `xml`, ...) to the media types that
//! represent them. The first media type of a format is its canonical one:
//! it is what gets sent when the format is chosen without a specific
//! Accept match.
//!
//! A process-wide registry, seeded with the common formats, backs the free
//! functions of this module. Registration is meant to happen at startup;
//! writes are serialized and lookups share a read lock.
//!
//! # Examples
//!
//! ```
//! use mimerender_negotiation::registry::{FormatRegistry, formats};
//!
//! let registry = FormatRegistry::with_defaults();
//! assert_eq!(registry.canonical_media_type(formats::XML).unwrap(), "text/xml");
//! assert_eq!(registry.format_for("application/xml").unwrap(), formats::XML);
//! ```

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::accept::MediaRange;
use crate::error::{NegotiationError, Result};

/// Names of the formats every registry starts with
pub mod formats {
	pub const JSON: &str = "json";
	pub const XML: &str = "xml";
	pub const YAML: &str = "yaml";
	pub const XHTML: &str = "xhtml";
	pub const HTML: &str = "html";
	pub const TXT: &str = "txt";
	pub const CSV: &str = "csv";
	pub const TSV: &str = "tsv";
	pub const RSS: &str = "rss";
	pub const RDF: &str = "rdf";
	pub const ATOM: &str = "atom";
	pub const M3U: &str = "m3u";
	pub const PLS: &str = "pls";
}

/// Baseline table, canonical media type first
const DEFAULT_FORMATS: &[(&str, &[&str])] = &[
	(formats::JSON, &["application/json"]),
	(
		formats::XML,
		&["text/xml", "application/xml", "application/x-xml"],
	),
	(
		formats::YAML,
		&["application/x-yaml", "text/yaml", "application/yaml"],
	),
	(formats::XHTML, &["application/xhtml+xml"]),
	(formats::HTML, &["text/html"]),
	(formats::TXT, &["text/plain"]),
	(formats::CSV, &["text/csv"]),
	(formats::TSV, &["text/tab-separated-values"]),
	(formats::RSS, &["application/rss+xml"]),
	(formats::RDF, &["application/rdf+xml"]),
	(formats::ATOM, &["application/atom+xml"]),
	(
		formats::M3U,
		&[
			"audio/x-mpegurl",
			"application/x-winamp-playlist",
			"audio/mpeg-url",
			"audio/mpegurl",
		],
	),
	(formats::PLS, &["audio/x-scpls"]),
];

/// Short format name to media types, in registration order
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
	formats: IndexMap<String, Vec<String>>,
}

impl FormatRegistry {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry seeded with the baseline formats
	///
	/// # Examples
	///
	/// ```
	/// use mimerender_negotiation::registry::FormatRegistry;
	///
	/// let registry = FormatRegistry::with_defaults();
	/// assert!(registry.contains("json"));
	/// assert!(registry.contains("m3u"));
	/// ```
	pub fn with_defaults() -> Self {
		let mut formats = IndexMap::with_capacity(DEFAULT_FORMATS.len());
		for (name, media_types) in DEFAULT_FORMATS {
			formats.insert(
				(*name).to_string(),
				media_types.iter().map(|m| (*m).to_string()).collect(),
			);
		}
		Self { formats }
	}

	/// Registers a new format
	///
	/// Media types are trimmed and lowercased. Fails if the name is taken,
	/// the list is empty, a media type is malformed or already belongs to
	/// another format.
	///
	/// # Examples
	///
	/// ```
	/// use mimerender_negotiation::registry::FormatRegistry;
	/// use mimerender_negotiation::NegotiationError;
	///
	/// let mut registry = FormatRegistry::new();
	/// registry.register("msgpack", ["application/msgpack", "application/x-msgpack"]).unwrap();
	/// assert_eq!(registry.canonical_media_type("msgpack").unwrap(), "application/msgpack");
	///
	/// let again = registry.register("msgpack", ["application/vnd.msgpack"]);
	/// assert_eq!(again, Err(NegotiationError::DuplicateFormat("msgpack".to_string())));
	/// ```
	pub fn register<I, S>(&mut self, format: &str, media_types: I) -> Result<()>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		if self.formats.contains_key(format) {
			return Err(NegotiationError::DuplicateFormat(format.to_string()));
		}

		let normalized = normalize(media_types)?;
		for media_type in &normalized {
			if let Ok(owner) = self.format_for(media_type) {
				return Err(NegotiationError::MediaTypeConflict {
					media_type: media_type.clone(),
					format: owner.to_string(),
				});
			}
		}

		if normalized.is_empty() {
			return Err(NegotiationError::EmptyMediaTypes(format.to_string()));
		}

		tracing::debug!(format = %format, media_types = ?normalized, "registered format");
		self.formats.insert(format.to_string(), normalized);
		Ok(())
	}

	/// Registers a format unless it already exists with the same media types
	///
	/// The list is normalized as [`register`](Self::register) does before
	/// comparing. Returns `Ok(false)` when the registered list is identical
	/// and `DuplicateFormat` when it differs.
	///
	/// # Examples
	///
	/// ```
	/// use mimerender_negotiation::registry::FormatRegistry;
	///
	/// let mut registry = FormatRegistry::new();
	/// assert_eq!(registry.register_or_match("ics", ["text/calendar"]), Ok(true));
	/// assert_eq!(registry.register_or_match("ics", [" TEXT/Calendar "]), Ok(false));
	/// assert!(registry.register_or_match("ics", ["text/x-vcalendar"]).is_err());
	/// ```
	pub fn register_or_match<I, S>(&mut self, format: &str, media_types: I) -> Result<bool>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let Some(existing) = self.formats.get(format) else {
			self.register(format, media_types)?;
			return Ok(true);
		};
		if normalize(media_types)? == *existing {
			tracing::debug!(format = %format, "format already registered");
			return Ok(false);
		}
		Err(NegotiationError::DuplicateFormat(format.to_string()))
	}

	/// Returns the media types of a format, canonical first
	pub fn media_types(&self, format: &str) -> Result<&[String]> {
		self.formats
			.get(format)
			.map(Vec::as_slice)
			.ok_or_else(|| NegotiationError::UnknownFormat(format.to_string()))
	}

	/// Returns the canonical media type of a format
	pub fn canonical_media_type(&self, format: &str) -> Result<&str> {
		self.media_types(format)?
			.first()
			.map(String::as_str)
			.ok_or_else(|| NegotiationError::UnknownFormat(format.to_string()))
	}

	/// Returns the format owning a media type
	///
	/// Formats are scanned in registration order; comparison ignores case.
	pub fn format_for(&self, media_type: &str) -> Result<&str> {
		let wanted = media_type.trim();
		self.formats
			.iter()
			.find(|(_, media_types)| media_types.iter().any(|m| m.eq_ignore_ascii_case(wanted)))
			.map(|(format, _)| format.as_str())
			.ok_or_else(|| NegotiationError::UnknownMediaType(media_type.to_string()))
	}

	/// Checks whether a format is registered
	pub fn contains(&self, format: &str) -> bool {
		self.formats.contains_key(format)
	}

	/// Iterates over registered format names in registration order
	pub fn formats(&self) -> impl Iterator<Item = &str> {
		self.formats.keys().map(String::as_str)
	}

	/// Returns the number of registered formats
	pub fn len(&self) -> usize {
		self.formats.len()
	}

	/// Returns true if no format is registered
	pub fn is_empty(&self) -> bool {
		self.formats.is_empty()
	}
}

/// Trims, lowercases and deduplicates media types, rejecting wildcards
fn normalize<I, S>(media_types: I) -> Result<Vec<String>>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut normalized: Vec<String> = Vec::new();
	for media_type in media_types {
		let media_type = media_type.as_ref().trim().to_ascii_lowercase();
		match MediaRange::parse(&media_type) {
			Some(range) if !range.is_wildcard() => {}
			_ => return Err(NegotiationError::InvalidMediaType(media_type)),
		}
		if !normalized.contains(&media_type) {
			normalized.push(media_type);
		}
	}
	Ok(normalized)
}

/// Global format registry
static REGISTRY: Lazy<RwLock<FormatRegistry>> =
	Lazy::new(|| RwLock::new(FormatRegistry::with_defaults()));

/// Returns a read guard over the process-wide registry
///
/// Hold the guard only for the duration of a lookup; registration blocks
/// while any guard is alive.
pub fn registry() -> RwLockReadGuard<'static, FormatRegistry> {
	REGISTRY.read()
}

/// Registers a format in the process-wide registry
///
/// # Examples
///
/// ```
/// use mimerender_negotiation::registry::{media_types_for, register_format};
///
/// register_format("geojson", ["application/geo+json"]).unwrap();
/// assert_eq!(media_types_for("geojson").unwrap(), vec!["application/geo+json"]);
/// ```
pub fn register_format<I, S>(format: &str, media_types: I) -> Result<()>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	REGISTRY.write().register(format, media_types)
}

/// Registers a format in the process-wide registry unless it already
/// exists with the same media types
///
/// The comparison and the registration happen under one write lock.
pub fn register_format_or_match<I, S>(format: &str, media_types: I) -> Result<bool>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	REGISTRY.write().register_or_match(format, media_types)
}

/// Returns the media types of a format from the process-wide registry
pub fn media_types_for(format: &str) -> Result<Vec<String>> {
	REGISTRY.read().media_types(format).map(<[String]>::to_vec)
}

/// Returns the format owning a media type in the process-wide registry
pub fn format_for_media_type(media_type: &str) -> Result<String> {
	REGISTRY.read().format_for(media_type).map(str::to_string)
}
