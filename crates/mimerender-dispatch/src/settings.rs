//! Settings for process-wide defaults
//!
//! [`MimeRenderSettings`] holds the serializable part of a
//! [`MimeRender`](crate::MimeRender) configuration plus extra formats to
//! register at startup. It is usually read from a TOML file:
//!
//! ```toml
//! default_format = "json"
//! override_param = "format"
//! override_arg = -1
//! charset = "utf-8"
//!
//! [formats]
//! msgpack = ["application/msgpack", "application/x-msgpack"]
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use mimerender_negotiation::{NegotiationError, registry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or applying settings
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("IO error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Format registration error: {0}")]
	Registry(#[from] NegotiationError),
}

/// Serializable process-wide defaults
///
/// # Examples
///
/// ```
/// use mimerender_dispatch::MimeRenderSettings;
///
/// let settings = MimeRenderSettings::from_toml_str(r#"
///     default_format = "json"
///     override_arg = -1
///
///     [formats]
///     msgpack = ["application/msgpack"]
/// "#).unwrap();
///
/// assert_eq!(settings.default_format.as_deref(), Some("json"));
/// assert_eq!(settings.override_arg, Some(-1));
/// assert_eq!(settings.formats["msgpack"], vec!["application/msgpack"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MimeRenderSettings {
	/// Format used when nothing else decides
	pub default_format: Option<String>,
	/// Request parameter carrying a format override
	pub override_param: Option<String>,
	/// Positional argument carrying a format override
	pub override_arg: Option<isize>,
	/// Charset appended to every negotiated `Content-Type`
	pub charset: Option<String>,
	/// Extra formats to register, in order
	pub formats: IndexMap<String, Vec<String>>,
}

impl MimeRenderSettings {
	/// Parses settings from a TOML document
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	/// Reads settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&source)
	}

	/// Registers the extra formats in the process-wide registry
	///
	/// A format already registered with the same media types is accepted,
	/// so applying the same settings twice is harmless.
	pub fn register_formats(&self) -> Result<(), SettingsError> {
		for (format, media_types) in &self.formats {
			registry::register_format_or_match(format, media_types)?;
		}
		Ok(())
	}
}
