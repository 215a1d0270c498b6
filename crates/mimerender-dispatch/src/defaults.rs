//! Process-wide defaults
//!
//! A host application usually creates one [`MimeRender`] at startup and
//! derives every endpoint configuration from it. Options set on the
//! derived [`RepresentBuilder`] take precedence over the defaults.
//!
//! # Examples
//!
//! ```
//! use mimerender_adapters::MemoryAdapter;
//! use mimerender_dispatch::{Endpoint, HandlerError, MimeRender};
//! use mimerender_http::{NegotiationContext, Payload};
//!
//! let mimerender = MimeRender::new()
//!     .with_default_format("txt")
//!     .with_override_param("format");
//!
//! let endpoint = mimerender
//!     .represent()
//!     .renderer("txt", |p: &Payload| format!("txt:{}", p.get_str("x").unwrap_or_default()))
//!     .renderer("html", |p: &Payload| format!("html:{}", p.get_str("x").unwrap_or_default()))
//!     .build()
//!     .unwrap()
//!     .wrap_fn(|_: &NegotiationContext, _: &[String]| {
//!         Ok::<_, HandlerError>(Payload::new().with("x", "c"))
//!     });
//!
//! let adapter = MemoryAdapter::new().with_param("format", "html");
//! let response = endpoint.call(&adapter, &[]).unwrap();
//! assert_eq!(response.header("Content-Type"), Some("text/html"));
//! assert_eq!(response.body_str(), Some("html:c"));
//! ```

use std::fmt;
use std::sync::Arc;

use mimerender_negotiation::{NegotiationError, NotAcceptableCallback};

use crate::exception::{ExceptionMapping, MapExceptions};
use crate::represent::RepresentBuilder;
use crate::settings::{MimeRenderSettings, SettingsError};

/// Defaults shared by every endpoint configuration it creates
#[derive(Clone, Default)]
pub struct MimeRender {
	default_format: Option<String>,
	override_arg: Option<isize>,
	override_param: Option<String>,
	charset: Option<String>,
	not_acceptable: Option<NotAcceptableCallback>,
}

impl MimeRender {
	pub fn new() -> Self {
		Self::default()
	}

	/// Applies settings and registers the formats they declare
	///
	/// # Examples
	///
	/// ```
	/// use mimerender_dispatch::{MimeRender, MimeRenderSettings};
	///
	/// let settings = MimeRenderSettings::from_toml_str(r#"
	///     default_format = "json"
	///     charset = "utf-8"
	/// "#).unwrap();
	/// let mimerender = MimeRender::from_settings(&settings).unwrap();
	/// assert_eq!(mimerender.charset(), Some("utf-8"));
	/// ```
	pub fn from_settings(settings: &MimeRenderSettings) -> Result<Self, SettingsError> {
		settings.register_formats()?;
		Ok(Self {
			default_format: settings.default_format.clone(),
			override_arg: settings.override_arg,
			override_param: settings.override_param.clone(),
			charset: settings.charset.clone(),
			not_acceptable: None,
		})
	}

	pub fn with_default_format(mut self, format: impl Into<String>) -> Self {
		self.default_format = Some(format.into());
		self
	}

	pub fn with_override_arg(mut self, index: isize) -> Self {
		self.override_arg = Some(index);
		self
	}

	pub fn with_override_param(mut self, name: impl Into<String>) -> Self {
		self.override_param = Some(name.into());
		self
	}

	pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
		self.charset = Some(charset.into());
		self
	}

	pub fn with_not_acceptable<F>(mut self, callback: F) -> Self
	where
		F: Fn(&str, &[String]) -> (String, String) + Send + Sync + 'static,
	{
		self.not_acceptable = Some(Arc::new(callback));
		self
	}

	pub fn default_format(&self) -> Option<&str> {
		self.default_format.as_deref()
	}

	pub fn override_arg(&self) -> Option<isize> {
		self.override_arg
	}

	pub fn override_param(&self) -> Option<&str> {
		self.override_param.as_deref()
	}

	pub fn charset(&self) -> Option<&str> {
		self.charset.as_deref()
	}

	/// Starts an endpoint configuration carrying these defaults
	pub fn represent(&self) -> RepresentBuilder {
		let mut builder =
			RepresentBuilder::new().not_acceptable_callback(self.not_acceptable.clone());
		if let Some(format) = &self.default_format {
			builder = builder.default_format(format.clone());
		}
		if let Some(index) = self.override_arg {
			builder = builder.override_arg(index);
		}
		if let Some(name) = &self.override_param {
			builder = builder.override_param(name.clone());
		}
		if let Some(charset) = &self.charset {
			builder = builder.charset(charset.clone());
		}
		builder
	}

	/// Wraps `inner` so that handler errors matching `mapping` are
	/// represented with a configuration carrying these defaults
	///
	/// `configure` binds the error renderers on the pre-filled builder.
	pub fn map_exceptions<E, F>(
		&self,
		mapping: ExceptionMapping,
		configure: F,
		inner: E,
	) -> Result<MapExceptions<E>, NegotiationError>
	where
		F: FnOnce(RepresentBuilder) -> RepresentBuilder,
	{
		let represent = configure(self.represent()).build()?;
		Ok(represent.map_exceptions(mapping, inner))
	}
}

impl fmt::Debug for MimeRender {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MimeRender")
			.field("default_format", &self.default_format)
			.field("override_arg", &self.override_arg)
			.field("override_param", &self.override_param)
			.field("charset", &self.charset)
			.field("not_acceptable", &self.not_acceptable.is_some())
			.finish()
	}
}
