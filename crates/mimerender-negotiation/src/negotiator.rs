//! Negotiation engine
//!
//! A [`Negotiator`] is built once per endpoint from a set of
//! format-to-renderer bindings and answers, for each request, which media
//! type to produce and which renderer produces it.
//!
//! Selection priority:
//! 1. Explicit override naming a bound format
//! 2. `Accept` header best match
//! 3. Default format
//!
//! # Examples
//!
//! ```
//! use mimerender_negotiation::{Negotiation, NegotiatorBuilder};
//!
//! let negotiator = NegotiatorBuilder::new()
//!     .bind("json", "render_json")
//!     .bind("xml", "render_xml")
//!     .default_format("json")
//!     .build()
//!     .unwrap();
//!
//! match negotiator.negotiate(None, Some("application/xml")).unwrap() {
//!     Negotiation::Selected(selection) => {
//!         assert_eq!(selection.media_type, "application/xml");
//!         assert_eq!(*selection.renderer, "render_xml");
//!     }
//!     Negotiation::NotAcceptable(_) => unreachable!(),
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::accept::{AcceptHeader, MediaRange};
use crate::error::{NegotiationError, Result};
use crate::registry::{self, FormatRegistry};

/// Builds the `(media type, body)` of a `406 Not Acceptable` response
///
/// Receives the raw Accept header and the supported media types in
/// negotiation order.
pub type NotAcceptableCallback = Arc<dyn Fn(&str, &[String]) -> (String, String) + Send + Sync>;

struct Binding<R> {
	format: String,
	canonical: String,
	renderer: R,
}

struct SupportedType {
	media_type: String,
	range: MediaRange,
	binding: usize,
}

/// Outcome of a successful format selection
#[derive(Debug)]
pub struct Selection<'a, R> {
	/// Media type to send
	pub media_type: &'a str,
	/// Short format name the media type belongs to
	pub format: &'a str,
	/// Renderer bound to the format
	pub renderer: &'a R,
}

/// Body of a `406 Not Acceptable` response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAcceptable {
	pub media_type: String,
	pub body: String,
}

/// Result of negotiating one request
#[derive(Debug)]
pub enum Negotiation<'a, R> {
	/// A renderer was chosen
	Selected(Selection<'a, R>),
	/// Nothing acceptable and a not-acceptable callback is configured
	NotAcceptable(NotAcceptable),
}

impl<'a, R> Negotiation<'a, R> {
	/// Returns the selection, if any
	pub fn selected(self) -> Option<Selection<'a, R>> {
		match self {
			Negotiation::Selected(selection) => Some(selection),
			Negotiation::NotAcceptable(_) => None,
		}
	}
}

/// Builder for [`Negotiator`]
pub struct NegotiatorBuilder<R> {
	bindings: Vec<(String, R)>,
	default_format: Option<String>,
	not_acceptable: Option<NotAcceptableCallback>,
}

impl<R> Default for NegotiatorBuilder<R> {
	fn default() -> Self {
		Self {
			bindings: Vec::new(),
			default_format: None,
			not_acceptable: None,
		}
	}
}

impl<R> NegotiatorBuilder<R> {
	/// Creates an empty builder
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds a renderer to a format
	///
	/// Binding a format again replaces its renderer and keeps its position.
	pub fn bind(mut self, format: impl Into<String>, renderer: R) -> Self {
		let format = format.into();
		match self.bindings.iter_mut().find(|(name, _)| *name == format) {
			Some(binding) => binding.1 = renderer,
			None => self.bindings.push((format, renderer)),
		}
		self
	}

	/// Sets the format used when nothing else decides
	pub fn default_format(mut self, format: impl Into<String>) -> Self {
		self.default_format = Some(format.into());
		self
	}

	/// Sets the callback producing `406 Not Acceptable` responses
	pub fn not_acceptable<F>(self, callback: F) -> Self
	where
		F: Fn(&str, &[String]) -> (String, String) + Send + Sync + 'static,
	{
		self.not_acceptable_callback(Some(Arc::new(callback)))
	}

	/// Sets or clears the not-acceptable callback
	pub fn not_acceptable_callback(mut self, callback: Option<NotAcceptableCallback>) -> Self {
		self.not_acceptable = callback;
		self
	}

	/// Builds against the process-wide registry
	pub fn build(self) -> Result<Negotiator<R>> {
		let registry = registry::registry();
		self.build_with(&registry)
	}

	/// Builds against an explicit registry
	///
	/// # Errors
	///
	/// - [`NegotiationError::NoRenderersConfigured`] without bindings
	/// - [`NegotiationError::UnknownFormat`] for an unregistered binding or default
	/// - [`NegotiationError::UnboundDefault`] when the default has no renderer
	pub fn build_with(self, registry: &FormatRegistry) -> Result<Negotiator<R>> {
		if self.bindings.is_empty() {
			return Err(NegotiationError::NoRenderersConfigured);
		}

		let default_binding = match &self.default_format {
			Some(default) => {
				registry.media_types(default)?;
				self.bindings
					.iter()
					.position(|(format, _)| format == default)
					.ok_or_else(|| NegotiationError::UnboundDefault(default.clone()))?
			}
			None => 0,
		};

		let mut bindings = Vec::with_capacity(self.bindings.len());
		let mut supported = Vec::new();
		let mut deferred = Vec::new();
		for (index, (format, renderer)) in self.bindings.into_iter().enumerate() {
			let media_types = registry.media_types(&format)?;
			let is_default = self.default_format.is_some() && index == default_binding;
			// The default's canonical media type ends up last, winning `*/*` ties
			let ordered: Vec<&String> = if is_default {
				media_types.iter().rev().collect()
			} else {
				media_types.iter().collect()
			};
			let target = if is_default { &mut deferred } else { &mut supported };
			for media_type in ordered {
				if let Some(range) = MediaRange::parse(media_type) {
					target.push(SupportedType {
						media_type: media_type.clone(),
						range,
						binding: index,
					});
				}
			}
			bindings.push(Binding {
				canonical: registry.canonical_media_type(&format)?.to_string(),
				format,
				renderer,
			});
		}
		supported.append(&mut deferred);

		let supported_media_types = supported.iter().map(|s| s.media_type.clone()).collect();

		Ok(Negotiator {
			bindings,
			supported,
			supported_media_types,
			default_binding,
			not_acceptable: self.not_acceptable,
		})
	}
}

/// Per-endpoint negotiation configuration
pub struct Negotiator<R> {
	bindings: Vec<Binding<R>>,
	supported: Vec<SupportedType>,
	supported_media_types: Vec<String>,
	default_binding: usize,
	not_acceptable: Option<NotAcceptableCallback>,
}

impl<R> Negotiator<R> {
	/// Selects a media type and renderer for one request
	///
	/// `override_format` wins when it names a bound format; an unbound
	/// override is ignored. A present, non-blank `accept` header is then
	/// matched against the supported media types. Without a match the
	/// not-acceptable callback answers if configured, otherwise the
	/// default format is used.
	///
	/// # Errors
	///
	/// [`NegotiationError::BadAcceptHeader`] when `accept` cannot be parsed.
	pub fn negotiate(
		&self,
		override_format: Option<&str>,
		accept: Option<&str>,
	) -> Result<Negotiation<'_, R>> {
		if let Some(format) = override_format.filter(|f| !f.is_empty()) {
			match self.bindings.iter().position(|b| b.format == format) {
				Some(index) => {
					let selection = self.select_canonical(index);
					tracing::debug!(
						format = %format,
						media_type = %selection.media_type,
						"format selected by override"
					);
					return Ok(Negotiation::Selected(selection));
				}
				None => {
					tracing::debug!(format = %format, "ignoring override for unbound format");
				}
			}
		}

		if let Some(header) = accept.filter(|a| !a.trim().is_empty()) {
			let parsed = AcceptHeader::parse(header).inspect_err(|_| {
				tracing::warn!(accept = %header, "malformed Accept header");
			})?;
			let ranges: Vec<MediaRange> = self.supported.iter().map(|s| s.range.clone()).collect();

			if let Some(index) = parsed.best_match_index(&ranges) {
				let supported = &self.supported[index];
				let binding = &self.bindings[supported.binding];
				tracing::debug!(
					format = %binding.format,
					media_type = %supported.media_type,
					"format selected by Accept header"
				);
				return Ok(Negotiation::Selected(Selection {
					media_type: &supported.media_type,
					format: &binding.format,
					renderer: &binding.renderer,
				}));
			}

			if let Some(callback) = &self.not_acceptable {
				let (media_type, body) = callback(header, &self.supported_media_types);
				tracing::debug!(accept = %header, media_type = %media_type, "no acceptable format");
				return Ok(Negotiation::NotAcceptable(NotAcceptable { media_type, body }));
			}
		}

		let selection = self.select_canonical(self.default_binding);
		tracing::debug!(
			format = %selection.format,
			media_type = %selection.media_type,
			"falling back to default format"
		);
		Ok(Negotiation::Selected(selection))
	}

	fn select_canonical(&self, index: usize) -> Selection<'_, R> {
		let binding = &self.bindings[index];
		Selection {
			media_type: &binding.canonical,
			format: &binding.format,
			renderer: &binding.renderer,
		}
	}

	/// Supported media types in negotiation order, default format last
	pub fn supported_media_types(&self) -> &[String] {
		&self.supported_media_types
	}

	/// Canonical media type of the default format
	pub fn default_media_type(&self) -> &str {
		&self.bindings[self.default_binding].canonical
	}

	/// Name of the default format
	pub fn default_format(&self) -> &str {
		&self.bindings[self.default_binding].format
	}

	/// Bound format names in binding order
	pub fn formats(&self) -> impl Iterator<Item = &str> {
		self.bindings.iter().map(|b| b.format.as_str())
	}

	/// Returns the renderer bound to a format
	pub fn renderer(&self, format: &str) -> Option<&R> {
		self.bindings
			.iter()
			.find(|b| b.format == format)
			.map(|b| &b.renderer)
	}
}

impl<R> fmt::Debug for Negotiator<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Negotiator")
			.field("formats", &self.formats().collect::<Vec<_>>())
			.field("supported_media_types", &self.supported_media_types)
			.field("default_format", &self.default_format())
			.field("not_acceptable", &self.not_acceptable.is_some())
			.finish()
	}
}
