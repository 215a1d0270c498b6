//! In-memory host adapter
//!
//! [`MemoryAdapter`] takes its request inputs up front and records every
//! context variable write, which makes it the adapter of choice for tests
//! and for embedding mimerender outside a web framework.

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use mimerender_http::{HeaderList, HostAdapter, StatusLine};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct ContextStore {
	vars: BTreeMap<String, String>,
	history: Vec<(String, Option<String>)>,
}

/// Host adapter backed by plain values
///
/// # Examples
///
/// ```
/// use mimerender_adapters::MemoryAdapter;
/// use mimerender_http::HostAdapter;
///
/// let adapter = MemoryAdapter::new()
///     .with_accept("application/json")
///     .with_param("format", "xml");
///
/// assert_eq!(adapter.accept_header().as_deref(), Some("application/json"));
/// assert_eq!(adapter.request_parameter("format").as_deref(), Some("xml"));
///
/// adapter.set_context_var("mimerender.format", "json");
/// adapter.clear_context_var("mimerender.format");
/// assert_eq!(adapter.context_history().len(), 2);
/// assert!(adapter.context_vars().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryAdapter {
	params: HashMap<String, String>,
	accept: Option<String>,
	context: Mutex<ContextStore>,
}

impl MemoryAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
		self.accept = Some(accept.into());
		self
	}

	pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(name.into(), value.into());
		self
	}

	/// Replaces the Accept header between requests
	pub fn set_accept(&mut self, accept: Option<&str>) {
		self.accept = accept.map(str::to_string);
	}

	/// Sets or removes a request parameter between requests
	pub fn set_param(&mut self, name: &str, value: Option<&str>) {
		match value {
			Some(value) => {
				self.params.insert(name.to_string(), value.to_string());
			}
			None => {
				self.params.remove(name);
			}
		}
	}

	/// Context variables currently set
	pub fn context_vars(&self) -> BTreeMap<String, String> {
		self.context.lock().vars.clone()
	}

	/// Every context write in order; `None` records a clear
	pub fn context_history(&self) -> Vec<(String, Option<String>)> {
		self.context.lock().history.clone()
	}
}

impl HostAdapter for MemoryAdapter {
	type Response = MemoryResponse;

	fn request_parameter(&self, name: &str) -> Option<String> {
		self.params.get(name).cloned()
	}

	fn accept_header(&self) -> Option<String> {
		self.accept.clone()
	}

	fn set_context_var(&self, name: &str, value: &str) {
		let mut context = self.context.lock();
		context.vars.insert(name.to_string(), value.to_string());
		context
			.history
			.push((name.to_string(), Some(value.to_string())));
	}

	fn clear_context_var(&self, name: &str) {
		let mut context = self.context.lock();
		context.vars.remove(name);
		context.history.push((name.to_string(), None));
	}

	fn make_response(
		&self,
		body: Bytes,
		headers: HeaderList,
		status: StatusLine,
	) -> MemoryResponse {
		MemoryResponse {
			status,
			headers,
			body,
		}
	}
}

/// Response produced by [`MemoryAdapter`]
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryResponse {
	pub status: StatusLine,
	pub headers: HeaderList,
	pub body: Bytes,
}

impl MemoryResponse {
	/// First value of a header, ignoring name case
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// All values of a header, ignoring name case
	pub fn header_values(&self, name: &str) -> Vec<&str> {
		self.headers
			.iter()
			.filter(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
			.collect()
	}

	/// Body as text, if it is valid UTF-8
	pub fn body_str(&self) -> Option<&str> {
		std::str::from_utf8(&self.body).ok()
	}
}
