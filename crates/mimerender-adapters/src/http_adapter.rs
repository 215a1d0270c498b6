//! Host adapter over the `http` crate types
//!
//! [`HttpAdapter`] reads inputs from an [`http::Request`] and produces an
//! [`http::Response<Bytes>`], so any server built on those types (hyper,
//! axum, ...) can serve wrapped endpoints.

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use http::header::{ACCEPT, HeaderName, HeaderValue};
use http::{Request, Response, StatusCode};
use mimerender_http::{HeaderList, HostAdapter, StatusLine};
use parking_lot::Mutex;

/// Host adapter borrowing an [`http::Request`]
///
/// Request parameters are the decoded query string. Context variables are
/// kept on the adapter for the duration of the request.
///
/// # Examples
///
/// ```
/// use mimerender_adapters::HttpAdapter;
/// use mimerender_http::HostAdapter;
///
/// let request = http::Request::builder()
///     .uri("/greet/world?format=json&lang=en%2Dgb")
///     .header("Accept", "text/html")
///     .header("Accept", "application/json;q=0.9")
///     .body(())
///     .unwrap();
///
/// let adapter = HttpAdapter::new(&request);
/// assert_eq!(adapter.request_parameter("format").as_deref(), Some("json"));
/// assert_eq!(adapter.request_parameter("lang").as_deref(), Some("en-gb"));
/// assert_eq!(
///     adapter.accept_header().as_deref(),
///     Some("text/html, application/json;q=0.9")
/// );
/// ```
#[derive(Debug)]
pub struct HttpAdapter<'a, B> {
	request: &'a Request<B>,
	params: HashMap<String, String>,
	context: Mutex<BTreeMap<String, String>>,
}

impl<'a, B> HttpAdapter<'a, B> {
	pub fn new(request: &'a Request<B>) -> Self {
		Self {
			request,
			params: query_params(request),
			context: Mutex::new(BTreeMap::new()),
		}
	}

	/// The wrapped request
	pub fn request(&self) -> &'a Request<B> {
		self.request
	}

	/// Current value of a context variable
	pub fn context_var(&self, name: &str) -> Option<String> {
		self.context.lock().get(name).cloned()
	}
}

fn query_params<B>(request: &Request<B>) -> HashMap<String, String> {
	let Some(query) = request.uri().query() else {
		return HashMap::new();
	};
	match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
		// First occurrence wins
		Ok(pairs) => pairs.into_iter().rev().collect(),
		Err(error) => {
			tracing::warn!(query = %query, error = %error, "ignoring undecodable query string");
			HashMap::new()
		}
	}
}

impl<B> HostAdapter for HttpAdapter<'_, B> {
	type Response = Response<Bytes>;

	fn request_parameter(&self, name: &str) -> Option<String> {
		self.params.get(name).cloned()
	}

	fn accept_header(&self) -> Option<String> {
		let values: Vec<&str> = self
			.request
			.headers()
			.get_all(ACCEPT)
			.iter()
			.filter_map(|value| match value.to_str() {
				Ok(value) => Some(value),
				Err(_) => {
					tracing::warn!("ignoring non-ASCII Accept header value");
					None
				}
			})
			.collect();
		if values.is_empty() {
			None
		} else {
			Some(values.join(", "))
		}
	}

	fn set_context_var(&self, name: &str, value: &str) {
		self.context
			.lock()
			.insert(name.to_string(), value.to_string());
	}

	fn clear_context_var(&self, name: &str) {
		self.context.lock().remove(name);
	}

	fn make_response(
		&self,
		body: Bytes,
		headers: HeaderList,
		status: StatusLine,
	) -> Response<Bytes> {
		let mut response = Response::new(body);

		*response.status_mut() = status.status_code().unwrap_or_else(|| {
			tracing::warn!(status = %status, "status line has no valid code, answering 500");
			StatusCode::INTERNAL_SERVER_ERROR
		});

		let response_headers = response.headers_mut();
		for (name, value) in headers {
			match (
				HeaderName::from_bytes(name.as_bytes()),
				HeaderValue::from_str(&value),
			) {
				(Ok(name), Ok(value)) => {
					response_headers.append(name, value);
				}
				_ => {
					tracing::warn!(header = %name, value = %value, "skipping invalid header");
				}
			}
		}

		response
	}
}
