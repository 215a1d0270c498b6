//! Handler payloads
//!
//! A [`Payload`] is the structured value a handler returns and a renderer
//! consumes: a JSON object whose fields are addressed by name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named fields handed from a handler to a renderer
///
/// # Examples
///
/// ```
/// use mimerender_http::Payload;
///
/// let payload = Payload::new().with("message", "Hello, world!").with("count", 3);
/// assert_eq!(payload.get_str("message"), Some("Hello, world!"));
/// assert_eq!(payload.get("count"), Some(&serde_json::json!(3)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
	/// Creates an empty payload
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a field, builder style
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(key, value);
		self
	}

	/// Inserts a field, returning the previous value
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(key.into(), value.into())
	}

	/// Returns a field
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Returns a field if it is a string
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.0.get(key).and_then(Value::as_str)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over fields
	pub fn iter(&self) -> serde_json::map::Iter<'_> {
		self.0.iter()
	}

	/// Borrows the underlying JSON object
	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}

	/// Converts into the underlying JSON object
	pub fn into_map(self) -> Map<String, Value> {
		self.0
	}

	/// Builds a payload from a JSON value, if it is an object
	pub fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Object(map) => Some(Self(map)),
			_ => None,
		}
	}

	/// Serializes any value into a payload
	///
	/// Returns `None` when the value does not serialize to a JSON object.
	///
	/// # Examples
	///
	/// ```
	/// use mimerender_http::Payload;
	/// use serde::Serialize;
	///
	/// #[derive(Serialize)]
	/// struct Greeting {
	///     message: String,
	/// }
	///
	/// let payload = Payload::from_serialize(&Greeting { message: "hi".into() }).unwrap();
	/// assert_eq!(payload.get_str("message"), Some("hi"));
	/// assert!(Payload::from_serialize(&42).is_none());
	/// ```
	pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Option<Self> {
		serde_json::to_value(value).ok().and_then(Self::from_value)
	}
}

impl From<Map<String, Value>> for Payload {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}

impl From<Payload> for Value {
	fn from(payload: Payload) -> Self {
		Value::Object(payload.0)
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Payload {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

impl<'a> IntoIterator for &'a Payload {
	type Item = (&'a String, &'a Value);
	type IntoIter = serde_json::map::Iter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
