//! End-to-end tests over `http` crate requests and responses

use bytes::Bytes;
use http::{Request, StatusCode};
use mimerender::dispatch::BAD_ACCEPT_BODY;
use mimerender::http::context::CONTEXT_FORMAT;
use mimerender::prelude::*;
use mimerender_integration_tests::{available_types, prefixed};
use rstest::*;

type Greet = Box<dyn Fn(&HttpAdapter<'_, ()>, &[String]) -> http::Response<Bytes>>;

fn request(uri: &str, accept: Option<&str>) -> Request<()> {
	let mut builder = Request::builder().uri(uri);
	if let Some(accept) = accept {
		builder = builder.header(http::header::ACCEPT, accept);
	}
	builder.body(()).unwrap()
}

#[fixture]
fn greet() -> Greet {
	let endpoint = MimeRender::new()
		.with_default_format(formats::JSON)
		.with_override_param("format")
		.represent()
		.renderer(formats::JSON, |p: &Payload| serde_json::to_string(p))
		.renderer(formats::HTML, |p: &Payload| {
			format!("<p>{}</p>", p.get_str("message").unwrap_or_default())
		})
		.renderer(formats::TXT, prefixed("txt"))
		.build()
		.unwrap()
		.wrap_fn(|_: &NegotiationContext, args: &[String]| {
			let name = args.first().map(String::as_str).unwrap_or("world");
			Ok::<_, HandlerError>(Payload::new().with("message", format!("Hello, {}!", name)))
		});
	Box::new(move |adapter: &HttpAdapter<'_, ()>, args: &[String]| {
		endpoint.call(adapter, args).unwrap()
	})
}

#[rstest]
#[case(None, "application/json", r#"{"message":"Hello, world!"}"#)]
#[case(Some("text/html"), "text/html", "<p>Hello, world!</p>")]
#[case(Some("text/*;q=0.5, application/json;q=0.4"), "text/plain", "txt:")]
#[case(Some("*/*"), "application/json", r#"{"message":"Hello, world!"}"#)]
fn test_accept_selects_representation(
	greet: Greet,
	#[case] accept: Option<&str>,
	#[case] content_type: &str,
	#[case] body: &str,
) {
	// Arrange
	let request = request("/greet", accept);
	let adapter = HttpAdapter::new(&request);

	// Act
	let response = greet(&adapter, &[]);

	// Assert
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(response.headers()["content-type"], content_type);
	assert_eq!(response.headers()["vary"], "Accept");
	assert_eq!(response.body(), &Bytes::from(body.to_string()));
}

#[rstest]
fn test_query_override(greet: Greet) {
	let request = request("/greet?format=html", Some("application/json"));
	let adapter = HttpAdapter::new(&request);

	let response = greet(&adapter, &["ada".to_string()]);

	assert_eq!(response.headers()["content-type"], "text/html");
	assert_eq!(response.body(), &Bytes::from_static(b"<p>Hello, ada!</p>"));
	assert_eq!(adapter.context_var(CONTEXT_FORMAT), None);
}

#[rstest]
fn test_bad_accept_header(greet: Greet) {
	let request = request("/greet", Some("text"));
	let adapter = HttpAdapter::new(&request);

	let response = greet(&adapter, &[]);

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(response.headers()["content-type"], "text/plain");
	assert_eq!(response.headers()["vary"], "Accept");
	assert_eq!(response.body(), &Bytes::from_static(BAD_ACCEPT_BODY.as_bytes()));
}

#[rstest]
fn test_not_acceptable() {
	// Arrange
	let endpoint = MimeRender::new()
		.with_not_acceptable(available_types)
		.represent()
		.renderer(formats::JSON, |p: &Payload| serde_json::to_string(p))
		.build()
		.unwrap()
		.wrap_fn(|_: &NegotiationContext, _: &[String]| Ok::<_, HandlerError>(Payload::new()));
	let request = request("/", Some("image/png"));
	let adapter = HttpAdapter::new(&request);

	// Act
	let response = endpoint.call(&adapter, &[]).unwrap();

	// Assert
	assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
	assert_eq!(response.headers()["content-type"], "text/plain");
	assert_eq!(
		response.body(),
		&Bytes::from_static(b"Available Content Types: application/json")
	);
}

#[rstest]
fn test_handler_status_and_headers_reach_the_response() {
	// Arrange
	let endpoint = Represent::builder()
		.renderer(formats::JSON, |p: &Payload| serde_json::to_string(p))
		.build()
		.unwrap()
		.wrap_fn(|_: &NegotiationContext, _: &[String]| {
			Ok::<_, HandlerError>((
				Payload::new().with("id", 7),
				"201 Created",
				[("Location", "/items/7"), ("Vary", "Cookie")],
			))
		});
	let request = request("/items", Some("application/json"));
	let adapter = HttpAdapter::new(&request);

	// Act
	let response = endpoint.call(&adapter, &[]).unwrap();

	// Assert
	assert_eq!(response.status(), StatusCode::CREATED);
	assert_eq!(response.headers()["location"], "/items/7");
	assert_eq!(response.headers()["vary"], "Cookie,Accept");
	assert_eq!(response.headers()["content-type"], "application/json");
	assert_eq!(response.body(), &Bytes::from_static(br#"{"id":7}"#));
}
