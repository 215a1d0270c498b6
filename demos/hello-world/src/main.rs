//! Greets over three representations and maps a missing name to 404.
//!
//! Requests are built in process and served through `HttpAdapter`; run with
//! `RUST_LOG=debug` to see each negotiation decision.

use http::Request;
use mimerender::prelude::*;
use tracing_subscriber::EnvFilter;

static NOT_FOUND: ErrorKind = ErrorKind::root("NotFound");

fn greet(_: &NegotiationContext, args: &[String]) -> Result<Payload, HandlerError> {
	match args.first().filter(|name| !name.is_empty()) {
		Some(name) => Ok(Payload::new().with("message", format!("Hello, {}!", name))),
		None => Err(HandlerError::new(&NOT_FOUND, "nobody to greet").with_arg("name")),
	}
}

fn render_html(payload: &Payload) -> String {
	format!(
		"<html><body>{}</body></html>",
		payload.get_str("message").unwrap_or_default()
	)
}

fn render_txt(payload: &Payload) -> String {
	match payload.get("exception") {
		Some(exception) => format!("error: {}", exception["message"].as_str().unwrap_or_default()),
		None => payload.get_str("message").unwrap_or_default().to_string(),
	}
}

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let mimerender = MimeRender::new()
		.with_default_format(formats::JSON)
		.with_override_param("format")
		.with_charset("utf-8");

	let greeting = mimerender
		.represent()
		.renderer(formats::JSON, |p: &Payload| serde_json::to_string(p))
		.renderer(formats::HTML, render_html)
		.renderer(formats::TXT, render_txt)
		.build()?
		.wrap_fn(greet);

	let endpoint = mimerender
		.represent()
		.renderer(formats::JSON, |p: &Payload| serde_json::to_string(p))
		.renderer(formats::TXT, render_txt)
		.build()?
		.map_exceptions(ExceptionMapping::new().map(&NOT_FOUND, "404 Not Found"), greeting);

	let requests = [
		("/greet/world", "application/json", "world"),
		("/greet/world", "text/html", "world"),
		("/greet/world?format=txt", "application/json", "world"),
		("/greet/", "text/plain", ""),
		("/greet/world", "text/html;q=0.5, text/plain", "world"),
	];

	for (uri, accept, name) in requests {
		let request = Request::builder()
			.uri(uri)
			.header(http::header::ACCEPT, accept)
			.body(())?;
		let adapter = HttpAdapter::new(&request);
		let response = endpoint.call(&adapter, &[name.to_string()])?;

		let content_type = response
			.headers()
			.get(http::header::CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.unwrap_or_default();
		tracing::info!(
			uri = %uri,
			accept = %accept,
			status = %response.status(),
			content_type = %content_type,
			"served"
		);
		println!("{}", String::from_utf8_lossy(response.body()));
	}

	Ok(())
}
