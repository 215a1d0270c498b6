//! Integration tests for TOML settings and process-wide defaults

use std::io::Write;

use mimerender::prelude::*;
use mimerender::{MimeRenderSettings, NegotiationError, SettingsError};
use mimerender_integration_tests::{args, echo, prefixed};
use rstest::*;
use serial_test::serial;
use tempfile::NamedTempFile;

const SETTINGS: &str = r#"
default_format = "txt"
override_arg = -1
charset = "utf-8"

[formats]
msgpack = ["application/msgpack", "application/x-msgpack"]
"#;

#[fixture]
fn settings_file() -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(SETTINGS.as_bytes()).unwrap();
	file
}

#[rstest]
#[serial(format_registry)]
fn test_settings_drive_endpoints(settings_file: NamedTempFile) {
	// Arrange
	let settings = MimeRenderSettings::from_file(settings_file.path()).unwrap();
	let mimerender = MimeRender::from_settings(&settings).unwrap();
	let endpoint = mimerender
		.represent()
		.renderer(formats::TXT, prefixed("txt"))
		.renderer("msgpack", prefixed("msgpack"))
		.build()
		.unwrap()
		.wrap_fn(echo);

	// Act
	let plain = endpoint
		.call(&MemoryAdapter::new(), &args(&["a"]))
		.unwrap();
	let packed = endpoint
		.call(
			&MemoryAdapter::new().with_accept("application/x-msgpack"),
			&args(&["b"]),
		)
		.unwrap();
	let overridden = endpoint
		.call(&MemoryAdapter::new(), &args(&["c", "msgpack"]))
		.unwrap();

	// Assert
	assert_eq!(plain.header("Content-Type"), Some("text/plain; charset=utf-8"));
	assert_eq!(plain.body_str(), Some("txt:a"));
	assert_eq!(
		packed.header("Content-Type"),
		Some("application/x-msgpack; charset=utf-8")
	);
	assert_eq!(packed.body_str(), Some("msgpack:b"));
	assert_eq!(
		overridden.header("Content-Type"),
		Some("application/msgpack; charset=utf-8")
	);
	assert_eq!(overridden.body_str(), Some("msgpack:c"));
}

#[rstest]
#[serial(format_registry)]
fn test_settings_can_be_applied_twice(settings_file: NamedTempFile) {
	let settings = MimeRenderSettings::from_file(settings_file.path()).unwrap();

	MimeRender::from_settings(&settings).unwrap();
	let again = MimeRender::from_settings(&settings);

	assert!(again.is_ok());
}

#[rstest]
#[serial(format_registry)]
fn test_conflicting_format_is_rejected() {
	let settings = MimeRenderSettings::from_toml_str(
		r#"
		[formats]
		jsonish = ["application/json"]
		"#,
	)
	.unwrap();

	let result = MimeRender::from_settings(&settings);

	assert!(matches!(
		result,
		Err(SettingsError::Registry(NegotiationError::MediaTypeConflict { .. }))
	));
}

#[rstest]
fn test_missing_file() {
	let result = MimeRenderSettings::from_file("/nonexistent/mimerender.toml");
	assert!(matches!(result, Err(SettingsError::Io { .. })));
}

#[rstest]
fn test_unknown_default_format_fails_at_build() {
	let settings = MimeRenderSettings::from_toml_str(r#"default_format = "pdf""#).unwrap();
	let mimerender = MimeRender::from_settings(&settings).unwrap();

	let result = mimerender
		.represent()
		.renderer(formats::TXT, prefixed("txt"))
		.build();

	assert!(result.is_err());
}
