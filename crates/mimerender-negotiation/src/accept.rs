//! Accept header parsing and best-match selection
//!
//! A header is split into media ranges, each carrying a quality factor.
//! Every supported media type is scored against those ranges and the best
//! scoring one wins; on equal scores the one listed **last** wins, which is
//! what lets a negotiator push its default format to the end of the list
//! to make it win wildcard requests.
//!
//! # Examples
//!
//! ```
//! use mimerender_negotiation::accept::AcceptHeader;
//!
//! let accept = AcceptHeader::parse("application/xml;q=0.5, application/json").unwrap();
//! let supported = ["application/xml", "application/json"];
//! assert_eq!(accept.best_match(&supported), Some("application/json"));
//!
//! // Equal weights: the later entry wins
//! let wildcard = AcceptHeader::parse("*/*").unwrap();
//! assert_eq!(wildcard.best_match(&supported), Some("application/json"));
//! ```

use std::fmt;
use std::str::FromStr;

use mime::Mime;

use crate::error::{NegotiationError, Result};

/// A single media range from an Accept header, or a concrete media type
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
	/// Top-level type (`text`, `application`, `*`)
	pub type_: String,
	/// Subtype including any structured suffix (`html`, `xhtml+xml`, `*`)
	pub subtype: String,
	/// Parameters other than `q`, in header order
	pub params: Vec<(String, String)>,
	/// Quality factor (0.0 to 1.0)
	pub quality: f32,
}

impl MediaRange {
	/// Parses one media range such as `text/html;level=1;q=0.8`
	///
	/// A lone `*` is read as `*/*`. A missing, unparsable or out-of-range
	/// quality is treated as `1.0`. Returns `None` when the range is not of
	/// the form `type/subtype[;params]`.
	///
	/// # Examples
	///
	/// ```
	/// use mimerender_negotiation::accept::MediaRange;
	///
	/// let range = MediaRange::parse("text/html; level=1; q=0.8").unwrap();
	/// assert_eq!(range.type_, "text");
	/// assert_eq!(range.subtype, "html");
	/// assert_eq!(range.quality, 0.8);
	/// assert_eq!(range.params, vec![("level".to_string(), "1".to_string())]);
	///
	/// assert!(MediaRange::parse("text").is_none());
	/// ```
	pub fn parse(s: &str) -> Option<Self> {
		let trimmed = s.trim();
		let normalized = match trimmed.split_once(';') {
			Some((head, rest)) if head.trim() == "*" => format!("*/*;{}", rest),
			None if trimmed == "*" => "*/*".to_string(),
			_ => trimmed.to_string(),
		};

		let parsed = Mime::from_str(&normalized).ok()?;
		let (type_, subtype) = parsed.essence_str().split_once('/')?;
		if type_.is_empty() || subtype.is_empty() {
			return None;
		}

		let mut quality = 1.0;
		let mut params = Vec::new();
		for (name, value) in parsed.params() {
			if name.as_str() == "q" {
				if let Ok(q) = value.as_str().parse::<f32>()
					&& (0.0..=1.0).contains(&q)
				{
					quality = q;
				}
			} else {
				params.push((name.as_str().to_string(), value.as_str().to_string()));
			}
		}

		Some(Self {
			type_: type_.to_ascii_lowercase(),
			subtype: subtype.to_ascii_lowercase(),
			params,
			quality,
		})
	}

	/// Returns `type/subtype` without parameters
	pub fn essence(&self) -> String {
		format!("{}/{}", self.type_, self.subtype)
	}

	/// Returns true if either part of the range is a wildcard
	pub fn is_wildcard(&self) -> bool {
		self.type_ == "*" || self.subtype == "*"
	}

	fn param(&self, name: &str) -> Option<&str> {
		self.params
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}
}

impl fmt::Display for MediaRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.type_, self.subtype)?;
		for (key, value) in &self.params {
			write!(f, ";{}={}", key, value)?;
		}
		Ok(())
	}
}

/// A parsed Accept header
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptHeader {
	ranges: Vec<MediaRange>,
}

impl AcceptHeader {
	/// Parses an Accept header value
	///
	/// Blank items are skipped. Any item that is not a valid media range
	/// makes the whole header invalid.
	///
	/// # Examples
	///
	/// ```
	/// use mimerender_negotiation::accept::AcceptHeader;
	///
	/// let accept = AcceptHeader::parse("text/html, application/json;q=0.9").unwrap();
	/// assert_eq!(accept.ranges().len(), 2);
	///
	/// assert!(AcceptHeader::parse("text").is_err());
	/// ```
	pub fn parse(header: &str) -> Result<Self> {
		let ranges = header
			.split(',')
			.map(str::trim)
			.filter(|item| !item.is_empty())
			.map(|item| {
				MediaRange::parse(item)
					.ok_or_else(|| NegotiationError::BadAcceptHeader(header.to_string()))
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(Self { ranges })
	}

	/// Returns the parsed ranges in header order
	pub fn ranges(&self) -> &[MediaRange] {
		&self.ranges
	}

	/// Scores a concrete media type against this header
	///
	/// Returns `(quality, fitness)`. Fitness is 100 for an exact type, 10 for
	/// an exact subtype and 1 per matching parameter; the quality comes from
	/// the first best-fitting range. A media type no range covers scores
	/// `(0.0, -1)`.
	pub fn quality_and_fitness(&self, target: &MediaRange) -> (f32, i32) {
		let mut best_fitness = -1;
		let mut best_quality = 0.0;

		for range in &self.ranges {
			let type_match =
				range.type_ == target.type_ || range.type_ == "*" || target.type_ == "*";
			let subtype_match = range.subtype == target.subtype
				|| range.subtype == "*"
				|| target.subtype == "*";
			if !(type_match && subtype_match) {
				continue;
			}

			let mut fitness = 0;
			if range.type_ == target.type_ {
				fitness += 100;
			}
			if range.subtype == target.subtype {
				fitness += 10;
			}
			fitness += target
				.params
				.iter()
				.filter(|(key, value)| range.param(key) == Some(value.as_str()))
				.count() as i32;

			if fitness > best_fitness {
				best_fitness = fitness;
				best_quality = range.quality;
			}
		}

		(best_quality, best_fitness)
	}

	/// Returns the index of the best candidate among pre-parsed media types
	///
	/// Candidates are ranked by `(quality, fitness, position)`; a later
	/// position wins a tie. Returns `None` when the best candidate has a
	/// quality of zero.
	pub fn best_match_index(&self, candidates: &[MediaRange]) -> Option<usize> {
		let mut best: Option<(usize, f32, i32)> = None;

		for (index, candidate) in candidates.iter().enumerate() {
			let (quality, fitness) = self.quality_and_fitness(candidate);
			let replace = match best {
				None => true,
				Some((_, best_quality, best_fitness)) => {
					quality > best_quality || (quality == best_quality && fitness >= best_fitness)
				}
			};
			if replace {
				best = Some((index, quality, fitness));
			}
		}

		best.filter(|(_, quality, _)| *quality > 0.0)
			.map(|(index, _, _)| index)
	}

	/// Returns the best supported media type for this header
	///
	/// Supported entries that are not valid media types are ignored.
	///
	/// # Examples
	///
	/// ```
	/// use mimerender_negotiation::accept::AcceptHeader;
	///
	/// let accept = AcceptHeader::parse("text/*;q=0.5, application/json;q=0").unwrap();
	/// let supported = ["application/json", "text/plain"];
	/// assert_eq!(accept.best_match(&supported), Some("text/plain"));
	///
	/// let refused = AcceptHeader::parse("image/png").unwrap();
	/// assert_eq!(refused.best_match(&supported), None);
	/// ```
	pub fn best_match<'a, S: AsRef<str>>(&self, supported: &'a [S]) -> Option<&'a str> {
		let parsed: Vec<(&'a str, MediaRange)> = supported
			.iter()
			.filter_map(|s| MediaRange::parse(s.as_ref()).map(|range| (s.as_ref(), range)))
			.collect();
		let ranges: Vec<MediaRange> = parsed.iter().map(|(_, range)| range.clone()).collect();

		self.best_match_index(&ranges)
			.map(|index| parsed[index].0)
	}
}
