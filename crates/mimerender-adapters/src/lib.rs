//! Host adapters for mimerender
//!
//! - [`MemoryAdapter`]: inputs supplied up front, context writes recorded
//! - [`HttpAdapter`]: `http::Request` in, `http::Response<Bytes>` out

pub mod http_adapter;
pub mod memory;

pub use http_adapter::HttpAdapter;
pub use memory::{MemoryAdapter, MemoryResponse};
