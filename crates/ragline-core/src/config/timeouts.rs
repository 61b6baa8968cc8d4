//! Default timeout values for backend requests
//!
//! All values can be overridden through [`ApiConfig`](super::ApiConfig).

/// Default connection timeout (10 seconds)
pub const CONNECT_SECS: u64 = 10;

/// Default end-to-end timeout for non-streaming requests (30 seconds)
pub const REQUEST_SECS: u64 = 30;
