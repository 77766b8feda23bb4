//! Rate-limit descriptors attached to responses.
//!
//! Faultline reports quota in `X-RateLimit-*` headers. The values are
//! projected into a `RateLimit` descriptor and passed through to the sync
//! output untouched; throttling decisions belong to the caller/transport,
//! not to this crate.

use chrono::DateTime;
use fl_core::RateLimit;
use reqwest::header::HeaderMap;

pub fn parse_rate_limit(headers: &HeaderMap) -> Option<RateLimit> {
    let limit = header_i64(headers, "x-ratelimit-limit");
    let remaining = header_i64(headers, "x-ratelimit-remaining");
    let reset = header_i64(headers, "x-ratelimit-reset");

    if limit.is_none() && remaining.is_none() && reset.is_none() {
        return None;
    }

    Some(RateLimit {
        limit,
        remaining,
        reset_at: reset.and_then(|secs| DateTime::from_timestamp(secs, 0))
    })
}

fn header_i64(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
}
