//! Continuation-cursor pagination metadata.
//!
//! Faultline carries pagination state in a structured `Link` response
//! header:
//!
//! ```text
//! <https://.../organizations/?cursor=0:0:1>; rel="previous"; results="false"; cursor="0:0:1",
//! <https://.../organizations/?cursor=0:100:0>; rel="next"; results="true"; cursor="0:100:0"
//! ```
//!
//! A `rel="next"` link alone does not mean more data: the server echoes a
//! next link on the last page with `results="false"`. Only an explicit
//! `results="true"` advances the walk. Parsing is conservative: anything
//! missing or malformed degrades to "no more pages" rather than erroring,
//! since this is metadata-only and under-reading is the safe direction.

use reqwest::header::HeaderMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next: bool,
    pub cursor: String
}

impl PageInfo {
    pub fn end() -> Self {
        Self::default()
    }

    /// Cursor to feed into the next page request, or the empty-string
    /// sentinel when the listing is exhausted.
    pub fn continuation(&self) -> String {
        if self.has_next {
            self.cursor.clone()
        } else {
            String::new()
        }
    }
}

/// Project the `Link` header into pagination state. No network access.
pub fn parse_link_header(headers: &HeaderMap) -> PageInfo {
    headers
        .get("link")
        .and_then(|v| v.to_str().ok())
        .map(parse_link_value)
        .unwrap_or_default()
}

fn parse_link_value(value: &str) -> PageInfo {
    for segment in value.split(',') {
        let mut url = "";
        let mut rel = None;
        let mut cursor = None;
        let mut results = None;

        for part in segment.split(';') {
            let part = part.trim();
            if part.starts_with('<') && part.ends_with('>') {
                url = &part[1..part.len() - 1];
            } else if let Some((key, raw)) = part.split_once('=') {
                let val = raw.trim().trim_matches('"');
                match key.trim() {
                    "rel" => rel = Some(val),
                    "cursor" => cursor = Some(val.to_string()),
                    "results" => results = Some(val),
                    _ => {}
                }
            }
        }

        if rel == Some("next") {
            return PageInfo {
                has_next: results == Some("true"),
                cursor: cursor
                    .or_else(|| cursor_from_url(url))
                    .unwrap_or_default()
            };
        }
    }

    PageInfo::end()
}

// Older deployments omit the cursor attribute and only embed it in the
// link target's query string. Only a whole `cursor` parameter counts;
// suffix matches like `before_cursor=` must not.
fn cursor_from_url(url: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("cursor="))
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEXT_WITH_RESULTS: &str = "<https://faultline.io/api/0/organizations/?cursor=0:100:0>; rel=\"next\"; results=\"true\"; cursor=\"0:100:0\"";
    const NEXT_WITHOUT_RESULTS: &str = "<https://faultline.io/api/0/organizations/?cursor=0:200:0>; rel=\"next\"; results=\"false\"; cursor=\"0:200:0\"";

    #[test]
    fn test_next_link_with_results_advances() {
        let page = parse_link_value(NEXT_WITH_RESULTS);
        assert!(page.has_next);
        assert_eq!(page.cursor, "0:100:0");
        assert_eq!(page.continuation(), "0:100:0");
    }

    #[test]
    fn test_next_link_without_results_is_last_page() {
        // A same-page echo link must not be read as more data.
        let page = parse_link_value(NEXT_WITHOUT_RESULTS);
        assert!(!page.has_next);
        assert_eq!(page.cursor, "0:200:0");
        assert_eq!(page.continuation(), "");
    }

    #[test]
    fn test_previous_and_next_links_combined() {
        let value = format!(
            "<https://faultline.io/api/0/organizations/?cursor=0:0:1>; rel=\"previous\"; results=\"false\"; cursor=\"0:0:1\", {}",
            NEXT_WITH_RESULTS
        );
        let page = parse_link_value(&value);
        assert!(page.has_next);
        assert_eq!(page.cursor, "0:100:0");
    }

    #[test]
    fn test_missing_header_means_done() {
        let headers = HeaderMap::new();
        assert_eq!(parse_link_header(&headers), PageInfo::end());
    }

    #[test]
    fn test_malformed_header_degrades_to_done() {
        let page = parse_link_value("not a link header at all");
        assert!(!page.has_next);
        assert!(page.cursor.is_empty());
    }

    #[test]
    fn test_cursor_recovered_from_link_target() {
        let value =
            "<https://faultline.io/api/0/organizations/?cursor=1:50:0&per_page=50>; rel=\"next\"; results=\"true\"";
        let page = parse_link_value(value);
        assert!(page.has_next);
        assert_eq!(page.cursor, "1:50:0");
    }

    #[test]
    fn test_cursor_from_url_matches_whole_parameter_only() {
        assert_eq!(
            cursor_from_url("https://x/?before_cursor=0:0:1&cursor=1:50:0"),
            Some("1:50:0".to_string())
        );
        assert_eq!(
            cursor_from_url("https://x/?per_page=50&cursor=1:50:0"),
            Some("1:50:0".to_string())
        );
        assert_eq!(cursor_from_url("https://x/?before_cursor=0:0:1"), None);
        assert_eq!(cursor_from_url("https://x/organizations/"), None);
    }
}
