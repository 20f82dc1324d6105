use axum::http::{HeaderMap, Uri};
use url::Url;

use crate::storage::Page;

const LIMIT_PARAM: &str = "limit";
const OFFSET_PARAM: &str = "offset";

/// Limit/offset pagination settings. Without a default limit, requests that
/// carry no valid `limit` are answered unpaginated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_limit: Option<u64>,
    pub max_limit: Option<u64>,
}

impl PaginationConfig {
    pub fn resolve(&self, limit: Option<&str>, offset: Option<&str>) -> Option<Page> {
        let limit = limit
            .and_then(|raw| positive_int(raw, true, self.max_limit))
            .or(self.default_limit)?;
        let offset = offset
            .and_then(|raw| positive_int(raw, false, None))
            .unwrap_or(0);
        Some(Page { limit, offset })
    }
}

fn positive_int(raw: &str, strict: bool, cutoff: Option<u64>) -> Option<u64> {
    let value: u64 = raw.trim().parse().ok()?;
    if strict && value == 0 {
        return None;
    }
    Some(match cutoff {
        Some(cutoff) => value.min(cutoff),
        None => value,
    })
}

/// Absolute URL of the current request, rebuilt from the `Host` header.
pub fn request_url(headers: &HeaderMap, uri: &Uri) -> Option<Url> {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    Url::parse(&format!("http://{host}{path_and_query}")).ok()
}

pub fn next_link(url: &Url, page: Page, count: u64) -> Option<String> {
    if page.offset.saturating_add(page.limit) >= count {
        return None;
    }
    let url = replace_query_param(url, LIMIT_PARAM, Some(page.limit));
    let url = replace_query_param(&url, OFFSET_PARAM, Some(page.offset + page.limit));
    Some(url.to_string())
}

pub fn previous_link(url: &Url, page: Page) -> Option<String> {
    if page.offset == 0 {
        return None;
    }
    let url = replace_query_param(url, LIMIT_PARAM, Some(page.limit));
    if page.offset <= page.limit {
        return Some(replace_query_param(&url, OFFSET_PARAM, None).to_string());
    }
    Some(replace_query_param(&url, OFFSET_PARAM, Some(page.offset - page.limit)).to_string())
}

/// Query keys come out sorted, so links are stable whatever order the client
/// sent them in.
fn replace_query_param(url: &Url, key: &str, value: Option<u64>) -> Url {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = url.clone();
    if pairs.is_empty() {
        out.set_query(None);
    } else {
        out.query_pairs_mut().clear().extend_pairs(pairs);
    }
    out
}
