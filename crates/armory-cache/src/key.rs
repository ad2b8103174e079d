//! Cache key derivation
//!
//! Keys combine the request URL with a canonical serialization of its query
//! parameters, so the same logical request always maps to the same entry no
//! matter which order the caller supplied the parameters in.

use url::Url;

use crate::{CacheError, Result};

/// Derive a deterministic cache key from a request URL and query parameters.
///
/// Parameters already embedded in the URL's query string are merged with
/// `params`, then all pairs are sorted by name (and by value for repeated
/// names) before serialization.
pub fn cache_key(url: &str, params: &[(&str, &str)]) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| CacheError::invalid_key(format!("{url}: {e}")))?;

    let mut pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    pairs.extend(
        params
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string())),
    );
    pairs.sort();

    let mut base = parsed;
    base.set_query(None);
    base.set_fragment(None);

    let mut key = base.to_string();
    for (i, (name, value)) in pairs.iter().enumerate() {
        key.push(if i == 0 { '?' } else { '&' });
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }

    Ok(key)
}
