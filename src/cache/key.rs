//! Request fingerprints used as cache and dedup keys

/// Query parameters that change on every request and must not affect the key.
const VOLATILE_PARAMS: [&str; 2] = ["ts", "hash"];

/// Build the canonical fingerprint for a logical request.
///
/// The fingerprint is `path?k1=v1&k2=v2` with keys sorted, so parameter order
/// does not matter. Auth fields that vary per request are dropped.
pub fn fingerprint(path: &str, params: &[(&str, &str)]) -> String {
    let mut sorted: Vec<_> = params
        .iter()
        .filter(|(k, _)| !VOLATILE_PARAMS.contains(k))
        .collect();
    sorted.sort_by_key(|(k, _)| *k);

    let query = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", path, query)
}
