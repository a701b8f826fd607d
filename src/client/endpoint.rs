//! Endpoint URL construction.

/// Path of the portal API script, relative to the portal root.
pub const API_PATH: &str = "api/api.php";

/// `true` when `host` already names an `http` or `https` scheme.
fn has_scheme(host: &str) -> bool {
    let lower = host.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// What: Turn a portal host into the full API endpoint URL.
///
/// Inputs:
/// - `host`: Bare host (`portal.school.nz`), host with path, or full `http(s)://` URL.
/// - `use_https`: Scheme to prepend when `host` has none.
///
/// Output:
/// - URL ending in `/api/api.php` with exactly one slash before the API path.
///
/// Details:
/// - An existing scheme is kept as written, whatever `use_https` says.
/// - Surrounding whitespace and any run of trailing slashes are dropped first.
#[must_use]
pub fn endpoint_url(host: &str, use_https: bool) -> String {
    let host = host.trim().trim_end_matches('/');
    let mut url = if has_scheme(host) {
        host.to_string()
    } else {
        let scheme = if use_https { "https" } else { "http" };
        format!("{scheme}://{host}")
    };
    url.push('/');
    url.push_str(API_PATH);
    url
}
