use crate::{UrlError, UrlResult};
use url::Url;

/// Derives the host key used for per-host admission control
///
/// The host is the lowercase host portion of the address. The port is not
/// part of the key, so `example.com:8080` and `example.com` share one gate.
///
/// # Arguments
///
/// * `address` - An absolute HTTP(S) URL
///
/// # Returns
///
/// * `Ok(String)` - The lowercase host
/// * `Err(UrlError)` - The address cannot be parsed, uses another scheme, or has no host
///
/// # Examples
///
/// ```
/// use strata::url::host_of;
///
/// assert_eq!(host_of("https://EXAMPLE.COM/path").unwrap(), "example.com");
/// assert!(host_of("not a url").is_err());
/// ```
pub fn host_of(address: &str) -> UrlResult<String> {
    let url = Url::parse(address).map_err(|e| UrlError::Parse(format!("{}: {}", address, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
        .ok_or_else(|| UrlError::MissingHost(address.to_string()))
}
