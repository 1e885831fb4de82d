//! Remote archive download.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use crate::error::DatafoldError;

/// Validate a user-supplied archive URL.
pub fn parse_archive_url(input: &str) -> Result<url::Url, DatafoldError> {
    let parsed = url::Url::parse(input).map_err(|source| DatafoldError::InvalidUrl {
        input: input.to_string(),
        message: format!("invalid URL: {source}"),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(DatafoldError::InvalidUrl {
            input: input.to_string(),
            message: format!("unsupported scheme '{other}' (expected http or https)"),
        }),
    }
}

/// Download `url` into `dest`, overwriting any existing file there.
///
/// Returns the number of bytes written. The parent directory of `dest` is
/// created if missing. Transport failures and non-success HTTP statuses both
/// surface as fetch errors; retry policy is left to the caller.
pub fn download(url: &str, dest: &Path, timeout_secs: u64) -> Result<u64, DatafoldError> {
    let parsed = parse_archive_url(url)?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(timeout_secs)))
        .build();
    let agent: ureq::Agent = config.into();

    let response = agent
        .get(parsed.as_str())
        .call()
        .map_err(|source| DatafoldError::Fetch {
            url: url.to_string(),
            message: source.to_string(),
        })?;

    let mut reader = response.into_body().into_reader();
    let mut file = fs::File::create(dest)?;
    let bytes = io::copy(&mut reader, &mut file).map_err(|source| DatafoldError::Fetch {
        url: url.to_string(),
        message: format!("failed writing '{}': {}", dest.display(), source),
    })?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(parse_archive_url("https://example.com/dataset.zip").is_ok());
        assert!(parse_archive_url("http://example.com/dataset.zip").is_ok());
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = parse_archive_url("ftp://example.com/dataset.zip").expect_err("should fail");
        match err {
            DatafoldError::InvalidUrl { message, .. } => {
                assert!(message.contains("unsupported scheme"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(parse_archive_url("not a url").is_err());
    }
}
