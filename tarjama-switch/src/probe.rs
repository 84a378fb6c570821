//! Existence checks against the deployed site.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Invalid site URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Refusing to probe another origin: {0}")]
    CrossOrigin(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Probe timed out after {0:?}")]
    Timeout(Duration),
}

/// Checks whether a site-relative path exists.
///
/// Callers treat any error exactly like `Ok(false)`.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn exists(&self, path: &str) -> Result<bool, ProbeError>;
}

/// Probe issuing bodiless `HEAD` requests against one origin
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    origin: Url,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(site_url: &str, timeout: Duration) -> Result<Self, ProbeError> {
        let origin = Url::parse(site_url)?;
        let client = reqwest::Client::builder()
            .redirect(same_origin_redirects(&origin))
            .build()?;
        Ok(Self {
            client,
            origin,
            timeout,
        })
    }

    /// Absolute URL for a candidate, rejected if it leaves the site's origin
    pub fn candidate_url(&self, path: &str) -> Result<Url, ProbeError> {
        let url = self.origin.join(path)?;
        if url.origin() != self.origin.origin() {
            return Err(ProbeError::CrossOrigin(url.to_string()));
        }
        Ok(url)
    }
}

/// Follow redirects only while they stay on `origin`.
///
/// A hop to another origin is not taken; the 3xx response itself is
/// returned and reads as "does not exist".
fn same_origin_redirects(origin: &Url) -> Policy {
    let origin = origin.origin();
    Policy::custom(move |attempt| {
        if attempt.url().origin() != origin {
            tracing::debug!("Not following redirect off-site to {}", attempt.url());
            attempt.stop()
        } else if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else {
            attempt.follow()
        }
    })
}

const MAX_REDIRECTS: usize = 10;

#[async_trait]
impl Probe for HttpProbe {
    async fn exists(&self, path: &str) -> Result<bool, ProbeError> {
        let url = self.candidate_url(path)?;
        tracing::debug!("HEAD {}", url);

        let response = tokio::time::timeout(self.timeout, self.client.head(url).send())
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))??;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_url_joins_origin() {
        let probe = HttpProbe::new("https://example.com/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            probe.candidate_url("/ar/hello/").unwrap().as_str(),
            "https://example.com/ar/hello/"
        );
    }

    #[test]
    fn test_candidate_url_rejects_other_origins() {
        let probe = HttpProbe::new("https://example.com/", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            probe.candidate_url("//evil.example/ar/"),
            Err(ProbeError::CrossOrigin(_))
        ));
        assert!(matches!(
            probe.candidate_url("https://evil.example/"),
            Err(ProbeError::CrossOrigin(_))
        ));
    }

    #[test]
    fn test_invalid_site_url() {
        assert!(matches!(
            HttpProbe::new("not a url", Duration::from_secs(1)),
            Err(ProbeError::InvalidUrl(_))
        ));
    }
}
