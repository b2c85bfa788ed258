//! Checks applied to user input before anything is stored.

use crate::{PLATFORM_NAME_MAX_LENGTH, TITLE_MAX_LENGTH};
use async_trait::async_trait;
use kurator_error::{KuratorResult, ValidationError, ValidationErrorKind};
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, instrument, warn};

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Scheme followed by a dotted host; letters include non-Latin scripts.
    Regex::new(r"^https?://[\p{L}\d-]+(\.[\p{L}\d-]+)+").expect("URL pattern is valid")
});

/// Whether `url` looks like an http(s) URL with a dotted host.
///
/// # Examples
///
/// ```
/// use kurator_core::is_url;
///
/// assert!(is_url("https://mangalib.me/title"));
/// assert!(!is_url("mangalib"));
/// ```
pub fn is_url(url: &str) -> bool {
    URL_PATTERN.is_match(url.trim())
}

/// Trimmed URL, or an invalid-URL error.
pub fn validate_url(url: &str) -> KuratorResult<String> {
    let url = url.trim();
    if !is_url(url) {
        Err(ValidationError::new(ValidationErrorKind::InvalidUrl(
            url.to_string(),
        )))?
    }
    Ok(url.to_string())
}

fn validate_text(value: &str, field: &'static str, max: usize) -> KuratorResult<String> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::new(ValidationErrorKind::EmptyField(field)))?
    }
    if value.chars().count() > max {
        Err(ValidationError::new(ValidationErrorKind::TooLong { field, max }))?
    }
    Ok(value.to_string())
}

/// Trimmed project title of 1 to 255 characters.
pub fn validate_title(title: &str) -> KuratorResult<String> {
    validate_text(title, "title", TITLE_MAX_LENGTH)
}

/// Trimmed platform name that fits a select option label.
pub fn validate_platform_name(name: &str) -> KuratorResult<String> {
    validate_text(name, "name", PLATFORM_NAME_MAX_LENGTH)
}

/// Decides whether a URL serves an image.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    /// Whether fetching `url` yields an image.
    async fn is_image(&self, url: &str) -> bool;
}

/// Probes URLs over HTTP.
///
/// A URL is an image when the request succeeds with an `image/*` content type.
#[derive(Debug, Clone)]
pub struct HttpImageProbe {
    client: reqwest::Client,
}

/// Timeout of one probe request.
pub const IMAGE_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

impl HttpImageProbe {
    /// Probe with its own HTTP client.
    pub fn new() -> KuratorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(IMAGE_PROBE_TIMEOUT)
            .build()
            .map_err(|e| kurator_error::GatewayError::new(format!("HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    #[instrument(skip(self))]
    async fn is_image(&self, url: &str) -> bool {
        if !is_url(url) {
            return false;
        }
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => {
                let is_image = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .is_some_and(|value| value.starts_with("image/"));
                debug!(status = %response.status(), is_image, "Probed poster URL");
                is_image
            }
            Ok(response) => {
                debug!(status = %response.status(), "Poster URL not reachable");
                false
            }
            Err(e) => {
                warn!(error = %e, "Poster probe failed");
                false
            }
        }
    }
}

/// Require `url` to be an image according to `probe`.
pub async fn validate_image_url(probe: &dyn ImageProbe, url: &str) -> KuratorResult<String> {
    let url = validate_url(url).map_err(|_| {
        ValidationError::new(ValidationErrorKind::NotAnImage(url.trim().to_string()))
    })?;
    if !probe.is_image(&url).await {
        Err(ValidationError::new(ValidationErrorKind::NotAnImage(url.clone())))?
    }
    Ok(url)
}
