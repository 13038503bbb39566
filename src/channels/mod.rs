//! HTTP delivery channels.
//!
//! Each channel is constructed from its configuration section, optionally
//! tweaked per call, and performs exactly one POST per `send`.

pub mod ifttt;
pub mod ntfy;

pub use ifttt::IftttChannel;
pub use ntfy::NtfyChannel;

use crate::core::{ChannelError, Outcome, StatusInfo};
use reqwest::Url;
use tracing::{debug, warn};

/// Appends percent-encoded path segments to a base URL.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, ChannelError> {
    let mut url = Url::parse(base_url).map_err(|e| {
        ChannelError::NetworkError(format!("invalid base url {}: {}", base_url, e))
    })?;
    url.path_segments_mut()
        .map_err(|_| ChannelError::NetworkError(format!("{} cannot be a base url", base_url)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Classifies a finished request: only a 2xx status counts as delivered.
pub(crate) fn classify(
    channel: &str,
    result: Result<reqwest::Response, reqwest::Error>,
) -> Outcome {
    match result {
        Ok(res) if res.status().is_success() => {
            debug!(channel, status = %res.status(), "Service accepted notification");
            Ok(StatusInfo {
                status: res.status().as_u16(),
            })
        }
        Ok(res) => {
            warn!(channel, status = %res.status(), "Service rejected notification");
            Err(ChannelError::HttpError(res.status().as_u16()))
        }
        Err(e) if e.is_timeout() => {
            warn!(channel, error = %e, "HTTP request timed out");
            Err(ChannelError::Timeout)
        }
        Err(e) => {
            warn!(channel, error = %e, "HTTP request failed");
            Err(ChannelError::NetworkError(e.to_string()))
        }
    }
}
