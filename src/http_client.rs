//! Shared HTTP agent for remote tooltip images.

use std::io::{self, Read};
use std::sync::OnceLock;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from fetching a remote resource.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        source: Box<ureq::Error>,
    },
    #[error("Failed to read response from {url}: {source}")]
    Body { url: String, source: io::Error },
}

/// Return the process-wide agent with consistent timeouts.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .build()
    })
}

/// GET `url` into memory, refusing bodies larger than `max_bytes`.
pub(crate) fn fetch_bytes(url: &str, max_bytes: usize) -> Result<Vec<u8>, FetchError> {
    let response = agent().get(url).call().map_err(|source| FetchError::Request {
        url: url.to_string(),
        source: Box::new(source),
    })?;
    read_response_bytes(response, max_bytes).map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })
}

/// Read a response into memory, enforcing a maximum byte size.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    if let Some(length) = response
        .header("Content-Length")
        .and_then(|value| value.parse::<u64>().ok())
        && length > max_bytes as u64
    {
        return Err(too_large(format!("Response too large: {length} bytes")));
    }
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(max_bytes as u64 + 1)
        .read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(too_large(format!("Response exceeded {max_bytes} bytes")));
    }
    Ok(bytes)
}

fn too_large(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}
