// Error taxonomy shared by the config store, the API client and the CLI.
// Every variant is terminal for the current command: nothing is retried.
// Messages omit the underlying cause; print with `{:#}` to get the chain.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring, querying or rendering.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The config file does not exist or cannot be read.
    #[error("could not read config file '{}' (run `datashop configure` first)", path.display())]
    ConfigMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file exists but is not valid JSON for a `Config`.
    #[error("config file '{}' is malformed", path.display())]
    ConfigMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing or writing the config file failed.
    #[error("failed to save config file '{}'", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Connection, TLS or body-read failure talking to the service.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("{url} returned {status}: {body}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body could not be decoded.
    #[error("failed to parse response from {url}")]
    ResponseParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Missing or invalid arguments.
    #[error("{0}")]
    Usage(String),

    /// Reading interactive input failed.
    #[error("failed to read input")]
    Input(#[from] io::Error),
}
