// API client module: a small blocking HTTP client for the lookup service.
// One call per invocation; no retries and no client-side deadline.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::LookupError;

/// Production service, overridable through `DATASHOP_API_URL`.
pub const DEFAULT_BASE_URL: &str = "https://indiandata.shop";
pub const BASE_URL_ENV: &str = "DATASHOP_API_URL";

const SEARCH_PATH: &str = "/search.php";
const CREDITS_PATH: &str = "/credits.php";
const API_KEY_HEADER: &str = "API_KEY";

/// Blocking client holding the base URL and the configured API key.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// One person as returned by the search endpoint. Missing or null fields
/// decode as empty strings.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mobile: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub father_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub alt_mobile: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub circle: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id_number: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

/// Envelope of the search endpoint.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct LookupResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<PersonRecord>,
}

/// Envelope of the credits endpoint. The balance may arrive as a string or
/// a bare number.
#[derive(Deserialize, Debug)]
pub struct CreditResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub credits: String,
}

/// Parameters of a lookup. `kind` is forwarded as-is (email, mobile, aadhar).
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub kind: String,
    pub query: String,
    pub masked: bool,
}

impl SearchQuery {
    /// Form fields in the order the service expects them.
    pub fn form(&self) -> [(&'static str, String); 3] {
        [
            ("type", self.kind.clone()),
            ("query", self.query.clone()),
            ("masked", self.masked.to_string()),
        ]
    }
}

impl ApiClient {
    /// Create a client for `base_url`. Trailing slashes are dropped.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, LookupError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|source| LookupError::Transport {
                url: base_url.clone(),
                source,
            })?;
        Ok(ApiClient {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Create a client against `DATASHOP_API_URL`, falling back to the
    /// production service.
    pub fn from_env(api_key: &str) -> Result<Self, LookupError> {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url, api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the query as a url-encoded form and return the matching records.
    /// An empty list means the service found nothing; it is not an error.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<PersonRecord>, LookupError> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        debug!(%url, kind = %query.kind, masked = query.masked, "sending search request");
        let res = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .form(&query.form())
            .send()
            .map_err(|source| LookupError::Transport {
                url: url.clone(),
                source,
            })?;
        let body = read_body(&url, res)?;
        let resp = decode_lookup(&url, &body)?;
        debug!(status = %resp.status, records = resp.data.len(), "search response decoded");
        Ok(resp.data)
    }

    /// POST with no body to the credits endpoint and return the balance.
    pub fn credits(&self) -> Result<String, LookupError> {
        let url = format!("{}{}", self.base_url, CREDITS_PATH);
        debug!(%url, "sending credits request");
        let res = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .map_err(|source| LookupError::Transport {
                url: url.clone(),
                source,
            })?;
        let body = read_body(&url, res)?;
        let resp: CreditResponse =
            serde_json::from_str(&body).map_err(|source| LookupError::ResponseParse {
                url: url.clone(),
                source,
            })?;
        Ok(resp.credits)
    }
}

fn read_body(url: &str, res: Response) -> Result<String, LookupError> {
    let status = res.status();
    debug!(%url, %status, "response received");
    let body = res.text().map_err(|source| LookupError::Transport {
        url: url.to_string(),
        source,
    })?;
    if !status.is_success() {
        return Err(LookupError::HttpStatus {
            url: url.to_string(),
            status,
            body,
        });
    }
    Ok(body)
}

/// Decode a search response body.
pub fn decode_lookup(url: &str, body: &str) -> Result<LookupResponse, LookupError> {
    serde_json::from_str(body).map_err(|source| LookupError::ResponseParse {
        url: url.to_string(),
        source,
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected credits as string or number, got {other}"
        ))),
    }
}
