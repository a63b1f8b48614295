//! HTTP client wrapper - talks to the backend gateway and decodes responses

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{LIST_FILES_ATTEMPTS, LIST_FILES_RETRY_DELAY, REQUEST_TIMEOUT};
use crate::models::{DbTable, ProjectEntry, TableDetails};

/// Errors surfaced by gateway calls
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Application-level error returned in the response body
    #[error("{0}")]
    Api(String),
    /// Transport-level failure (connect, timeout, TLS)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Error payload the backend wraps application failures in
#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Run `op` up to `attempts` times with a fixed delay between attempts.
///
/// Attempts are strictly sequential; the delay is not backed off. The last
/// error is returned once the attempt budget is spent.
pub async fn retry_fixed<T, E, F, Fut>(attempts: u32, delay: Duration, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                tracing::warn!(attempt, error = %err, "gateway attempt failed");
                if attempt >= attempts {
                    return Err(err);
                }
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// List project files and folders, retrying on failure.
///
/// This is the only retried call: the backend sidecar may still be starting
/// when the application comes up.
pub async fn list_files_with_retry(
    client: &reqwest::Client,
    base_url: &str,
    folder_path: &str,
) -> Result<Vec<ProjectEntry>, GatewayError> {
    retry_fixed(LIST_FILES_ATTEMPTS, LIST_FILES_RETRY_DELAY, |_attempt| {
        list_files(client, base_url, folder_path)
    })
    .await
}

/// Single attempt at the project listing
pub async fn list_files(
    client: &reqwest::Client,
    base_url: &str,
    folder_path: &str,
) -> Result<Vec<ProjectEntry>, GatewayError> {
    let response = client
        .get(format!("{}/api/list_files", base_url))
        .query(&[("folder_path", folder_path)])
        .send()
        .await?;
    decode(response).await
}

/// List table names of one database
pub async fn get_tables(
    client: &reqwest::Client,
    base_url: &str,
    db_path: &str,
) -> Result<Vec<String>, GatewayError> {
    let response = client
        .get(format!("{}/api/get_tables", base_url))
        .query(&[("db_path", db_path)])
        .send()
        .await?;
    decode(response).await
}

/// Fetch column/date metadata for a table selection
pub async fn get_table_details(
    client: &reqwest::Client,
    base_url: &str,
    selection: &[DbTable],
) -> Result<TableDetails, GatewayError> {
    let response = client
        .get(format!("{}/api/get_table_details", base_url))
        .query(&[("db_tables", db_tables_param(selection)?)])
        .send()
        .await?;
    decode(response).await
}

/// Best-effort shutdown notification; errors are ignored
pub async fn shutdown(client: &reqwest::Client, base_url: &str) {
    let _ = client
        .get(format!("{}/api/shutdown", base_url))
        .timeout(Duration::from_secs(2))
        .send()
        .await;
}

/// JSON-encode a selection for the `db_tables` query parameter
fn db_tables_param(selection: &[DbTable]) -> Result<String, GatewayError> {
    serde_json::to_string(selection).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Decode a gateway response, unwrapping `{"error": ...}` payloads.
///
/// The backend reports application failures as a 400 with an error body;
/// anything else that fails to parse is a decode error.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
    let status = response.status();
    let body = response.text().await?;

    if let Some(message) = api_error_message(&body) {
        return Err(GatewayError::Api(message));
    }
    if !status.is_success() {
        return Err(GatewayError::Decode(format!(
            "status {} with body {:?}",
            status, body
        )));
    }
    serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Extract the message of an `{"error": ...}` payload, if that is what
/// the body is
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiError>(body).ok().map(|e| e.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test(start_paused = true)]
    async fn retry_succeeds_on_final_attempt() {
        let calls = Cell::new(0u32);
        let result = retry_fixed(5, Duration::from_secs(2), |attempt| {
            calls.set(calls.get() + 1);
            let ok = attempt == 5;
            async move {
                if ok {
                    Ok(attempt)
                } else {
                    Err("connection refused".to_string())
                }
            }
        })
        .await;

        assert_eq!(result, Ok(5));
        assert_eq!(calls.get(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_stops_after_attempt_budget() {
        let calls = Cell::new(0u32);
        let result: Result<(), String> = retry_fixed(5, Duration::from_secs(2), |_attempt| {
            calls.set(calls.get() + 1);
            async { Err("connection refused".to_string()) }
        })
        .await;

        assert_eq!(result, Err("connection refused".to_string()));
        assert_eq!(calls.get(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_returns_immediately_on_success() {
        let calls = Cell::new(0u32);
        let result: Result<u32, String> = retry_fixed(5, Duration::from_secs(2), |_attempt| {
            calls.set(calls.get() + 1);
            async { Ok(7) }
        })
        .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn db_tables_param_matches_wire_shape() {
        let selection = vec![
            DbTable::new("hydro.db3", "Reach"),
            DbTable::new("hydro.db3", "Subbasin"),
        ];
        let param = db_tables_param(&selection).unwrap();
        assert_eq!(
            param,
            r#"[{"db":"hydro.db3","table":"Reach"},{"db":"hydro.db3","table":"Subbasin"}]"#
        );
    }

    #[test]
    fn error_payloads_are_recognized() {
        assert_eq!(
            api_error_message(r#"{"error": "Tables have different interval"}"#),
            Some("Tables have different interval".to_string())
        );
        assert_eq!(api_error_message(r#"["hydro.db3"]"#), None);
        assert_eq!(api_error_message("not json"), None);
    }
}
