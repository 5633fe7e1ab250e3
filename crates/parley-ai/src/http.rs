//! HTTP plumbing shared by the provider clients.

use std::time::Duration;

use crate::ServiceError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Characters of an error body kept in the error message.
const ERROR_BODY_LIMIT: usize = 200;

pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, ServiceError> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(timeout)
        .build()
        .map_err(|e| ServiceError::Network(format!("failed to build HTTP client: {e}")))
}

/// Send a JSON body and decode a JSON reply, mapping HTTP failures onto
/// [`ServiceError`].
pub(crate) async fn post_json(
    request: reqwest::RequestBuilder,
    body: &serde_json::Value,
) -> Result<serde_json::Value, ServiceError> {
    let response = request
        .header("content-type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(map_send_error)?;

    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ServiceError::RateLimited);
    }
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let text = text.chars().take(ERROR_BODY_LIMIT).collect::<String>();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ServiceError::Auth(format!("HTTP {status}: {text}")));
        }
        return Err(ServiceError::Api(format!("HTTP {status}: {text}")));
    }

    response
        .json()
        .await
        .map_err(|e| ServiceError::Parse(e.to_string()))
}

fn map_send_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout
    } else {
        ServiceError::Network(err.to_string())
    }
}
