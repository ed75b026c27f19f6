//! The downstream response envelope.
//!
//! Every downstream JSON response conforms to
//! `{"status_code": int, "message": string, "data": T}`. A call succeeded
//! iff `status_code == 200`; any other value (including the 0 a defaulted
//! decode produces) is a failure carrying `message` as diagnostic text.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::RemoteCallError;

/// Wire contract for every downstream response body.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status_code: i32,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Decodes an envelope body and extracts its payload.
///
/// A non-200 envelope status is a [`RemoteCallError::Remote`]; a missing
/// payload on a successful envelope is a decode failure.
pub(crate) fn decode_data<T: DeserializeOwned>(
    service: &str,
    method: &str,
    path: &str,
    body: &[u8],
) -> Result<T, RemoteCallError> {
    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|e| RemoteCallError::decode(service, path, e))?;

    if !envelope.is_success() {
        return Err(RemoteCallError::remote(
            service,
            method,
            path,
            u16::try_from(envelope.status_code).unwrap_or(0),
            envelope.message,
        ));
    }

    envelope.data.ok_or_else(|| {
        let missing = serde::de::Error::custom("envelope data field is missing");
        RemoteCallError::decode(service, path, missing)
    })
}

/// Decodes an acknowledgement envelope, discarding its payload.
///
/// Mutation-only calls still surface every remote failure; they never
/// swallow a non-200 envelope silently.
pub(crate) fn decode_ack(
    service: &str,
    method: &str,
    path: &str,
    body: &[u8],
) -> Result<(), RemoteCallError> {
    let envelope: Envelope<serde_json::Value> =
        serde_json::from_slice(body).map_err(|e| RemoteCallError::decode(service, path, e))?;

    if !envelope.is_success() {
        return Err(RemoteCallError::remote(
            service,
            method,
            path,
            u16::try_from(envelope.status_code).unwrap_or(0),
            envelope.message,
        ));
    }

    Ok(())
}
