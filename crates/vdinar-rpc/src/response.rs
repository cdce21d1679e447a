//! Response envelope parsing and batch re-correlation.
//!
//! Turns raw transport responses into results or typed errors. Batch
//! bodies are re-sorted by correlation id: the daemon is free to answer
//! a batch in any order, so response-array order is never trusted.

use serde_json::Value;

use crate::error::{Error, RpcError};
use crate::transport::RawResponse;

/// Substitute when the daemon sends an error envelope without a message.
const GENERIC_RPC_ERROR: &str = "An error occurred while processing the RPC call";
/// Substitute when the daemon sends an error envelope without a code.
const DEFAULT_ERROR_CODE: i64 = -32601;
/// `result` key missing entirely from the envelope (distinct from
/// `result: null`, which is a legitimate value).
const MISSING_RESULT: &str = "Missing `result` on the RPC call result";
const MISSING_RESULT_CODE: i64 = -32700;

/// Parse the response to a single call.
pub(crate) fn parse_single(response: &RawResponse) -> Result<Value, Error> {
    let body = decode_body(response)?;
    envelope_result(body).map_err(Error::Rpc)
}

/// Parse the response to a batch of `expected` requests.
///
/// Per-member daemon failures are carried as that position's `Err`
/// element and never reject siblings; the output order is the request
/// order regardless of how the daemon ordered the array. A single error
/// envelope in place of an array (total failure, e.g. a malformed
/// request) rejects the whole batch, as does a structural violation:
/// an id that maps to no request position, a duplicate, or a position
/// the daemon never answered.
pub(crate) fn parse_batch(
    response: &RawResponse,
    expected: usize,
) -> Result<Vec<Result<Value, RpcError>>, Error> {
    let body = decode_body(response)?;
    let elements = match body {
        Value::Array(elements) => elements,
        envelope @ Value::Object(_) => {
            return match envelope_result(envelope) {
                Ok(value) => Err(Error::InvalidResponse(format!(
                    "expected a batch response array, got a single result: {value}"
                ))),
                Err(err) => Err(Error::Rpc(err)),
            };
        }
        other => {
            return Err(Error::InvalidResponse(format!(
                "unexpected JSON-RPC batch body: {other}"
            )));
        }
    };

    let mut slots: Vec<Option<Result<Value, RpcError>>> = Vec::new();
    slots.resize_with(expected, || None);
    for element in elements {
        let index = correlation_index(&element, expected)?;
        if slots[index].is_some() {
            return Err(Error::InvalidResponse(format!(
                "duplicate batch response id {index}"
            )));
        }
        slots[index] = Some(envelope_result(element));
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| {
                Error::InvalidResponse(format!("missing batch response for request id {index}"))
            })
        })
        .collect()
}

/// Decode the body as JSON. Non-JSON bodies on failure statuses (the
/// daemon answers auth failures with an empty `401`, proxies with HTML)
/// become an [`RpcError`] carrying the HTTP status as its code.
fn decode_body(response: &RawResponse) -> Result<Value, Error> {
    match serde_json::from_str(&response.body) {
        Ok(value) => Ok(value),
        Err(err) => {
            if response.status >= 400 {
                Err(Error::Rpc(RpcError {
                    code: i64::from(response.status),
                    message: response.reason.clone(),
                }))
            } else {
                Err(Error::InvalidResponse(format!(
                    "decode JSON-RPC response: {err}"
                )))
            }
        }
    }
}

/// Apply the result/error contract to one envelope.
fn envelope_result(envelope: Value) -> Result<Value, RpcError> {
    let mut fields = match envelope {
        Value::Object(fields) => fields,
        other => {
            return Err(RpcError {
                code: MISSING_RESULT_CODE,
                message: format!("unexpected JSON-RPC envelope: {other}"),
            });
        }
    };

    if let Some(error) = fields.get("error") {
        if !error.is_null() {
            let code = error
                .get("code")
                .and_then(Value::as_i64)
                .unwrap_or(DEFAULT_ERROR_CODE);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| GENERIC_RPC_ERROR.to_owned());
            return Err(RpcError { code, message });
        }
    }

    match fields.remove("result") {
        Some(result) => Ok(result),
        None => Err(RpcError {
            code: MISSING_RESULT_CODE,
            message: MISSING_RESULT.to_owned(),
        }),
    }
}

/// Map a response element's id back to its request position. Ids arrive
/// as JSON numbers or numeric strings depending on daemon build.
fn correlation_index(element: &Value, expected: usize) -> Result<usize, Error> {
    let id = element
        .get("id")
        .ok_or_else(|| Error::InvalidResponse("batch response element without id".to_owned()))?;
    let position = match id {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::InvalidResponse(format!("invalid batch response id: {id}")))?;

    usize::try_from(position)
        .ok()
        .filter(|index| *index < expected)
        .ok_or_else(|| {
            Error::InvalidResponse(format!("batch response id {position} maps to no request"))
        })
}
