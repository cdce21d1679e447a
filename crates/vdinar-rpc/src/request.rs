//! Request envelope construction.
//!
//! Pure shaping only: version-support gating happens in the client
//! facade before anything here runs, so the builder never has to refuse
//! a method.

use serde::Serialize;
use serde_json::Value;

/// One JSON-RPC request envelope as sent on the wire.
///
/// `id` is the correlation identity: a per-client counter value for a
/// single call, the zero-based batch position for a batch member.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    pub method: String,
    pub params: Value,
    pub id: u64,
}

/// One member of a batch call. Batch parameters are always encoded
/// positionally.
#[derive(Debug, Clone)]
pub struct BatchCall {
    pub method: String,
    pub params: Vec<Value>,
}

impl BatchCall {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// Build the envelope for a single call.
///
/// When the daemon accepts named parameters and exactly one plain
/// mapping was supplied, it is passed through unchanged as the `params`
/// object; in every other case parameters are sent as the positional
/// list. Parameter names are never validated here; the daemon owns the
/// per-method schema and the builder only decides the encoding shape.
pub(crate) fn build_single(
    method: &str,
    params: Vec<Value>,
    named_params: bool,
    id: u64,
) -> RequestEnvelope {
    RequestEnvelope {
        method: method.to_ascii_lowercase(),
        params: shape_params(params, named_params),
        id,
    }
}

/// Build the ordered envelope list for a batch. Each member's id is its
/// zero-based position in the input; the response parser relies on that
/// identity to restore request order.
pub(crate) fn build_batch(calls: Vec<BatchCall>) -> Vec<RequestEnvelope> {
    calls
        .into_iter()
        .enumerate()
        .map(|(index, call)| RequestEnvelope {
            method: call.method.to_ascii_lowercase(),
            params: Value::Array(call.params),
            id: index as u64,
        })
        .collect()
}

fn shape_params(mut params: Vec<Value>, named_params: bool) -> Value {
    if named_params && params.len() == 1 && params[0].is_object() {
        return params.remove(0);
    }
    Value::Array(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_mapping_passes_through_named() {
        let envelope = build_single(
            "getbalance",
            vec![json!({ "minconf": 6 })],
            true,
            7,
        );
        assert_eq!(envelope.params, json!({ "minconf": 6 }));
        assert_eq!(envelope.id, 7);
    }

    #[test]
    fn named_params_disabled_stays_positional() {
        let envelope = build_single("getbalance", vec![json!({ "minconf": 6 })], false, 1);
        assert_eq!(envelope.params, json!([{ "minconf": 6 }]));
    }

    #[test]
    fn multiple_or_non_mapping_arguments_stay_positional() {
        let two = build_single("getblock", vec![json!({ "a": 1 }), json!(true)], true, 1);
        assert_eq!(two.params, json!([{ "a": 1 }, true]));

        let scalar = build_single("getblockhash", vec![json!(170)], true, 2);
        assert_eq!(scalar.params, json!([170]));

        let array = build_single("sendmany", vec![json!(["x", "y"])], true, 3);
        assert_eq!(array.params, json!([["x", "y"]]));
    }

    #[test]
    fn method_name_is_lower_cased() {
        let envelope = build_single("getBestBlockHash", Vec::new(), false, 1);
        assert_eq!(envelope.method, "getbestblockhash");
        assert_eq!(envelope.params, json!([]));
    }

    #[test]
    fn batch_ids_follow_input_positions() {
        let envelopes = build_batch(vec![
            BatchCall::new("getBalance", Vec::new()),
            BatchCall::new("getblockhash", vec![json!(170)]),
        ]);
        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0].method, "getbalance");
        assert_eq!(envelopes[0].id, 0);
        assert_eq!(envelopes[1].id, 1);
        assert_eq!(envelopes[1].params, json!([170]));
    }

    #[test]
    fn envelope_serializes_without_version_field() {
        let envelope = build_single("getinfo", Vec::new(), false, 3);
        let wire = serde_json::to_value(&envelope).expect("envelope must serialize");
        assert_eq!(wire, json!({ "method": "getinfo", "params": [], "id": 3 }));
    }
}
