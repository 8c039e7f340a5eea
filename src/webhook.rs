//! Helpers for inbound webhook notifications.
//!
//! A notification is either `{"update": {...}}` or `{"inline_message": {...}}`.
//! The extractors below work on either shape, preferring the update. A missing
//! or empty field anywhere along a path means "not present", never an error.
//! Only [`read_json_body`] and [`parse_body`] can fail, and only when the body
//! is not JSON at all.

use log::warn;
use serde_json::{Number, Value};
use std::io::Read;

use crate::error::Error;

/// Which shape an inbound payload has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookKind {
    Update,
    InlineMessage,
    Unknown,
}

/// Read a whole request body and decode it as JSON
pub fn read_json_body<R: Read>(mut reader: R) -> Result<Value, Error> {
    let mut body = Vec::new();
    reader.read_to_end(&mut body).map_err(|e| {
        warn!("Failed to read webhook body: {}", e);
        Error::decode(format!("Failed to read request body: {}", e))
    })?;
    parse_body(&body)
}

/// Decode a raw request body as JSON
pub fn parse_body(body: &[u8]) -> Result<Value, Error> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected webhook body with invalid JSON: {}", e);
        Error::decode(format!("Invalid JSON: {}", e))
    })
}

/// Presence check with the usual loose semantics: `null`, `false`, `0` and
/// `""` count as absent, any object or array counts as present.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Follow `path` through nested objects, keeping only a truthy leaf
fn lookup<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(payload, |node, key| node.get(*key))
        .filter(|value| is_truthy(value))
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_to_string(n),
        other => other.to_string(),
    }
}

/// Whole floats print without a fractional part, so `1e3` reads `1000`
fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

/// Whether the payload carries an `update`
pub fn is_receive_update(payload: &Value) -> bool {
    lookup(payload, &["update"]).is_some()
}

/// Whether the payload carries an `inline_message`
pub fn is_receive_inline_message(payload: &Value) -> bool {
    lookup(payload, &["inline_message"]).is_some()
}

/// Classify a payload; an update wins when both keys are present
pub fn kind(payload: &Value) -> WebhookKind {
    if is_receive_update(payload) {
        WebhookKind::Update
    } else if is_receive_inline_message(payload) {
        WebhookKind::InlineMessage
    } else {
        WebhookKind::Unknown
    }
}

/// Chat id from `update.chat_id`, else `inline_message.chat_id`
pub fn chat_id_from_update(payload: &Value) -> Option<String> {
    lookup(payload, &["update", "chat_id"])
        .or_else(|| lookup(payload, &["inline_message", "chat_id"]))
        .map(coerce_to_string)
}

/// Text from `update.new_message.text`, else `inline_message.text`
pub fn message_text(payload: &Value) -> Option<String> {
    lookup(payload, &["update", "new_message", "text"])
        .or_else(|| lookup(payload, &["inline_message", "text"]))
        .map(coerce_to_string)
}

/// Id of the button that triggered the notification
///
/// The first present `aux_data` wins (update message, then inline message);
/// `button_id` is only read from that one.
pub fn button_id(payload: &Value) -> Option<String> {
    lookup(payload, &["update", "new_message", "aux_data"])
        .or_else(|| lookup(payload, &["inline_message", "aux_data"]))
        .and_then(|aux| lookup(aux, &["button_id"]))
        .map(coerce_to_string)
}
