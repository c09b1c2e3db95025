//! Wire messages and the single dispatch boundary.
//!
//! Inbound: `{ "id": <any>, "type": "<operation>", "data": <payload> }`
//!
//! Outbound:
//! - `{ "id": <echoed>, "type": "result", "data": <result> }`
//! - `{ "id": <echoed>, "type": "error", "error": "<message>" }`
//!
//! Every inbound message yields exactly one reply carrying its `id`. Errors
//! never escape the boundary, panics included.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::{Command, Error, Executor, Result};

// ============================================================================
// Request
// ============================================================================

/// An inbound message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Correlation token, echoed verbatim in the reply
    #[serde(default)]
    pub id: Value,
    /// Operation name
    #[serde(rename = "type")]
    pub operation: String,
    /// Operation payload
    #[serde(default)]
    pub data: Value,
}

impl Request {
    /// Create a request
    pub fn new(id: impl Into<Value>, operation: impl Into<String>, data: Value) -> Self {
        Request {
            id: id.into(),
            operation: operation.into(),
            data,
        }
    }

    /// Encode a typed command as a request
    pub fn from_command(id: impl Into<Value>, cmd: &Command) -> Result<Self> {
        let mut encoded = serde_json::to_value(cmd)?;
        let data = encoded
            .get_mut("data")
            .map(Value::take)
            .unwrap_or(Value::Null);
        Ok(Request::new(id, cmd.name(), data))
    }
}

// ============================================================================
// Reply
// ============================================================================

/// An outbound message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Reply {
    /// Successful operation
    Result {
        /// Echoed correlation token
        id: Value,
        /// Operation result
        data: Value,
    },
    /// Failed operation
    Error {
        /// Echoed correlation token
        id: Value,
        /// Human-readable message
        error: String,
    },
}

impl Reply {
    /// Build an error reply
    pub fn error(id: Value, error: &Error) -> Self {
        Reply::Error {
            id,
            error: error.to_string(),
        }
    }

    /// Correlation token
    pub fn id(&self) -> &Value {
        match self {
            Reply::Result { id, .. } | Reply::Error { id, .. } => id,
        }
    }

    /// True for an error reply
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error { .. })
    }

    /// Result payload, if successful
    pub fn data(&self) -> Option<&Value> {
        match self {
            Reply::Result { data, .. } => Some(data),
            Reply::Error { .. } => None,
        }
    }

    /// Error message, if failed
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Reply::Error { error, .. } => Some(error),
            Reply::Result { .. } => None,
        }
    }

    /// Encode as JSON text
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            json!({
                "id": self.id(),
                "type": "error",
                "error": Error::from(e).to_string(),
            })
            .to_string()
        })
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Process one request against the executor
pub fn handle_message(executor: &mut Executor, request: Request) -> Reply {
    let Request {
        id,
        operation,
        data,
    } = request;

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<Value> {
        let cmd = Command::from_request(&operation, data)?;
        executor.execute(cmd)?.to_data()
    }));

    let result = outcome.unwrap_or_else(|payload| {
        let reason = panic_message(payload.as_ref());
        warn!(operation = %operation, %reason, "message handler panicked");
        Err(Error::Internal { reason })
    });

    match result {
        Ok(data) => Reply::Result { id, data },
        Err(e) => Reply::error(id, &e),
    }
}

/// Process one raw JSON message
///
/// Text that is not a JSON object with a string `type` gets an error reply;
/// its `id` is echoed when one can be recovered, otherwise `null`.
pub fn handle_raw(executor: &mut Executor, text: &str) -> Reply {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return Reply::error(Value::Null, &Error::from(e)),
    };
    let id = value.get("id").cloned().unwrap_or(Value::Null);
    match serde_json::from_value::<Request>(value) {
        Ok(request) => handle_message(executor, request),
        Err(e) => Reply::error(
            id,
            &Error::InvalidInput {
                reason: format!("malformed message: {}", e),
            },
        ),
    }
}

/// Process one raw JSON message and encode the reply
pub fn handle_json(executor: &mut Executor, text: &str) -> String {
    handle_raw(executor, text).to_json()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
