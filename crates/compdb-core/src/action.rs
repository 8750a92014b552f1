//! Decoding of `bazel aquery --output=proto` responses.
//!
//! Only the parts of `analysis_v2.ActionGraphContainer` that the database
//! needs are declared here. Every other field (artifacts, targets, dep sets,
//! configurations, ...) is skipped by prost as an unknown field.

use crate::error::Result;
use prost::Message;

/// The top-level `ActionGraphContainer` message.
#[derive(Clone, PartialEq, Message)]
pub struct ActionGraphContainer {
    #[prost(message, repeated, tag = "2")]
    pub actions: Vec<Action>,
}

/// A single action from the graph.
#[derive(Clone, PartialEq, Message)]
pub struct Action {
    #[prost(string, tag = "4")]
    pub mnemonic: String,
    #[prost(string, repeated, tag = "6")]
    pub arguments: Vec<String>,
}

impl Action {
    pub fn new(mnemonic: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            arguments,
        }
    }
}

/// Decode the raw stdout of an aquery into its actions, in encoded order.
pub fn decode(bytes: &[u8]) -> Result<Vec<Action>> {
    let container = ActionGraphContainer::decode(bytes)?;
    tracing::debug!(actions = container.actions.len(), "decoded action graph");
    Ok(container.actions)
}
