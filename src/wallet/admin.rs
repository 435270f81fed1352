//! Self-administration call payloads
//!
//! Owner-set and threshold mutations have no independent entry point:
//! they travel as the payload of an `execute_transaction` call whose
//! destination is the wallet's own address, and therefore clear the same
//! signature threshold as any other operation.

use serde::{Deserialize, Serialize};

/// A privileged mutation routed through the wallet itself
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum AdminCall {
    /// Add an owner and set the threshold to `new_threshold`
    AddOwner { owner: String, new_threshold: u8 },
    /// Remove an owner and set the threshold to `new_threshold`
    RemoveOwner { owner: String, new_threshold: u8 },
    /// Set the threshold to `new_threshold`
    UpdateThreshold { new_threshold: u8 },
}

impl AdminCall {
    /// Encode as an opaque payload for `execute_transaction`
    pub fn encode(&self) -> Vec<u8> {
        // Serialization of this enum cannot fail
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Decode a payload addressed to the wallet itself
    pub fn decode(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}

/// Policy for threshold values set through self-administration.
///
/// The reference wallet never checks a new threshold against the owner
/// count, so raising it above the number of owners permanently locks the
/// wallet: no future bundle can ever gather enough signatures, including
/// a corrective one. `Enforced` closes that hole; `Unchecked` reproduces
/// the reference behavior for compatibility.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdPolicy {
    /// Reject thresholds of zero or above the owner count (default)
    #[default]
    Enforced,
    /// Accept any threshold, lockout included
    Unchecked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_call_round_trip() {
        let call = AdminCall::AddOwner {
            owner: "1NewOwner".to_string(),
            new_threshold: 2,
        };
        let decoded = AdminCall::decode(&call.encode()).unwrap();
        assert_eq!(decoded, call);
    }

    #[test]
    fn test_malformed_payload_rejected() {
        assert!(AdminCall::decode(b"\x00").is_err());
        assert!(AdminCall::decode(b"{\"call\":\"unknown\"}").is_err());
        assert!(AdminCall::decode(b"").is_err());
    }
}
