//! Payment status reported by the checkout service.

use serde::{Deserialize, Serialize};

/// Application-level result of a completed payment request.
///
/// The service tags its response body with a `status` field:
///
/// ```json
/// { "status": "OK", "data": { "receipt": "..." } }
/// { "status": "ERROR", "error": { "code": "card_declined" } }
/// ```
///
/// Transport failures never produce a `PaymentStatus`; they surface as an
/// error from the submitter instead, which gives the tri-state outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum PaymentStatus {
    /// The charge went through.
    #[serde(rename = "OK")]
    Ok {
        /// Opaque success data.
        #[serde(default)]
        data: serde_json::Value,
    },
    /// The service rejected the charge.
    #[serde(rename = "ERROR")]
    Error {
        /// Opaque error detail.
        #[serde(default)]
        error: serde_json::Value,
    },
}

impl PaymentStatus {
    /// Returns true for [`PaymentStatus::Ok`].
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// The string tag used on the wire.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Ok { .. } => "OK",
            Self::Error { .. } => "ERROR",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
