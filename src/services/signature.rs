// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

//! Svix webhook signature verification.
//!
//! Clerk signs webhook deliveries with the Svix scheme: HMAC-SHA256 over
//! `{id}.{timestamp}.{body}` keyed with the base64-decoded secret, sent as
//! one or more space-delimited `v1,<base64>` entries in `svix-signature`.
//! Deliveries with a timestamp outside the skew window are rejected.

use crate::error::AppError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Allowed clock skew between the delivery timestamp and now, in seconds.
const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

/// Verifies Svix-signed webhook deliveries against a shared secret.
pub struct WebhookVerifier {
    key: Vec<u8>,
}

impl WebhookVerifier {
    /// Create a verifier from a `whsec_`-prefixed base64 secret.
    pub fn new(secret: &str) -> Result<Self, AppError> {
        let encoded = secret.strip_prefix("whsec_").unwrap_or(secret);
        let key = STANDARD
            .decode(encoded)
            .map_err(|_| AppError::InvalidSignature)?;
        Ok(Self { key })
    }

    /// Verify a delivery's signature and timestamp.
    pub fn verify(
        &self,
        body: &str,
        msg_id: &str,
        timestamp: &str,
        signature_header: &str,
    ) -> Result<(), AppError> {
        self.verify_at(
            body,
            msg_id,
            timestamp,
            signature_header,
            chrono::Utc::now().timestamp(),
        )
    }

    /// Verify against an explicit "now" (separated out for tests).
    fn verify_at(
        &self,
        body: &str,
        msg_id: &str,
        timestamp: &str,
        signature_header: &str,
        now: i64,
    ) -> Result<(), AppError> {
        let ts: i64 = timestamp
            .parse()
            .map_err(|_| AppError::InvalidSignature)?;

        if (now - ts).abs() > TIMESTAMP_TOLERANCE_SECS {
            tracing::warn!(timestamp = ts, "Webhook timestamp outside tolerance window");
            return Err(AppError::InvalidSignature);
        }

        let expected = self.sign(msg_id, timestamp, body)?;

        // The header may carry several versioned signatures (e.g. after a
        // secret rotation); any matching v1 entry passes.
        for entry in signature_header.split(' ') {
            let Some(encoded) = entry.strip_prefix("v1,") else {
                continue;
            };
            let Ok(candidate) = STANDARD.decode(encoded) else {
                continue;
            };
            if bool::from(candidate.as_slice().ct_eq(expected.as_slice())) {
                return Ok(());
            }
        }

        Err(AppError::InvalidSignature)
    }

    /// Compute the HMAC over the delivery's signed content.
    fn sign(&self, msg_id: &str, timestamp: &str, body: &str) -> Result<Vec<u8>, AppError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
        mac.update(format!("{}.{}.{}", msg_id, timestamp, body).as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Produce a `v1,...` signature entry for a delivery. Used by tests to
    /// construct signed payloads the way the provider would.
    pub fn sign_entry(
        &self,
        msg_id: &str,
        timestamp: &str,
        body: &str,
    ) -> Result<String, AppError> {
        Ok(format!(
            "v1,{}",
            STANDARD.encode(self.sign(msg_id, timestamp, body)?)
        ))
    }
}
