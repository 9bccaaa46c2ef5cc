use base64::Engine as _;
use chrono::{DateTime, TimeDelta, Utc};

use crate::error::AuthError;

/// Tokens expiring within this many seconds are treated as expired.
pub const EXPIRY_BUFFER_SECS: i64 = 30;

/// Decode the JWT `exp` claim without verifying the signature.
///
/// The backend verifies tokens; this is only used to avoid sending one that
/// is known to be stale.
///
/// # Errors
///
/// Returns `AuthError::Other` if the JWT format is invalid or the `exp` claim
/// is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Other("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Other("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0).ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))
}

/// Whether `expires_at` falls within `buffer_secs` from now.
#[must_use]
pub fn is_near_expiry(expires_at: DateTime<Utc>, buffer_secs: i64) -> bool {
    expires_at <= Utc::now() + TimeDelta::seconds(buffer_secs)
}

#[cfg(test)]
pub(crate) fn make_jwt_with_exp(exp: i64) -> String {
    let header = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .encode(format!(r#"{{"sub":"42","exp":{exp}}}"#));
    let signature = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode("fake_sig");
    format!("{header}.{payload}.{signature}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_exp_claim() {
        let exp = Utc::now().timestamp() + 3600;
        let decoded = decode_expiry(&make_jwt_with_exp(exp)).unwrap();
        assert_eq!(decoded.timestamp(), exp);
        assert!(!is_near_expiry(decoded, EXPIRY_BUFFER_SECS));
    }

    #[test]
    fn past_and_buffered_expiry_are_near() {
        let past = DateTime::from_timestamp(Utc::now().timestamp() - 10, 0).unwrap();
        assert!(is_near_expiry(past, 0));
        let soon = Utc::now() + TimeDelta::seconds(10);
        assert!(is_near_expiry(soon, EXPIRY_BUFFER_SECS));
    }

    #[test]
    fn rejects_non_jwt() {
        let err = decode_expiry("opaque-token").unwrap_err();
        assert!(err.to_string().contains("invalid JWT format"));
    }

    #[test]
    fn rejects_missing_exp() {
        let header = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode("{}");
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(r#"{"sub":"1"}"#);
        let err = decode_expiry(&format!("{header}.{payload}.sig")).unwrap_err();
        assert!(err.to_string().contains("missing exp claim"));
    }
}
