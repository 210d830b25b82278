//! JWT claim reads
//!
//! Decodes token payloads without signature verification - the backend
//! is the security boundary, these reads only drive client-side UX.
//! Every query re-decodes the token string; claims are never cached, so a
//! refreshed token takes effect on the next read.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use serde::{Deserialize, Serialize};
use shared::models::RoleId;
use shared::util::now_secs;

/// Claims the backend embeds in access tokens
///
/// Identity claims use the WS-* schema URIs the backend emits. Unknown
/// extra claims are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject)
    #[serde(
        rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,

    /// Account email
    #[serde(
        rename = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,

    /// Restaurant the user is scoped to
    #[serde(
        rename = "RestaurantId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub restaurant_id: Option<String>,

    /// Role ID, string-encoded integer
    #[serde(
        rename = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<String>,

    /// Expiration timestamp (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// Decode a token's payload segment into [`Claims`]
///
/// Returns `None` on any structural failure: wrong segment count, bad
/// base64url, non-JSON payload. Never panics on hostile input.
pub fn decode(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (_header, payload) = (segments.next()?, segments.next()?);
    let _signature = segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    let bytes = base64_url_decode(payload)?;
    serde_json::from_slice(&bytes).ok()
}

/// Base64url decode with padding restoration
///
/// A post-padding remainder of exactly 1 cannot come from valid base64 -
/// no amount of padding repairs it.
fn base64_url_decode(segment: &str) -> Option<Vec<u8>> {
    let mut padded = segment.to_string();
    match padded.len() % 4 {
        0 => {}
        1 => return None,
        rem => padded.extend(std::iter::repeat_n('=', 4 - rem)),
    }
    URL_SAFE.decode(padded).ok()
}

/// Whether the token is expired, judged against the wall clock
///
/// Absent, sentinel-valued and undecodable tokens all count as expired,
/// as does a missing `exp` claim.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, now_secs())
}

/// Expiry check against an explicit clock reading (seconds since epoch)
///
/// `exp == now` counts as expired.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    if token.is_empty() || token == "undefined" || token == "null" {
        return true;
    }

    match decode(token).and_then(|claims| claims.exp) {
        Some(exp) => exp <= now,
        None => true,
    }
}

/// Role claim, validated against the known role set
pub fn role_of(token: &str) -> Option<RoleId> {
    let claims = decode(token)?;
    let role_id = claims.role?.parse::<i64>().ok()?;
    RoleId::from_id(role_id)
}

/// User ID claim
pub fn user_id_of(token: &str) -> Option<String> {
    decode(token)?.user_id
}

/// Restaurant ID claim
pub fn restaurant_id_of(token: &str) -> Option<String> {
    decode(token)?.restaurant_id
}

/// Email claim
pub fn email_of(token: &str) -> Option<String> {
    decode(token)?.email
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{claims_for, unsigned_token};

    #[test]
    fn decode_reproduces_claims_exactly() {
        let claims = claims_for(RoleId::Manager, now_secs() + 3600);
        let token = unsigned_token(&claims);

        let decoded = decode(&token).expect("decode");
        assert_eq!(decoded, claims);
        // Idempotent - decoding again yields an equal result
        assert_eq!(decode(&token), Some(decoded));
    }

    #[test]
    fn wrong_segment_count_is_absent() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("onlyone"), None);
        assert_eq!(decode("two.segments"), None);
        assert_eq!(decode("a.b.c.d"), None);
    }

    #[test]
    fn bad_payload_is_absent() {
        // '!' is outside the base64url alphabet
        assert_eq!(decode("h.!!!!.s"), None);
        // Valid base64url but not JSON
        let not_json = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(b"hello");
        assert_eq!(decode(&format!("h.{}.s", not_json)), None);
    }

    #[test]
    fn payload_length_remainder_one_is_unrecoverable() {
        // 5 chars: remainder 1 after padding, malformed by construction
        assert_eq!(base64_url_decode("eyJhb"), None);
        assert_eq!(decode("h.eyJhb.s"), None);
    }

    #[test]
    fn padded_and_unpadded_payloads_both_decode() {
        // 10 bytes: base64 needs "==" padding, so the encodings differ
        let json = br#"{"exp":12}"#;
        let unpadded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json);
        let padded = URL_SAFE.encode(json);
        assert_ne!(unpadded, padded);

        for payload in [unpadded, padded] {
            let claims = decode(&format!("h.{}.s", payload)).expect("decode");
            assert_eq!(claims.exp, Some(12));
        }
    }

    #[test]
    fn unknown_claims_are_tolerated() {
        let json = br#"{"exp":99,"custom_claim":{"nested":true},"jti":"abc"}"#;
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json);
        let claims = decode(&format!("h.{}.s", payload)).expect("decode");
        assert_eq!(claims.exp, Some(99));
        assert_eq!(claims.role, None);
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let now = now_secs();
        let expired = unsigned_token(&claims_for(RoleId::Admin, now - 1));
        let fresh = unsigned_token(&claims_for(RoleId::Admin, now + 1));
        let boundary = unsigned_token(&claims_for(RoleId::Admin, now));

        assert!(is_expired_at(&expired, now));
        assert!(!is_expired_at(&fresh, now));
        // exp == now counts as expired
        assert!(is_expired_at(&boundary, now));
    }

    #[test]
    fn absent_and_sentinel_tokens_are_expired() {
        assert!(is_expired(""));
        assert!(is_expired("undefined"));
        assert!(is_expired("null"));
        assert!(is_expired("not.a.token"));
    }

    #[test]
    fn missing_exp_fails_closed() {
        let mut claims = claims_for(RoleId::Admin, 0);
        claims.exp = None;
        let token = unsigned_token(&claims);
        assert!(is_expired_at(&token, 0));
    }

    #[test]
    fn role_extraction_validates_membership() {
        let now = now_secs() + 3600;
        let token = unsigned_token(&claims_for(RoleId::Chef, now));
        assert_eq!(role_of(&token), Some(RoleId::Chef));

        let mut unknown = claims_for(RoleId::Chef, now);
        unknown.role = Some("42".to_string());
        assert_eq!(role_of(&unsigned_token(&unknown)), None);

        let mut garbage = claims_for(RoleId::Chef, now);
        garbage.role = Some("not-a-number".to_string());
        assert_eq!(role_of(&unsigned_token(&garbage)), None);

        let mut missing = claims_for(RoleId::Chef, now);
        missing.role = None;
        assert_eq!(role_of(&unsigned_token(&missing)), None);
    }

    #[test]
    fn identity_claims_extract_directly() {
        let claims = claims_for(RoleId::Employee, now_secs() + 60);
        let token = unsigned_token(&claims);

        assert_eq!(user_id_of(&token), claims.user_id);
        assert_eq!(restaurant_id_of(&token), claims.restaurant_id);
        assert_eq!(email_of(&token), claims.email);
        assert_eq!(user_id_of("garbage"), None);
    }
}
