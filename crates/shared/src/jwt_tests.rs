//! Unit tests for JWT claims.

use crate::auth::Claims;
use chrono::{Duration, Utc};
use uuid::Uuid;

#[test]
fn test_claims_new_sets_correct_fields() {
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(user_id, expires_at);

    assert_eq!(claims.sub, user_id);
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_claims_user_id_returns_sub() {
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(user_id, expires_at);

    assert_eq!(claims.user_id(), user_id);
}

#[test]
fn test_claims_iat_is_current_time() {
    let user_id = Uuid::new_v4();
    let before = Utc::now().timestamp();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(user_id, expires_at);

    let after = Utc::now().timestamp();
    assert!(claims.iat >= before);
    assert!(claims.iat <= after);
}
