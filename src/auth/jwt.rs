use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::models::{Claims, TokenType};

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

fn issue(
    user_id: u64,
    email: String,
    role: u8,
    employee_id: u64,
    token_type: TokenType,
    secret: &str,
    ttl: usize,
) -> String {
    let claims = Claims {
        user_id,
        sub: email,
        role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type,
        employee_id,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn generate_access_token(
    user_id: u64,
    email: String,
    role: u8,
    employee_id: u64,
    secret: &str,
    ttl: usize,
) -> String {
    issue(user_id, email, role, employee_id, TokenType::Access, secret, ttl)
}

pub fn generate_refresh_token(
    user_id: u64,
    email: String,
    role: u8,
    employee_id: u64,
    secret: &str,
    ttl: usize,
) -> String {
    issue(user_id, email, role, employee_id, TokenType::Refresh, secret, ttl)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn access_token_round_trip() {
        let token = generate_access_token(7, "ana@company.com".into(), 1, 3, SECRET, 900);
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.sub, "ana@company.com");
        assert_eq!(claims.role, 1);
        assert_eq!(claims.employee_id, 3);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn refresh_token_carries_its_type() {
        let token = generate_refresh_token(7, "ana@company.com".into(), 2, 3, SECRET, 3600);
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.token_type, TokenType::Refresh);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token(7, "ana@company.com".into(), 1, 3, SECRET, 900);
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            user_id: 7,
            sub: "ana@company.com".into(),
            role: 1,
            exp: now() - 3600,
            jti: Uuid::new_v4().to_string(),
            token_type: TokenType::Access,
            employee_id: 3,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }
}
