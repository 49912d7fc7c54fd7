use application::auth::{TokenVerifier, UserClaims};
use application::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

pub trait AuthConfig: Send + Sync {
    fn jwt_secret(&self) -> &str;
}

/// 托管认证方签发的 token 的原始声明格式，sub 是十进制用户 id
#[derive(Debug, Serialize, Deserialize)]
struct RawClaims {
    sub: String,
    username: String,
    exp: i64,
}

/// 只做验证：签名、过期时间，以及 sub 必须能解析为用户 id。
/// 签发、刷新等都在托管认证方那边。
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<UserClaims, AppError> {
        let data = decode::<RawClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::AuthError(format!("token 验证失败: {}", e)))?;
        let user_id: i64 = data
            .claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError(format!("非法的 sub: {}", data.claims.sub)))?;
        Ok(UserClaims {
            user_id,
            username: data.claims.username,
            exp: data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn issue(secret: &str, sub: &str, exp: i64) -> String {
        let claims = RawClaims {
            sub: sub.to_string(),
            username: "alice".to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_valid_token_roundtrip() {
        let verifier = JwtTokenVerifier::new("test-secret");
        let token = issue("test-secret", "42", future_exp());
        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = JwtTokenVerifier::new("test-secret");
        let token = issue("other-secret", "42", future_exp());
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let verifier = JwtTokenVerifier::new("test-secret");
        let token = issue("test-secret", "42", chrono::Utc::now().timestamp() - 3600);
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_non_numeric_sub_rejected() {
        let verifier = JwtTokenVerifier::new("test-secret");
        let token = issue("test-secret", "not-a-number", future_exp());
        assert!(verifier.verify(&token).is_err());
    }
}
