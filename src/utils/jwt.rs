use crate::config::AppConfig;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

// 外部认证服务签发的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 认证服务中的用户 ID
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize, // 过期时间 (时间戳)
    #[serde(default)]
    pub aud: Option<String>,
}

pub struct JwtUtils;

impl JwtUtils {
    // 验证 JWT token（使用全局配置中的密钥与受众）
    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let auth = &AppConfig::get().auth;
        Self::verify_with_secret(token, &auth.jwt_secret, auth.audience.as_deref())
    }

    // 使用指定密钥验证 token
    pub fn verify_with_secret(
        token: &str,
        secret: &str,
        audience: Option<&str>,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        // 未配置密钥时拒绝所有 token
        if secret.is_empty() {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidKeyFormat.into());
        }

        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        match audience {
            Some(aud) if !aud.is_empty() => validation.set_audience(&[aud]),
            _ => validation.validate_aud = false,
        }

        let claims =
            decode::<Claims>(token, &decoding_key, &validation).map(|data| data.claims)?;
        if claims.sub.trim().is_empty() {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidSubject.into());
        }
        Ok(claims)
    }

    /// 从 Authorization 头中提取 Bearer token
    pub fn extract_bearer(header_value: &str) -> Option<&str> {
        header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "test-secret";

    fn sign(sub: &str, aud: Option<&str>, exp_offset: i64) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            email: Some("admin@example.com".to_string()),
            exp: (chrono::Utc::now().timestamp() + exp_offset) as usize,
            aud: aud.map(str::to_string),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("token encodes")
    }

    #[test]
    fn test_verify_valid_token() {
        let token = sign("user-1", Some("authenticated"), 3600);
        let claims = JwtUtils::verify_with_secret(&token, SECRET, Some("authenticated"))
            .expect("token is valid");
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("admin@example.com"));
    }

    #[test]
    fn test_reject_wrong_secret_and_audience() {
        let token = sign("user-1", Some("authenticated"), 3600);
        assert!(JwtUtils::verify_with_secret(&token, "other", Some("authenticated")).is_err());
        assert!(JwtUtils::verify_with_secret(&token, SECRET, Some("service")).is_err());
        assert!(JwtUtils::verify_with_secret(&token, "", None).is_err());
    }

    #[test]
    fn test_reject_expired_token() {
        let token = sign("user-1", None, -3600);
        assert!(JwtUtils::verify_with_secret(&token, SECRET, None).is_err());
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(JwtUtils::extract_bearer("Bearer abc"), Some("abc"));
        assert_eq!(JwtUtils::extract_bearer("Bearer   "), None);
        assert_eq!(JwtUtils::extract_bearer("Basic abc"), None);
    }
}
