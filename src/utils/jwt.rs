use crate::config::AppConfig;
use crate::models::users::entities::{AuthUser, UserRole};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型: "access" 或 "refresh"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

impl Claims {
    /// 转换为已认证用户
    pub fn to_auth_user(&self) -> Result<AuthUser, String> {
        let id = self
            .sub
            .parse::<i64>()
            .map_err(|_| "Invalid user ID in JWT".to_string())?;
        let role = self.role.parse::<UserRole>()?;
        Ok(AuthUser { id, role })
    }
}

/// 令牌由外部认证服务签发，这里只负责校验
pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    // 使用指定密钥验证 token 并检查类型
    pub fn verify_token_with_secret(
        token: &str,
        secret: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        let claims =
            decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)?;
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_with_secret(token, &Self::get_secret(), "access")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    pub(crate) fn issue(user_id: &str, role: &str, token_type: &str, secret: &str, ttl: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: (now + ttl) as usize,
            iat: now as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_access_token() {
        let token = issue("12", "teacher", "access", "s3cret", 600);
        let claims = JwtUtils::verify_token_with_secret(&token, "s3cret", "access").unwrap();
        assert_eq!(
            claims.to_auth_user().unwrap(),
            AuthUser {
                id: 12,
                role: UserRole::Teacher
            }
        );
    }

    #[test]
    fn test_rejects_wrong_secret_and_type() {
        let token = issue("12", "teacher", "refresh", "s3cret", 600);
        assert!(JwtUtils::verify_token_with_secret(&token, "s3cret", "access").is_err());
        let token = issue("12", "teacher", "access", "s3cret", 600);
        assert!(JwtUtils::verify_token_with_secret(&token, "other", "access").is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let token = issue("12", "user", "access", "s3cret", -3600);
        assert!(JwtUtils::verify_token_with_secret(&token, "s3cret", "access").is_err());
    }

    #[test]
    fn test_bad_subject_is_rejected() {
        let token = issue("abc", "user", "access", "s3cret", 600);
        let claims = JwtUtils::verify_token_with_secret(&token, "s3cret", "access").unwrap();
        assert!(claims.to_auth_user().is_err());
    }
}
