use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
    models::domain::Role,
};

/// Issues and verifies stateless HS256 identity tokens.
///
/// Nothing is stored server side, so a token stays valid until `exp` even
/// after the client logs out.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_hours: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation,
            lifetime: Duration::hours(expiration_hours),
        }
    }

    pub fn issue(&self, user_id: &str, role: Role) -> AppResult<String> {
        self.issue_at(user_id, role, Utc::now())
    }

    pub fn issue_at(&self, user_id: &str, role: Role, issued_at: DateTime<Utc>) -> AppResult<String> {
        let claims = Claims::new(user_id, role, issued_at, self.lifetime);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::TokenExpired("please log in again".to_string())
                }
                ErrorKind::InvalidSignature => {
                    AppError::InvalidToken("signature is invalid".to_string())
                }
                _ => AppError::InvalidToken(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn service() -> JwtService {
        let config = Config::test_config();
        JwtService::new(&config.jwt_secret, config.jwt_expiration_hours)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let jwt_service = service();

        for role in [Role::Student, Role::Admin] {
            let token = jwt_service.issue("65f0a1b2c3d4e5f6a7b8c9d0", role).unwrap();
            let claims = jwt_service.verify(&token).unwrap();

            assert_eq!(claims.user_id(), "65f0a1b2c3d4e5f6a7b8c9d0");
            assert_eq!(claims.role, role);
        }
    }

    #[test]
    fn test_token_older_than_an_hour_is_expired() {
        let jwt_service = service();
        let issued_at = Utc::now() - Duration::hours(1) - Duration::seconds(5);

        let token = jwt_service.issue_at("user-1", Role::Student, issued_at).unwrap();

        assert!(matches!(
            jwt_service.verify(&token),
            Err(AppError::TokenExpired(_))
        ));
    }

    #[test]
    fn test_token_within_the_hour_is_accepted() {
        let jwt_service = service();
        let issued_at = Utc::now() - Duration::minutes(59);

        let token = jwt_service.issue_at("user-1", Role::Admin, issued_at).unwrap();

        assert!(jwt_service.verify(&token).is_ok());
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        let jwt_service = service();

        assert!(matches!(
            jwt_service.verify("invalid.token.here"),
            Err(AppError::InvalidToken(_))
        ));
        assert!(matches!(jwt_service.verify(""), Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let jwt_service = service();
        let token = jwt_service.issue("user-1", Role::Student).unwrap();
        let admin_token = jwt_service.issue("user-1", Role::Admin).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let admin_parts: Vec<&str> = admin_token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], admin_parts[1], parts[2]);

        assert!(matches!(
            jwt_service.verify(&forged),
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let jwt_service = service();
        let token = jwt_service.issue("user-1", Role::Student).unwrap();
        let other_token = jwt_service.issue("user-2", Role::Student).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other_token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], parts[1], other_parts[2]);

        assert!(matches!(
            jwt_service.verify(&forged),
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_invalid() {
        let other = JwtService::new(&SecretString::from("another_secret".to_string()), 1);
        let token = other.issue("user-1", Role::Admin).unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(AppError::InvalidToken(_))
        ));
    }
}
