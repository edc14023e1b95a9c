use uuid::Uuid;

use crate::error::RestoError;

/// The authenticated caller, attached to requests by the server's JWT
/// middleware and consumed by profile handlers.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
}

impl Principal {
    /// Construct from validated JWT claims at the server boundary.
    /// The server middleware calls this; core logic never reads raw tokens.
    pub fn from_jwt_claims(claims: &JwtClaims) -> Result<Self, RestoError> {
        let sub = claims
            .sub
            .as_deref()
            .ok_or_else(|| RestoError::Unauthorized("missing sub claim".into()))?;
        let user_id = Uuid::parse_str(sub)
            .map_err(|_| RestoError::Unauthorized("malformed sub claim".into()))?;
        Ok(Self {
            user_id,
            email: claims.email.clone().unwrap_or_default(),
            role: claims.role.clone().unwrap_or_default(),
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    pub fn require_admin(&self) -> Result<(), RestoError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(RestoError::Forbidden(format!(
                "{} is not an admin",
                self.user_id
            )))
        }
    }
}

/// JWT claims minted at login and decoded by the server middleware.
/// Carries the user's public profile fields, never the password hash.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct JwtClaims {
    pub sub: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: Option<&str>, role: Option<&str>) -> JwtClaims {
        JwtClaims {
            sub: sub.map(String::from),
            username: Some("alice".into()),
            email: Some("alice@example.com".into()),
            role: role.map(String::from),
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[test]
    fn from_jwt_claims_happy_path() {
        let id = Uuid::new_v4();
        let c = claims(Some(&id.to_string()), Some("customer"));
        let p = Principal::from_jwt_claims(&c).unwrap();
        assert_eq!(p.user_id, id);
        assert_eq!(p.email, "alice@example.com");
        assert_eq!(p.role, "customer");
    }

    #[test]
    fn from_jwt_claims_missing_sub() {
        let err = Principal::from_jwt_claims(&claims(None, None)).unwrap_err();
        assert!(matches!(err, RestoError::Unauthorized(_)));
    }

    #[test]
    fn from_jwt_claims_malformed_sub() {
        let err = Principal::from_jwt_claims(&claims(Some("not-a-uuid"), None)).unwrap_err();
        assert!(matches!(err, RestoError::Unauthorized(_)));
    }

    #[test]
    fn from_jwt_claims_defaults_missing_role() {
        let id = Uuid::new_v4();
        let p = Principal::from_jwt_claims(&claims(Some(&id.to_string()), None)).unwrap();
        assert_eq!(p.role, "");
        assert!(!p.is_admin());
    }

    #[test]
    fn is_admin_only_for_admin_role() {
        let mut p = Principal {
            user_id: Uuid::new_v4(),
            email: String::new(),
            role: "customer".into(),
        };
        assert!(!p.is_admin());
        p.role = "admin".into();
        assert!(p.is_admin());
    }

    #[test]
    fn require_admin_ok_when_admin() {
        let p = Principal {
            user_id: Uuid::new_v4(),
            email: String::new(),
            role: "admin".into(),
        };
        assert!(p.require_admin().is_ok());
    }

    #[test]
    fn require_admin_err_when_not_admin() {
        let p = Principal {
            user_id: Uuid::new_v4(),
            email: String::new(),
            role: "customer".into(),
        };
        let err = p.require_admin().unwrap_err();
        assert!(matches!(err, RestoError::Forbidden(_)));
        assert!(err.to_string().contains("is not an admin"));
    }
}
