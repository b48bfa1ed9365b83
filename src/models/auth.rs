use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::{forbidden_error, AppError};

/// Roles del sistema
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Customer,
    Agency,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Agency => "agency",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(UserRole::Customer),
            "agency" => Ok(UserRole::Agency),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user_id
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// Identidad del usuario autenticado en la request actual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Identity {
    pub fn is_agency(&self) -> bool {
        self.role == UserRole::Agency
    }

    /// Campos de perfil requeridos para reservar que faltan
    pub fn missing_booking_fields(&self) -> Vec<String> {
        let blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());

        let mut missing = Vec::new();
        if blank(&self.phone) {
            missing.push("phone".to_string());
        }
        if blank(&self.address) {
            missing.push("address".to_string());
        }
        missing
    }
}

/// Exigir una sesión; sin ella la operación no continúa
pub fn require_identity(identity: Option<&Identity>) -> Result<&Identity, AppError> {
    identity.ok_or(AppError::AuthenticationRequired)
}

/// Exigir una sesión con rol de agencia
pub fn require_agency<'a>(
    identity: Option<&'a Identity>,
    operation: &str,
) -> Result<&'a Identity, AppError> {
    let identity = require_identity(identity)?;
    if !identity.is_agency() {
        return Err(forbidden_error(operation, "agency account required"));
    }
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(phone: Option<&str>, address: Option<&str>) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            name: "Youssef".to_string(),
            role: UserRole::Customer,
            phone: phone.map(str::to_string),
            address: address.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_booking_fields() {
        assert!(identity(Some("22123456"), Some("Tunis")).missing_booking_fields().is_empty());
        assert_eq!(
            identity(None, Some("Tunis")).missing_booking_fields(),
            vec!["phone".to_string()]
        );
        assert_eq!(
            identity(Some("  "), None).missing_booking_fields(),
            vec!["phone".to_string(), "address".to_string()]
        );
    }

    #[test]
    fn test_require_agency() {
        let customer = identity(None, None);
        let agency = Identity {
            role: UserRole::Agency,
            ..identity(None, None)
        };

        assert!(matches!(
            require_agency(None, "list reservations"),
            Err(AppError::AuthenticationRequired)
        ));
        assert!(matches!(
            require_agency(Some(&customer), "list reservations"),
            Err(AppError::Forbidden(_))
        ));
        assert!(require_agency(Some(&agency), "list reservations").is_ok());
    }

    #[test]
    fn test_role_round_trip_through_str() {
        for role in [UserRole::Customer, UserRole::Agency] {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
        }
        assert_eq!("Agency".parse::<UserRole>(), Ok(UserRole::Agency));
        assert!("admin".parse::<UserRole>().is_err());
    }
}
