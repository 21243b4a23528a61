//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use servicehub_core::AppError;

/// The closed set of account roles.
///
/// A professional offers services within exactly one subcategory; a client
/// books them and never carries a subcategory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Books services.
    Client,
    /// Offers services in a subcategory.
    Professional,
}

impl UserRole {
    /// Whether users of this role must be attached to a subcategory.
    pub fn requires_subcategory(&self) -> bool {
        matches!(self, Self::Professional)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Professional => "professional",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "professional" => Ok(Self::Professional),
            _ => Err(AppError::bad_request("invalid role")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("client".parse::<UserRole>().unwrap(), UserRole::Client);
        assert_eq!(
            "Professional".parse::<UserRole>().unwrap(),
            UserRole::Professional
        );
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_only_professionals_require_subcategory() {
        assert!(UserRole::Professional.requires_subcategory());
        assert!(!UserRole::Client.requires_subcategory());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&UserRole::Professional).unwrap();
        assert_eq!(json, "\"professional\"");
    }
}
