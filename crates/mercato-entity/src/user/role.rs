//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the Mercato marketplace.
///
/// The set is closed: every principal carries exactly one of these, and
/// protected operations declare which of them are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Purchases products and writes reviews.
    Buyer,
    /// Lists and manages products for sale.
    Seller,
    /// Full marketplace administrator.
    Admin,
}

impl UserRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = mercato_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buyer" => Ok(Self::Buyer),
            "seller" => Ok(Self::Seller),
            "admin" => Ok(Self::Admin),
            _ => Err(mercato_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: buyer, seller, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("buyer".parse::<UserRole>().unwrap(), UserRole::Buyer);
        assert_eq!("SELLER".parse::<UserRole>().unwrap(), UserRole::Seller);
        assert!("manager".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for role in [UserRole::Buyer, UserRole::Seller, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
    }
}
