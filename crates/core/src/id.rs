//! Opaque string identifiers used across the authorization domain.
//!
//! Module and role ids come from the identity service and are never parsed
//! or generated locally, so they are modeled as opaque strings rather than
//! UUIDs.

use core::str::FromStr;
use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of one node in the server-declared authorization tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(Cow<'static, str>);

/// Identifier of the caller's authorization role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(Cow<'static, str>);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.is_empty() {
                    return Err(DomainError::invalid_id(concat!($name, ": empty")));
                }
                Ok(Self(Cow::Owned(s.to_string())))
            }
        }
    };
}

impl_string_newtype!(ModuleId, "ModuleId");
impl_string_newtype!(RoleId, "RoleId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_id_round_trips_through_serde() {
        let id = ModuleId::new("mod-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"mod-42\"");

        let back: ModuleId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn empty_id_is_rejected_on_parse() {
        let result = "".parse::<RoleId>();
        assert!(matches!(result, Err(DomainError::InvalidId(_))));
    }
}
