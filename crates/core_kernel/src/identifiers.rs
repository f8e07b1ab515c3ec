//! Strongly-typed identifiers for domain entities
//!
//! Using newtype wrappers around UUIDs provides type safety and prevents
//! accidental mixing of different identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Project domain identifiers
define_id!(WorkId, "WRK");
define_id!(CertificationId, "CRT");
define_id!(CertificationLineId, "CRTL");
define_id!(MilestoneId, "MLS");
define_id!(ProductId, "PRD");

// Master data identifiers
define_id!(PartyId, "PTY");
define_id!(CompanyId, "CMP");

// Ledger domain identifiers
define_id!(AccountId, "ACC");
define_id!(AnalyticAccountId, "ANL");
define_id!(JournalId, "JNL");
define_id!(PeriodId, "PER");
define_id!(MoveId, "MOV");
define_id!(MoveLineId, "MVL");
define_id!(ReconciliationId, "REC");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_id_display() {
        let id = WorkId::new();
        assert!(id.to_string().starts_with("WRK-"));
    }

    #[test]
    fn test_id_parsing() {
        let original = MoveId::new();
        let parsed: MoveId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let account_id = AccountId::from(uuid);
        let back: Uuid = account_id.into();
        assert_eq!(uuid, back);
    }
}
