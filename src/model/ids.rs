//! Asset and shape identifiers handed to the host editor.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

// Both id kinds share one shape; only the record-type prefix differs.
macro_rules! define_record_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Record-type prefix used in the textual form.
            pub const PREFIX: &'static str = $prefix;

            pub fn new(raw: Uuid) -> Self {
                Self(raw)
            }

            /// Parse the `prefix:uuid` textual form.
            pub fn parse(raw: &str) -> Result<Self> {
                let uuid = raw
                    .strip_prefix($prefix)
                    .and_then(|rest| rest.strip_prefix(':'))
                    .and_then(|rest| Uuid::parse_str(rest).ok())
                    .ok_or_else(|| {
                        Error::InvalidId(format!("'{}' is not a {} id", raw, $prefix))
                    })?;
                Ok(Self(uuid))
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "{}:{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(raw: &str) -> Result<Self> {
                Self::parse(raw)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(raw: String) -> Result<Self> {
                Self::parse(&raw)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_string()
            }
        }
    };
}

define_record_id!(AssetId, "asset");
define_record_id!(ShapeId, "shape");

/// Source of fresh identifiers.
///
/// The host editor supplies the allocator so page ids never collide with
/// ids it hands out for its own records.
pub trait IdAllocator: Send + Sync {
    /// Return an identifier never returned before by this allocator.
    fn next_id(&self) -> Uuid;
}

/// Random (v4) UUIDs. The default allocator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdAllocator for RandomIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Counter-backed ids for reproducible output.
///
/// Unique only within one allocator instance.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting at `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&self) -> Uuid {
        Uuid::from_u64_pair(0, self.next.fetch_add(1, Ordering::Relaxed))
    }
}
