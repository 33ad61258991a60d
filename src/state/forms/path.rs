//! Typed field paths into the form values

use crate::error::PathError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of slots in the fixed `phoneNumbers` list
pub const PHONE_NUMBER_SLOTS: usize = 2;

/// Name of the dynamic phone number list
pub const PH_NUMBERS: &str = "phNumbers";

/// Locates a single text value inside [`FormValues`](super::FormValues)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Username,
    Email,
    Channel,
    Twitter,
    Facebook,
    /// Slot in the fixed `phoneNumbers` list
    PhoneNumber(usize),
    /// `number` field of the field-array entry at this position
    PhNumber(usize),
}

impl FieldPath {
    /// Paths that exist regardless of the field array length, in form order
    pub const STATIC: [FieldPath; 7] = [
        FieldPath::Username,
        FieldPath::Email,
        FieldPath::Channel,
        FieldPath::Twitter,
        FieldPath::Facebook,
        FieldPath::PhoneNumber(0),
        FieldPath::PhoneNumber(1),
    ];

    /// Whether this path points into the dynamic field array
    pub fn is_array_entry(&self) -> bool {
        matches!(self, FieldPath::PhNumber(_))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Username => write!(f, "username"),
            FieldPath::Email => write!(f, "email"),
            FieldPath::Channel => write!(f, "channel"),
            FieldPath::Twitter => write!(f, "social.twitter"),
            FieldPath::Facebook => write!(f, "social.facebook"),
            FieldPath::PhoneNumber(i) => write!(f, "phoneNumbers.{i}"),
            FieldPath::PhNumber(i) => write!(f, "{PH_NUMBERS}.{i}.number"),
        }
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || PathError::Unknown(s.to_string());
        let parts: Vec<&str> = s.split('.').collect();

        match parts.as_slice() {
            ["username"] => Ok(FieldPath::Username),
            ["email"] => Ok(FieldPath::Email),
            ["channel"] => Ok(FieldPath::Channel),
            ["social", "twitter"] => Ok(FieldPath::Twitter),
            ["social", "facebook"] => Ok(FieldPath::Facebook),
            ["phoneNumbers", index] => {
                let index: usize = index.parse().map_err(|_| unknown())?;
                if index >= PHONE_NUMBER_SLOTS {
                    return Err(PathError::OutOfRange {
                        list: "phoneNumbers",
                        index,
                        len: PHONE_NUMBER_SLOTS,
                    });
                }
                Ok(FieldPath::PhoneNumber(index))
            }
            [list, index, "number"] if *list == PH_NUMBERS => index
                .parse()
                .map(FieldPath::PhNumber)
                .map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
