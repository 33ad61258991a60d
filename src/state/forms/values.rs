//! Form value objects

use super::path::{FieldPath, PHONE_NUMBER_SLOTS, PH_NUMBERS};
use crate::error::PathError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Social profile handles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    pub twitter: String,
    pub facebook: String,
}

/// Content of one field-array entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhNumber {
    pub number: String,
}

impl PhNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }
}

/// The full value tree of the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormValues {
    pub username: String,
    pub email: String,
    pub channel: String,
    pub social: Social,
    pub phone_numbers: [String; PHONE_NUMBER_SLOTS],
    pub ph_numbers: Vec<PhNumber>,
}

impl Default for FormValues {
    /// Empty strings everywhere and a single empty phone entry
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            channel: String::new(),
            social: Social::default(),
            phone_numbers: Default::default(),
            ph_numbers: vec![PhNumber::default()],
        }
    }
}

impl FormValues {
    /// Read the text value at `path`
    pub fn get(&self, path: FieldPath) -> Result<&str, PathError> {
        let value = match path {
            FieldPath::Username => &self.username,
            FieldPath::Email => &self.email,
            FieldPath::Channel => &self.channel,
            FieldPath::Twitter => &self.social.twitter,
            FieldPath::Facebook => &self.social.facebook,
            FieldPath::PhoneNumber(i) => self.phone_numbers.get(i).ok_or(
                PathError::OutOfRange {
                    list: "phoneNumbers",
                    index: i,
                    len: PHONE_NUMBER_SLOTS,
                },
            )?,
            FieldPath::PhNumber(i) => {
                &self
                    .ph_numbers
                    .get(i)
                    .ok_or(PathError::OutOfRange {
                        list: PH_NUMBERS,
                        index: i,
                        len: self.ph_numbers.len(),
                    })?
                    .number
            }
        };
        Ok(value.as_str())
    }

    /// Mutable access to the text value at `path`
    pub fn get_mut(&mut self, path: FieldPath) -> Result<&mut String, PathError> {
        let len = self.ph_numbers.len();
        let value = match path {
            FieldPath::Username => &mut self.username,
            FieldPath::Email => &mut self.email,
            FieldPath::Channel => &mut self.channel,
            FieldPath::Twitter => &mut self.social.twitter,
            FieldPath::Facebook => &mut self.social.facebook,
            FieldPath::PhoneNumber(i) => self.phone_numbers.get_mut(i).ok_or(
                PathError::OutOfRange {
                    list: "phoneNumbers",
                    index: i,
                    len: PHONE_NUMBER_SLOTS,
                },
            )?,
            FieldPath::PhNumber(i) => {
                &mut self
                    .ph_numbers
                    .get_mut(i)
                    .ok_or(PathError::OutOfRange {
                        list: PH_NUMBERS,
                        index: i,
                        len,
                    })?
                    .number
            }
        };
        Ok(value)
    }

    /// Every addressable path for the current shape, in form order
    pub fn paths(&self) -> Vec<FieldPath> {
        FieldPath::STATIC
            .into_iter()
            .chain((0..self.ph_numbers.len()).map(FieldPath::PhNumber))
            .collect()
    }
}

/// Identity of a field-array entry, assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryKey(Uuid);

impl EntryKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A field-array entry as seen by the rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldArrayEntry {
    pub key: EntryKey,
    pub number: String,
}
