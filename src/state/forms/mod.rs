//! Form domain layer
//!
//! Typed field paths, declarative validation rules and the store that keeps
//! values, errors and the phone number field array in sync.

mod field;
mod form_state;
mod path;
mod rules;
mod subscription;
mod values;

pub use field::{FocusTarget, FormField};
pub use form_state::{FormStateStore, SubmitHandler, ValidationErrors};
pub use path::{FieldPath, PHONE_NUMBER_SLOTS, PH_NUMBERS};
pub use rules::{Check, FormSchema, Rule, RuleSet, ValidationError, EMAIL_PATTERN};
pub use subscription::{Change, ChangeKind, Subscription};
pub use values::{EntryKey, FieldArrayEntry, FormValues, PhNumber, Social};
