use sfv::{Dictionary, Item, List, Parser};

use crate::error::FieldValueError;
use crate::registry::FieldTypeRegistry;
use crate::types::{Field, FieldKind};

/// A grammar engine for Structured Field values.
///
/// Implementations only need to accept or reject; parsed values are
/// discarded. Input is already known to be ASCII.
pub trait GrammarChecker {
    /// # Errors
    ///
    /// Returns a description of the first grammar violation.
    fn check(&self, kind: FieldKind, value: &[u8]) -> Result<(), String>;
}

/// [`GrammarChecker`] backed by the `sfv` crate (RFC 9651).
#[derive(Debug, Clone, Copy, Default)]
pub struct SfvChecker;

impl GrammarChecker for SfvChecker {
    fn check(&self, kind: FieldKind, value: &[u8]) -> Result<(), String> {
        let parser = Parser::new(value);
        let parsed = match kind {
            FieldKind::Item => parser.parse::<Item>().map(drop),
            FieldKind::List => parser.parse::<List>().map(drop),
            FieldKind::Dictionary => parser.parse::<Dictionary>().map(drop),
        };
        parsed.map_err(|e| e.to_string())
    }
}

/// Check that `value` is 7-bit ASCII and then that it parses as `kind`.
///
/// # Errors
///
/// [`FieldValueError::NonAscii`] for the first byte above 0x7F, otherwise
/// [`FieldValueError::Grammar`] with the checker's description.
pub fn check_field_value(
    checker: &dyn GrammarChecker,
    kind: FieldKind,
    value: &str,
) -> Result<(), FieldValueError> {
    let bytes = value.as_bytes();
    if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
        return Err(FieldValueError::NonAscii {
            byte: bytes[offset],
            offset,
        });
    }
    checker
        .check(kind, bytes)
        .map_err(FieldValueError::Grammar)
}

/// Outcome of dispatching one logical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The value matched its registered grammar.
    Valid(FieldKind),
    /// The value failed its registered grammar.
    Invalid(FieldKind, FieldValueError),
    /// No grammar is registered for the field.
    Untyped,
}

/// Look `field` up in `registry` and check its value if it is typed.
pub fn dispatch_field(
    registry: &FieldTypeRegistry,
    checker: &dyn GrammarChecker,
    field: &Field,
) -> Dispatch {
    match registry.get(&field.name) {
        Some(kind) => match check_field_value(checker, kind, &field.value) {
            Ok(()) => Dispatch::Valid(kind),
            Err(e) => Dispatch::Invalid(kind, e),
        },
        None => Dispatch::Untyped,
    }
}
