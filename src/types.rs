use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// The Structured Field grammar a field value must conform to (RFC 9651).
///
/// In configuration files the kinds are spelled `"item"`, `"list"` and
/// `"dict"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Item,
    List,
    #[serde(rename = "dict")]
    Dictionary,
}

impl FieldKind {
    /// Return the configuration tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::List => "list",
            Self::Dictionary => "dict",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Methods
// ---------------------------------------------------------------------------

/// Method names in the IANA HTTP Method Registry.
pub const REGISTERED_METHODS: &[&str] = &[
    "ACL",
    "BASELINE-CONTROL",
    "BIND",
    "CHECKIN",
    "CHECKOUT",
    "CONNECT",
    "COPY",
    "DELETE",
    "GET",
    "HEAD",
    "LABEL",
    "LINK",
    "LOCK",
    "MERGE",
    "MKACTIVITY",
    "MKCALENDAR",
    "MKCOL",
    "MKREDIRECTREF",
    "MKWORKSPACE",
    "MOVE",
    "OPTIONS",
    "ORDERPATCH",
    "PATCH",
    "POST",
    "PRI",
    "PROPFIND",
    "PROPPATCH",
    "PUT",
    "QUERY",
    "REBIND",
    "REPORT",
    "SEARCH",
    "TRACE",
    "UNBIND",
    "UNCHECKOUT",
    "UNLINK",
    "UNLOCK",
    "UPDATE",
    "UPDATEREDIRECTREF",
    "VERSION-CONTROL",
];

/// Return `true` if `method` is registered. Methods are case-sensitive.
pub fn is_registered_method(method: &str) -> bool {
    REGISTERED_METHODS.contains(&method)
}

/// The only protocol version accepted in example start lines.
pub const HTTP_11: &str = "HTTP/1.1";

// ---------------------------------------------------------------------------
// StartLine
// ---------------------------------------------------------------------------

/// The first line of an HTTP message, as far as it could be tokenised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartLine {
    /// `method SP request-target SP HTTP-version`
    Request {
        method: String,
        target: String,
        version: String,
    },
    /// `HTTP-version SP status-code SP [ reason-phrase ]`
    Status {
        version: String,
        code: u16,
        reason: String,
    },
}

impl fmt::Display for StartLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request {
                method,
                target,
                version,
            } => write!(f, "{method} {target} {version}"),
            Self::Status {
                version,
                code,
                reason,
            } => write!(f, "{version} {code} {reason}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Field / HeaderSet
// ---------------------------------------------------------------------------

/// One logical field: every line naming it, merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Lower-cased field name.
    pub name: String,
    /// Combined field value.
    pub value: String,
}

/// Logical fields of one message in first-seen order.
///
/// Names are stored lower-cased and are unique within the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    fields: Vec<Field>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field line's value.
    ///
    /// A name seen before has the value appended after `", "`, as when
    /// combining repeated field lines into one.
    pub fn append(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value.push_str(", ");
                field.value.push_str(value);
            }
            None => self.fields.push(Field {
                name,
                value: value.to_string(),
            }),
        }
    }

    /// Continue the value of `name` with an obs-fold line.
    ///
    /// Returns `false` if no such field exists.
    pub fn fold(&mut self, name: &str, continuation: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value.push(' ');
                field.value.push_str(continuation);
                true
            }
            None => false,
        }
    }

    /// Look up a value by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
