use std::io::Read;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ConfigError;
use crate::types::FieldKind;

/// Fields known to use Structured Field syntax out of the box.
///
/// Covers fields defined as Structured Fields and the older fields whose
/// syntax is compatible with them.
pub const BASELINE_FIELDS: &[(&str, FieldKind)] = &[
    // Defined as Structured Fields.
    ("accept-ch", FieldKind::List),
    ("accept-signature", FieldKind::Dictionary),
    ("cache-status", FieldKind::List),
    ("cdn-cache-control", FieldKind::Dictionary),
    ("client-cert", FieldKind::Item),
    ("client-cert-chain", FieldKind::List),
    ("content-digest", FieldKind::Dictionary),
    ("cross-origin-embedder-policy", FieldKind::Item),
    ("cross-origin-embedder-policy-report-only", FieldKind::Item),
    ("cross-origin-opener-policy", FieldKind::Item),
    ("cross-origin-opener-policy-report-only", FieldKind::Item),
    ("origin-agent-cluster", FieldKind::Item),
    ("priority", FieldKind::Dictionary),
    ("proxy-status", FieldKind::List),
    ("repr-digest", FieldKind::Dictionary),
    ("signature", FieldKind::Dictionary),
    ("signature-input", FieldKind::Dictionary),
    ("want-content-digest", FieldKind::Dictionary),
    ("want-repr-digest", FieldKind::Dictionary),
    // Older fields compatible with Structured Field syntax.
    ("accept", FieldKind::List),
    ("accept-encoding", FieldKind::List),
    ("accept-language", FieldKind::List),
    ("accept-patch", FieldKind::List),
    ("accept-post", FieldKind::List),
    ("accept-ranges", FieldKind::List),
    ("access-control-allow-credentials", FieldKind::Item),
    ("access-control-allow-headers", FieldKind::List),
    ("access-control-allow-methods", FieldKind::List),
    ("access-control-allow-origin", FieldKind::Item),
    ("access-control-expose-headers", FieldKind::List),
    ("access-control-max-age", FieldKind::Item),
    ("access-control-request-headers", FieldKind::List),
    ("access-control-request-method", FieldKind::Item),
    ("age", FieldKind::Item),
    ("allow", FieldKind::List),
    ("alpn", FieldKind::List),
    ("alt-svc", FieldKind::Dictionary),
    ("alt-used", FieldKind::Item),
    ("cache-control", FieldKind::Dictionary),
    ("connection", FieldKind::List),
    ("content-encoding", FieldKind::List),
    ("content-language", FieldKind::List),
    ("content-length", FieldKind::List),
    ("content-type", FieldKind::Item),
    ("cross-origin-resource-policy", FieldKind::Item),
    ("expect", FieldKind::Dictionary),
    ("host", FieldKind::Item),
    ("keep-alive", FieldKind::Dictionary),
    ("max-forwards", FieldKind::Item),
    ("origin", FieldKind::Item),
    ("pragma", FieldKind::Dictionary),
    ("prefer", FieldKind::Dictionary),
    ("preference-applied", FieldKind::Dictionary),
    ("retry-after", FieldKind::Item),
    ("sec-websocket-extensions", FieldKind::List),
    ("sec-websocket-protocol", FieldKind::List),
    ("sec-websocket-version", FieldKind::Item),
    ("server-timing", FieldKind::List),
    ("surrogate-control", FieldKind::Dictionary),
    ("te", FieldKind::List),
    ("timing-allow-origin", FieldKind::List),
    ("trailer", FieldKind::List),
    ("transfer-encoding", FieldKind::List),
    ("upgrade-insecure-requests", FieldKind::Item),
    ("vary", FieldKind::List),
    ("x-content-type-options", FieldKind::Item),
    ("x-frame-options", FieldKind::Item),
    ("x-xss-protection", FieldKind::List),
];

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps lower-cased field names to the grammar their values must follow.
///
/// Built once with [`RegistryBuilder`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTypeRegistry {
    entries: Vec<(String, FieldKind)>,
}

impl FieldTypeRegistry {
    /// Registry holding only [`BASELINE_FIELDS`].
    pub fn baseline() -> Self {
        RegistryBuilder::new().build()
    }

    /// Look up the kind registered for `name` (case-insensitive).
    pub fn get(&self, name: &str) -> Option<FieldKind> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, kind)| kind)
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.entries.iter().map(|(n, k)| (n.as_str(), *k))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Layers field-type sources; later entries win.
///
/// ```rust
/// use rfc_http_validate::{FieldKind, RegistryBuilder};
///
/// let registry = RegistryBuilder::new()
///     .item("Example-Field")
///     .dictionary("Cache-Control")
///     .build();
/// assert_eq!(registry.get("example-field"), Some(FieldKind::Item));
/// ```
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    registry: FieldTypeRegistry,
}

impl RegistryBuilder {
    /// Start from [`BASELINE_FIELDS`].
    pub fn new() -> Self {
        let mut builder = Self::empty();
        for &(name, kind) in BASELINE_FIELDS {
            builder.insert(name, kind);
        }
        builder
    }

    /// Start with no entries at all.
    pub fn empty() -> Self {
        Self {
            registry: FieldTypeRegistry::default(),
        }
    }

    /// Register `name`, replacing any earlier kind for it in place.
    pub fn insert(&mut self, name: &str, kind: FieldKind) -> &mut Self {
        let name = name.to_ascii_lowercase();
        match self.registry.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => {
                if entry.1 != kind {
                    debug!(field = %name, from = %entry.1, to = %kind, "field type overridden");
                }
                entry.1 = kind;
            }
            None => self.registry.entries.push((name, kind)),
        }
        self
    }

    pub fn item(mut self, name: &str) -> Self {
        self.insert(name, FieldKind::Item);
        self
    }

    pub fn list(mut self, name: &str) -> Self {
        self.insert(name, FieldKind::List);
        self
    }

    pub fn dictionary(mut self, name: &str) -> Self {
        self.insert(name, FieldKind::Dictionary);
        self
    }

    /// Merge a JSON object of `"field-name": "item" | "list" | "dict"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the document cannot be read, is not a JSON
    /// object, or uses an unknown kind tag. Nothing is merged on error.
    pub fn load_json<R: Read>(mut self, reader: R) -> Result<Self, ConfigError> {
        let doc: Value = serde_json::from_reader(reader)?;
        let Value::Object(map) = doc else {
            return Err(ConfigError::NotAnObject);
        };

        let mut parsed = Vec::with_capacity(map.len());
        for (field, tag) in &map {
            let kind = FieldKind::deserialize(tag).map_err(|_| ConfigError::UnknownKind {
                field: field.clone(),
                kind: match tag {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
            })?;
            parsed.push((field, kind));
        }

        debug!(entries = parsed.len(), "loaded field type map");
        for (field, kind) in parsed {
            self.insert(field, kind);
        }
        Ok(self)
    }

    pub fn build(self) -> FieldTypeRegistry {
        self.registry
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
