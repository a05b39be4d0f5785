//! Sticker input records.
//!
//! A [`StickerRecord`] is built from upstream request data right before
//! rendering and is never persisted itself. Field names on the wire follow the
//! request-tracking API (`labRefNo`, base64 `logo`).

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, instrument};

use crate::error::{Result, StickerError};

/// Identifies one value slot of a sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Customer,
    Product,
    Description,
    LabRefNo,
    Quantity,
    Note,
}

impl FieldKey {
    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Product => "product",
            Self::Description => "description",
            Self::LabRefNo => "labRefNo",
            Self::Quantity => "quantity",
            Self::Note => "note",
        }
    }
}

/// A rendered `(label, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StickerField {
    pub label: String,
    pub value: String,
}

/// One print unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerRecord {
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "lab_ref_no", alias = "ref_no")]
    pub lab_ref_no: String,
    #[serde(default, deserialize_with = "quantity_text")]
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Raw logo bytes (PNG, JPEG, ...). Base64 text on the wire.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "logo_to_base64",
        deserialize_with = "logo_from_base64"
    )]
    pub logo: Option<Vec<u8>>,
}

impl StickerRecord {
    pub fn new(
        customer: impl Into<String>,
        product: impl Into<String>,
        description: impl Into<String>,
        lab_ref_no: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            customer: customer.into(),
            product: product.into(),
            description: description.into(),
            lab_ref_no: lab_ref_no.into(),
            quantity: quantity.into(),
            note: None,
            logo: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn with_logo(mut self, logo: Vec<u8>) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Value stored under `key`; a missing note reads as empty.
    pub fn value(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Customer => &self.customer,
            FieldKey::Product => &self.product,
            FieldKey::Description => &self.description,
            FieldKey::LabRefNo => &self.lab_ref_no,
            FieldKey::Quantity => &self.quantity,
            FieldKey::Note => self.note.as_deref().unwrap_or(""),
        }
    }

    /// Logo bytes, treating an empty buffer as absent.
    pub fn logo_bytes(&self) -> Option<&[u8]> {
        self.logo.as_deref().filter(|b| !b.is_empty())
    }

    /// Reject values that cannot be typeset.
    ///
    /// Tabs and line breaks are allowed (they collapse like spaces); every
    /// other control character is refused.
    pub fn validate(&self, index: usize) -> Result<()> {
        let keys = [
            FieldKey::Customer,
            FieldKey::Product,
            FieldKey::Description,
            FieldKey::LabRefNo,
            FieldKey::Quantity,
            FieldKey::Note,
        ];
        for key in keys {
            let value = self.value(key);
            if let Some(c) = value
                .chars()
                .find(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
            {
                return Err(StickerError::InvalidField {
                    index,
                    field: key.as_str(),
                    reason: format!("contains control character U+{:04X}", u32::from(c)),
                });
            }
        }
        Ok(())
    }
}

/// A batch of records as read from an input document.
///
/// Accepts either a bare list or an object with a `stickers` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StickerBatch {
    List(Vec<StickerRecord>),
    Wrapped { stickers: Vec<StickerRecord> },
}

impl StickerBatch {
    pub fn into_records(self) -> Vec<StickerRecord> {
        match self {
            Self::List(records) | Self::Wrapped { stickers: records } => records,
        }
    }
}

/// Syntax of a sticker input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchFormat {
    Json,
    Yaml,
    Toml,
}

impl BatchFormat {
    /// Detect format from file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parse an input document into records.
///
/// TOML has no top-level arrays, so TOML input always uses `[[stickers]]`.
pub fn parse_batch(content: &str, format: BatchFormat) -> std::result::Result<Vec<StickerRecord>, String> {
    let batch: StickerBatch = match format {
        BatchFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string())?,
        BatchFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string())?,
        BatchFormat::Toml => toml::from_str(content).map_err(|e| e.to_string())?,
    };
    Ok(batch.into_records())
}

/// Read records from a `.json`, `.yaml`/`.yml` or `.toml` file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_batch(path: &Path) -> Result<Vec<StickerRecord>> {
    let invalid = |reason: String| StickerError::InvalidInputFile {
        path: path.display().to_string(),
        reason,
    };
    let format = BatchFormat::from_extension(path)
        .ok_or_else(|| invalid("expected a .json, .yaml, .yml or .toml file".to_string()))?;
    let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let records = parse_batch(&content, format).map_err(invalid)?;
    debug!(count = records.len(), ?format, "Loaded sticker batch");
    Ok(records)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityRepr {
    Text(String),
    Int(i64),
    Float(f64),
}

fn quantity_text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(match QuantityRepr::deserialize(deserializer)? {
        QuantityRepr::Text(s) => s,
        QuantityRepr::Int(n) => n.to_string(),
        QuantityRepr::Float(f) => f.to_string(),
    })
}

fn logo_to_base64<S: Serializer>(
    logo: &Option<Vec<u8>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match logo {
        Some(bytes) => {
            serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
        }
        None => serializer.serialize_none(),
    }
}

fn logo_from_base64<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Vec<u8>>, D::Error> {
    let text: Option<String> = Option::deserialize(deserializer)?;
    match text {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => base64::engine::general_purpose::STANDARD
            .decode(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
