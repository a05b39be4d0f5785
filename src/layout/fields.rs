//! The ordered field table printed on every sticker.
//!
//! Label text and order are part of the printed media's contract, so they
//! live here as data. The note variant is selected by configuration.

use crate::record::{FieldKey, StickerField, StickerRecord};

use super::config::LayoutConfig;
use super::metrics::printable_uppercase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub label: &'static str,
    /// Wrap long values across lines; otherwise print on one line.
    pub wrap: bool,
}

pub const STANDARD_FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        key: FieldKey::Customer,
        label: "CUSTOMER",
        wrap: true,
    },
    FieldSpec {
        key: FieldKey::Product,
        label: "PRODUCT",
        wrap: true,
    },
    FieldSpec {
        key: FieldKey::Description,
        label: "DESCRIPTION",
        wrap: true,
    },
    FieldSpec {
        key: FieldKey::LabRefNo,
        label: "LAB REF #",
        wrap: false,
    },
    FieldSpec {
        key: FieldKey::Quantity,
        label: "QUANTITY",
        wrap: false,
    },
];

pub const NOTE_FIELD: FieldSpec = FieldSpec {
    key: FieldKey::Note,
    label: "NOTE",
    wrap: true,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTable {
    specs: Vec<FieldSpec>,
}

impl FieldTable {
    pub fn standard() -> Self {
        Self {
            specs: STANDARD_FIELDS.to_vec(),
        }
    }

    pub fn with_note() -> Self {
        let mut specs = STANDARD_FIELDS.to_vec();
        specs.push(NOTE_FIELD);
        Self { specs }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        if config.include_note {
            Self::with_note()
        } else {
            Self::standard()
        }
    }

    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    /// Labelled values of `record` in print order, values upper-cased where
    /// the font can show the upper-case form.
    pub fn fields_for(&self, record: &StickerRecord) -> Vec<StickerField> {
        self.specs
            .iter()
            .map(|spec| StickerField {
                label: spec.label.to_string(),
                value: printable_uppercase(record.value(spec.key)),
            })
            .collect()
    }
}
