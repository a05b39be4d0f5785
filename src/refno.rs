//! Lab reference number issuing.
//!
//! Numbers look like `LAB-2026-000042`: a fixed prefix, the issuing year in
//! the store's timezone and a six digit sequence that restarts every year.

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::{Result, StickerError};

pub const REF_PREFIX: &str = "LAB";
pub const SEQUENCE_WIDTH: usize = 6;
/// Largest sequence that still fits the fixed width.
pub const MAX_SEQUENCE: u32 = 999_999;

/// A parsed reference number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabRefNo {
    pub year: i32,
    pub sequence: u32,
}

impl LabRefNo {
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |reason: &str| StickerError::InvalidRefNo {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = value.trim().splitn(3, '-');
        let (Some(prefix), Some(year), Some(seq)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("expected LAB-YYYY-NNNNNN"));
        };
        if prefix != REF_PREFIX {
            return Err(invalid("unknown prefix"));
        }
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("year must be four digits"));
        }
        if seq.len() != SEQUENCE_WIDTH || !seq.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("sequence must be six digits"));
        }

        let year = year.parse().map_err(|_| invalid("year must be four digits"))?;
        let sequence = seq
            .parse()
            .map_err(|_| invalid("sequence must be six digits"))?;
        Ok(Self { year, sequence })
    }
}

impl std::fmt::Display for LabRefNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{REF_PREFIX}-{:04}-{:0width$}",
            self.year,
            self.sequence,
            width = SEQUENCE_WIDTH
        )
    }
}

/// Next reference number after `last_issued`, for a record created at `now`.
///
/// The sequence continues when `last_issued` is from the same year and starts
/// at 1 otherwise. A last number from another year may be in any legacy form;
/// one from the current year must parse.
pub fn next_lab_ref_no(last_issued: Option<&str>, now: DateTime<Tz>) -> Result<String> {
    let year = now.year();
    let current_year_prefix = format!("{REF_PREFIX}-{year:04}-");

    let sequence = match last_issued.map(str::trim) {
        Some(last) if last.starts_with(&current_year_prefix) => {
            let parsed = LabRefNo::parse(last)?;
            if parsed.sequence >= MAX_SEQUENCE {
                return Err(StickerError::InvalidRefNo {
                    value: last.to_string(),
                    reason: format!("sequence for {year} is exhausted"),
                });
            }
            parsed.sequence + 1
        }
        _ => 1,
    };

    let next = LabRefNo { year, sequence };
    debug!(last = ?last_issued, next = %next, "Issued lab reference number");
    Ok(next.to_string())
}
