//! Raw form state and lenient decimal coercion.
//!
//! A [`PredictionForm`] holds exactly what a user typed. Turning it into a
//! [`PredictionInput`] never fails: blank or unreadable fields become `0.0`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PredictionInput;

/// Named input of the prediction form, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Open,
    High,
    Low,
    Close,
    Volume,
    Return1,
    Ma7,
    Ma21,
    Std7,
}

impl FormField {
    pub const ALL: [Self; 9] = [
        Self::Open,
        Self::High,
        Self::Low,
        Self::Close,
        Self::Volume,
        Self::Return1,
        Self::Ma7,
        Self::Ma21,
        Self::Std7,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
            Self::Return1 => "return1",
            Self::Ma7 => "ma7",
            Self::Ma21 => "ma21",
            Self::Std7 => "std7",
        }
    }
}

impl Display for FormField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown form field '{value}'"))
    }
}

/// Uncoerced text of every prediction field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionForm {
    #[serde(default)]
    pub open: String,
    #[serde(default)]
    pub high: String,
    #[serde(default)]
    pub low: String,
    #[serde(default)]
    pub close: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub return1: String,
    #[serde(default)]
    pub ma7: String,
    #[serde(default)]
    pub ma21: String,
    #[serde(default)]
    pub std7: String,
}

impl PredictionForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Open => &self.open,
            FormField::High => &self.high,
            FormField::Low => &self.low,
            FormField::Close => &self.close,
            FormField::Volume => &self.volume,
            FormField::Return1 => &self.return1,
            FormField::Ma7 => &self.ma7,
            FormField::Ma21 => &self.ma21,
            FormField::Std7 => &self.std7,
        }
    }

    /// Returns a copy with one field replaced.
    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            FormField::Open => self.open = value,
            FormField::High => self.high = value,
            FormField::Low => self.low = value,
            FormField::Close => self.close = value,
            FormField::Volume => self.volume = value,
            FormField::Return1 => self.return1 = value,
            FormField::Ma7 => self.ma7 = value,
            FormField::Ma21 => self.ma21 = value,
            FormField::Std7 => self.std7 = value,
        }
        self
    }

    pub fn to_input(&self) -> PredictionInput {
        PredictionInput {
            open: coerce_decimal(&self.open),
            high: coerce_decimal(&self.high),
            low: coerce_decimal(&self.low),
            close: coerce_decimal(&self.close),
            volume: coerce_decimal(&self.volume),
            return1: coerce_decimal(&self.return1),
            ma7: coerce_decimal(&self.ma7),
            ma21: coerce_decimal(&self.ma21),
            std7: coerce_decimal(&self.std7),
        }
    }

    /// Fields holding text that coerced to zero without reading as zero.
    pub fn defaulted_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| {
                let raw = self.get(*field).trim();
                !raw.is_empty() && coerce_decimal(raw) == 0.0 && !reads_as_zero(raw)
            })
            .collect()
    }
}

/// Renders a numeric snapshot back into form text, e.g. to prefill from a quote.
impl From<&PredictionInput> for PredictionForm {
    fn from(input: &PredictionInput) -> Self {
        Self {
            open: input.open.to_string(),
            high: input.high.to_string(),
            low: input.low.to_string(),
            close: input.close.to_string(),
            volume: input.volume.to_string(),
            return1: input.return1.to_string(),
            ma7: input.ma7.to_string(),
            ma21: input.ma21.to_string(),
            std7: input.std7.to_string(),
        }
    }
}

impl From<&PredictionForm> for PredictionInput {
    fn from(form: &PredictionForm) -> Self {
        form.to_input()
    }
}

/// Parses the longest leading decimal literal of `raw`.
///
/// Mirrors `parseFloat(raw) || 0`: leading whitespace is skipped, trailing
/// garbage is ignored (`"12abc"` is 12), and anything that yields no number,
/// zero, or a non-finite value becomes `0.0`.
pub fn coerce_decimal(raw: &str) -> f64 {
    let text = raw.trim_start();
    let end = decimal_prefix_len(text);
    if end == 0 {
        return 0.0;
    }

    match text[..end].parse::<f64>() {
        Ok(value) if value.is_finite() && value != 0.0 => value,
        _ => 0.0,
    }
}

fn decimal_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut index = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        index += 1;
    }

    let int_start = index;
    while bytes.get(index).is_some_and(u8::is_ascii_digit) {
        index += 1;
    }
    let mut digits = index - int_start;

    if bytes.get(index) == Some(&b'.') {
        let frac_start = index + 1;
        let mut cursor = frac_start;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        digits += cursor - frac_start;
        if digits > 0 {
            index = cursor;
        }
    }

    if digits == 0 {
        return 0;
    }

    if matches!(bytes.get(index), Some(b'e' | b'E')) {
        let mut cursor = index + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exp_start = cursor;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        if cursor > exp_start {
            index = cursor;
        }
    }

    index
}

fn reads_as_zero(raw: &str) -> bool {
    let end = decimal_prefix_len(raw);
    end > 0 && raw[..end].parse::<f64>().is_ok_and(|value| value == 0.0)
}
