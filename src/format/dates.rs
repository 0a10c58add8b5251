use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Separator style of the printed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    /// `dd-mm-yyyy`
    #[default]
    Dash,
    /// `dd.mm.yyyy`
    Dot,
    /// `dd/mm/yyyy`
    Slash,
}

impl DateStyle {
    /// `chrono` format pattern for this style.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Dash => "%d-%m-%Y",
            Self::Dot => "%d.%m.%Y",
            Self::Slash => "%d/%m/%Y",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dash => "dash",
            Self::Dot => "dot",
            Self::Slash => "slash",
        }
    }
}

/// Render the receipt's date line, e.g. `Data: 05-03-2024 14:07`.
pub fn format_receipt_date(date: NaiveDate, hour: u32, minute: u32, style: DateStyle) -> String {
    format!(
        "Data: {} {hour:02}:{minute:02}",
        date.format(style.pattern())
    )
}
