use chrono::{Days, NaiveDateTime};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::DateRange;
use crate::core::{ReceiptNumber, SynthError};
use crate::corpus::Corpus;
use crate::format::{FormattingChoice, format_receipt_date};

/// Title, date line and number line of one receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptDetails {
    pub header: String,
    pub date: String,
    pub number: String,
}

/// Draw the receipt's date, number and title.
///
/// The date lies `min_days_back..=max_days_back` days before `reference`,
/// with an hour in `min_hour..=max_hour` and any minute.
pub fn draw_details<R: Rng + ?Sized>(
    corpus: &Corpus,
    range: &DateRange,
    formatting: &FormattingChoice,
    reference: NaiveDateTime,
    rng: &mut R,
) -> Result<ReceiptDetails, SynthError> {
    let days_back = if range.min_days_back <= range.max_days_back {
        rng.random_range(range.min_days_back..=range.max_days_back)
    } else {
        range.min_days_back
    };
    let hour = if range.min_hour <= range.max_hour {
        rng.random_range(range.min_hour..=range.max_hour)
    } else {
        range.min_hour
    };
    let minute = rng.random_range(0..=59u32);

    let day = u64::try_from(days_back)
        .ok()
        .and_then(|days| reference.date().checked_sub_days(Days::new(days)))
        .ok_or_else(|| SynthError::Generation(format!("{days_back} days back is out of range")))?;
    let date = format_receipt_date(day, hour, minute, formatting.date_style);

    let number = ReceiptNumber::random(rng).render(&formatting.number_template);

    let header = corpus
        .receipt_headers
        .choose(rng)
        .cloned()
        .ok_or_else(|| SynthError::Corpus("no receipt headers".into()))?;

    Ok(ReceiptDetails {
        header,
        date,
        number,
    })
}
