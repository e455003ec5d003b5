//! Primary trip fields and the budget line items.
//!
//! [`TripDetail`] holds the live form values. [`TripRecord`] is the single
//! JSON record they are saved as.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Traveler count used when the field is blank.
const DEFAULT_TRAVELERS: &str = "1";

/// Date format of the date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest trip, in days, that gets an itinerary.
pub const MAX_TRIP_DAYS: u32 = 365;

/// One of the four primary trip inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripField {
    /// Where the trip goes.
    Destination,
    /// First day, `YYYY-MM-DD`.
    StartDate,
    /// Last day, `YYYY-MM-DD`.
    EndDate,
    /// Number of travelers.
    Travelers,
}

/// One budget row: its on-screen label and the entered amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLine {
    /// Label text as displayed, possibly with a trailing colon.
    pub label: String,
    /// Entered amount, unparsed.
    pub amount: String,
}

impl BudgetLine {
    /// Storage label for the row at `index`.
    ///
    /// The first `:` is dropped; a blank label falls back to `Item{index}`.
    #[must_use]
    pub fn storage_label(&self, index: usize) -> String {
        let label = self.label.replacen(':', "", 1);
        let label = label.trim();
        if label.is_empty() {
            format!("Item{index}")
        } else {
            label.to_string()
        }
    }
}

/// Live values of the trip detail form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripDetail {
    /// Destination text.
    pub destination: String,
    /// Start date text.
    pub start_date: String,
    /// End date text.
    pub end_date: String,
    /// Traveler count text.
    pub travelers: String,
    /// Budget rows in display order.
    pub budget: Vec<BudgetLine>,
}

/// Stored shape of the trip detail form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    /// Destination text.
    #[serde(default)]
    pub destination: Option<String>,
    /// Start date text.
    #[serde(default)]
    pub start_date: Option<String>,
    /// End date text.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Traveler count; numbers are accepted on read.
    #[serde(default, deserialize_with = "text_or_number")]
    pub travelers: Option<String>,
    /// Amounts keyed by storage label.
    #[serde(default)]
    pub budget: BTreeMap<String, String>,
}

fn text_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }),
    )
}

impl TripDetail {
    /// A blank form with one budget row per label.
    #[must_use]
    pub fn new<I, L>(budget_labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            destination: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            travelers: DEFAULT_TRAVELERS.to_string(),
            budget: budget_labels
                .into_iter()
                .map(|label| BudgetLine {
                    label: label.into(),
                    amount: String::new(),
                })
                .collect(),
        }
    }

    /// Current value of a primary field.
    #[must_use]
    pub fn get(&self, field: TripField) -> &str {
        match field {
            TripField::Destination => &self.destination,
            TripField::StartDate => &self.start_date,
            TripField::EndDate => &self.end_date,
            TripField::Travelers => &self.travelers,
        }
    }

    /// Overwrite a primary field.
    pub fn set(&mut self, field: TripField, value: impl Into<String>) {
        let slot = match field {
            TripField::Destination => &mut self.destination,
            TripField::StartDate => &mut self.start_date,
            TripField::EndDate => &mut self.end_date,
            TripField::Travelers => &mut self.travelers,
        };
        *slot = value.into();
    }

    /// Index of the budget row whose label or storage label is `label`.
    #[must_use]
    pub fn budget_index(&self, label: &str) -> Option<usize> {
        self.budget
            .iter()
            .enumerate()
            .position(|(i, line)| line.label == label || line.storage_label(i) == label)
    }

    /// Snapshot the form as a storable record.
    ///
    /// Rows sharing a storage label collapse to the last one.
    #[must_use]
    pub fn to_record(&self) -> TripRecord {
        let travelers = if self.travelers.is_empty() {
            DEFAULT_TRAVELERS.to_string()
        } else {
            self.travelers.clone()
        };
        TripRecord {
            destination: Some(self.destination.clone()),
            start_date: Some(self.start_date.clone()),
            end_date: Some(self.end_date.clone()),
            travelers: Some(travelers),
            budget: self
                .budget
                .iter()
                .enumerate()
                .map(|(i, line)| (line.storage_label(i), line.amount.clone()))
                .collect(),
        }
    }

    /// Assign the present, non-empty values of a stored record.
    ///
    /// Absent fields keep their current value.
    pub fn apply_record(&mut self, record: &TripRecord) {
        let present = |value: &Option<String>| value.as_ref().filter(|v| !v.is_empty()).cloned();

        if let Some(destination) = present(&record.destination) {
            self.destination = destination;
        }
        if let Some(start) = present(&record.start_date) {
            self.start_date = start;
        }
        if let Some(end) = present(&record.end_date) {
            self.end_date = end;
        }
        if let Some(travelers) = present(&record.travelers) {
            self.travelers = travelers;
        }
        for i in 0..self.budget.len() {
            let label = self.budget[i].storage_label(i);
            if let Some(amount) = record.budget.get(&label).filter(|a| !a.is_empty()) {
                self.budget[i].amount.clone_from(amount);
            }
        }
    }

    /// Sum of every budget amount; unparseable amounts count as zero.
    #[must_use]
    pub fn budget_total(&self) -> f64 {
        self.budget.iter().map(|line| parse_amount(&line.amount)).sum()
    }

    /// Parse both dates and return the trip length in days.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] for a blank or malformed date and
    /// [`Error::InvalidDateRange`] when the end precedes the start and
    /// [`Error::TripTooLong`] past [`MAX_TRIP_DAYS`].
    pub fn duration_days(&self) -> Result<u32> {
        let start = parse_date("start date", &self.start_date)?;
        let end = parse_date("end date", &self.end_date)?;
        if start > end {
            return Err(Error::InvalidDateRange {
                start: self.start_date.clone(),
                end: self.end_date.clone(),
            });
        }
        let days = (end - start).num_days();
        match u32::try_from(days) {
            Ok(days) if days <= MAX_TRIP_DAYS => Ok(days),
            _ => Err(Error::TripTooLong {
                days,
                max: MAX_TRIP_DAYS,
            }),
        }
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn amount_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("amount pattern is valid")
    })
}

/// Lenient amount parse: the longest leading number, or zero.
///
/// `"12.5"` is 12.5, `"40 EUR"` is 40, `"abc"` and `""` are 0.
#[must_use]
pub fn parse_amount(text: &str) -> f64 {
    amount_prefix()
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
