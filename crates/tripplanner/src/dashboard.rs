//! Derived overview of the whole plan.
//!
//! The summary is never stored. It is rebuilt from the live collections and
//! the current form values after every mutation.

use chrono::NaiveDate;
use serde::Serialize;

use crate::collection::CardCollection;
use crate::registry::CardKind;
use crate::trip::{TripDetail, DATE_FORMAT};

/// Display text for a summary field with no value yet.
pub const NOT_SET: &str = "Not set";

/// Overview of counts, dates and budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Number of flight cards.
    pub flight_count: usize,
    /// Number of hotel cards.
    pub hotel_count: usize,
    /// Number of booking cards.
    pub booking_count: usize,
    /// Headline naming the destination.
    pub destination_label: String,
    /// Start date for display.
    pub formatted_start_date: String,
    /// End date for display.
    pub formatted_end_date: String,
    /// Traveler count for display.
    pub traveler_display: String,
    /// Sum of all budget items.
    pub budget_total: f64,
    /// Budget total rounded to whole units, with currency.
    pub budget_display: String,
}

impl DashboardSummary {
    /// Rebuild the summary from scratch.
    #[must_use]
    pub fn compute(
        collections: &[CardCollection],
        trip: &TripDetail,
        currency_symbol: &str,
    ) -> Self {
        let count = |kind: CardKind| -> usize {
            collections
                .iter()
                .filter(|collection| collection.kind() == kind)
                .map(CardCollection::len)
                .sum()
        };
        let budget_total = trip.budget_total();

        Self {
            flight_count: count(CardKind::Flight),
            hotel_count: count(CardKind::Hotel),
            booking_count: count(CardKind::Booking),
            destination_label: destination_label(&trip.destination),
            formatted_start_date: display_date(&trip.start_date),
            formatted_end_date: display_date(&trip.end_date),
            traveler_display: or_not_set(&trip.travelers),
            budget_total,
            budget_display: format_summary_amount(currency_symbol, budget_total),
        }
    }
}

fn destination_label(destination: &str) -> String {
    let destination = destination.trim();
    if destination.is_empty() {
        "Your trip".to_string()
    } else {
        format!("Your trip to {destination}")
    }
}

fn or_not_set(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_SET.to_string()
    } else {
        value.to_string()
    }
}

/// Format a `YYYY-MM-DD` date as `Jun 1, 2025`.
///
/// Blank input shows [`NOT_SET`]; anything unparseable is shown verbatim.
#[must_use]
pub fn display_date(value: &str) -> String {
    if value.trim().is_empty() {
        return NOT_SET.to_string();
    }
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_or_else(|_| value.to_string(), |date| date.format("%b %-d, %Y").to_string())
}

/// Budget total as shown in the detailed budget view: two decimals.
#[must_use]
pub fn format_detail_amount(currency_symbol: &str, total: f64) -> String {
    format!("{currency_symbol}{total:.2}")
}

/// Budget total as shown in the summary: no decimals.
#[must_use]
pub fn format_summary_amount(currency_symbol: &str, total: f64) -> String {
    format!("{currency_symbol}{total:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::TripField;

    fn create_test_collections() -> Vec<CardCollection> {
        CardKind::ALL.into_iter().map(CardCollection::new).collect()
    }

    #[test]
    fn test_amount_formats() {
        assert_eq!(format_detail_amount("$", 150.5), "$150.50");
        assert_eq!(format_summary_amount("$", 150.5), "$150");
        assert_eq!(format_summary_amount("€", 0.0), "€0");
        assert_eq!(format_detail_amount("$", 0.0), "$0.00");
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2025-06-01"), "Jun 1, 2025");
        assert_eq!(display_date("2025-12-25"), "Dec 25, 2025");
        assert_eq!(display_date(""), NOT_SET);
        assert_eq!(display_date("soon"), "soon");
    }

    #[test]
    fn test_blank_plan() {
        let summary =
            DashboardSummary::compute(&create_test_collections(), &TripDetail::new(["Food:"]), "$");
        assert_eq!(summary.flight_count, 0);
        assert_eq!(summary.destination_label, "Your trip");
        assert_eq!(summary.formatted_start_date, NOT_SET);
        assert_eq!(summary.traveler_display, "1");
        assert_eq!(summary.budget_display, "$0");
    }

    #[test]
    fn test_counts_and_fields() {
        let mut collections = create_test_collections();
        collections[0].push_blank();
        collections[0].push_blank();
        collections[2].push_blank();

        let mut trip = TripDetail::new(["A:", "B:", "C:", "D:"]);
        trip.set(TripField::Destination, "Rome");
        trip.set(TripField::StartDate, "2025-06-01");
        trip.set(TripField::EndDate, "2025-06-04");
        trip.set(TripField::Travelers, "2");
        for (line, amount) in trip.budget.iter_mut().zip(["100", "", "abc", "50.5"]) {
            line.amount = amount.to_string();
        }

        let summary = DashboardSummary::compute(&collections, &trip, "$");
        assert_eq!(summary.flight_count, 2);
        assert_eq!(summary.hotel_count, 0);
        assert_eq!(summary.booking_count, 1);
        assert_eq!(summary.destination_label, "Your trip to Rome");
        assert_eq!(summary.formatted_start_date, "Jun 1, 2025");
        assert_eq!(summary.formatted_end_date, "Jun 4, 2025");
        assert_eq!(summary.traveler_display, "2");
        assert!((summary.budget_total - 150.5).abs() < f64::EPSILON);
        assert_eq!(summary.budget_display, "$150");
    }

    #[test]
    fn test_compute_is_idempotent() {
        let mut collections = create_test_collections();
        collections[1].push_blank();
        let trip = TripDetail::new(["Food:"]);

        let first = DashboardSummary::compute(&collections, &trip, "$");
        let second = DashboardSummary::compute(&collections, &trip, "$");
        assert_eq!(first, second);
    }
}
