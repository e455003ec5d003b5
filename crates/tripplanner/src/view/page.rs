//! Retained plain-text page.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use crate::checklist::Checklist;
use crate::collection::{Card, CardCollection};
use crate::dashboard::DashboardSummary;
use crate::itinerary::Itinerary;
use crate::registry::InputKind;

use super::{Section, Surface};

/// A page that keeps the latest rendering of each section as text.
#[derive(Debug, Clone, Default)]
pub struct TextPage {
    missing: BTreeSet<Section>,
    regions: BTreeMap<Section, String>,
    alerts: Vec<String>,
}

impl TextPage {
    /// A page with every section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The same page without `section`.
    #[must_use]
    pub fn without(mut self, section: Section) -> Self {
        self.missing.insert(section);
        self.regions.remove(&section);
        self
    }

    /// Latest text of a section, if it was ever rendered.
    #[must_use]
    pub fn region(&self, section: Section) -> Option<&str> {
        self.regions.get(&section).map(String::as_str)
    }

    /// Alerts shown so far, oldest first.
    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Drain the alerts shown so far.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    fn set(&mut self, section: Section, text: String) {
        if self.has_section(section) {
            self.regions.insert(section, text);
        }
    }
}

fn render_card(out: &mut String, position: usize, card: &Card) {
    let spec = card.spec();
    let _ = writeln!(out, "[{}] {} {}", spec.icon, spec.title, position);
    for (field, value) in spec.fields.iter().zip(card.values()) {
        let shown = match field.input {
            InputKind::Select => field.option_label(value).map_or(value.as_str(), |label| label),
            _ => value.as_str(),
        };
        if value.is_empty() {
            let _ = writeln!(out, "  {}:", field.label);
        } else {
            let _ = writeln!(out, "  {}: {}", field.label, shown);
        }
    }
}

impl Surface for TextPage {
    fn has_section(&self, section: Section) -> bool {
        !self.missing.contains(&section)
    }

    fn render_collection(&mut self, collection: &CardCollection) {
        let mut out = String::new();
        match collection.placeholder() {
            Some(placeholder) => {
                let _ = writeln!(out, "(i) {placeholder}");
            }
            None => {
                for (i, card) in collection.cards().iter().enumerate() {
                    render_card(&mut out, i + 1, card);
                }
            }
        }
        self.set(Section::for_kind(collection.kind()), out);
    }

    fn render_budget_total(&mut self, total: &str) {
        self.set(Section::Budget, format!("Total: {total}\n"));
    }

    fn render_summary(&mut self, summary: &DashboardSummary) {
        let mut out = String::new();
        let _ = writeln!(out, "{}", summary.destination_label);
        let _ = writeln!(out, "  Start:     {}", summary.formatted_start_date);
        let _ = writeln!(out, "  End:       {}", summary.formatted_end_date);
        let _ = writeln!(out, "  Travelers: {}", summary.traveler_display);
        let _ = writeln!(out, "  Flights:   {}", summary.flight_count);
        let _ = writeln!(out, "  Hotels:    {}", summary.hotel_count);
        let _ = writeln!(out, "  Bookings:  {}", summary.booking_count);
        let _ = writeln!(out, "  Budget:    {}", summary.budget_display);
        self.set(Section::Overview, out);
    }

    fn render_itinerary(&mut self, itinerary: &Itinerary) {
        let mut out = String::new();
        for day in itinerary.days() {
            let _ = writeln!(out, "Day {}", day.day_number);
            for activity in &day.activities {
                match activity.slot {
                    Some(slot) => {
                        let _ = writeln!(out, "  [{}] {}: {}", slot.icon(), slot, activity.text);
                    }
                    None => {
                        let _ = writeln!(out, "  - {}", activity.text);
                    }
                }
            }
        }
        self.set(Section::Itinerary, out);
    }

    fn render_checklist(&mut self, checklist: &Checklist) {
        let mut out = String::new();
        for item in checklist.items() {
            let mark = if item.checked { 'x' } else { ' ' };
            let _ = writeln!(out, "[{mark}] {} ({})", item.name, item.id);
        }
        self.set(Section::Checklist, out);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CardKind;

    #[test]
    fn test_empty_collection_renders_one_placeholder() {
        let mut page = TextPage::new();
        let collection = CardCollection::new(CardKind::Hotel);
        page.render_collection(&collection);

        let text = page.region(Section::Hotels).unwrap();
        assert_eq!(text.matches("(i) ").count(), 1);
        assert!(text.contains("track your accommodations"));
    }

    #[test]
    fn test_cards_render_without_placeholder() {
        let mut page = TextPage::new();
        let mut collection = CardCollection::new(CardKind::Booking);
        collection
            .push_blank()
            .set_field("booking_type", "restaurant")
            .unwrap();
        page.render_collection(&collection);

        let text = page.region(Section::Bookings).unwrap();
        assert!(!text.contains("(i) "));
        assert!(text.contains("[calendar-check-fill] Booking Details 1"));
        assert!(text.contains("Booking Type: Restaurant"));
    }

    #[test]
    fn test_missing_section_is_not_rendered() {
        let mut page = TextPage::new().without(Section::Flights);
        page.render_collection(&CardCollection::new(CardKind::Flight));
        assert!(!page.has_section(Section::Flights));
        assert!(page.region(Section::Flights).is_none());
    }

    #[test]
    fn test_alerts_accumulate() {
        let mut page = TextPage::new();
        page.alert("one");
        page.alert("two");
        assert_eq!(page.alerts(), ["one".to_string(), "two".to_string()]);
        assert_eq!(page.take_alerts().len(), 2);
        assert!(page.alerts().is_empty());
    }

    #[test]
    fn test_render_itinerary() {
        let mut page = TextPage::new();
        let mut itinerary = Itinerary::default();
        itinerary.generate(1);
        itinerary.day_mut(1).unwrap().add_activity();
        page.render_itinerary(&itinerary);

        let text = page.region(Section::Itinerary).unwrap();
        assert!(text.starts_with("Day 1\n"));
        assert!(text.contains("[sunrise] Morning:"));
        assert!(text.contains("  - "));
    }
}
