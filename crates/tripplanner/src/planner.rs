//! The planner: all page state plus the event handlers that mutate it.
//!
//! Every handler runs to completion synchronously. A handler that changes
//! persisted state writes it first and recomputes the dashboard afterwards,
//! so the overview always reflects what was just written.

use tracing::{debug, error, info, warn};

use crate::checklist::Checklist;
use crate::collection::{CardCollection, CardId};
use crate::config::{Config, KeysConfig};
use crate::dashboard::{format_detail_amount, DashboardSummary};
use crate::error::{Error, Result};
use crate::fields::FieldMap;
use crate::itinerary::Itinerary;
use crate::registry::CardKind;
use crate::storage::{KeyValueStore, LocalStore};
use crate::trip::{TripDetail, TripField, TripRecord, MAX_TRIP_DAYS};
use crate::view::{Section, Surface};

/// Page state bound to a store and a rendering surface.
#[derive(Debug)]
pub struct TripPlanner<S, P> {
    store: LocalStore<S>,
    page: P,
    keys: KeysConfig,
    currency_symbol: String,
    trip: TripDetail,
    collections: [CardCollection; 3],
    itinerary: Itinerary,
    checklist: Checklist,
    summary: DashboardSummary,
}

fn slot(kind: CardKind) -> usize {
    match kind {
        CardKind::Flight => 0,
        CardKind::Hotel => 1,
        CardKind::Booking => 2,
    }
}

impl<S: KeyValueStore, P: Surface> TripPlanner<S, P> {
    /// Load the page: restore the trip record, then every card collection
    /// in order, then compute the budget total and the overview.
    pub fn bootstrap(backend: S, page: P, config: &Config) -> Self {
        let trip = TripDetail::new(config.budget.items.iter().cloned());
        let collections = CardKind::ALL.map(CardCollection::new);
        let summary = DashboardSummary::compute(&collections, &trip, &config.budget.currency_symbol);

        let mut planner = Self {
            store: LocalStore::new(backend),
            page,
            keys: config.keys.clone(),
            currency_symbol: config.budget.currency_symbol.clone(),
            trip,
            collections,
            itinerary: Itinerary::default(),
            checklist: Checklist::default(),
            summary,
        };

        planner.load_trip();
        for kind in CardKind::ALL {
            planner.restore(kind);
        }
        planner.recompute_budget();
        if planner.page.has_section(Section::Itinerary) {
            planner.page.render_itinerary(&planner.itinerary);
        }
        if planner.page.has_section(Section::Checklist) {
            planner.page.render_checklist(&planner.checklist);
        }

        info!(
            "Planner ready: {} flights, {} hotels, {} bookings",
            planner.summary.flight_count, planner.summary.hotel_count, planner.summary.booking_count
        );
        planner
    }

    // === Accessors ===

    /// Live trip form values.
    pub fn trip(&self) -> &TripDetail {
        &self.trip
    }

    /// Live cards of one kind.
    pub fn collection(&self, kind: CardKind) -> &CardCollection {
        &self.collections[slot(kind)]
    }

    /// Current overview.
    pub fn summary(&self) -> &DashboardSummary {
        &self.summary
    }

    /// Current itinerary.
    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    /// Current packing list.
    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// The rendering surface.
    pub fn page(&self) -> &P {
        &self.page
    }

    /// The rendering surface, mutably.
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// The underlying store.
    pub fn store(&self) -> &LocalStore<S> {
        &self.store
    }

    /// Id of the card at a 1-based position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CardNotFound`] if the position is out of range.
    pub fn card_id_at(&self, kind: CardKind, position: usize) -> Result<CardId> {
        self.collection(kind)
            .id_at(position)
            .ok_or_else(|| Error::card_at(kind, position))
    }

    // === Trip detail ===

    /// Write the trip form as one record.
    pub fn save_trip(&mut self) {
        if !self.page.has_section(Section::TripDetails) {
            return;
        }
        self.store.put(&self.keys.trip, &self.trip.to_record());
    }

    /// Apply the stored trip record, if any, and recompute the budget.
    pub fn load_trip(&mut self) {
        if !self.page.has_section(Section::TripDetails) {
            return;
        }
        match self.store.get::<TripRecord>(&self.keys.trip) {
            Some(record) => {
                self.trip.apply_record(&record);
                self.recompute_budget();
            }
            None => debug!("No stored trip record under '{}'", self.keys.trip),
        }
    }

    /// An edit to one of the primary trip fields.
    pub fn input_trip_field(&mut self, field: TripField, value: impl Into<String>) {
        if !self.page.has_section(Section::TripDetails) {
            return;
        }
        self.trip.set(field, value);
        self.save_trip();
        self.recompute_dashboard();
    }

    /// An edit to a budget amount, addressed by label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownBudgetItem`] if no row has this label.
    pub fn input_budget(&mut self, label: &str, amount: impl Into<String>) -> Result<()> {
        if !self.page.has_section(Section::Budget) {
            return Ok(());
        }
        let index = self
            .trip
            .budget_index(label)
            .ok_or_else(|| Error::UnknownBudgetItem {
                label: label.to_string(),
            })?;
        self.trip.budget[index].amount = amount.into();
        self.save_trip();
        self.recompute_budget();
        Ok(())
    }

    // === Card collections ===

    /// Append a blank card and persist the whole collection.
    ///
    /// Returns `None` when the page has no section for this kind.
    pub fn add_card(&mut self, kind: CardKind) -> Option<CardId> {
        if !self.page.has_section(Section::for_kind(kind)) {
            return None;
        }
        let id = self.collections[slot(kind)].push_blank().id();
        debug!("Added {} card {}", kind, id);
        self.collection_changed(kind);
        Some(id)
    }

    /// Detach a card and persist what remains. There is no undo.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CardNotFound`] if no card has this id.
    pub fn remove_card(&mut self, kind: CardKind, id: CardId) -> Result<()> {
        if !self.page.has_section(Section::for_kind(kind)) {
            return Ok(());
        }
        self.collections[slot(kind)].remove(id)?;
        debug!("Removed {} card {}", kind, id);
        self.collection_changed(kind);
        Ok(())
    }

    /// An edit to one field of a card.
    ///
    /// Like any input on the page, this also re-saves the trip record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CardNotFound`] or [`Error::UnknownField`].
    pub fn input_card_field(
        &mut self,
        kind: CardKind,
        id: CardId,
        field: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        if !self.page.has_section(Section::for_kind(kind)) {
            return Ok(());
        }
        let card = self.collections[slot(kind)]
            .get_mut(id)
            .ok_or_else(|| Error::CardNotFound {
                kind,
                reference: format!("with id {id}"),
            })?;
        card.set_field(field, value)?;
        self.collection_changed(kind);
        self.save_trip();
        Ok(())
    }

    /// Write every card of `kind`, in order, under its storage key.
    pub fn persist(&mut self, kind: CardKind) {
        let records = self.collections[slot(kind)].to_records();
        self.store.put(self.keys.for_kind(kind), &records);
    }

    /// Rebuild the cards of `kind` from storage, in stored order.
    ///
    /// Meant to run once per load; cards are appended to whatever the
    /// collection already holds. Missing or malformed data restores nothing.
    pub fn restore(&mut self, kind: CardKind) {
        if !self.page.has_section(Section::for_kind(kind)) {
            return;
        }
        let key = self.keys.for_kind(kind).to_string();
        let Some(records) = self.store.get::<Vec<FieldMap>>(&key) else {
            debug!("Nothing to restore under '{}'", key);
            self.page.render_collection(&self.collections[slot(kind)]);
            return;
        };

        let collection = &mut self.collections[slot(kind)];
        for (position, record) in records.iter().enumerate() {
            let overflow = collection.push_blank().apply_field_map(record);
            if overflow > 0 {
                warn!(
                    "Stored {} card {} has {} fields beyond the current template",
                    kind,
                    position + 1,
                    overflow
                );
            }
        }
        debug!("Restored {} {} cards", records.len(), kind);
        self.collection_changed(kind);
    }

    fn collection_changed(&mut self, kind: CardKind) {
        self.persist(kind);
        self.page.render_collection(&self.collections[slot(kind)]);
        self.recompute_dashboard();
    }

    // === Derived views ===

    /// Redraw the budget total and the overview.
    pub fn recompute_budget(&mut self) {
        if self.page.has_section(Section::Budget) {
            let total = format_detail_amount(&self.currency_symbol, self.trip.budget_total());
            self.page.render_budget_total(&total);
        }
        self.recompute_dashboard();
    }

    /// Rebuild the overview from live state and redraw it.
    pub fn recompute_dashboard(&mut self) {
        self.summary = DashboardSummary::compute(&self.collections, &self.trip, &self.currency_symbol);
        if self.page.has_section(Section::Overview) {
            self.page.render_summary(&self.summary);
        }
    }

    // === Trip submission and itinerary ===

    /// Validate the dates, then regenerate the itinerary and overview.
    ///
    /// Returns the trip length in days, or `None` when the page has no trip
    /// form. Invalid dates are alerted and nothing else changes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`], [`Error::InvalidDateRange`] or
    /// [`Error::TripTooLong`].
    pub fn submit_trip(&mut self) -> Result<Option<u32>> {
        if !self.page.has_section(Section::TripDetails) {
            return Ok(None);
        }
        let days = match self.trip.duration_days() {
            Ok(days) => days,
            Err(e) => {
                if e.is_user_input() {
                    self.page.alert(&e.to_string());
                } else {
                    error!("Trip submission failed: {}", e);
                }
                return Err(e);
            }
        };

        self.page.alert(&format!(
            "Trip created!\nDestination: {}\nDuration: {} days\nTravelers: {}",
            self.trip.destination, days, self.trip.travelers
        ));
        if self.page.has_section(Section::Itinerary) {
            self.itinerary.generate(days);
            self.page.render_itinerary(&self.itinerary);
        }
        self.recompute_dashboard();
        Ok(Some(days))
    }

    /// Append one day past the last. Returns its number, or `None` once the
    /// itinerary holds [`MAX_TRIP_DAYS`] days.
    pub fn add_day(&mut self) -> Option<u32> {
        if !self.page.has_section(Section::Itinerary)
            || self.itinerary.len() >= MAX_TRIP_DAYS as usize
        {
            return None;
        }
        let day = self.itinerary.add_day();
        self.page.render_itinerary(&self.itinerary);
        Some(day)
    }

    /// Append an untyped activity row to a day. Returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DayNotFound`] if the day does not exist.
    pub fn add_activity(&mut self, day: u32) -> Result<Option<usize>> {
        if !self.page.has_section(Section::Itinerary) {
            return Ok(None);
        }
        let index = self
            .itinerary
            .day_mut(day)
            .ok_or(Error::DayNotFound { day })?
            .add_activity();
        self.page.render_itinerary(&self.itinerary);
        Ok(Some(index))
    }

    /// An edit to an activity's text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DayNotFound`] or [`Error::ActivityNotFound`].
    pub fn set_activity(&mut self, day: u32, index: usize, text: impl Into<String>) -> Result<()> {
        if !self.page.has_section(Section::Itinerary) {
            return Ok(());
        }
        let activity = self
            .itinerary
            .day_mut(day)
            .ok_or(Error::DayNotFound { day })?
            .activities
            .get_mut(index)
            .ok_or(Error::ActivityNotFound { day, index })?;
        activity.text = text.into();
        self.page.render_itinerary(&self.itinerary);
        self.save_trip();
        Ok(())
    }

    // === Packing checklist ===

    /// Add a packing item. Blank names are ignored.
    pub fn add_checklist_item(&mut self, name: &str) -> Option<u64> {
        if !self.page.has_section(Section::Checklist) {
            return None;
        }
        let id = self.checklist.add(name)?;
        self.page.render_checklist(&self.checklist);
        Some(id)
    }

    /// Remove a packing item. Returns whether it existed.
    pub fn remove_checklist_item(&mut self, id: u64) -> bool {
        if !self.page.has_section(Section::Checklist) || !self.checklist.remove(id) {
            return false;
        }
        self.page.render_checklist(&self.checklist);
        true
    }

    /// Tick or untick a packing item. Returns its new state.
    pub fn toggle_checklist_item(&mut self, id: u64) -> Option<bool> {
        if !self.page.has_section(Section::Checklist) {
            return None;
        }
        let checked = self.checklist.toggle(id)?;
        self.page.render_checklist(&self.checklist);
        self.save_trip();
        Some(checked)
    }
}
