//! Presentation helpers over generated slots.

use std::collections::BTreeMap;

use crate::slots::AvailableSlot;

/// Date key format for grouping. Lexicographic order equals chronological order.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Partition slots by the calendar date of their start, keyed `"YYYY-MM-DD"`.
///
/// Slots keep their relative order within each date.
pub fn group_slots_by_date(slots: &[AvailableSlot]) -> BTreeMap<String, Vec<AvailableSlot>> {
    let mut grouped: BTreeMap<String, Vec<AvailableSlot>> = BTreeMap::new();
    for slot in slots {
        grouped
            .entry(slot.start.format(DATE_KEY_FORMAT).to_string())
            .or_default()
            .push(slot.clone());
    }
    grouped
}

/// Distinct dates that have at least one slot, ascending.
pub fn available_dates(slots: &[AvailableSlot]) -> Vec<String> {
    group_slots_by_date(slots).into_keys().collect()
}
