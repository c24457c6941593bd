//! Planner session state
//!
//! A [`Session`] holds everything the user has chosen: the selected courses,
//! which of them are marked for registration and with what weight, the
//! search filters, the detective order and the chosen time slots. It is
//! restored from a [`Store`] against the current catalog and written back
//! with [`Session::persist`].

use crate::core::catalog::find_course;
use crate::core::detective::restore_order;
use crate::core::export::{build_export, clamp_weight, parse_import, parse_weight, render_script, ExportEntry, ImportError};
use crate::core::filter::{FilterContext, RequiredCourseFilters};
use crate::core::models::{default_order, AdvancedFilters, Course, OrderElement, TimeSlot};
use crate::core::store::{keys, Store};
use crate::{debug, info};
use serde_json::Value;
use std::collections::BTreeMap;

/// Mutable session state of the planner
#[derive(Debug, Clone)]
pub struct Session {
    selected: Vec<Course>,
    /// Stored selection ids the current catalog does not know
    unresolved: Vec<String>,
    marked: Vec<String>,
    weights: BTreeMap<String, u8>,
    /// Basic search text
    pub basic_filter: String,
    /// Advanced search filters
    pub advanced_filters: AdvancedFilters,
    /// 學期必修 view filters
    pub required_filters: RequiredCourseFilters,
    /// Detective bucket order
    pub order: Vec<OrderElement>,
    /// Detective time slots
    pub time_slots: Vec<TimeSlot>,
    /// Keep courses clashing with the selection in search results
    pub display_conflict_courses: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            unresolved: Vec::new(),
            marked: Vec::new(),
            weights: BTreeMap::new(),
            basic_filter: String::new(),
            advanced_filters: AdvancedFilters::default(),
            required_filters: RequiredCourseFilters::default(),
            order: default_order(),
            time_slots: Vec::new(),
            display_conflict_courses: true,
        }
    }
}

impl Session {
    /// Empty session with default filters and order
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a session from the store
    ///
    /// Selected ids are looked up in `catalog`. Ids the catalog does not know
    /// are left out of the selection but kept, so [`Session::persist`] writes
    /// them back unchanged. Malformed entries fall back to their defaults.
    #[must_use]
    pub fn restore(store: &Store, catalog: &[Course]) -> Self {
        let mut session = Self::new();

        let ids: Vec<String> = store.get_json(keys::SELECTED_COURSES).unwrap_or_default();
        for id in &ids {
            match find_course(catalog, id) {
                Some(course) => {
                    session.select(course);
                }
                None => {
                    debug!("Keeping stored selection '{id}' missing from catalog");
                    if !session.unresolved.contains(id) {
                        session.unresolved.push(id.clone());
                    }
                }
            }
        }

        let marked: Vec<String> = store.get_json(keys::ADDED_SELECTED_COURSES).unwrap_or_default();
        for id in marked {
            if !session.is_marked(&id) {
                session.marked.push(id);
            }
        }
        let raw_weights: BTreeMap<String, Value> = store.get_json(keys::COURSE_WEIGHT).unwrap_or_default();
        session.weights = raw_weights
            .iter()
            .map(|(id, value)| (id.clone(), parse_weight(value)))
            .collect();

        if let Some(text) = store.get_str(keys::BASIC_FILTER) {
            session.basic_filter = text.to_string();
        }
        if let Some(filters) = store.get_json(keys::ADVANCED_FILTERS) {
            session.advanced_filters = filters;
        }
        if let Some(filters) = store.get_json(keys::REQUIRED_COURSE_FILTERS) {
            session.required_filters = filters;
        }
        if let Some(order) = store.get_json::<Vec<OrderElement>>(keys::ORDER_ELEMENTS) {
            session.order = restore_order(order);
        }
        if let Some(slots) = store.get_json(keys::SEARCH_TIME_SLOT) {
            session.time_slots = slots;
        }
        if let Some(display) = store.get_json(keys::DISPLAY_CONFLICT_COURSES) {
            session.display_conflict_courses = display;
        }

        session
    }

    /// Write the session into the store
    ///
    /// Unresolved ids follow the selected ones. An empty selection removes
    /// the selection key.
    pub fn persist(&self, store: &mut Store) {
        let mut ids = self.selected_ids();
        ids.extend(self.unresolved.iter().map(String::as_str));
        if ids.is_empty() {
            store.remove(keys::SELECTED_COURSES);
        } else {
            store.set(keys::SELECTED_COURSES, &ids);
        }
        store.set(keys::ADDED_SELECTED_COURSES, &self.marked);
        store.set(keys::COURSE_WEIGHT, &self.weights);
        store.set(keys::BASIC_FILTER, &self.basic_filter);
        store.set(keys::ADVANCED_FILTERS, &self.advanced_filters);
        store.set(keys::REQUIRED_COURSE_FILTERS, &self.required_filters);
        store.set(keys::ORDER_ELEMENTS, &self.order);
        store.set(keys::SEARCH_TIME_SLOT, &self.time_slots);
        store.set(keys::DISPLAY_CONFLICT_COURSES, &self.display_conflict_courses);
    }

    /// Selected courses in selection order
    #[must_use]
    pub fn selected(&self) -> &[Course] {
        &self.selected
    }

    /// Ids of the selected courses
    #[must_use]
    pub fn selected_ids(&self) -> Vec<&str> {
        self.selected.iter().map(|c| c.id.as_str()).collect()
    }

    /// Stored ids that did not resolve against the catalog
    #[must_use]
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// Whether a course with this id is selected
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|c| c.id == id)
    }

    /// Add a course to the selection; `false` if its id is already selected
    pub fn select(&mut self, course: &Course) -> bool {
        if self.is_selected(&course.id) {
            return false;
        }
        self.unresolved.retain(|id| *id != course.id);
        self.selected.push(course.clone());
        true
    }

    /// Remove a course from the selection; `false` if it was not selected
    pub fn deselect(&mut self, id: &str) -> bool {
        let before = self.selected.len() + self.unresolved.len();
        self.selected.retain(|c| c.id != id);
        self.unresolved.retain(|u| u != id);
        self.selected.len() + self.unresolved.len() != before
    }

    /// Drop every selected course, resolved or not
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.unresolved.clear();
    }

    /// Search context for the conflict pass of the filter engine
    #[must_use]
    pub fn filter_context(&self) -> FilterContext<'_> {
        FilterContext {
            selected: &self.selected,
            display_conflict_courses: self.display_conflict_courses,
        }
    }

    /// Ids marked for registration, in marking order
    #[must_use]
    pub fn marked(&self) -> &[String] {
        &self.marked
    }

    /// Whether the id is marked for registration
    #[must_use]
    pub fn is_marked(&self, id: &str) -> bool {
        self.marked.iter().any(|m| m == id)
    }

    /// Mark a selected course for registration
    ///
    /// Returns `false` if the course is not selected or already marked.
    pub fn mark(&mut self, id: &str) -> bool {
        if !self.is_selected(id) || self.is_marked(id) {
            return false;
        }
        self.marked.push(id.to_string());
        true
    }

    /// Unmark a course; `false` if it was not marked
    pub fn unmark(&mut self, id: &str) -> bool {
        let before = self.marked.len();
        self.marked.retain(|m| m != id);
        self.marked.len() != before
    }

    /// Registration weight of a course, 0 when unset
    #[must_use]
    pub fn weight(&self, id: &str) -> u8 {
        self.weights.get(id).copied().unwrap_or(0)
    }

    /// All stored weights
    #[must_use]
    pub const fn weights(&self) -> &BTreeMap<String, u8> {
        &self.weights
    }

    /// Set a weight, clamped to 0–100; returns the stored value
    pub fn set_weight(&mut self, id: &str, raw: i64) -> u8 {
        let weight = clamp_weight(raw);
        self.weights.insert(id.to_string(), weight);
        weight
    }

    /// Payload rows for the marked courses
    #[must_use]
    pub fn export_entries(&self) -> Vec<ExportEntry> {
        build_export(&self.selected, &self.marked, &self.weights)
    }

    /// Console script for the marked courses
    ///
    /// # Errors
    /// Returns an error if the payload cannot be serialized
    pub fn export_script(&self) -> Result<String, serde_json::Error> {
        render_script(&self.export_entries())
    }

    /// Apply a pasted export script
    ///
    /// The script is parsed completely before anything changes, so a bad
    /// script leaves the session untouched. Every entry whose id is in the
    /// catalog is selected, marked and weighted. Returns the number of
    /// courses applied.
    ///
    /// # Errors
    /// Returns [`ImportError`] if the script cannot be parsed
    pub fn apply_import(&mut self, catalog: &[Course], text: &str) -> Result<usize, ImportError> {
        let imported = parse_import(text)?;

        let mut applied = 0;
        for entry in imported {
            let Some(course) = find_course(catalog, &entry.id) else {
                debug!("Skipping imported course '{}' missing from catalog", entry.id);
                continue;
            };
            self.select(course);
            if !self.is_marked(&entry.id) {
                self.marked.push(entry.id.clone());
            }
            self.weights.insert(entry.id, entry.weight);
            applied += 1;
        }

        info!("Imported {applied} courses");
        Ok(applied)
    }

    /// Add the slot if absent, remove it otherwise; returns whether it is now chosen
    pub fn toggle_time_slot(&mut self, slot: TimeSlot) -> bool {
        if let Some(pos) = self.time_slots.iter().position(|s| *s == slot) {
            self.time_slots.remove(pos);
            false
        } else {
            self.time_slots.push(slot);
            true
        }
    }
}

/// Whether the announcement for `version` still has to be shown
#[must_use]
pub fn notice_pending(store: &Store, version: &str) -> bool {
    store.get_str(keys::ENTRY_NOTIFICATION_SEEN) != Some("true")
        || store.get_str(keys::ENTRY_NOTIFICATION_VERSION) != Some(version)
}

/// Record that the announcement for `version` was shown
///
/// With `remember` unset the announcement comes back on the next start.
pub fn acknowledge_notice(store: &mut Store, version: &str, remember: bool) {
    store.set(keys::ENTRY_NOTIFICATION_SEEN, if remember { "true" } else { "false" });
    store.set(keys::ENTRY_NOTIFICATION_VERSION, version);
}
