//! Id-addressed editing state for a doctor's weekly availability.
//!
//! Days, slots and exceptions live in flat maps keyed by generated ids, so a
//! field edit touches exactly one entry and ids stay stable while rows are
//! added or removed around them. Nested [`DaySchedule`] values are only
//! produced at the edges via [`ScheduleEditor::from_days`] and
//! [`ScheduleEditor::to_days`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::EditorError;
use crate::models::{DaySchedule, Exception, ExceptionStatus, SlotStatus, TimeSlot};

macro_rules! editor_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

editor_id!(DayId);
editor_id!(SlotId);
editor_id!(ExceptionId);

/// A single field change on a time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum SlotField {
    StartTime(String),
    EndTime(String),
    MaxPatientsInTheSlot(i32),
    IsActive(bool),
    Status(SlotStatus),
    Recurring(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ExceptionField {
    ExpectedDateOfException(String),
    Status(ExceptionStatus),
}

#[derive(Debug, Clone)]
struct DayEntry {
    day_name: String,
    slots: Vec<SlotId>,
}

#[derive(Debug, Clone)]
struct SlotEntry {
    start_time: String,
    end_time: String,
    max_patients_in_the_slot: i32,
    is_active: bool,
    status: SlotStatus,
    recurring: bool,
    exceptions: Vec<ExceptionId>,
}

impl SlotEntry {
    fn from_slot(slot: &TimeSlot) -> Self {
        Self {
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
            max_patients_in_the_slot: slot.max_patients_in_the_slot,
            is_active: slot.is_active,
            status: slot.status.clone(),
            recurring: slot.recurring,
            exceptions: Vec::new(),
        }
    }

    fn apply(&mut self, field: SlotField) {
        match field {
            SlotField::StartTime(value) => self.start_time = value,
            SlotField::EndTime(value) => self.end_time = value,
            SlotField::MaxPatientsInTheSlot(value) => self.max_patients_in_the_slot = value,
            SlotField::IsActive(value) => self.is_active = value,
            SlotField::Status(value) => self.status = value,
            SlotField::Recurring(value) => self.recurring = value,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleEditor {
    day_order: Vec<DayId>,
    days: HashMap<DayId, DayEntry>,
    slots: HashMap<SlotId, SlotEntry>,
    exceptions: HashMap<ExceptionId, Exception>,
}

impl ScheduleEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_days(days: &[DaySchedule]) -> Self {
        let mut editor = Self::new();
        for day in days {
            let day_id = DayId::generate();
            let mut slot_ids = Vec::with_capacity(day.slots.len());
            for slot in &day.slots {
                let slot_id = SlotId::generate();
                let mut entry = SlotEntry::from_slot(slot);
                for exception in &slot.exceptions {
                    let exception_id = ExceptionId::generate();
                    editor.exceptions.insert(exception_id, exception.clone());
                    entry.exceptions.push(exception_id);
                }
                editor.slots.insert(slot_id, entry);
                slot_ids.push(slot_id);
            }
            editor.days.insert(
                day_id,
                DayEntry {
                    day_name: day.day_name.clone(),
                    slots: slot_ids,
                },
            );
            editor.day_order.push(day_id);
        }
        editor
    }

    /// Rebuilds the nested wire shape in editing order.
    pub fn to_days(&self) -> Vec<DaySchedule> {
        self.day_order
            .iter()
            .filter_map(|id| self.days.get(id))
            .map(|day| DaySchedule {
                day_name: day.day_name.clone(),
                slots: day.slots.iter().filter_map(|id| self.slot(*id)).collect(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.day_order.is_empty()
    }

    pub fn day_count(&self) -> usize {
        self.day_order.len()
    }

    pub fn day_ids(&self) -> &[DayId] {
        &self.day_order
    }

    pub fn day_at(&self, index: usize) -> Option<DayId> {
        self.day_order.get(index).copied()
    }

    pub fn slot_at(&self, day: DayId, index: usize) -> Option<SlotId> {
        self.days.get(&day)?.slots.get(index).copied()
    }

    pub fn exception_at(&self, slot: SlotId, index: usize) -> Option<ExceptionId> {
        self.slots.get(&slot)?.exceptions.get(index).copied()
    }

    pub fn day_name(&self, day: DayId) -> Option<&str> {
        self.days.get(&day).map(|entry| entry.day_name.as_str())
    }

    pub fn slot_ids(&self, day: DayId) -> Result<&[SlotId], EditorError> {
        self.days
            .get(&day)
            .map(|entry| entry.slots.as_slice())
            .ok_or(EditorError::UnknownDay(day))
    }

    /// Materialized copy of one slot with its exceptions.
    pub fn slot(&self, id: SlotId) -> Option<TimeSlot> {
        let entry = self.slots.get(&id)?;
        Some(TimeSlot {
            start_time: entry.start_time.clone(),
            end_time: entry.end_time.clone(),
            max_patients_in_the_slot: entry.max_patients_in_the_slot,
            is_active: entry.is_active,
            status: entry.status.clone(),
            recurring: entry.recurring,
            exceptions: entry
                .exceptions
                .iter()
                .filter_map(|e| self.exceptions.get(e).cloned())
                .collect(),
        })
    }

    pub fn exception(&self, id: ExceptionId) -> Option<&Exception> {
        self.exceptions.get(&id)
    }

    /// Appends a day with an empty name and one default slot.
    pub fn add_day(&mut self) -> DayId {
        let day_id = DayId::generate();
        let slot_id = SlotId::generate();
        self.slots
            .insert(slot_id, SlotEntry::from_slot(&TimeSlot::default()));
        self.days.insert(
            day_id,
            DayEntry {
                day_name: String::new(),
                slots: vec![slot_id],
            },
        );
        self.day_order.push(day_id);
        debug!("Added day {} ({} total)", day_id, self.day_order.len());
        day_id
    }

    pub fn set_day_name(&mut self, day: DayId, name: impl Into<String>) -> Result<(), EditorError> {
        let entry = self.days.get_mut(&day).ok_or(EditorError::UnknownDay(day))?;
        entry.day_name = name.into();
        Ok(())
    }

    pub fn remove_day(&mut self, day: DayId) -> Result<(), EditorError> {
        if !self.days.contains_key(&day) {
            return Err(EditorError::UnknownDay(day));
        }
        if self.day_order.len() <= 1 {
            return Err(EditorError::LastDay);
        }

        if let Some(entry) = self.days.remove(&day) {
            for slot_id in entry.slots {
                self.drop_slot(slot_id);
            }
        }
        self.day_order.retain(|id| *id != day);
        debug!("Removed day {} ({} left)", day, self.day_order.len());
        Ok(())
    }

    pub fn add_slot(&mut self, day: DayId) -> Result<SlotId, EditorError> {
        let entry = self.days.get_mut(&day).ok_or(EditorError::UnknownDay(day))?;
        let slot_id = SlotId::generate();
        entry.slots.push(slot_id);
        self.slots
            .insert(slot_id, SlotEntry::from_slot(&TimeSlot::default()));
        Ok(slot_id)
    }

    pub fn remove_slot(&mut self, day: DayId, slot: SlotId) -> Result<(), EditorError> {
        let entry = self.days.get_mut(&day).ok_or(EditorError::UnknownDay(day))?;
        let position = entry
            .slots
            .iter()
            .position(|id| *id == slot)
            .ok_or(EditorError::UnknownSlot(slot))?;
        if entry.slots.len() <= 1 {
            return Err(EditorError::LastSlot);
        }

        entry.slots.remove(position);
        self.drop_slot(slot);
        Ok(())
    }

    pub fn update_slot_field(&mut self, slot: SlotId, field: SlotField) -> Result<(), EditorError> {
        let entry = self.slots.get_mut(&slot).ok_or(EditorError::UnknownSlot(slot))?;
        entry.apply(field);
        Ok(())
    }

    /// Appends a `DAY_OFF` exception with an empty date.
    pub fn add_exception(&mut self, slot: SlotId) -> Result<ExceptionId, EditorError> {
        let entry = self.slots.get_mut(&slot).ok_or(EditorError::UnknownSlot(slot))?;
        let exception_id = ExceptionId::generate();
        entry.exceptions.push(exception_id);
        self.exceptions.insert(exception_id, Exception::default());
        Ok(exception_id)
    }

    pub fn remove_exception(&mut self, slot: SlotId, exception: ExceptionId) -> Result<(), EditorError> {
        let entry = self.slots.get_mut(&slot).ok_or(EditorError::UnknownSlot(slot))?;
        let position = entry
            .exceptions
            .iter()
            .position(|id| *id == exception)
            .ok_or(EditorError::UnknownException(exception))?;
        entry.exceptions.remove(position);
        self.exceptions.remove(&exception);
        Ok(())
    }

    pub fn update_exception_field(
        &mut self,
        exception: ExceptionId,
        field: ExceptionField,
    ) -> Result<(), EditorError> {
        let entry = self
            .exceptions
            .get_mut(&exception)
            .ok_or(EditorError::UnknownException(exception))?;
        match field {
            ExceptionField::ExpectedDateOfException(value) => entry.expected_date_of_exception = value,
            ExceptionField::Status(value) => entry.status = value,
        }
        Ok(())
    }

    fn drop_slot(&mut self, slot: SlotId) {
        if let Some(entry) = self.slots.remove(&slot) {
            for exception_id in entry.exceptions {
                self.exceptions.remove(&exception_id);
            }
        }
    }
}
