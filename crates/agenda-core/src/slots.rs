//! Slot generation — the ordered sequence of valid start times for a day.
//!
//! A `SlotEngine` is configured with a daily window, a slot duration, and an
//! optional break between consecutive slots. Generation is a pure function of
//! the configuration: every valid date yields the same sequence, recomputed
//! fresh on each call. The date argument only gates validity — a single,
//! undifferentiated daily schedule is assumed.

use chrono::{Duration, NaiveTime};
use std::collections::HashSet;

use crate::validate::{parse_time, valid_date, TIME_FMT};

/// Computes candidate appointment start times within a daily window.
#[derive(Debug, Clone)]
pub struct SlotEngine {
    start: NaiveTime,
    end: NaiveTime,
    slot_minutes: u32,
    break_minutes: u32,
}

impl Default for SlotEngine {
    /// 09:00–17:00 in 30-minute slots with no break.
    fn default() -> Self {
        SlotEngine::new(
            NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            30,
            0,
        )
    }
}

impl SlotEngine {
    pub fn new(start: NaiveTime, end: NaiveTime, slot_minutes: u32, break_minutes: u32) -> Self {
        SlotEngine {
            start,
            end,
            slot_minutes,
            break_minutes,
        }
    }

    /// Duration of a single slot, in minutes. New appointments default to this.
    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    /// Generate the ordered start times (HH:MM) available on `date`.
    ///
    /// Returns the empty sequence when `date` is not a valid DD/MM/YYYY date.
    /// Otherwise emits slots from the window start, advancing by
    /// `slot + break`, stopping once a slot would end past the window end —
    /// a slot ending exactly at the boundary is included.
    pub fn generate_slots(&self, date: &str) -> Vec<String> {
        if !valid_date(date) {
            return Vec::new();
        }

        let slot = Duration::minutes(i64::from(self.slot_minutes));
        let step = slot + Duration::minutes(i64::from(self.break_minutes));

        let mut slots = Vec::new();
        let mut cursor = self.start;
        // A nonzero wrap means the addition crossed midnight, i.e. the slot
        // no longer fits inside a single day.
        loop {
            let (slot_end, wrapped) = cursor.overflowing_add_signed(slot);
            if wrapped != 0 || slot_end > self.end {
                break;
            }
            slots.push(cursor.format(TIME_FMT).to_string());
            let (next, wrapped) = cursor.overflowing_add_signed(step);
            if wrapped != 0 || next <= cursor {
                break;
            }
            cursor = next;
        }
        slots
    }

    /// First generated slot on `date` not present in `occupied` (a set of
    /// (date, time) pairs). `None` if the date is invalid or every slot is
    /// taken.
    pub fn suggest_next(&self, date: &str, occupied: &HashSet<(String, String)>) -> Option<String> {
        self.generate_slots(date)
            .into_iter()
            .find(|time| !occupied.contains(&(date.to_string(), time.clone())))
    }
}
