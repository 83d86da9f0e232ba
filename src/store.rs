use crate::contract;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    In,
    Out,
}

impl DayStatus {
    pub fn label(self) -> &'static str {
        match self {
            DayStatus::In => "In Office",
            DayStatus::Out => "Not in Office",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEntry {
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DayStatus>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerData {
    #[serde(default)]
    pub days: BTreeMap<String, DayEntry>,
    #[serde(rename = "targetPerQuarter", default = "default_target")]
    pub target_per_quarter: u32,
}

fn default_target() -> u32 {
    contract::DEFAULT_TARGET_PER_QUARTER
}

impl Default for TrackerData {
    fn default() -> Self {
        Self {
            days: BTreeMap::new(),
            target_per_quarter: default_target(),
        }
    }
}

impl TrackerData {
    /// Setting `None` clears the status; the entry itself is removed once
    /// neither a status nor a note remains.
    pub fn set_status(&mut self, iso: &str, status: Option<DayStatus>) {
        let entry = self.days.entry(iso.to_string()).or_insert_with(|| DayEntry {
            date_iso: iso.to_string(),
            status: None,
            notes: String::new(),
        });
        entry.status = status;
        self.drop_if_empty(iso);
    }

    pub fn set_note(&mut self, iso: &str, notes: &str) {
        let entry = self.days.entry(iso.to_string()).or_insert_with(|| DayEntry {
            date_iso: iso.to_string(),
            status: None,
            notes: String::new(),
        });
        entry.notes = notes.to_string();
        self.drop_if_empty(iso);
    }

    pub fn set_target(&mut self, target: u32) -> bool {
        if target < 1 {
            return false;
        }
        self.target_per_quarter = target;
        true
    }

    pub fn status_of(&self, iso: &str) -> Option<DayStatus> {
        self.days.get(iso).and_then(|entry| entry.status)
    }

    /// Count of days marked in-office inside `[from_iso, to_iso]`. ISO
    /// strings order lexicographically, so plain string comparison works.
    pub fn in_office_count(&self, from_iso: &str, to_iso: &str) -> u32 {
        self.days
            .values()
            .filter(|entry| {
                entry.status == Some(DayStatus::In)
                    && entry.date_iso.as_str() >= from_iso
                    && entry.date_iso.as_str() <= to_iso
            })
            .count() as u32
    }

    /// Entries with a set status inside `[from_iso, to_iso]`, ascending by
    /// date (BTreeMap order).
    pub fn entries_in_range(&self, from_iso: &str, to_iso: &str) -> Vec<&DayEntry> {
        self.days
            .values()
            .filter(|entry| {
                entry.status.is_some()
                    && entry.date_iso.as_str() >= from_iso
                    && entry.date_iso.as_str() <= to_iso
            })
            .collect()
    }

    fn drop_if_empty(&mut self, iso: &str) {
        if self
            .days
            .get(iso)
            .is_some_and(|entry| entry.status.is_none() && entry.notes.is_empty())
        {
            self.days.remove(iso);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_removes_entry_when_notes_empty() {
        let mut data = TrackerData::default();
        data.set_status("2026-08-03", Some(DayStatus::In));
        assert_eq!(data.status_of("2026-08-03"), Some(DayStatus::In));

        data.set_status("2026-08-03", None);
        assert_eq!(data.status_of("2026-08-03"), None);
        assert!(!data.days.contains_key("2026-08-03"));
    }

    #[test]
    fn clear_keeps_entry_with_notes() {
        let mut data = TrackerData::default();
        data.set_status("2026-08-03", Some(DayStatus::Out));
        data.set_note("2026-08-03", "dentist");

        data.set_status("2026-08-03", None);
        let entry = data.days.get("2026-08-03").expect("notes-only entry kept");
        assert_eq!(entry.status, None);
        assert_eq!(entry.notes, "dentist");
    }

    #[test]
    fn emptying_note_on_statusless_entry_removes_it() {
        let mut data = TrackerData::default();
        data.set_note("2026-08-04", "remote day");
        assert!(data.days.contains_key("2026-08-04"));

        data.set_note("2026-08-04", "");
        assert!(!data.days.contains_key("2026-08-04"));
    }

    #[test]
    fn note_survives_status_changes() {
        let mut data = TrackerData::default();
        data.set_note("2026-08-05", "team event");
        data.set_status("2026-08-05", Some(DayStatus::In));

        let entry = &data.days["2026-08-05"];
        assert_eq!(entry.status, Some(DayStatus::In));
        assert_eq!(entry.notes, "team event");
    }

    #[test]
    fn in_office_count_respects_range_and_status() {
        let mut data = TrackerData::default();
        data.set_status("2026-06-30", Some(DayStatus::In));
        data.set_status("2026-07-01", Some(DayStatus::In));
        data.set_status("2026-07-02", Some(DayStatus::Out));
        data.set_status("2026-09-30", Some(DayStatus::In));
        data.set_status("2026-10-01", Some(DayStatus::In));

        assert_eq!(data.in_office_count("2026-07-01", "2026-09-30"), 2);
    }

    #[test]
    fn empty_state_counts_zero_for_any_range() {
        let data = TrackerData::default();
        assert_eq!(data.in_office_count("2026-01-01", "2026-12-31"), 0);
        assert_eq!(data.in_office_count("2026-12-31", "2026-01-01"), 0);
    }

    #[test]
    fn target_rejects_zero() {
        let mut data = TrackerData::default();
        assert!(!data.set_target(0));
        assert_eq!(data.target_per_quarter, contract::DEFAULT_TARGET_PER_QUARTER);
        assert!(data.set_target(12));
        assert_eq!(data.target_per_quarter, 12);
    }

    #[test]
    fn persisted_shape_uses_wire_names() {
        let mut data = TrackerData::default();
        data.set_status("2026-08-03", Some(DayStatus::In));
        let json = serde_json::to_value(&data).unwrap();

        assert!(json.get("targetPerQuarter").is_some());
        let day = &json["days"]["2026-08-03"];
        assert_eq!(day["dateISO"], "2026-08-03");
        assert_eq!(day["status"], "in");
    }

    #[test]
    fn loads_wire_shape_with_missing_fields() {
        let data: TrackerData = serde_json::from_str(
            r#"{"days":{"2026-01-05":{"dateISO":"2026-01-05","status":"out"}}}"#,
        )
        .unwrap();
        assert_eq!(data.target_per_quarter, contract::DEFAULT_TARGET_PER_QUARTER);
        assert_eq!(data.status_of("2026-01-05"), Some(DayStatus::Out));
        assert_eq!(data.days["2026-01-05"].notes, "");
    }
}
