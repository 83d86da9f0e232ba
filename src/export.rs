use crate::contract;
use crate::dates;
use crate::errors::AppError;
use crate::store::TrackerData;

pub fn csv_file_name(year: i32, quarter: u32) -> String {
    format!("office_tracker_Q{quarter}_{year}.csv")
}

/// Quarter rows with a set status, ascending by date. Notes keep their
/// commas and quotes (the writer quotes as needed) but newlines are
/// flattened to spaces so each day stays on one row.
pub fn quarter_csv(data: &TrackerData, year: i32, quarter: u32) -> Result<Vec<u8>, AppError> {
    let (q_start, q_end) = dates::quarter_range(year, quarter);
    let q_start_iso = dates::to_iso(q_start);
    let q_end_iso = dates::to_iso(q_end);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(contract::CSV_HEADER)
        .map_err(AppError::internal)?;

    for entry in data.entries_in_range(&q_start_iso, &q_end_iso) {
        let Some(status) = entry.status else { continue };
        let notes = entry.notes.replace("\r\n", " ").replace(['\r', '\n'], " ");
        writer
            .write_record([entry.date_iso.as_str(), status.label(), notes.as_str()])
            .map_err(AppError::internal)?;
    }

    writer.into_inner().map_err(AppError::internal)
}
