//! Roster CSV reading, validation and sample generation.

use crate::colors::DEPARTMENT_COLORS;
use crate::data::StudentRecord;
use crate::error::RosterError;
use log::{info, trace};
use rand::Rng;
use std::io::Read;

pub const REQUIRED_COLUMNS: [&str; 5] =
    ["Student_ID", "Department", "Year", "Past_Attendance", "Attended"];

/// Parses and validates a roster from raw uploaded bytes.
pub fn parse_roster_bytes(bytes: &[u8]) -> Result<Vec<StudentRecord>, RosterError> {
    let text = std::str::from_utf8(bytes).map_err(|_| RosterError::Encoding)?;
    parse_roster(text.as_bytes())
}

/// Parses and validates a roster CSV with a header row.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<StudentRecord>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut columns = [0usize; 5];
    let mut missing = Vec::new();
    for (slot, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
        match headers.iter().position(|h| h == name) {
            Some(index) => *slot = index,
            None => missing.push(name.to_string()),
        }
    }
    if !missing.is_empty() {
        missing.sort();
        return Err(RosterError::MissingColumns(missing));
    }
    let [id_col, dept_col, year_col, past_col, attended_col] = columns;

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let student_id = field(&row, id_col, "Student_ID")?.to_string();
        let department = field(&row, dept_col, "Department")?.to_string();
        let year = parse_year(field(&row, year_col, "Year")?)?;
        let past_attendance: f64 = field(&row, past_col, "Past_Attendance")?
            .parse()
            .map_err(|_| RosterError::NotNumeric {
                column: "Past_Attendance",
            })?;
        let attended: f64 = field(&row, attended_col, "Attended")?
            .parse()
            .map_err(|_| RosterError::NotNumeric { column: "Attended" })?;

        if !(0.0..=1.0).contains(&past_attendance) {
            return Err(RosterError::AttendanceOutOfRange);
        }
        if attended != 0.0 && attended != 1.0 {
            return Err(RosterError::AttendedNotBinary);
        }

        trace!("Roster row {} ({})", student_id, department);
        records.push(StudentRecord {
            student_id,
            department,
            year,
            past_attendance,
            attended: attended as u8,
        });
    }

    if records.is_empty() {
        return Err(RosterError::Empty);
    }
    info!("Parsed roster with {} students", records.len());
    Ok(records)
}

fn field<'r>(
    row: &'r csv::StringRecord,
    index: usize,
    column: &'static str,
) -> Result<&'r str, RosterError> {
    match row.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RosterError::EmptyValue { column }),
    }
}

// spreadsheets often export whole numbers as "2.0"
fn parse_year(value: &str) -> Result<u32, RosterError> {
    let not_numeric = || RosterError::NotNumeric { column: "Year" };
    if let Ok(year) = value.parse::<u32>() {
        return Ok(year);
    }
    let year: f64 = value.parse().map_err(|_| not_numeric())?;
    if year.fract() != 0.0 || year < 0.0 {
        return Err(not_numeric());
    }
    Ok(year as u32)
}

/// Serializes a roster back to CSV with the standard header.
pub fn write_roster(records: &[StudentRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Random roster for trying the planner without real data.
pub fn generate_sample_roster<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<StudentRecord> {
    let departments: Vec<&str> = DEPARTMENT_COLORS.iter().take(5).map(|(d, _)| *d).collect();
    (1..=count)
        .map(|i| StudentRecord {
            student_id: format!("STU{:03}", i),
            department: departments[rng.gen_range(0..departments.len())].to_string(),
            year: rng.gen_range(1..=4),
            past_attendance: rng.gen_range(0.5..1.0),
            attended: rng.gen_range(0..=1),
        })
        .collect()
}
