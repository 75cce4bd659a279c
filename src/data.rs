use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// Type aliases for clarity
pub type StudentId = String;
pub type Department = String;
pub type RoomLabel = String;

/// Default size of the per-room department recency window.
pub const DEFAULT_DEPARTMENT_BUFFER: usize = 2;

/// A student as seen by the seating engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Student {
    #[serde(rename = "Student_ID")]
    pub student_id: StudentId,
    #[serde(rename = "Department")]
    pub department: Department,
}

impl Student {
    pub fn new(student_id: impl Into<StudentId>, department: impl Into<Department>) -> Self {
        Self {
            student_id: student_id.into(),
            department: department.into(),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.student_id, self.department)
    }
}

/// A full roster row as uploaded.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StudentRecord {
    #[serde(rename = "Student_ID")]
    pub student_id: StudentId,
    #[serde(rename = "Department")]
    pub department: Department,
    #[serde(rename = "Year")]
    pub year: u32,
    #[serde(rename = "Past_Attendance")]
    pub past_attendance: f64,
    #[serde(rename = "Attended")]
    pub attended: u8,
}

impl StudentRecord {
    pub fn student(&self) -> Student {
        Student::new(self.student_id.clone(), self.department.clone())
    }
}

/// A roster row together with its attendance prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub record: StudentRecord,
    pub attendance_probability: f64,
    pub predicted_attendance: bool,
}

/// Renders the label of a 1-based room ordinal.
pub fn room_label(room_num: usize) -> RoomLabel {
    format!("Room-{}", room_num)
}

/// Room label -> seated students, first seat to last. Rooms keep their
/// numeric order, including rooms that stayed empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomAssignments {
    rooms: IndexMap<RoomLabel, Vec<Student>>,
}

impl RoomAssignments {
    /// Creates `Room-1` through `Room-<num_rooms>`, all empty.
    pub fn with_rooms(num_rooms: usize) -> Self {
        let rooms = (1..=num_rooms).map(|n| (room_label(n), Vec::new())).collect();
        Self { rooms }
    }

    pub fn room(&self, label: &str) -> Option<&[Student]> {
        self.rooms.get(label).map(Vec::as_slice)
    }

    /// Room by 0-based index in room order.
    pub(crate) fn room_at_mut(&mut self, index: usize) -> Option<&mut Vec<Student>> {
        self.rooms.get_index_mut(index).map(|(_, students)| students)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoomLabel, &Vec<Student>)> {
        self.rooms.iter()
    }

    pub fn num_rooms(&self) -> usize {
        self.rooms.len()
    }

    pub fn total_students(&self) -> usize {
        self.rooms.values().map(Vec::len).sum()
    }
}

/// A single seat in a rendered seat map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub seat_number: usize,
    pub student_id: StudentId,
    pub department: Department,
    pub row: usize,
    pub column: usize,
}

/// Row-major seat grid for one room.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMap {
    pub seats: Vec<Vec<Seat>>,
    pub total_seats: usize,
    pub room_number: String,
}

/// Request body for an arrangement run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrangementRequest {
    pub file_id: String,
    #[serde(default = "default_num_rooms")]
    pub num_rooms: usize,
    #[serde(default = "default_seats_per_room")]
    pub seats_per_room: usize,
    #[serde(default = "default_department_buffer")]
    pub department_buffer: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_seats_per_row")]
    pub seats_per_row: usize,
}

fn default_num_rooms() -> usize {
    4
}

fn default_seats_per_room() -> usize {
    25
}

fn default_department_buffer() -> usize {
    DEFAULT_DEPARTMENT_BUFFER
}

fn default_seats_per_row() -> usize {
    crate::seatmap::DEFAULT_SEATS_PER_ROW
}

/// The complete result of an arrangement run, as kept for later export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrangement {
    pub total_students: usize,
    pub attending_count: usize,
    pub num_rooms: usize,
    pub seats_per_room: usize,
    pub seed: u64,
    pub rooms: RoomAssignments,
    pub seat_maps: IndexMap<RoomLabel, SeatMap>,
    pub departments: Vec<Department>,
    pub department_colors: IndexMap<Department, String>,
    pub attendance_probabilities: Vec<f64>,
}

/// Response for a stored arrangement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrangementResponse {
    pub arrangement_id: String,
    #[serde(flatten)]
    pub arrangement: Arrangement,
}

/// Response for an accepted roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterUploaded {
    pub file_id: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLimits {
    pub max_upload_bytes: usize,
    pub max_uploads: usize,
    pub max_arrangements: usize,
    pub max_rooms: usize,
    pub max_seats_per_room: usize,
    pub max_sample_count: usize,
}

/// Body of the health check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub prediction_type: &'static str,
    pub config: ServiceLimits,
}
