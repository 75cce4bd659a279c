use crate::data::{RoomAssignments, RoomLabel, Seat, SeatMap};
use indexmap::IndexMap;

pub const DEFAULT_SEATS_PER_ROW: usize = 6;

/// Lays each room's students out row by row, `seats_per_row` to a row.
pub fn generate_seat_maps(
    assignments: &RoomAssignments,
    seats_per_row: usize,
) -> IndexMap<RoomLabel, SeatMap> {
    let seats_per_row = seats_per_row.max(1);
    assignments
        .iter()
        .map(|(room, students)| {
            let seats = students
                .chunks(seats_per_row)
                .enumerate()
                .map(|(row_index, row)| {
                    row.iter()
                        .enumerate()
                        .map(|(col_index, student)| Seat {
                            seat_number: row_index * seats_per_row + col_index + 1,
                            student_id: student.student_id.clone(),
                            department: student.department.clone(),
                            row: row_index + 1,
                            column: col_index + 1,
                        })
                        .collect()
                })
                .collect();
            let room_number = room.rsplit('-').next().unwrap_or(room).to_string();
            let map = SeatMap {
                seats,
                total_seats: students.len(),
                room_number,
            };
            (room.clone(), map)
        })
        .collect()
}
