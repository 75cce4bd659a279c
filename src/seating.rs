use crate::capacity::validate_capacity;
use crate::data::{DEFAULT_DEPARTMENT_BUFFER, RoomAssignments, Student};
use crate::error::SeatingError;
use crate::history::DepartmentHistory;
use log::{info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Greedy, department-aware placement of students into equally sized rooms.
///
/// Each run shuffles the students, then seats each one in the lowest-numbered
/// room with a free seat whose recent department history does not contain
/// the student's department. When no such room exists the student goes to
/// the lowest-numbered room with a free seat.
#[derive(Debug, Clone)]
pub struct SeatingAssigner {
    num_rooms: usize,
    seats_per_room: usize,
    department_buffer: usize,
}

impl SeatingAssigner {
    pub fn new(num_rooms: usize, seats_per_room: usize) -> Self {
        Self {
            num_rooms,
            seats_per_room,
            department_buffer: DEFAULT_DEPARTMENT_BUFFER,
        }
    }

    pub fn with_department_buffer(mut self, department_buffer: usize) -> Self {
        self.department_buffer = department_buffer;
        self
    }

    pub fn validate_capacity(&self, num_students: usize) -> Result<(), SeatingError> {
        validate_capacity(self.num_rooms, self.seats_per_room, num_students)
    }

    /// Arranges with a `StdRng` seeded from `seed`.
    pub fn arrange_seeded(
        &self,
        students: &[Student],
        seed: u64,
    ) -> Result<RoomAssignments, SeatingError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.arrange(students, &mut rng)
    }

    /// Arranges `students`, drawing the processing order from `rng`.
    pub fn arrange<R: Rng + ?Sized>(
        &self,
        students: &[Student],
        rng: &mut R,
    ) -> Result<RoomAssignments, SeatingError> {
        self.validate_capacity(students.len())?;

        let mut order: Vec<&Student> = students.iter().collect();
        order.shuffle(rng);
        self.place_in_order(order)
    }

    /// Seats students in exactly the given order.
    fn place_in_order(&self, order: Vec<&Student>) -> Result<RoomAssignments, SeatingError> {
        let start_time = Instant::now();
        info!(
            "Arranging {} students into {} rooms of {} seats (department buffer {})...",
            order.len(),
            self.num_rooms,
            self.seats_per_room,
            self.department_buffer
        );

        let mut rooms = RoomAssignments::with_rooms(self.num_rooms);
        let mut histories = vec![DepartmentHistory::new(self.department_buffer); self.num_rooms];

        let mut fallbacks = 0;
        for student in order {
            if self.place_constrained(student, &mut rooms, &mut histories) {
                continue;
            }
            self.place_fallback(student, &mut rooms)?;
            fallbacks += 1;
        }

        info!(
            "Seated {} students in {:.2?} ({} fallback placements)",
            rooms.total_students(),
            start_time.elapsed(),
            fallbacks
        );
        Ok(rooms)
    }

    fn place_constrained(
        &self,
        student: &Student,
        rooms: &mut RoomAssignments,
        histories: &mut [DepartmentHistory],
    ) -> bool {
        for (index, history) in histories.iter_mut().enumerate() {
            let Some(room) = rooms.room_at_mut(index) else {
                break;
            };
            if room.len() >= self.seats_per_room || history.contains(&student.department) {
                continue;
            }
            room.push(student.clone());
            history.push(&student.department);
            debug_assert!(history.len() <= history.capacity());
            trace!("Seated {} in Room-{}", student, index + 1);
            return true;
        }
        false
    }

    // ignores department history entirely and leaves it untouched
    fn place_fallback(
        &self,
        student: &Student,
        rooms: &mut RoomAssignments,
    ) -> Result<(), SeatingError> {
        for index in 0..self.num_rooms {
            let Some(room) = rooms.room_at_mut(index) else {
                break;
            };
            if room.len() < self.seats_per_room {
                room.push(student.clone());
                trace!("Fallback: seated {} in Room-{}", student, index + 1);
                return Ok(());
            }
        }
        Err(SeatingError::NoFreeSeat {
            student_id: student.student_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use std::collections::HashSet;

    fn roster(departments: &[(&str, usize)]) -> Vec<Student> {
        let mut students = Vec::new();
        for (dept, count) in departments {
            for _ in 0..*count {
                let id = format!("STU{:03}", students.len() + 1);
                students.push(Student::new(id, *dept));
            }
        }
        students
    }

    fn seated_ids(rooms: &RoomAssignments) -> Vec<String> {
        rooms
            .iter()
            .flat_map(|(_, students)| students.iter().map(|s| s.student_id.clone()))
            .collect()
    }

    #[test]
    fn test_every_student_seated_exactly_once() {
        let students = roster(&[("CSE", 17), ("ECE", 9), ("ME", 4), ("IT", 11), ("CE", 3)]);
        let assigner = SeatingAssigner::new(4, 12);

        for seed in 0..20 {
            let rooms = assigner.arrange_seeded(&students, seed).unwrap();
            let ids = seated_ids(&rooms);
            assert_eq!(ids.len(), students.len());
            let unique: HashSet<_> = ids.iter().collect();
            assert_eq!(unique.len(), students.len());
            for student in &students {
                assert!(unique.contains(&student.student_id));
            }
        }
    }

    #[test]
    fn test_rooms_never_exceed_capacity() {
        let students = roster(&[("CSE", 30), ("ECE", 5)]);
        let assigner = SeatingAssigner::new(3, 12);

        for seed in 0..20 {
            let rooms = assigner.arrange_seeded(&students, seed).unwrap();
            for (_, seated) in rooms.iter() {
                assert!(seated.len() <= 12);
            }
        }
    }

    #[test]
    fn test_all_room_labels_present_even_when_empty() {
        let students = roster(&[("CSE", 1)]);
        let rooms = SeatingAssigner::new(3, 5)
            .arrange_seeded(&students, 7)
            .unwrap();

        let labels: Vec<_> = rooms.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, vec!["Room-1", "Room-2", "Room-3"]);
        assert_eq!(rooms.room("Room-1").unwrap().len(), 1);
        assert!(rooms.room("Room-2").unwrap().is_empty());
        assert!(rooms.room("Room-3").unwrap().is_empty());
    }

    #[test]
    fn test_capacity_exceeded_before_placement() {
        let students = roster(&[("CSE", 11)]);
        let err = SeatingAssigner::new(2, 5)
            .arrange_seeded(&students, 1)
            .unwrap_err();
        assert_eq!(
            err,
            SeatingError::CapacityExceeded {
                requested: 11,
                available: 10
            }
        );
    }

    #[test]
    fn test_same_seed_same_membership() {
        let students = roster(&[("CSE", 8), ("ECE", 8), ("ME", 8)]);
        let assigner = SeatingAssigner::new(3, 10);

        let first = assigner.arrange_seeded(&students, 42).unwrap();
        let second = assigner.arrange_seeded(&students, 42).unwrap();
        assert_eq!(first, second);
    }

    fn assert_no_adjacent_departments(rooms: &RoomAssignments) {
        for (label, seated) in rooms.iter() {
            for (a, b) in seated.iter().tuple_windows() {
                assert_ne!(a.department, b.department, "{} next to {} in {}", a, b, label);
            }
        }
    }

    #[test]
    fn test_no_consecutive_same_department_in_common_case() {
        let students = roster(&[("CSE", 2), ("ECE", 2), ("ME", 2), ("CE", 2), ("IT", 2)]);
        let assigner = SeatingAssigner::new(2, 5).with_department_buffer(2);

        let rooms = assigner.place_in_order(students.iter().collect()).unwrap();
        assert_eq!(rooms.room("Room-1").unwrap().len(), 5);
        assert_eq!(rooms.room("Room-2").unwrap().len(), 5);
        assert_no_adjacent_departments(&rooms);

        let reversed = assigner.place_in_order(students.iter().rev().collect()).unwrap();
        assert_no_adjacent_departments(&reversed);
    }

    #[test]
    fn test_fallback_does_not_touch_history() {
        // Room-1 fills up first, so both IT students end up in Room-2 and the
        // second one can only be seated by fallback.
        let students = roster(&[
            ("CSE", 1),
            ("ECE", 1),
            ("ME", 1),
            ("CSE", 1),
            ("CE", 1),
            ("IT", 2),
        ]);
        let assigner = SeatingAssigner::new(2, 5);

        let rooms = assigner.place_in_order(students.iter().collect()).unwrap();
        let departments = |label: &str| -> Vec<String> {
            rooms
                .room(label)
                .unwrap()
                .iter()
                .map(|s| s.department.clone())
                .collect()
        };
        assert_eq!(departments("Room-1"), vec!["CSE", "ECE", "ME", "CSE", "CE"]);
        assert_eq!(departments("Room-2"), vec!["IT", "IT"]);
    }

    #[test]
    fn test_fallback_fills_single_room() {
        let students = roster(&[("CSE", 3)]);
        let rooms = SeatingAssigner::new(1, 3)
            .with_department_buffer(2)
            .arrange_seeded(&students, 3)
            .unwrap();

        let seated = rooms.room("Room-1").unwrap();
        assert_eq!(seated.len(), 3);
        let ids: HashSet<_> = seated.iter().map(|s| s.student_id.as_str()).collect();
        assert_eq!(ids, HashSet::from(["STU001", "STU002", "STU003"]));
    }

    #[test]
    fn test_zero_buffer_fills_rooms_in_order() {
        let students = roster(&[("CSE", 7), ("ECE", 2)]);
        let rooms = SeatingAssigner::new(3, 4)
            .with_department_buffer(0)
            .arrange_seeded(&students, 11)
            .unwrap();

        assert_eq!(rooms.room("Room-1").unwrap().len(), 4);
        assert_eq!(rooms.room("Room-2").unwrap().len(), 4);
        assert_eq!(rooms.room("Room-3").unwrap().len(), 1);
    }

    #[test]
    fn test_large_department_spills_over_rooms() {
        let students = roster(&[("CSE", 9)]);
        let rooms = SeatingAssigner::new(3, 3).arrange_seeded(&students, 5).unwrap();
        // each room takes one CSE constrained, the rest fall back in room order
        for (_, seated) in rooms.iter() {
            assert_eq!(seated.len(), 3);
        }
    }

    #[test]
    fn test_lowest_room_wins_ties() {
        let students = roster(&[("CSE", 1), ("ECE", 1)]);
        let rooms = SeatingAssigner::new(2, 2).arrange_seeded(&students, 9).unwrap();
        assert_eq!(rooms.room("Room-1").unwrap().len(), 2);
        assert!(rooms.room("Room-2").unwrap().is_empty());
    }

    #[test]
    fn test_empty_roster() {
        let rooms = SeatingAssigner::new(2, 2).arrange_seeded(&[], 0).unwrap();
        assert_eq!(rooms.num_rooms(), 2);
        assert_eq!(rooms.total_students(), 0);
    }
}
