use crate::error::SeatingError;

/// Total number of seats across all rooms.
pub fn total_capacity(num_rooms: usize, seats_per_room: usize) -> usize {
    num_rooms.saturating_mul(seats_per_room)
}

/// Fails when the rooms cannot hold `num_students`.
pub fn validate_capacity(
    num_rooms: usize,
    seats_per_room: usize,
    num_students: usize,
) -> Result<(), SeatingError> {
    let available = total_capacity(num_rooms, seats_per_room);
    if num_students > available {
        return Err(SeatingError::CapacityExceeded {
            requested: num_students,
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit_is_accepted() {
        assert_eq!(validate_capacity(4, 25, 100), Ok(()));
        assert_eq!(validate_capacity(1, 1, 0), Ok(()));
    }

    #[test]
    fn test_overflow_reports_both_values() {
        let err = validate_capacity(2, 5, 11).unwrap_err();
        assert_eq!(
            err,
            SeatingError::CapacityExceeded {
                requested: 11,
                available: 10
            }
        );
        assert_eq!(
            err.to_string(),
            "Insufficient capacity: 11 students vs 10 seats"
        );
    }

    #[test]
    fn test_huge_configuration_saturates() {
        assert_eq!(total_capacity(usize::MAX, 2), usize::MAX);
        assert!(validate_capacity(usize::MAX, 2, 1_000).is_ok());
    }
}
