use crate::data::{Prediction, Student, StudentRecord};
use log::{debug, info};

/// Threshold rule deciding who is expected to show up.
///
/// The probability is the student's historical attendance ratio plus a small
/// bonus per year of study beyond the first, clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendancePolicy {
    pub threshold: f64,
    pub year_bonus: f64,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            year_bonus: 0.05,
        }
    }
}

impl AttendancePolicy {
    pub fn probability(&self, record: &StudentRecord) -> f64 {
        let seniority = record.year.saturating_sub(1) as f64;
        (record.past_attendance + self.year_bonus * seniority).clamp(0.0, 1.0)
    }

    pub fn predict(&self, records: &[StudentRecord]) -> Vec<Prediction> {
        let predictions: Vec<Prediction> = records
            .iter()
            .map(|record| {
                let attendance_probability = self.probability(record);
                Prediction {
                    record: record.clone(),
                    attendance_probability,
                    predicted_attendance: attendance_probability >= self.threshold,
                }
            })
            .collect();

        let attending = predictions.iter().filter(|p| p.predicted_attendance).count();
        info!(
            "Predicted {} of {} students attending (threshold {})",
            attending,
            records.len(),
            self.threshold
        );
        predictions
    }
}

/// Students predicted to attend, in roster order.
pub fn attending_students(predictions: &[Prediction]) -> Vec<Student> {
    predictions
        .iter()
        .filter(|p| p.predicted_attendance)
        .inspect(|p| {
            debug!(
                "{} expected with p={:.2}",
                p.record.student_id, p.attendance_probability
            )
        })
        .map(|p| p.record.student())
        .collect()
}
