//! Timetable fill indicators.
//!
//! Computes how much of the grid is staffed and how the load is spread
//! across people.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total cells | slots x subjects |
//! | Filled cells | Cells with at least one occupant |
//! | Fill rate | Filled / total |
//! | Unstaffed cells | Cells with children but no teacher |
//! | Lessons by teacher | Cells each teacher runs |
//! | Enrollments by child | Cells each child attends |

use std::collections::HashMap;

use crate::models::Timetable;

/// Timetable fill indicators.
#[derive(Debug, Clone)]
pub struct TimetableSummary {
    /// Number of grid positions.
    pub total_cells: usize,
    /// Cells with at least one occupant.
    pub filled_cells: usize,
    /// Fraction of cells filled (0.0..1.0).
    pub fill_rate: f64,
    /// Cells with enrolled children but no teacher.
    pub unstaffed_cells: usize,
    /// Per-teacher lesson count. Every registered teacher appears.
    pub lessons_by_teacher: HashMap<String, usize>,
    /// Per-child enrollment count. Every registered child appears.
    pub enrollments_by_child: HashMap<String, usize>,
}

impl TimetableSummary {
    /// Computes indicators for a timetable.
    pub fn calculate(timetable: &Timetable) -> Self {
        let mut lessons_by_teacher: HashMap<String, usize> =
            timetable.teachers().map(|p| (p.id.clone(), 0)).collect();
        let mut enrollments_by_child: HashMap<String, usize> =
            timetable.children().map(|p| (p.id.clone(), 0)).collect();

        let mut total_cells = 0;
        let mut filled_cells = 0;
        let mut unstaffed_cells = 0;

        for row in timetable.grid() {
            for cell in row.cells {
                total_cells += 1;
                if cell.is_empty() {
                    continue;
                }
                filled_cells += 1;

                match cell.teacher {
                    Some(teacher) => {
                        *lessons_by_teacher.entry(teacher.id.clone()).or_insert(0) += 1;
                    }
                    None => unstaffed_cells += 1,
                }
                for child in cell.children {
                    *enrollments_by_child.entry(child.id.clone()).or_insert(0) += 1;
                }
            }
        }

        let fill_rate = if total_cells == 0 {
            0.0
        } else {
            filled_cells as f64 / total_cells as f64
        };

        Self {
            total_cells,
            filled_cells,
            fill_rate,
            unstaffed_cells,
            lessons_by_teacher,
            enrollments_by_child,
        }
    }

    /// Teachers with no lessons, sorted by id.
    pub fn idle_teachers(&self) -> Vec<&str> {
        idle(&self.lessons_by_teacher)
    }

    /// Children with no enrollments, sorted by id.
    pub fn unenrolled_children(&self) -> Vec<&str> {
        idle(&self.enrollments_by_child)
    }

    /// Whether every occupied cell has a teacher.
    pub fn is_fully_staffed(&self) -> bool {
        self.unstaffed_cells == 0
    }
}

fn idle(counts: &HashMap<String, usize>) -> Vec<&str> {
    let mut ids: Vec<&str> = counts
        .iter()
        .filter(|(_, n)| **n == 0)
        .map(|(id, _)| id.as_str())
        .collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Person, Subject, TimeSlot};

    fn sample_timetable() -> Timetable {
        Timetable::new(
            vec![TimeSlot::new("S1", 1), TimeSlot::new("S2", 2)],
            vec![Subject::new("English"), Subject::new("Mathematics")],
            vec![
                Person::teacher("T1"),
                Person::teacher("T2"),
                Person::child("C1"),
                Person::child("C2"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_summary_basic() {
        let mut tt = sample_timetable();
        tt.assign_teacher("S1", "English", "T1").unwrap();
        tt.assign_child("S1", "English", "C1").unwrap();
        tt.assign_teacher("S2", "English", "T1").unwrap();
        tt.assign_child("S2", "Mathematics", "C1").unwrap();

        let summary = TimetableSummary::calculate(&tt);
        assert_eq!(summary.total_cells, 4);
        assert_eq!(summary.filled_cells, 3);
        assert!((summary.fill_rate - 0.75).abs() < 1e-10);
        assert_eq!(summary.unstaffed_cells, 1);
        assert!(!summary.is_fully_staffed());
        assert_eq!(summary.lessons_by_teacher["T1"], 2);
        assert_eq!(summary.lessons_by_teacher["T2"], 0);
        assert_eq!(summary.enrollments_by_child["C1"], 2);
        assert_eq!(summary.idle_teachers(), vec!["T2"]);
        assert_eq!(summary.unenrolled_children(), vec!["C2"]);
    }

    #[test]
    fn test_summary_empty() {
        let summary = TimetableSummary::calculate(&sample_timetable());
        assert_eq!(summary.filled_cells, 0);
        assert!((summary.fill_rate - 0.0).abs() < 1e-10);
        assert!(summary.is_fully_staffed());
        assert_eq!(summary.idle_teachers(), vec!["T1", "T2"]);
    }

    #[test]
    fn test_summary_no_registries() {
        let tt = Timetable::new(vec![], vec![], vec![]).unwrap();
        let summary = TimetableSummary::calculate(&tt);
        assert_eq!(summary.total_cells, 0);
        assert!((summary.fill_rate - 0.0).abs() < 1e-10);
        assert!(summary.lessons_by_teacher.is_empty());
    }
}
