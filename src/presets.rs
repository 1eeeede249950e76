//! Ready-made registries.
//!
//! [`school_week`] is the two-period, four-subject school day with four
//! teachers and four children. Slot and subject ids equal their labels.

use crate::models::{Person, Subject, TimeSlot, Timetable};
use crate::record::TimetableRecord;
use crate::validation::ValidationError;

const SLOTS: [&str; 2] = ["08:00-08:45", "09:00-09:45"];
const SUBJECTS: [&str; 4] = ["English", "Mathematics", "Language", "Physical Education"];
const TEACHERS: [(&str, &str); 4] = [
    ("orit-sharon", "Orit Sharon"),
    ("rachel-levy", "Rachel Levy"),
    ("david-israeli", "David Israeli"),
    ("noa-bicycle", "Noa Bicycle"),
];
const CHILDREN: [(&str, &str); 4] = [
    ("avi-levy", "Avi Levy"),
    ("yehuda-levy", "Yehuda Levy"),
    ("yaakov-levy", "Yaakov Levy"),
    ("menashe-noy", "Menashe Noy"),
];

/// Registries of the school week, with no cells.
pub fn school_week_record() -> TimetableRecord {
    TimetableRecord {
        slots: SLOTS
            .iter()
            .zip(1..)
            .map(|(id, order)| TimeSlot::new(*id, order))
            .collect(),
        subjects: SUBJECTS.iter().map(|id| Subject::new(*id)).collect(),
        people: TEACHERS
            .iter()
            .map(|(id, name)| Person::teacher(*id).with_name(*name))
            .chain(
                CHILDREN
                    .iter()
                    .map(|(id, name)| Person::child(*id).with_name(*name)),
            )
            .collect(),
        cells: Vec::new(),
    }
}

/// An empty timetable over the school week registries.
pub fn school_week() -> Result<Timetable, Vec<ValidationError>> {
    let TimetableRecord {
        slots,
        subjects,
        people,
        ..
    } = school_week_record();
    Timetable::new(slots, subjects, people)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssignError;

    #[test]
    fn test_school_week_registries() {
        let tt = school_week().unwrap();
        assert_eq!(tt.slots().len(), 2);
        assert_eq!(tt.subjects().len(), 4);
        assert_eq!(tt.teachers().count(), 4);
        assert_eq!(tt.children().count(), 4);
        assert_eq!(tt.slots()[0].id, "08:00-08:45");
        assert_eq!(tt.subjects()[3].label, "Physical Education");
        assert_eq!(
            tt.person("noa-bicycle").map(|p| p.name.as_str()),
            Some("Noa Bicycle")
        );
        assert_eq!(tt.grid().iter().map(|r| r.cells.len()).sum::<usize>(), 8);
    }

    #[test]
    fn test_school_week_drop_flow() {
        let mut tt = school_week().unwrap();
        tt.place("08:00-08:45", "English", "orit-sharon").unwrap();
        tt.place("08:00-08:45", "English", "avi-levy").unwrap();
        tt.place("08:00-08:45", "English", "yehuda-levy").unwrap();

        let err = tt
            .place("08:00-08:45", "Mathematics", "avi-levy")
            .unwrap_err();
        assert!(matches!(err, AssignError::DoubleBooked { .. }));

        let cell = tt.cell("08:00-08:45", "English").unwrap();
        assert_eq!(cell.teacher.map(|p| p.display_name()), Some("Orit Sharon"));
        assert_eq!(cell.child_ids(), vec!["avi-levy", "yehuda-levy"]);
    }
}
