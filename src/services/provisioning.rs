//! Creation of grade-sheet rows.
//!
//! Every student owes one row per discipline of their group's specialty,
//! keyed by (student, discipline, discipline semester). Rows are created with
//! grade [`grade_sheet::UNGRADED`] and today's date and are never overwritten
//! here; inserts go through the unique index with `ON CONFLICT DO NOTHING`,
//! so every function in this module is idempotent.

use std::collections::{BTreeSet, HashMap};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use sea_orm::{ConnectionTrait, Set};

use crate::entities::{discipline, grade_sheet, student};
use crate::repositories::{
    DisciplineRepository, GradeSheetRepository, GroupRepository, StudentRepository,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetKey {
    pub student_id: i32,
    pub discipline_id: i32,
    pub semester_id: i32,
}

impl SheetKey {
    fn new_row(self, date: NaiveDate) -> grade_sheet::ActiveModel {
        grade_sheet::ActiveModel {
            student_id: Set(self.student_id),
            discipline_id: Set(self.discipline_id),
            semester_id: Set(self.semester_id),
            teacher_id: Set(None),
            grade: Set(grade_sheet::UNGRADED),
            date: Set(date),
            ..Default::default()
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Keys owed to `students`, given the specialty of each group and the
/// candidate disciplines. Disciplines without a specialty or a semester
/// produce nothing.
pub fn required_keys(
    students: &[student::Model],
    group_specialty: &HashMap<i32, i32>,
    disciplines: &[discipline::Model],
) -> Vec<SheetKey> {
    let mut by_specialty: HashMap<i32, Vec<(i32, i32)>> = HashMap::new();
    for discipline in disciplines {
        let Some(specialty_id) = discipline.specialty_id else {
            continue;
        };
        let Some(semester_id) = discipline.semester_id else {
            tracing::warn!(
                discipline_id = discipline.id,
                name = %discipline.name,
                "Discipline has no semester, no grade rows created"
            );
            continue;
        };
        by_specialty
            .entry(specialty_id)
            .or_default()
            .push((discipline.id, semester_id));
    }

    students
        .iter()
        .filter_map(|student| {
            group_specialty
                .get(&student.group_id)
                .and_then(|specialty_id| by_specialty.get(specialty_id))
                .map(|owed| (student.id, owed))
        })
        .flat_map(|(student_id, owed)| {
            owed.iter().map(move |&(discipline_id, semester_id)| SheetKey {
                student_id,
                discipline_id,
                semester_id,
            })
        })
        .collect()
}

async fn insert_keys<C: ConnectionTrait>(db: &C, keys: Vec<SheetKey>) -> Result<u64> {
    if keys.is_empty() {
        return Ok(0);
    }
    let date = today();
    let rows = keys.into_iter().map(|key| key.new_row(date)).collect();
    GradeSheetRepository::new(db).insert_missing(rows).await
}

/// Ensures the rows of a single, usually freshly inserted, student.
pub async fn provision_student<C: ConnectionTrait>(db: &C, student: &student::Model) -> Result<u64> {
    provision_many(db, std::slice::from_ref(student)).await
}

/// Batch form of [`provision_student`]: one discipline lookup for all the
/// specialties involved and chunked inserts.
pub async fn provision_many<C: ConnectionTrait>(db: &C, students: &[student::Model]) -> Result<u64> {
    if students.is_empty() {
        return Ok(0);
    }

    let group_ids: BTreeSet<i32> = students.iter().map(|s| s.group_id).collect();
    let group_specialty: HashMap<i32, i32> = GroupRepository::new(db)
        .find_by_ids(group_ids.into_iter().collect())
        .await?
        .into_iter()
        .map(|group| (group.id, group.specialty_id))
        .collect();

    let specialty_ids: BTreeSet<i32> = group_specialty.values().copied().collect();
    let disciplines = DisciplineRepository::new(db)
        .find_by_specialty_ids(specialty_ids.into_iter().collect())
        .await?;

    let keys = required_keys(students, &group_specialty, &disciplines);
    let created = insert_keys(db, keys).await?;

    tracing::info!(students = students.len(), created, "Provisioned grade rows");
    Ok(created)
}

/// Brings the rows of one discipline in line with its current semester:
/// existing rows follow the discipline to that semester and every student of
/// the specialty gets a row.
pub async fn provision_discipline<C: ConnectionTrait>(
    db: &C,
    discipline: &discipline::Model,
) -> Result<u64> {
    let (Some(specialty_id), Some(semester_id)) = (discipline.specialty_id, discipline.semester_id)
    else {
        tracing::warn!(
            discipline_id = discipline.id,
            "Discipline lacks a specialty or semester, grade rows left untouched"
        );
        return Ok(0);
    };

    let moved = GradeSheetRepository::new(db)
        .move_discipline_to_semester(discipline.id, semester_id)
        .await?;

    let students = StudentRepository::new(db).find_by_specialty(specialty_id).await?;
    let keys = students
        .iter()
        .map(|student| SheetKey {
            student_id: student.id,
            discipline_id: discipline.id,
            semester_id,
        })
        .collect();
    let created = insert_keys(db, keys).await?;

    tracing::info!(
        discipline_id = discipline.id,
        moved,
        created,
        "Provisioned discipline grade rows"
    );
    Ok(created)
}

/// Fills the rows of `discipline` for every student of one group, whatever
/// the group's specialty. Used when a grade sheet is opened.
pub async fn provision_group<C: ConnectionTrait>(
    db: &C,
    discipline: &discipline::Model,
    group_id: i32,
) -> Result<u64> {
    let Some(semester_id) = discipline.semester_id else {
        tracing::warn!(
            discipline_id = discipline.id,
            group_id,
            "Discipline has no semester, grade sheet not back-filled"
        );
        return Ok(0);
    };

    let students = StudentRepository::new(db).find_by_group(group_id).await?;
    let keys = students
        .iter()
        .map(|student| SheetKey {
            student_id: student.id,
            discipline_id: discipline.id,
            semester_id,
        })
        .collect();
    insert_keys(db, keys).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn student(id: i32, group_id: i32) -> student::Model {
        student::Model {
            id,
            group_id,
            surname: format!("Студент{id}"),
            first_name: "Иван".to_string(),
            patronymic: String::new(),
        }
    }

    fn discipline(id: i32, specialty_id: Option<i32>, semester_id: Option<i32>) -> discipline::Model {
        discipline::Model {
            id,
            name: format!("Дисциплина {id}"),
            exam_type: "Экзамен".to_string(),
            hours: 72,
            specialty_id,
            semester_id,
        }
    }

    #[test]
    fn one_key_per_discipline_of_the_specialty() {
        let students = vec![student(1, 10)];
        let groups = HashMap::from([(10, 100)]);
        let disciplines = vec![
            discipline(5, Some(100), Some(1)),
            discipline(6, Some(100), Some(3)),
            discipline(7, Some(200), Some(1)),
        ];

        let keys = required_keys(&students, &groups, &disciplines);
        assert_eq!(
            keys,
            vec![
                SheetKey { student_id: 1, discipline_id: 5, semester_id: 1 },
                SheetKey { student_id: 1, discipline_id: 6, semester_id: 3 },
            ]
        );
    }

    #[test]
    fn disciplines_without_semester_are_skipped() {
        let students = vec![student(1, 10), student(2, 10)];
        let groups = HashMap::from([(10, 100)]);
        let disciplines = vec![discipline(5, Some(100), None), discipline(6, Some(100), Some(2))];

        let keys = required_keys(&students, &groups, &disciplines);
        assert_eq!(keys.len(), 2);
        assert!(keys.iter().all(|key| key.discipline_id == 6));
    }

    #[test]
    fn students_of_unknown_groups_get_nothing() {
        let students = vec![student(1, 99)];
        let groups = HashMap::from([(10, 100)]);
        let disciplines = vec![discipline(5, Some(100), Some(1))];

        assert!(required_keys(&students, &groups, &disciplines).is_empty());
    }
}
