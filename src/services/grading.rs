use std::collections::HashMap;

use anyhow::Result;
use sea_orm::{ConnectionTrait, DatabaseConnection, Set, TransactionTrait};
use serde_json::Value;

use crate::entities::{discipline, grade_sheet, sea_orm_active_enums::RoleEnum};
use crate::repositories::{GradeEntryRow, GradeSheetRepository, StudentRepository};
use crate::services::provisioning::{provision_group, today};

/// Rows of (discipline, group), back-filled first unless the viewer is
/// directorate staff, who only ever read.
pub async fn open_grade_sheet<C: ConnectionTrait>(
    db: &C,
    viewer: RoleEnum,
    discipline: &discipline::Model,
    group_id: i32,
) -> Result<Vec<GradeEntryRow>> {
    match viewer {
        RoleEnum::Registrar | RoleEnum::Teacher => {
            provision_group(db, discipline, group_id).await?;
        }
        RoleEnum::Directorate => {}
    }

    GradeSheetRepository::new(db)
        .entry_rows(discipline.id, group_id)
        .await
}

/// Reads a submitted grade form: keys are row ids (optionally prefixed with
/// `grade_`), values are numbers, numeric strings or null. Anything else is
/// dropped. When both `12` and `grade_12` are sent, `grade_12` wins.
pub fn parse_submission(form: &HashMap<String, Value>) -> HashMap<i32, i32> {
    let mut plain = HashMap::new();
    let mut prefixed = HashMap::new();

    for (key, value) in form {
        let (target, raw_id) = match key.strip_prefix("grade_") {
            Some(rest) => (&mut prefixed, rest),
            None => (&mut plain, key.as_str()),
        };
        let Ok(id) = raw_id.parse::<i32>() else {
            continue;
        };
        let grade = match value {
            Value::Number(n) => n.as_i64().and_then(|g| i32::try_from(g).ok()),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        };
        if let Some(grade) = grade {
            target.insert(id, grade);
        }
    }

    plain.extend(prefixed);
    plain
}

/// Stores the submitted grades on the rows of (discipline, group) and returns
/// how many rows were written. Ids outside that sheet are ignored.
pub async fn submit_grades(
    db: &DatabaseConnection,
    discipline_id: i32,
    group_id: i32,
    grades: &HashMap<i32, i32>,
) -> Result<u64> {
    let txn = db.begin().await?;
    let repo = GradeSheetRepository::new(&txn);

    let mut saved = 0;
    for row in repo.find_for_discipline_group(discipline_id, group_id).await? {
        if let Some(&grade) = grades.get(&row.id) {
            repo.update_grade(row, grade).await?;
            saved += 1;
        }
    }

    txn.commit().await?;

    tracing::info!(discipline_id, group_id, saved, "Saved grades");
    Ok(saved)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// Existing rows now point at the teacher.
    Updated(u64),
    /// No rows existed; one per student of the group was upserted.
    Inserted(u64),
    /// No rows existed and the discipline has no semester to key new ones by.
    MissingSemester,
}

impl Assignment {
    pub fn affected(self) -> u64 {
        match self {
            Assignment::Updated(n) | Assignment::Inserted(n) => n,
            Assignment::MissingSemester => 0,
        }
    }
}

pub async fn assign_teacher(
    db: &DatabaseConnection,
    discipline: &discipline::Model,
    group_id: i32,
    teacher_id: i32,
) -> Result<Assignment> {
    let txn = db.begin().await?;
    let repo = GradeSheetRepository::new(&txn);

    let updated = repo
        .set_teacher_for_group(discipline.id, group_id, teacher_id)
        .await?;

    let outcome = if updated > 0 {
        Assignment::Updated(updated)
    } else if let Some(semester_id) = discipline.semester_id {
        let students = StudentRepository::new(&txn).find_by_group(group_id).await?;
        let date = today();
        let rows: Vec<grade_sheet::ActiveModel> = students
            .iter()
            .map(|student| grade_sheet::ActiveModel {
                student_id: Set(student.id),
                discipline_id: Set(discipline.id),
                semester_id: Set(semester_id),
                teacher_id: Set(Some(teacher_id)),
                grade: Set(grade_sheet::UNGRADED),
                date: Set(date),
                ..Default::default()
            })
            .collect();
        repo.upsert_teacher(rows).await?;
        Assignment::Inserted(students.len() as u64)
    } else {
        Assignment::MissingSemester
    };

    txn.commit().await?;

    tracing::info!(
        discipline_id = discipline.id,
        group_id,
        teacher_id,
        outcome = ?outcome,
        "Assigned teacher"
    );
    Ok(outcome)
}
