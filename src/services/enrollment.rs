use anyhow::Result;
use sea_orm::{DatabaseConnection, TransactionTrait};
use thiserror::Error;

use crate::entities::student;
use crate::repositories::{NewStudent, StudentRepository};
use crate::services::provisioning::{provision_many, provision_student};

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    #[error("roster is empty")]
    Empty,

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub struct ImportSummary {
    pub students: Vec<student::Model>,
    pub grade_rows: u64,
}

/// Inserts a student and the grade rows of their specialty in one transaction.
pub async fn enroll_student(
    db: &DatabaseConnection,
    group_id: i32,
    new_student: NewStudent,
) -> Result<(student::Model, u64)> {
    let txn = db.begin().await?;

    let student = StudentRepository::new(&txn).create(group_id, new_student).await?;
    let grade_rows = provision_student(&txn, &student).await?;

    txn.commit().await?;

    tracing::info!(
        student_id = student.id,
        group_id,
        grade_rows,
        "Enrolled student"
    );
    Ok((student, grade_rows))
}

/// Enrolls a whole roster into a group; either every student is created or none.
pub async fn import_students(
    db: &DatabaseConnection,
    group_id: i32,
    roster: Vec<NewStudent>,
) -> Result<ImportSummary> {
    let txn = db.begin().await?;

    let repo = StudentRepository::new(&txn);
    let mut students = Vec::with_capacity(roster.len());
    for new_student in roster {
        students.push(repo.create(group_id, new_student).await?);
    }
    let grade_rows = provision_many(&txn, &students).await?;

    txn.commit().await?;

    tracing::info!(
        group_id,
        students = students.len(),
        grade_rows,
        "Imported roster"
    );
    Ok(ImportSummary {
        students,
        grade_rows,
    })
}

/// Parses `surname,first_name[,patronymic]` lines. A leading header line
/// starting with `surname` is skipped.
pub fn parse_roster(data: &[u8]) -> Result<Vec<NewStudent>, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut roster = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(index as u64 + 1, |p| p.line());

        let surname = record.get(0).unwrap_or_default();
        if index == 0 && surname.eq_ignore_ascii_case("surname") {
            continue;
        }
        if record.iter().all(str::is_empty) {
            continue;
        }

        let first_name = record.get(1).unwrap_or_default();
        if surname.is_empty() || first_name.is_empty() {
            return Err(RosterError::InvalidRow {
                line,
                reason: "surname and first name are required".to_string(),
            });
        }

        roster.push(NewStudent {
            surname: surname.to_string(),
            first_name: first_name.to_string(),
            patronymic: record.get(2).unwrap_or_default().to_string(),
        });
    }

    if roster.is_empty() {
        return Err(RosterError::Empty);
    }
    Ok(roster)
}
