use std::collections::BTreeMap;

use anyhow::Result;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::{discipline, specialty};
use crate::repositories::{DisciplineRepository, GradeSheetRepository, StudentGradeRow};

/// Parses a positive page parameter such as `course` or `semester`; anything
/// missing or malformed reads as 1.
pub fn number_or_first(raw: Option<&str>) -> i32 {
    raw.and_then(|value| value.trim().parse::<i32>().ok())
        .unwrap_or(1)
}

/// Course `c` covers semesters `2c - 1` and `2c`. `None` when that range
/// does not fit in an `i32`.
pub fn course_semesters(course: i32) -> Option<(i32, i32)> {
    let last = course.checked_mul(2)?;
    Some((last.checked_sub(1)?, last))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlForm {
    Exam,
    Test,
    CourseWork,
}

/// Buckets a free-text assessment type. The checks run in order and the
/// exam and course-work ones are case sensitive.
pub fn classify_exam_type(exam_type: &str) -> Option<ControlForm> {
    if exam_type.contains("Экзамен") {
        Some(ControlForm::Exam)
    } else if exam_type.to_lowercase().contains("зачёт") {
        Some(ControlForm::Test)
    } else if exam_type.contains("Курсовая") {
        Some(ControlForm::CourseWork)
    } else {
        None
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ControlForms {
    pub exams: Vec<String>,
    pub tests: Vec<String>,
    pub course_works: Vec<String>,
}

/// Discipline names per specialty label, bucketed by control form.
/// Disciplines without a specialty or with an unrecognised form are left out.
pub fn group_control_forms(
    disciplines: Vec<(discipline::Model, Option<specialty::Model>)>,
) -> BTreeMap<String, ControlForms> {
    let mut grouped: BTreeMap<String, ControlForms> = BTreeMap::new();

    for (discipline, specialty) in disciplines {
        let Some(specialty) = specialty else {
            continue;
        };
        let Some(form) = classify_exam_type(&discipline.exam_type) else {
            continue;
        };

        let forms = grouped.entry(specialty.label()).or_default();
        match form {
            ControlForm::Exam => forms.exams.push(discipline.name),
            ControlForm::Test => forms.tests.push(discipline.name),
            ControlForm::CourseWork => forms.course_works.push(discipline.name),
        }
    }

    grouped
}

pub async fn control_forms<C: ConnectionTrait>(
    db: &C,
    semester_number: i32,
) -> Result<BTreeMap<String, ControlForms>> {
    let disciplines = DisciplineRepository::new(db)
        .find_by_semester_number(semester_number)
        .await?;
    Ok(group_control_forms(disciplines))
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CourseReport {
    pub course: i32,
    pub semester_start: i32,
    pub semester_end: i32,
    pub grades: Vec<StudentGradeRow>,
    /// Mean over every row of the course, ungraded ones included.
    pub average_grade: Option<f64>,
}

pub fn average_grade(rows: &[StudentGradeRow]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    let total: i64 = rows.iter().map(|row| i64::from(row.grade)).sum();
    Some(total as f64 / rows.len() as f64)
}

pub async fn course_report<C: ConnectionTrait>(
    db: &C,
    student_id: i32,
    course: i32,
) -> Result<CourseReport> {
    let (course, (semester_start, semester_end)) = match course_semesters(course) {
        Some(semesters) => (course, semesters),
        None => (1, (1, 2)),
    };
    let grades = GradeSheetRepository::new(db)
        .student_rows_in_semesters(student_id, vec![semester_start, semester_end])
        .await?;

    Ok(CourseReport {
        course,
        semester_start,
        semester_end,
        average_grade: average_grade(&grades),
        grades,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn discipline(id: i32, name: &str, exam_type: &str) -> discipline::Model {
        discipline::Model {
            id,
            name: name.to_string(),
            exam_type: exam_type.to_string(),
            hours: 72,
            specialty_id: Some(1),
            semester_id: Some(1),
        }
    }

    fn specialty(code: &str, name: &str) -> Option<specialty::Model> {
        Some(specialty::Model {
            id: 1,
            code: code.to_string(),
            name: name.to_string(),
        })
    }

    fn grade_row(grade: i32) -> StudentGradeRow {
        StudentGradeRow {
            grade_sheet_id: 1,
            discipline_id: 1,
            discipline_name: "Математика".to_string(),
            exam_type: "Экзамен".to_string(),
            semester_number: 3,
            teacher_id: None,
            grade,
            date: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
        }
    }

    #[test]
    fn malformed_numbers_fall_back_to_first() {
        assert_eq!(number_or_first(None), 1);
        assert_eq!(number_or_first(Some("abc")), 1);
        assert_eq!(number_or_first(Some("")), 1);
        assert_eq!(number_or_first(Some("3")), 3);
    }

    #[test]
    fn course_maps_to_two_semesters() {
        assert_eq!(course_semesters(1), Some((1, 2)));
        assert_eq!(course_semesters(2), Some((3, 4)));
        assert_eq!(course_semesters(4), Some((7, 8)));
    }

    #[test]
    fn out_of_range_course_has_no_semesters() {
        assert_eq!(course_semesters(2_000_000_000), None);
        assert_eq!(course_semesters(i32::MIN / 2), None);
        assert_eq!(course_semesters(i32::MAX), None);
    }

    #[test]
    fn exam_types_are_bucketed_in_order() {
        assert_eq!(classify_exam_type("Экзамен"), Some(ControlForm::Exam));
        assert_eq!(classify_exam_type("Зачёт"), Some(ControlForm::Test));
        assert_eq!(classify_exam_type("Дифф. зачёт"), Some(ControlForm::Test));
        assert_eq!(classify_exam_type("Курсовая работа"), Some(ControlForm::CourseWork));
        assert_eq!(classify_exam_type("экзамен"), None);
        assert_eq!(classify_exam_type("Зачет"), None);
        assert_eq!(classify_exam_type("курсовая работа"), None);
    }

    #[test]
    fn control_forms_group_by_specialty_label() {
        let grouped = group_control_forms(vec![
            (discipline(1, "Математика", "Экзамен"), specialty("09.03.01", "ИВТ")),
            (discipline(2, "Физкультура", "Зачёт"), specialty("09.03.01", "ИВТ")),
            (discipline(3, "Базы данных", "Курсовая работа"), specialty("09.03.01", "ИВТ")),
            (discipline(4, "Черчение", "Экзамен"), None),
        ]);

        assert_eq!(grouped.len(), 1);
        let forms = &grouped["09.03.01 ИВТ"];
        assert_eq!(forms.exams, vec!["Математика".to_string()]);
        assert_eq!(forms.tests, vec!["Физкультура".to_string()]);
        assert_eq!(forms.course_works, vec!["Базы данных".to_string()]);
    }

    #[test]
    fn average_is_absent_without_rows() {
        assert_eq!(average_grade(&[]), None);
        assert_eq!(average_grade(&[grade_row(4), grade_row(5)]), Some(4.5));
        assert_eq!(average_grade(&[grade_row(0), grade_row(3)]), Some(1.5));
    }
}
