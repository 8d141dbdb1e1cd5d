//! Demo data: a small faculty with two specialties, three groups and graded
//! students. Running it twice adds students but never duplicates the catalog.

use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, Result};
use rand::{Rng, seq::IndexedRandom};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::config::SEMESTER_COUNT;
use crate::entities::{group, specialty, teacher};
use crate::repositories::{
    DisciplineRepository, GradeSheetRepository, GroupRepository, NewDiscipline, NewStudent,
    NewTeacher, SemesterRepository, SpecialtyRepository, StudentRepository, TeacherRepository,
};
use crate::services::provisioning::provision_many;

const STUDENTS_PER_GROUP: usize = 7;

const SURNAMES: [&str; 6] = ["Иванов", "Петров", "Сидоров", "Кузнецов", "Попов", "Васильев"];
const FIRST_NAMES: [&str; 4] = ["Александр", "Дмитрий", "Максим", "Сергей"];
const PATRONYMICS: [&str; 3] = ["Иванович", "Петрович", "Сергеевич"];

#[derive(Clone, Copy)]
enum Track {
    It,
    Is,
}

struct DemoDiscipline {
    name: &'static str,
    exam_type: &'static str,
    hours: i32,
    semester: i32,
    tracks: &'static [Track],
}

const DISCIPLINES: [DemoDiscipline; 6] = [
    DemoDiscipline {
        name: "Математика",
        exam_type: "Экзамен",
        hours: 144,
        semester: 1,
        tracks: &[Track::It, Track::Is],
    },
    DemoDiscipline {
        name: "Программирование Python",
        exam_type: "Зачет",
        hours: 72,
        semester: 3,
        tracks: &[Track::It, Track::Is],
    },
    DemoDiscipline {
        name: "Базы данных",
        exam_type: "Экзамен",
        hours: 108,
        semester: 5,
        tracks: &[Track::It],
    },
    DemoDiscipline {
        name: "Базы данных",
        exam_type: "Курсовая работа",
        hours: 36,
        semester: 5,
        tracks: &[Track::It],
    },
    DemoDiscipline {
        name: "Web-программирование",
        exam_type: "Экзамен",
        hours: 180,
        semester: 2,
        tracks: &[Track::Is],
    },
    DemoDiscipline {
        name: "Правоведение",
        exam_type: "Зачет",
        hours: 36,
        semester: 5,
        tracks: &[Track::It],
    },
];

const GROUPS: [(&str, Track, i32); 3] = [
    ("ИСИб-23-1", Track::It, 2023),
    ("ИСТб-23-1", Track::Is, 2023),
    ("ИСИб-25-1", Track::It, 2025),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub students: usize,
    pub grade_rows: u64,
    pub graded: usize,
}

struct Catalog {
    it: specialty::Model,
    is: specialty::Model,
    main_teacher: teacher::Model,
    second_teacher: teacher::Model,
}

impl Catalog {
    fn specialty(&self, track: Track) -> &specialty::Model {
        match track {
            Track::It => &self.it,
            Track::Is => &self.is,
        }
    }

    /// Mathematics goes to the first teacher, everything else to the second.
    fn teacher_for(&self, discipline_name: &str) -> &teacher::Model {
        if discipline_name.contains("Математика") {
            &self.main_teacher
        } else {
            &self.second_teacher
        }
    }
}

async fn specialty_by_code(db: &DatabaseConnection, code: &str, name: &str) -> Result<specialty::Model> {
    let repo = SpecialtyRepository::new(db);
    match repo.find_by_code(code).await? {
        Some(existing) => Ok(existing),
        None => repo.create(code.to_string(), name.to_string()).await,
    }
}

async fn seed_catalog(db: &DatabaseConnection) -> Result<Catalog> {
    let semester_repo = SemesterRepository::new(db);
    semester_repo.ensure_numbers(SEMESTER_COUNT).await?;
    let semesters: BTreeMap<i32, i32> = semester_repo
        .find_all()
        .await?
        .into_iter()
        .map(|semester| (semester.number, semester.id))
        .collect();

    let teachers = TeacherRepository::new(db);
    let catalog = Catalog {
        it: specialty_by_code(db, "09.03.01", "Информатика и вычислительная техника").await?,
        is: specialty_by_code(db, "09.03.02", "Информационные системы и технологии").await?,
        main_teacher: teachers
            .get_or_create(NewTeacher {
                surname: "Петров".to_string(),
                first_name: "Иван".to_string(),
                patronymic: "Сергеевич".to_string(),
                position: String::new(),
            })
            .await?,
        second_teacher: teachers
            .get_or_create(NewTeacher {
                surname: "Сидоров".to_string(),
                first_name: "Алексей".to_string(),
                patronymic: "Николаевич".to_string(),
                position: String::new(),
            })
            .await?,
    };

    let disciplines = DisciplineRepository::new(db);
    for demo in &DISCIPLINES {
        let semester_id = semesters
            .get(&demo.semester)
            .copied()
            .with_context(|| format!("Semester {} is missing", demo.semester))?;

        for &track in demo.tracks {
            let candidate = NewDiscipline {
                name: demo.name.to_string(),
                exam_type: demo.exam_type.to_string(),
                hours: demo.hours,
                specialty_id: Some(catalog.specialty(track).id),
                semester_id: Some(semester_id),
            };
            if disciplines.find_matching(&candidate).await?.is_none() {
                disciplines.create(candidate).await?;
            }
        }
    }

    Ok(catalog)
}

async fn seed_groups(db: &DatabaseConnection, catalog: &Catalog) -> Result<Vec<group::Model>> {
    let repo = GroupRepository::new(db);
    let mut groups = Vec::with_capacity(GROUPS.len());
    for (name, track, admission_year) in GROUPS {
        let specialty_id = catalog.specialty(track).id;
        let group = match repo.find_by_name(specialty_id, name).await? {
            Some(existing) => existing,
            None => repo.create(specialty_id, name.to_string(), admission_year).await?,
        };
        groups.push(group);
    }
    Ok(groups)
}

fn random_student<R: Rng + ?Sized>(rng: &mut R) -> NewStudent {
    NewStudent {
        surname: SURNAMES.choose(rng).copied().unwrap_or(SURNAMES[0]).to_string(),
        first_name: FIRST_NAMES.choose(rng).copied().unwrap_or(FIRST_NAMES[0]).to_string(),
        patronymic: PATRONYMICS.choose(rng).copied().unwrap_or(PATRONYMICS[0]).to_string(),
    }
}

/// Fills the database with the demo faculty. Students are inserted in one
/// transaction and provisioned in bulk, then graded 3 to 5 and given a teacher.
pub async fn seed_demo<R: Rng + ?Sized>(db: &DatabaseConnection, rng: &mut R) -> Result<SeedSummary> {
    let catalog = seed_catalog(db).await.context("Failed to seed catalog")?;
    let groups = seed_groups(db, &catalog).await.context("Failed to seed groups")?;

    let txn = db.begin().await?;
    let students_repo = StudentRepository::new(&txn);

    let mut students = Vec::new();
    for group in &groups {
        let mut taken: HashSet<(String, String, String)> = students_repo
            .find_by_group(group.id)
            .await?
            .into_iter()
            .map(|s| (s.surname, s.first_name, s.patronymic))
            .collect();

        for _ in 0..STUDENTS_PER_GROUP {
            let candidate = random_student(rng);
            let key = (
                candidate.surname.clone(),
                candidate.first_name.clone(),
                candidate.patronymic.clone(),
            );
            if taken.insert(key) {
                students.push(students_repo.create(group.id, candidate).await?);
            }
        }
    }

    let grade_rows = provision_many(&txn, &students).await?;

    let grades = GradeSheetRepository::new(&txn);
    let rows = grades
        .find_by_students(students.iter().map(|s| s.id).collect())
        .await?;
    let graded = rows.len();
    for row in rows {
        grades.update_grade(row, rng.random_range(3..=5)).await?;
    }

    let disciplines = DisciplineRepository::new(&txn);
    for group in &groups {
        for discipline in disciplines.find_by_specialty_ids(vec![group.specialty_id]).await? {
            let teacher = catalog.teacher_for(&discipline.name);
            grades
                .set_teacher_for_group(discipline.id, group.id, teacher.id)
                .await?;
        }
    }

    txn.commit().await?;

    let summary = SeedSummary {
        students: students.len(),
        grade_rows,
        graded,
    };
    tracing::info!(
        students = summary.students,
        grade_rows = summary.grade_rows,
        "Demo data seeded"
    );
    Ok(summary)
}
