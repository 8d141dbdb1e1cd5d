pub mod discipline_repository;
pub mod grade_sheet_repository;
pub mod group_repository;
pub mod semester_repository;
pub mod specialty_repository;
pub mod student_repository;
pub mod teacher_repository;
pub mod user_repository;

pub use discipline_repository::{DisciplineRepository, DisciplineUpdate, NewDiscipline};
pub use grade_sheet_repository::{GradeEntryRow, GradeSheetRepository, StudentGradeRow};
pub use group_repository::GroupRepository;
pub use semester_repository::SemesterRepository;
pub use specialty_repository::{SpecialtyRepository, SpecialtyUpdate};
pub use student_repository::{NewStudent, StudentRepository};
pub use teacher_repository::{NewTeacher, TeacherRepository};
pub use user_repository::{NewUser, UserRepository};
