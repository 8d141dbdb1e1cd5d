pub mod discipline;
pub mod grade_sheet;
pub mod group;
pub mod sea_orm_active_enums;
pub mod semester;
pub mod specialty;
pub mod student;
pub mod teacher;
pub mod user;
