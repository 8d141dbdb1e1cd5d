use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::error::ErrorBody;
use crate::routes::{
    auth, directorate, disciplines, flash, grading, groups, health, home, reports, specialties,
    students, teachers,
};
use crate::services::reports::{ControlForms, CourseReport};
use crate::repositories::{GradeEntryRow, StudentGradeRow};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::route::health,
        auth::route::login,
        home::route::home,
        specialties::route::list_specialties,
        specialties::route::change_specialties,
        disciplines::route::list_disciplines,
        disciplines::route::change_disciplines,
        groups::route::list_groups,
        groups::route::create_group,
        groups::route::select_group,
        groups::route::list_group_students,
        groups::route::add_student,
        groups::route::import_roster,
        groups::route::grading_window,
        students::route::delete_student,
        grading::route::grade_entry,
        grading::route::save_grades,
        grading::route::assign_teacher_form,
        grading::route::assign_teacher_to_group,
        reports::route::student_card,
        reports::route::study_plan,
        reports::route::control_forms_doc,
        reports::route::curriculum_doc,
        reports::route::course_selection,
        reports::route::student_report,
        directorate::route::search_students,
        directorate::route::group_roster,
        directorate::route::select_discipline,
        directorate::route::select_discipline_group,
        teachers::route::list_teachers,
        teachers::route::create_teacher,
    ),
    components(schemas(
        ErrorBody,
        flash::FlashRedirect,
        flash::FlashLevel,
        GradeEntryRow,
        StudentGradeRow,
        ControlForms,
        CourseReport,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Login"),
        (name = "Home", description = "Landing page"),
        (name = "Catalog", description = "Specialties and disciplines"),
        (name = "Groups", description = "Groups and enrolment"),
        (name = "Grading", description = "Grade sheets and teacher assignment"),
        (name = "Reports", description = "Student cards and printable reports"),
        (name = "Directorate", description = "Search and selection pages"),
        (name = "Teachers", description = "Teaching staff"),
    ),
    info(title = "Academic records API")
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
