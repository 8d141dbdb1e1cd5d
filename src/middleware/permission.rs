use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::{AppError, AppResult};
use crate::utils::jwt::TokenClaims;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Specialties, disciplines and the study plan.
    ManageCatalog,
    ViewStudentCard,
    AssignTeachers,
    EditGrades,
    ViewGradingWindow,
    /// Creating and removing students, groups and teachers.
    ManageEnrollment,
    ViewGroupRoster,
}

impl Permission {
    pub fn allows(self, role: RoleEnum) -> bool {
        match self {
            Permission::ManageCatalog => match role {
                RoleEnum::Registrar => true,
                RoleEnum::Directorate | RoleEnum::Teacher => false,
            },
            Permission::ViewStudentCard
            | Permission::AssignTeachers
            | Permission::ManageEnrollment => match role {
                RoleEnum::Registrar | RoleEnum::Directorate => true,
                RoleEnum::Teacher => false,
            },
            Permission::EditGrades | Permission::ViewGradingWindow => match role {
                RoleEnum::Registrar | RoleEnum::Teacher => true,
                RoleEnum::Directorate => false,
            },
            Permission::ViewGroupRoster => match role {
                RoleEnum::Directorate => true,
                RoleEnum::Registrar | RoleEnum::Teacher => false,
            },
        }
    }

    fn denial_message(self) -> &'static str {
        match self {
            Permission::ManageCatalog => "Only registrar staff can manage the catalog",
            Permission::ViewStudentCard => "Only registrar or directorate staff can view student cards",
            Permission::AssignTeachers => "You are not allowed to assign teachers",
            Permission::EditGrades => "Directorate staff cannot change grades",
            Permission::ViewGradingWindow => "Only registrar staff or teachers can open the grading window",
            Permission::ManageEnrollment => "Only registrar or directorate staff can manage enrolment",
            Permission::ViewGroupRoster => "Only directorate staff can manage group composition",
        }
    }
}

pub fn has_permission(claims: &TokenClaims, permission: Permission) -> bool {
    permission.allows(claims.role)
}

pub fn ensure_permission(claims: &TokenClaims, permission: Permission) -> AppResult<()> {
    if has_permission(claims, permission) {
        Ok(())
    } else {
        tracing::debug!(
            user = %claims.username,
            role = ?claims.role,
            permission = ?permission,
            "permission denied"
        );
        Err(AppError::Forbidden(permission.denial_message().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLES: [RoleEnum; 3] = [RoleEnum::Registrar, RoleEnum::Directorate, RoleEnum::Teacher];

    fn allowed_roles(permission: Permission) -> Vec<RoleEnum> {
        ROLES
            .into_iter()
            .filter(|role| permission.allows(*role))
            .collect()
    }

    #[test]
    fn catalog_is_registrar_only() {
        assert_eq!(allowed_roles(Permission::ManageCatalog), vec![RoleEnum::Registrar]);
    }

    #[test]
    fn directorate_cannot_edit_grades() {
        assert_eq!(
            allowed_roles(Permission::EditGrades),
            vec![RoleEnum::Registrar, RoleEnum::Teacher]
        );
    }

    #[test]
    fn teacher_assignment_is_staff_only() {
        assert_eq!(
            allowed_roles(Permission::AssignTeachers),
            vec![RoleEnum::Registrar, RoleEnum::Directorate]
        );
        assert_eq!(
            allowed_roles(Permission::ViewStudentCard),
            vec![RoleEnum::Registrar, RoleEnum::Directorate]
        );
    }

    #[test]
    fn roster_is_directorate_only() {
        assert_eq!(allowed_roles(Permission::ViewGroupRoster), vec![RoleEnum::Directorate]);
    }
}
