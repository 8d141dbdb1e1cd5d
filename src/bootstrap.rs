use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;

use crate::config::{Config, SEMESTER_COUNT};
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::repositories::{
    NewTeacher, NewUser, SemesterRepository, TeacherRepository, UserRepository,
};

struct SystemAccount<'a> {
    username: &'a str,
    password: &'a str,
    surname: &'a str,
    first_name: &'a str,
    patronymic: &'a str,
    role: RoleEnum,
}

async fn ensure_account(
    db: &DatabaseConnection,
    account: SystemAccount<'_>,
    bcrypt_cost: u32,
) -> Result<()> {
    let users = UserRepository::new(db);
    if users
        .find_by_username(account.username)
        .await
        .context("Failed to check existing account")?
        .is_some()
    {
        tracing::debug!(username = account.username, "Account already exists");
        return Ok(());
    }

    let password_hash = bcrypt::hash(account.password, bcrypt_cost)
        .context("Failed to hash bootstrap password")?;

    users
        .create(NewUser {
            username: account.username.to_string(),
            password_hash,
            surname: account.surname.to_string(),
            first_name: account.first_name.to_string(),
            patronymic: account.patronymic.to_string(),
            role: account.role,
        })
        .await
        .with_context(|| format!("Failed to create account {}", account.username))?;

    tracing::info!(username = account.username, role = ?account.role, "Created system account");
    Ok(())
}

/// Creates the semesters and the three system accounts when missing. Safe to
/// run on every start.
pub async fn initialize_system_data(db: &DatabaseConnection, config: &Config) -> Result<()> {
    let created = SemesterRepository::new(db)
        .ensure_numbers(SEMESTER_COUNT)
        .await
        .context("Failed to create semesters")?;
    if created > 0 {
        tracing::info!(created, "Created semesters");
    }

    ensure_account(
        db,
        SystemAccount {
            username: &config.registrar_username,
            password: &config.registrar_password,
            surname: "Учебного",
            first_name: "Отдела",
            patronymic: "Сотрудник",
            role: RoleEnum::Registrar,
        },
        config.bcrypt_cost,
    )
    .await?;

    ensure_account(
        db,
        SystemAccount {
            username: "directorate",
            password: &config.default_staff_password,
            surname: "Сотрудник",
            first_name: "Дирекции",
            patronymic: "Института",
            role: RoleEnum::Directorate,
        },
        config.bcrypt_cost,
    )
    .await?;

    // The teacher account sees the disciplines of the teacher record that
    // shares its surname.
    ensure_account(
        db,
        SystemAccount {
            username: "teacher",
            password: &config.default_staff_password,
            surname: "Петров",
            first_name: "Иван",
            patronymic: "Сергеевич",
            role: RoleEnum::Teacher,
        },
        config.bcrypt_cost,
    )
    .await?;

    TeacherRepository::new(db)
        .get_or_create(NewTeacher {
            surname: "Петров".to_string(),
            first_name: "Иван".to_string(),
            patronymic: "Сергеевич".to_string(),
            position: "Доцент".to_string(),
        })
        .await
        .context("Failed to create teacher record")?;

    if config.registrar_password == config.default_staff_password {
        tracing::warn!("Registrar and staff accounts share a password, change it after first login");
    }

    Ok(())
}
