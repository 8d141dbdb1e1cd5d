use sea_orm_migration::prelude::*;

use crate::m20250901_000001_create_catalog_tables::{Disciplines, Groups, Semesters, Teachers};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::GroupId).integer().not_null())
                    .col(ColumnDef::new(Students::Surname).string_len(100).not_null())
                    .col(ColumnDef::new(Students::FirstName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Students::Patronymic)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_group")
                            .from(Students::Table, Students::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GradeSheets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradeSheets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GradeSheets::StudentId).integer().not_null())
                    .col(ColumnDef::new(GradeSheets::DisciplineId).integer().not_null())
                    .col(ColumnDef::new(GradeSheets::SemesterId).integer().not_null())
                    .col(ColumnDef::new(GradeSheets::TeacherId).integer().null())
                    .col(
                        ColumnDef::new(GradeSheets::Grade)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(GradeSheets::Date).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grade_sheets_student")
                            .from(GradeSheets::Table, GradeSheets::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grade_sheets_discipline")
                            .from(GradeSheets::Table, GradeSheets::DisciplineId)
                            .to(Disciplines::Table, Disciplines::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grade_sheets_semester")
                            .from(GradeSheets::Table, GradeSheets::SemesterId)
                            .to(Semesters::Table, Semesters::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grade_sheets_teacher")
                            .from(GradeSheets::Table, GradeSheets::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_group_id")
                    .table(Students::Table)
                    .col(Students::GroupId)
                    .to_owned(),
            )
            .await?;

        // One row per (student, discipline, semester); provisioning relies on it.
        manager
            .create_index(
                Index::create()
                    .name("uq_grade_sheet_student_discipline_semester")
                    .table(GradeSheets::Table)
                    .col(GradeSheets::StudentId)
                    .col(GradeSheets::DisciplineId)
                    .col(GradeSheets::SemesterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_grade_sheets_discipline_id")
                    .table(GradeSheets::Table)
                    .col(GradeSheets::DisciplineId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GradeSheets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    GroupId,
    Surname,
    FirstName,
    Patronymic,
}

#[derive(DeriveIden)]
enum GradeSheets {
    Table,
    Id,
    StudentId,
    DisciplineId,
    SemesterId,
    TeacherId,
    Grade,
    Date,
}
