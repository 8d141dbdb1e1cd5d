use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Specialties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Specialties::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Specialties::Code).string_len(20).not_null())
                    .col(ColumnDef::new(Specialties::Name).string_len(255).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Semesters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Semesters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Semesters::Number)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Groups::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Groups::SpecialtyId).integer().not_null())
                    .col(ColumnDef::new(Groups::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Groups::AdmissionYear).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_groups_specialty")
                            .from(Groups::Table, Groups::SpecialtyId)
                            .to(Specialties::Table, Specialties::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Disciplines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Disciplines::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Disciplines::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Disciplines::ExamType)
                            .string_len(50)
                            .not_null()
                            .default("Экзамен"),
                    )
                    .col(
                        ColumnDef::new(Disciplines::Hours)
                            .integer()
                            .not_null()
                            .default(72),
                    )
                    .col(ColumnDef::new(Disciplines::SpecialtyId).integer().null())
                    .col(ColumnDef::new(Disciplines::SemesterId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_disciplines_specialty")
                            .from(Disciplines::Table, Disciplines::SpecialtyId)
                            .to(Specialties::Table, Specialties::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_disciplines_semester")
                            .from(Disciplines::Table, Disciplines::SemesterId)
                            .to(Semesters::Table, Semesters::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teachers::Surname).string_len(100).not_null())
                    .col(ColumnDef::new(Teachers::FirstName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Teachers::Patronymic)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Teachers::Position)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_disciplines_specialty_id")
                    .table(Disciplines::Table)
                    .col(Disciplines::SpecialtyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_groups_specialty_id")
                    .table(Groups::Table)
                    .col(Groups::SpecialtyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Disciplines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Semesters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Specialties::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Specialties {
    Table,
    Id,
    Code,
    Name,
}

#[derive(DeriveIden)]
pub enum Semesters {
    Table,
    Id,
    Number,
}

#[derive(DeriveIden)]
pub enum Groups {
    Table,
    Id,
    SpecialtyId,
    Name,
    AdmissionYear,
}

#[derive(DeriveIden)]
pub enum Disciplines {
    Table,
    Id,
    Name,
    ExamType,
    Hours,
    SpecialtyId,
    SemesterId,
}

#[derive(DeriveIden)]
pub enum Teachers {
    Table,
    Id,
    Surname,
    FirstName,
    Patronymic,
    Position,
}
