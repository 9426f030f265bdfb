use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Student: FK lookups for faculty -> students
        manager
            .create_index(
                Index::create()
                    .name("idx_student_faculty")
                    .table(Student::Table)
                    .col(Student::FacultyId)
                    .to_owned(),
            )
            .await?;

        // Student: age and age-range queries
        manager
            .create_index(
                Index::create()
                    .name("idx_student_age")
                    .table(Student::Table)
                    .col(Student::Age)
                    .to_owned(),
            )
            .await?;

        // Faculty: exact color filter
        manager
            .create_index(
                Index::create()
                    .name("idx_faculty_color")
                    .table(Faculty::Table)
                    .col(Faculty::Color)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_student_faculty").table(Student::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_student_age").table(Student::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_faculty_color").table(Faculty::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Student { Table, FacultyId, Age }

#[derive(DeriveIden)]
enum Faculty { Table, Color }
