//! Create `student` table with nullable FK to `faculty`.
//!
//! Removing a faculty detaches its students instead of deleting them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Student::Name, 128).not_null())
                    .col(integer(Student::Age).not_null())
                    .col(ColumnDef::new(Student::FacultyId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_faculty")
                            .from(Student::Table, Student::FacultyId)
                            .to(Faculty::Table, Faculty::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Student { Table, Id, Name, Age, FacultyId }

#[derive(DeriveIden)]
enum Faculty { Table, Id }
