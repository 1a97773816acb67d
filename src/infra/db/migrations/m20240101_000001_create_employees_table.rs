//! Migration: Create the employees table with its search indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::FirstName)
                            .string_len(120)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::LastName)
                            .string_len(120)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::Email)
                            .string_len(254)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::Mobile).string_len(15).not_null())
                    .col(ColumnDef::new(Employees::Role).string_len(120).not_null())
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Composite index for full name searches
        manager
            .create_index(
                Index::create()
                    .name("idx_employees_name")
                    .table(Employees::Table)
                    .col(Employees::FirstName)
                    .col(Employees::LastName)
                    .to_owned(),
            )
            .await?;

        // Default ordering and keyset pagination
        manager
            .create_index(
                Index::create()
                    .name("idx_employees_created_at")
                    .table(Employees::Table)
                    .col(Employees::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_role")
                    .table(Employees::Table)
                    .col(Employees::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_mobile")
                    .table(Employees::Table)
                    .col(Employees::Mobile)
                    .to_owned(),
            )
            .await?;

        // Expression indexes for case-insensitive search; sea-query has no
        // builder for these, so plain SQL (valid on Postgres and SQLite).
        let conn = manager.get_connection();
        conn.execute_unprepared(
            "CREATE INDEX idx_employees_email_lower ON employees (LOWER(email))",
        )
        .await?;
        conn.execute_unprepared(
            "CREATE INDEX idx_employees_fname_lower ON employees (LOWER(first_name))",
        )
        .await?;
        conn.execute_unprepared(
            "CREATE INDEX idx_employees_lname_lower ON employees (LOWER(last_name))",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Dropping the table removes every index with it
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Mobile,
    Role,
    CreatedAt,
}
