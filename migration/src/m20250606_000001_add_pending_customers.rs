use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum PendingCustomers {
    Table,
    Id,
    FullName,
    Phone,
    IdNumber,
    Location,
    SubmittedBy,
    RegistrationDate,
    MonthsPurchased,
    ValidUntilAtApproval,
    Status,
    ReviewedBy,
    ReviewedAt,
    RejectionReason,
    ResultingCustomerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("pending_status"))
                    .values(vec![
                        Alias::new("pending"),
                        Alias::new("approved"),
                        Alias::new("rejected"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PendingCustomers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PendingCustomers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::FullName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::Phone)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::IdNumber)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::Location)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::SubmittedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::RegistrationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::MonthsPurchased)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::ValidUntilAtApproval)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::Status)
                            .custom(Alias::new("pending_status"))
                            .not_null()
                            .default(Expr::cust("'pending'::pending_status")),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::ReviewedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::ReviewedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::RejectionReason)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::ResultingCustomerId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PendingCustomers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pending_customers_submitted_by")
                    .table(PendingCustomers::Table)
                    .col(PendingCustomers::SubmittedBy)
                    .to_owned(),
            )
            .await?;

        // Only one live submission per phone; reviewed rows stay around for audit.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_pending_customers_phone_pending \
                 ON pending_customers (phone) WHERE status = 'pending'",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(PendingCustomers::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("pending_status")).to_owned())
            .await?;
        Ok(())
    }
}
