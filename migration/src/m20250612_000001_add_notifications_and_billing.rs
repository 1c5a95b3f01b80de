use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    CustomerId,
    CardId,
    Kind,
    DueAt,
    DaysRemaining,
    Message,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BillingRecords {
    Table,
    Id,
    CardId,
    CustomerId,
    AmountCents,
    MonthsApplied,
    Method,
    ExternalReference,
    RecordedBy,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("notification_kind"))
                    .values(vec![
                        Alias::new("payment_reminder"),
                        Alias::new("final_reminder"),
                        Alias::new("card_suspended"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notifications::CustomerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::CardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::Kind)
                            .custom(Alias::new("notification_kind"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::DueAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::DaysRemaining)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One event per card, kind and due date; repeated sweeps hit the
        // conflict path instead of inserting duplicates.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_notifications_card_kind_due")
                    .table(Notifications::Table)
                    .col(Notifications::CardId)
                    .col(Notifications::Kind)
                    .col(Notifications::DueAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BillingRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BillingRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BillingRecords::CardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BillingRecords::CustomerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BillingRecords::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BillingRecords::MonthsApplied)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BillingRecords::Method)
                            .custom(Alias::new("renewal_method"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BillingRecords::ExternalReference)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BillingRecords::RecordedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BillingRecords::CreatedAt)
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
                    .name("idx_billing_records_card")
                    .table(BillingRecords::Table)
                    .col(BillingRecords::CardId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(BillingRecords::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Notifications::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("notification_kind"))
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
