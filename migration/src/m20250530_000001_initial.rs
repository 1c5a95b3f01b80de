use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    FullName,
    Phone,
    IdNumber,
    Location,
    CanLogin,
    PasswordHash,
    MembershipMonths,
    MembershipValidUntil,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Marketers {
    Table,
    Id,
    FullName,
    Phone,
    PasswordHash,
    TotalEarningsCents,
    ApprovedCustomersCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Admins {
    Table,
    Id,
    Username,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Cards {
    Table,
    Id,
    CardNumber,
    CustomerId,
    MonthlyFeeCents,
    ValidUntil,
    NextPaymentDue,
    PaymentStatus,
    Status,
    IsEnabled,
    SuspensionReason,
    TotalSavingsCents,
    TotalTransactions,
    LastUsedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CardRenewals {
    Table,
    Id,
    CardId,
    AmountPaidCents,
    MonthsAdded,
    ValidUntilAfter,
    Method,
    ExternalReference,
    Notes,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // enums
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("card_payment_status"))
                    .values(vec![Alias::new("valid"), Alias::new("invalid")])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("card_status"))
                    .values(vec![
                        Alias::new("active"),
                        Alias::new("expired"),
                        Alias::new("suspended"),
                        Alias::new("cancelled"),
                    ])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("renewal_method"))
                    .values(vec![
                        Alias::new("initial"),
                        Alias::new("cash"),
                        Alias::new("bank_transfer"),
                        Alias::new("operator"),
                        Alias::new("self_service"),
                        Alias::new("manual_override"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Customers::FullName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Customers::Phone)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Customers::IdNumber).string_len(64).null())
                    .col(ColumnDef::new(Customers::Location).string_len(255).null())
                    .col(
                        ColumnDef::new(Customers::CanLogin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Customers::PasswordHash)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Customers::MembershipMonths)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Customers::MembershipValidUntil)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Customers::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Customers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Marketers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Marketers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Marketers::FullName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Marketers::Phone)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Marketers::PasswordHash)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Marketers::TotalEarningsCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Marketers::ApprovedCustomersCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Marketers::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Marketers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::Username)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Admins::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cards::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Cards::CardNumber)
                            .string_len(16)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Cards::CustomerId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Cards::MonthlyFeeCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cards::ValidUntil)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cards::NextPaymentDue)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cards::PaymentStatus)
                            .custom(Alias::new("card_payment_status"))
                            .not_null()
                            .default(Expr::cust("'valid'::card_payment_status")),
                    )
                    .col(
                        ColumnDef::new(Cards::Status)
                            .custom(Alias::new("card_status"))
                            .not_null()
                            .default(Expr::cust("'active'::card_status")),
                    )
                    .col(
                        ColumnDef::new(Cards::IsEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Cards::SuspensionReason)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Cards::TotalSavingsCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Cards::TotalTransactions)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Cards::LastUsedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Cards::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Cards::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The sweep scans by due date across the whole table.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cards_next_payment_due")
                    .table(Cards::Table)
                    .col(Cards::NextPaymentDue)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CardRenewals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CardRenewals::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CardRenewals::CardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CardRenewals::AmountPaidCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CardRenewals::MonthsAdded)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CardRenewals::ValidUntilAfter)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CardRenewals::Method)
                            .custom(Alias::new("renewal_method"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CardRenewals::ExternalReference)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(CardRenewals::Notes).text().null())
                    .col(
                        ColumnDef::new(CardRenewals::CreatedAt)
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
                    .name("idx_card_renewals_card")
                    .table(CardRenewals::Table)
                    .col(CardRenewals::CardId)
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
                    .table(CardRenewals::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Cards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Admins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Marketers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Customers::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("renewal_method")).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("card_status")).to_owned())
            .await?;
        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("card_payment_status"))
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
