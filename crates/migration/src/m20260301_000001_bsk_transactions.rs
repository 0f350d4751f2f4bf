use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum BskTransactions {
    Table,
    Id,
    UserId,
    AmountMinor,
    BalanceType,
    TxType,
    Description,
    Metadata,
    Status,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BskTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BskTransactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BskTransactions::UserId).string().not_null())
                    .col(
                        ColumnDef::new(BskTransactions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BskTransactions::BalanceType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BskTransactions::TxType).string().not_null())
                    .col(ColumnDef::new(BskTransactions::Description).string())
                    .col(ColumnDef::new(BskTransactions::Metadata).text())
                    .col(ColumnDef::new(BskTransactions::Status).string())
                    .col(
                        ColumnDef::new(BskTransactions::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-bsk_transactions-user_id-created_at")
                    .table(BskTransactions::Table)
                    .col(BskTransactions::UserId)
                    .col(BskTransactions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-bsk_transactions-user_id-tx_type")
                    .table(BskTransactions::Table)
                    .col(BskTransactions::UserId)
                    .col(BskTransactions::TxType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BskTransactions::Table).to_owned())
            .await?;
        Ok(())
    }
}
