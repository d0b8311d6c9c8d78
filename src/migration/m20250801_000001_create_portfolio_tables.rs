use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminSessions::Token)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdminSessions::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminLoginAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdminLoginAttempts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdminLoginAttempts::ClientAddress)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminLoginAttempts::Success)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdminLoginAttempts::AttemptedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The lockout lookup filters on (client_address, attempted_at).
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_login_attempts_address_time")
                    .table(AdminLoginAttempts::Table)
                    .col(AdminLoginAttempts::ClientAddress)
                    .col(AdminLoginAttempts::AttemptedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PortfolioSeries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioSeries::Id)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PortfolioSeries::Title).string().not_null())
                    .col(ColumnDef::new(PortfolioSeries::Description).string())
                    .col(
                        ColumnDef::new(PortfolioSeries::CoverImageUrl)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(PortfolioSeries::OrderIndex)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioSeries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioSeries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PortfolioSeries::Published).boolean())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PortfolioImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioImages::Id)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PortfolioImages::SeriesId).text())
                    .col(
                        ColumnDef::new(PortfolioImages::ImageUrl)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PortfolioImages::Title).string())
                    .col(ColumnDef::new(PortfolioImages::Caption).string())
                    .col(
                        ColumnDef::new(PortfolioImages::OrderIndex)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioImages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PortfolioImages::Published).boolean())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_images_series")
                            .from(PortfolioImages::Table, PortfolioImages::SeriesId)
                            .to(PortfolioSeries::Table, PortfolioSeries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SiteContent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SiteContent::Id)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SiteContent::Key).text().not_null())
                    .col(ColumnDef::new(SiteContent::Value).string())
                    .col(
                        ColumnDef::new(SiteContent::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SiteSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SiteSettings::Key)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SiteSettings::Value).string())
                    .col(
                        ColumnDef::new(SiteSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PortfolioImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PortfolioSeries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SiteContent::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SiteSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminLoginAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminSessions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminSessions {
    Table,
    Token,
    ExpiresAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AdminLoginAttempts {
    Table,
    Id,
    ClientAddress,
    Success,
    AttemptedAt,
}

#[derive(DeriveIden)]
enum PortfolioSeries {
    Table,
    Id,
    Title,
    Description,
    CoverImageUrl,
    OrderIndex,
    CreatedAt,
    UpdatedAt,
    Published,
}

#[derive(DeriveIden)]
enum PortfolioImages {
    Table,
    Id,
    SeriesId,
    ImageUrl,
    Title,
    Caption,
    OrderIndex,
    CreatedAt,
    Published,
}

#[derive(DeriveIden)]
enum SiteContent {
    Table,
    Id,
    Key,
    Value,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SiteSettings {
    Table,
    Key,
    Value,
    UpdatedAt,
}
