//! Initial schema migration - creates all tables from scratch.
//!
//! The complete schema for the trip planner:
//!
//! - `users`: authentication and the admin flag
//! - `cities` / `attractions`: read-only catalog data feeding the estimator
//! - `trips`: the aggregate root owned by a user
//! - `stops`: ordered city-visit segments of a trip
//! - `activities`: planned, priced actions within a stop
//! - `expenses`: manually logged actual spend per trip
//! - `shared_trips`: at most one public share link per trip

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
    IsAdmin,
}

#[derive(Iden)]
enum Cities {
    Table,
    Id,
    Name,
    Country,
    CostIndexMinor,
}

#[derive(Iden)]
enum Attractions {
    Table,
    Id,
    CityId,
    Name,
    CostMinor,
    Kind,
}

#[derive(Iden)]
enum Trips {
    Table,
    Id,
    Name,
    Description,
    StartDate,
    EndDate,
    Status,
    CoverImage,
    Owner,
    IsLocked,
    AdminNotes,
}

#[derive(Iden)]
enum Stops {
    Table,
    Id,
    TripId,
    CityId,
    Position,
    StartDate,
    EndDate,
    Notes,
}

#[derive(Iden)]
enum Activities {
    Table,
    Id,
    StopId,
    AttractionId,
    Name,
    Kind,
    CostMinor,
    DurationMin,
    ScheduledAt,
    Notes,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    TripId,
    Category,
    AmountMinor,
    Currency,
    Description,
    SpentOn,
}

#[derive(Iden)]
enum SharedTrips {
    Table,
    Id,
    TripId,
    ShareId,
    IsPublic,
    CanCopy,
    ExpiresAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Catalog: cities and attractions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cities::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Cities::Name).string().not_null())
                    .col(ColumnDef::new(Cities::Country).string().not_null())
                    .col(
                        ColumnDef::new(Cities::CostIndexMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Attractions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attractions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attractions::CityId).string().not_null())
                    .col(ColumnDef::new(Attractions::Name).string().not_null())
                    .col(
                        ColumnDef::new(Attractions::CostMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Attractions::Kind).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attractions-city_id")
                            .from(Attractions::Table, Attractions::CityId)
                            .to(Cities::Table, Cities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Trips
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Trips::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Trips::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Trips::Name).string().not_null())
                    .col(ColumnDef::new(Trips::Description).string())
                    .col(ColumnDef::new(Trips::StartDate).date().not_null())
                    .col(ColumnDef::new(Trips::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Trips::Status)
                            .string()
                            .not_null()
                            .default("planning"),
                    )
                    .col(ColumnDef::new(Trips::CoverImage).string())
                    .col(ColumnDef::new(Trips::Owner).string().not_null())
                    .col(
                        ColumnDef::new(Trips::IsLocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Trips::AdminNotes).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trips-owner")
                            .from(Trips::Table, Trips::Owner)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Stops
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Stops::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stops::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Stops::TripId).string().not_null())
                    .col(ColumnDef::new(Stops::CityId).string().not_null())
                    .col(ColumnDef::new(Stops::Position).integer().not_null())
                    .col(ColumnDef::new(Stops::StartDate).date().not_null())
                    .col(ColumnDef::new(Stops::EndDate).date().not_null())
                    .col(ColumnDef::new(Stops::Notes).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-stops-trip_id")
                            .from(Stops::Table, Stops::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-stops-city_id")
                            .from(Stops::Table, Stops::CityId)
                            .to(Cities::Table, Cities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-stops-trip_id-position-unique")
                    .table(Stops::Table)
                    .col(Stops::TripId)
                    .col(Stops::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-stops-trip_id-city_id-unique")
                    .table(Stops::Table)
                    .col(Stops::TripId)
                    .col(Stops::CityId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Activities
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activities::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Activities::StopId).string().not_null())
                    .col(ColumnDef::new(Activities::AttractionId).string())
                    .col(ColumnDef::new(Activities::Name).string().not_null())
                    .col(ColumnDef::new(Activities::Kind).string().not_null())
                    .col(ColumnDef::new(Activities::CostMinor).big_integer())
                    .col(ColumnDef::new(Activities::DurationMin).integer())
                    .col(ColumnDef::new(Activities::ScheduledAt).timestamp())
                    .col(ColumnDef::new(Activities::Notes).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-activities-stop_id")
                            .from(Activities::Table, Activities::StopId)
                            .to(Stops::Table, Stops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-activities-attraction_id")
                            .from(Activities::Table, Activities::AttractionId)
                            .to(Attractions::Table, Attractions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-activities-stop_id")
                    .table(Activities::Table)
                    .col(Activities::StopId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::TripId).string().not_null())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::Currency)
                            .string()
                            .not_null()
                            .default("EUR"),
                    )
                    .col(ColumnDef::new(Expenses::Description).string())
                    .col(ColumnDef::new(Expenses::SpentOn).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-trip_id")
                            .from(Expenses::Table, Expenses::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-trip_id")
                    .table(Expenses::Table)
                    .col(Expenses::TripId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Shared trips (one link per trip)
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(SharedTrips::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SharedTrips::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SharedTrips::TripId).string().not_null())
                    .col(ColumnDef::new(SharedTrips::ShareId).string().not_null())
                    .col(
                        ColumnDef::new(SharedTrips::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SharedTrips::CanCopy)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(SharedTrips::ExpiresAt).timestamp())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-shared_trips-trip_id")
                            .from(SharedTrips::Table, SharedTrips::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-shared_trips-trip_id-unique")
                    .table(SharedTrips::Table)
                    .col(SharedTrips::TripId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-shared_trips-share_id-unique")
                    .table(SharedTrips::Table)
                    .col(SharedTrips::ShareId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(SharedTrips::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stops::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trips::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attractions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
