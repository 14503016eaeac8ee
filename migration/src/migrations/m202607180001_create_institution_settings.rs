use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202607180001_create_institution_settings"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("institution_settings"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("institution_id"))
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("validation_method"))
                            .enumeration(
                                Alias::new("attendance_validation_method"),
                                vec![
                                    Alias::new("qrcode"),
                                    Alias::new("geolocation"),
                                    Alias::new("code"),
                                    Alias::new("manual"),
                                ],
                            )
                            .not_null()
                            .default("qrcode"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("tolerance_minutes"))
                            .integer()
                            .not_null()
                            .default(15),
                    )
                    // latitude/longitude stay NULL until staff pin the campus;
                    // absence is meaningful and distinct from coordinate zero
                    .col(ColumnDef::new(Alias::new("latitude")).double().null())
                    .col(ColumnDef::new(Alias::new("longitude")).double().null())
                    .col(
                        ColumnDef::new(Alias::new("radius_m"))
                            .integer()
                            .not_null()
                            .default(100),
                    )
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_institution_settings_institution")
                            .from(
                                Alias::new("institution_settings"),
                                Alias::new("institution_id"),
                            )
                            .to(Alias::new("institutions"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("institution_settings"))
                    .to_owned(),
            )
            .await
    }
}
