use crate::seed::Seeder;
use db::models::institution::{Column, Entity as Institution};
use db::models::institution_settings::{Model, ValidationMethod};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

pub struct SettingsSeeder;

/// Campus pin for the first institution: Praça da Sé, São Paulo.
pub const CAMPUS: (f64, f64) = (-23.5505, -46.6333);

#[async_trait::async_trait]
impl Seeder for SettingsSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let institutions = Institution::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .unwrap();

        // First institution validates by geofence, second by rotating code.
        if let Some(first) = institutions.first() {
            Model::upsert(
                db,
                first.id,
                ValidationMethod::Geolocation,
                15,
                Some(CAMPUS.0),
                Some(CAMPUS.1),
                150,
            )
            .await
            .unwrap();
        }

        if let Some(second) = institutions.get(1) {
            Model::upsert(db, second.id, ValidationMethod::Code, 10, None, None, 100)
                .await
                .unwrap();
        }
    }
}
