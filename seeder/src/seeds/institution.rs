use crate::seed::Seeder;
use db::models::institution::{Column, Entity as Institution, Model};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

pub struct InstitutionSeeder;

pub const INSTITUTION_NAMES: [&str; 2] =
    ["Colégio Estadual Horizonte", "Cursinho Popular Vila Sul"];

#[async_trait::async_trait]
impl Seeder for InstitutionSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        for name in INSTITUTION_NAMES {
            let exists = Institution::find()
                .filter(Column::Name.eq(name))
                .one(db)
                .await
                .unwrap();
            if exists.is_none() {
                Model::create(db, name).await.unwrap();
            }
        }
    }
}
