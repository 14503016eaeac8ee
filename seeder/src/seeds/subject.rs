use crate::seed::Seeder;
use db::models::institution::{Column, Entity as Institution};
use db::models::subject::Model;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

pub struct SubjectSeeder;

const SUBJECT_NAMES: [&str; 5] = [
    "Matemática",
    "Língua Portuguesa",
    "História",
    "Física",
    "Biologia",
];

#[async_trait::async_trait]
impl Seeder for SubjectSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let institutions = Institution::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .unwrap();

        for institution in &institutions {
            let existing = Model::list_for_institution(db, institution.id)
                .await
                .unwrap();

            for name in SUBJECT_NAMES {
                if !existing.iter().any(|s| s.name == name) {
                    Model::create(db, institution.id, name).await.unwrap();
                }
            }
        }
    }
}
