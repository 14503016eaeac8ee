use crate::seed::Seeder;
use db::models::class_time::Model;
use db::models::institution::{Column, Entity as Institution};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

pub struct ClassTimeSeeder;

// name, start, end, weekdays (0 = Sunday .. 6 = Saturday)
const SLOTS: [(&str, &str, &str, &[u8]); 4] = [
    ("Manhã 1", "07:30", "09:10", &[1, 2, 3, 4, 5]),
    ("Manhã 2", "09:30", "11:10", &[1, 2, 3, 4, 5]),
    ("Tarde 1", "13:30", "15:10", &[1, 3, 5]),
    ("Noite 1", "19:00", "20:40", &[2, 4]),
];

#[async_trait::async_trait]
impl Seeder for ClassTimeSeeder {
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

            for (name, start, end, weekdays) in SLOTS {
                if !existing.iter().any(|s| s.name == name) {
                    Model::create(db, institution.id, name, start, end, weekdays, true)
                        .await
                        .unwrap();
                }
            }
        }
    }
}
