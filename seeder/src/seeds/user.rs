use crate::seed::Seeder;
use db::models::institution::{Column, Entity as Institution};
use db::models::user::{Model, Role};
use fake::{Fake, faker::name::en::Name};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        // Fixed platform admin, attached to no institution
        let _ = Model::create(
            db,
            "admin@example.com",
            "password123",
            "Administração",
            Role::Admin,
            None,
        )
        .await;

        let institutions = Institution::find()
            .order_by_asc(Column::Id)
            .all(db)
            .await
            .unwrap();

        for (index, institution) in institutions.iter().enumerate() {
            let n = index + 1;

            // Fixed accounts, one per role, predictable for manual testing
            let _ = Model::create(
                db,
                &format!("coordenacao{n}@example.com"),
                "password123",
                "Coordenação",
                Role::Coordinator,
                Some(institution.id),
            )
            .await;
            let _ = Model::create(
                db,
                &format!("prof{n}@example.com"),
                "password123",
                "Professor Fixo",
                Role::Teacher,
                Some(institution.id),
            )
            .await;
            let _ = Model::create(
                db,
                &format!("aluno{n}@example.com"),
                "password123",
                "Aluno Fixo",
                Role::Student,
                Some(institution.id),
            )
            .await;

            // Random students
            for _ in 0..20 {
                let name: String = Name().fake();
                let email = format!(
                    "aluno{:06}.inst{}@example.com",
                    fastrand::u32(..1_000_000),
                    institution.id
                );
                let _ = Model::create(db, &email, "password123", &name, Role::Student, Some(institution.id))
                    .await;
            }
        }
    }
}
