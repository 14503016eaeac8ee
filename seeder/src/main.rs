use crate::seed::Seeder;
use crate::seed::run_seeder;
use crate::seeds::{
    attendance::AttendanceSeeder, class_session::ClassSessionSeeder,
    class_time::ClassTimeSeeder, institution::InstitutionSeeder, settings::SettingsSeeder,
    subject::SubjectSeeder, user::UserSeeder,
};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await;
    Migrator::up(&db, None).await.expect("Migrations failed");

    for (seeder, name) in [
        (
            Box::new(InstitutionSeeder) as Box<dyn Seeder + Send + Sync>,
            "Institution",
        ),
        (Box::new(SettingsSeeder), "InstitutionSettings"),
        (Box::new(UserSeeder), "User"),
        (Box::new(SubjectSeeder), "Subject"),
        (Box::new(ClassTimeSeeder), "ClassTime"),
        (Box::new(ClassSessionSeeder), "ClassSession"),
        (Box::new(AttendanceSeeder), "AttendanceRecord"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
