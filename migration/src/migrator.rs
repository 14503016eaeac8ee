use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202607150001_create_institutions::Migration),
            Box::new(migrations::m202607150002_create_users::Migration),
            Box::new(migrations::m202607180001_create_institution_settings::Migration),
            Box::new(migrations::m202607220001_create_subjects::Migration),
            Box::new(migrations::m202607220002_create_class_times::Migration),
            Box::new(migrations::m202608030001_create_class_sessions::Migration),
            Box::new(migrations::m202608030002_create_attendance_records::Migration),
        ]
    }
}
