use crate::seed::Seeder;
use chrono::{Datelike, Days, Local};
use db::models::{class_session, class_time, institution, subject, user};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

pub struct ClassSessionSeeder;

/// Schedules sessions for yesterday, today and tomorrow, one per slot that
/// meets on that weekday, cycling through the institution's subjects.
#[async_trait::async_trait]
impl Seeder for ClassSessionSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let institutions = institution::Entity::find()
            .order_by_asc(institution::Column::Id)
            .all(db)
            .await
            .unwrap();
        let today = Local::now().date_naive();
        let dates = [
            today.checked_sub_days(Days::new(1)).unwrap(),
            today,
            today.checked_add_days(Days::new(1)).unwrap(),
        ];

        for inst in &institutions {
            let Some(teacher) = user::Entity::find()
                .filter(user::Column::InstitutionId.eq(inst.id))
                .filter(user::Column::Role.eq(user::Role::Teacher))
                .order_by_asc(user::Column::Id)
                .one(db)
                .await
                .unwrap()
            else {
                continue;
            };
            let subjects = subject::Model::list_for_institution(db, inst.id)
                .await
                .unwrap();
            let slots = class_time::Model::list_for_institution(db, inst.id)
                .await
                .unwrap();
            if subjects.is_empty() {
                continue;
            }

            let mut next_subject = 0usize;
            for date in dates {
                let weekday = date.weekday().num_days_from_sunday() as u8;
                for slot in slots.iter().filter(|s| s.active) {
                    if !slot.weekday_numbers().contains(&weekday) {
                        continue;
                    }

                    let exists = class_session::Entity::find()
                        .filter(class_session::Column::InstitutionId.eq(inst.id))
                        .filter(class_session::Column::ClassTimeId.eq(slot.id))
                        .filter(class_session::Column::SessionDate.eq(date))
                        .one(db)
                        .await
                        .unwrap();
                    if exists.is_some() {
                        continue;
                    }

                    let subject = &subjects[next_subject % subjects.len()];
                    next_subject += 1;

                    class_session::Model::create(
                        db,
                        inst.id,
                        subject.id,
                        teacher.id,
                        slot.id,
                        date,
                        None,
                        None,
                    )
                    .await
                    .unwrap();
                }
            }
        }
    }
}
