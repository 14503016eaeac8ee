pub mod attendance_record;
pub mod class_session;
pub mod class_time;
pub mod institution;
pub mod institution_settings;
pub mod subject;
pub mod user;

pub use attendance_record::Entity as AttendanceRecord;
pub use class_session::Entity as ClassSession;
pub use class_time::Entity as ClassTime;
pub use institution::Entity as Institution;
pub use institution_settings::Entity as InstitutionSettings;
pub use subject::Entity as Subject;
pub use user::Entity as User;
