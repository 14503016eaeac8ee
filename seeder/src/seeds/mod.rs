pub mod attendance;
pub mod class_session;
pub mod class_time;
pub mod institution;
pub mod settings;
pub mod subject;
pub mod user;
