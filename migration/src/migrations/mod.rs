pub mod m202607150001_create_institutions;
pub mod m202607150002_create_users;
pub mod m202607180001_create_institution_settings;
pub mod m202607220001_create_subjects;
pub mod m202607220002_create_class_times;
pub mod m202608030001_create_class_sessions;
pub mod m202608030002_create_attendance_records;
