use db::models::institution_settings::{
    self, DEFAULT_RADIUS_M, DEFAULT_TOLERANCE_MINUTES, ValidationMethod,
};
use serde::Serialize;

/// Effective attendance policy for an institution. When staff have never
/// saved one, `configured` is false and the built-in defaults are reported.
#[derive(Debug, Serialize, Default)]
pub struct SettingsResponse {
    pub institution_id: i64,
    pub validation_method: String,
    pub tolerance_minutes: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_m: i32,
    pub configured: bool,
}

impl From<institution_settings::Model> for SettingsResponse {
    fn from(m: institution_settings::Model) -> Self {
        Self {
            institution_id: m.institution_id,
            validation_method: m.validation_method.to_string(),
            tolerance_minutes: m.tolerance_minutes,
            latitude: m.latitude,
            longitude: m.longitude,
            radius_m: m.radius_m,
            configured: true,
        }
    }
}

impl SettingsResponse {
    pub fn defaults(institution_id: i64) -> Self {
        Self {
            institution_id,
            validation_method: ValidationMethod::Qrcode.to_string(),
            tolerance_minutes: DEFAULT_TOLERANCE_MINUTES,
            latitude: None,
            longitude: None,
            radius_m: DEFAULT_RADIUS_M,
            configured: false,
        }
    }
}
