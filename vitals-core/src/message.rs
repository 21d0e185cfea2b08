//! Mẫu tin nhắn cảnh báo khẩn cấp.

use chrono::NaiveDateTime;

use crate::{Location, VitalSigns};

pub const LOCATION_UNAVAILABLE: &str = "Location unavailable";

/// Định dạng `yyyy-MM-dd HH:mm:ss`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Chuỗi vị trí đưa vào tin nhắn, hoặc chuỗi thay thế khi không lấy được vị trí.
pub fn location_text(location: Option<&Location>) -> String {
    match location {
        Some(location) => format!(
            "https://maps.google.com/?q={},{}",
            location.latitude, location.longitude
        ),
        None => LOCATION_UNAVAILABLE.to_string(),
    }
}

/// Dựng nội dung tin nhắn theo mẫu cố định.
pub fn format_alert_message(
    vitals: &VitalSigns,
    location: Option<&Location>,
    at: NaiveDateTime,
) -> String {
    format!(
        "EMERGENCY ALERT!\n\
         Critical vital signs detected.\n\
         Blood Pressure: {sbp}/{dbp} mmHg\n\
         Heart Rate: {hr} BPM\n\
         Time: {time}\n\
         Location: {location}\n\
         Please send help immediately!",
        sbp = vitals.systolic_bp,
        dbp = vitals.diastolic_bp,
        hr = vitals.heart_rate,
        time = at.format(TIMESTAMP_FORMAT),
        location = location_text(location),
    )
}
