//! Logic lõi phát hiện tình trạng nguy kịch từ chỉ số sống.

use serde::{Deserialize, Serialize};

pub mod classifier;
pub mod message;
pub mod targets;

pub use classifier::{
    critical_condition, is_critical, reason_for, reason_or_unknown, CriticalCondition,
    CRITICAL_DBP, CRITICAL_HR_HIGH, CRITICAL_HR_LOW, CRITICAL_SBP, UNKNOWN_CRITICAL_REASON,
};
pub use message::{format_alert_message, location_text, LOCATION_UNAVAILABLE, TIMESTAMP_FORMAT};
pub use targets::{
    daily_calorie_goal, daily_step_goal, daily_targets, ActivityLevel, DailyTargets, Gender,
    GoalType, TargetError, UserProfile,
};

/// Số gọi cấp cứu mặc định.
pub const AMBULANCE_NUMBER: &str = "911";

/// Cấu hình cho quy trình cấp cứu. Ngưỡng nguy kịch là hằng số, không nằm ở đây.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyConfig {
    /// Số điện thoại gọi xe cấp cứu.
    pub ambulance_number: String,
    /// Có gọi xe cấp cứu hay không.
    pub call_ambulance: bool,
    /// Có gửi SMS cho người liên hệ khẩn cấp hay không.
    pub sms_enabled: bool,
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self {
            ambulance_number: AMBULANCE_NUMBER.to_string(),
            call_ambulance: true,
            sms_enabled: true,
        }
    }
}

impl EmergencyConfig {
    /// Kiểm tra cấu hình trước khi dùng.
    pub fn validate(&self) -> Result<(), VitalsError> {
        if self.call_ambulance && self.ambulance_number.trim().is_empty() {
            return Err(VitalsError::InvalidConfig(
                "ambulance_number trống trong khi call_ambulance bật".to_string(),
            ));
        }
        Ok(())
    }
}

/// Một lần đo chỉ số sống.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct VitalSigns {
    /// Huyết áp tâm thu (mmHg).
    pub systolic_bp: i32,
    /// Huyết áp tâm trương (mmHg).
    pub diastolic_bp: i32,
    /// Nhịp tim (BPM).
    pub heart_rate: i32,
}

impl VitalSigns {
    pub fn new(systolic_bp: i32, diastolic_bp: i32, heart_rate: i32) -> Self {
        Self {
            systolic_bp,
            diastolic_bp,
            heart_rate,
        }
    }
}

/// Người liên hệ khẩn cấp gắn với tài khoản.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyContact {
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmergencyContact {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            name: None,
        }
    }

    /// Số điện thoại có nội dung (không rỗng, không chỉ khoảng trắng).
    pub fn has_phone_number(&self) -> bool {
        !self.phone_number.trim().is_empty()
    }
}

/// Bản ghi cảnh báo gửi lên máy chủ, mỗi người liên hệ một bản.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyAlert {
    pub phone_number: String,
    pub body: String,
}

/// Vị trí thiết bị.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Kết quả xác định tình trạng nguy kịch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CriticalVitalsResult {
    Normal,
    Critical(CriticalFinding),
}

impl CriticalVitalsResult {
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical(_))
    }
}

/// Dữ liệu đi kèm khi chỉ số sống ở mức nguy kịch.
///
/// Chỉ dựng được qua [`CriticalFinding::new`], nơi bộ phân loại được chạy lại
/// trên chính `vitals` được lưu, nên kết luận và lý do luôn khớp nhau.
/// Khi deserialize, `reason` trong dữ liệu bị bỏ qua và được tính lại.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawFinding")]
pub struct CriticalFinding {
    reason: String,
    contacts: Vec<EmergencyContact>,
    vitals: VitalSigns,
}

impl CriticalFinding {
    pub fn new(vitals: VitalSigns, contacts: Vec<EmergencyContact>) -> Result<Self, VitalsError> {
        let reason = reason_for(&vitals)?;
        Ok(Self {
            reason,
            contacts,
            vitals,
        })
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn contacts(&self) -> &[EmergencyContact] {
        &self.contacts
    }

    pub fn vitals(&self) -> VitalSigns {
        self.vitals
    }
}

#[derive(Deserialize)]
struct RawFinding {
    #[serde(default)]
    contacts: Vec<EmergencyContact>,
    vitals: VitalSigns,
}

impl TryFrom<RawFinding> for CriticalFinding {
    type Error = VitalsError;

    fn try_from(raw: RawFinding) -> Result<Self, Self::Error> {
        Self::new(raw.vitals, raw.contacts)
    }
}

/// Lỗi chung của phần lõi.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VitalsError {
    #[error("Chỉ số sống không ở mức nguy kịch")]
    NotCritical,
    #[error("Cấu hình không hợp lệ: {0}")]
    InvalidConfig(String),
}
