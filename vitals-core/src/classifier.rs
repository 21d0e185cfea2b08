//! Phân loại chỉ số sống nguy kịch theo ngưỡng cố định.

use serde::{Deserialize, Serialize};

use crate::{VitalSigns, VitalsError};

/// Huyết áp tâm thu nguy kịch (mmHg).
pub const CRITICAL_SBP: i32 = 180;
/// Huyết áp tâm trương nguy kịch (mmHg).
pub const CRITICAL_DBP: i32 = 120;
/// Nhịp tim cao nguy kịch (BPM).
pub const CRITICAL_HR_HIGH: i32 = 140;
/// Nhịp tim thấp nguy kịch (BPM).
pub const CRITICAL_HR_LOW: i32 = 40;

pub const UNKNOWN_CRITICAL_REASON: &str = "Unknown Critical Condition";

/// Điều kiện nguy kịch đầu tiên khớp, kèm giá trị đo được.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CriticalCondition {
    SystolicHigh(i32),
    DiastolicHigh(i32),
    HeartRateHigh(i32),
    HeartRateLow(i32),
}

impl CriticalCondition {
    pub fn reason(&self) -> String {
        match self {
            Self::SystolicHigh(value) => format!("Critical Systolic BP: {value} mmHg"),
            Self::DiastolicHigh(value) => format!("Critical Diastolic BP: {value} mmHg"),
            Self::HeartRateHigh(value) => format!("Critical High Heart Rate: {value} BPM"),
            Self::HeartRateLow(value) => format!("Critical Low Heart Rate: {value} BPM"),
        }
    }
}

/// Điều kiện nguy kịch đầu tiên theo thứ tự ưu tiên:
/// tâm thu > tâm trương > nhịp tim cao > nhịp tim thấp.
pub fn critical_condition(vitals: &VitalSigns) -> Option<CriticalCondition> {
    if vitals.systolic_bp >= CRITICAL_SBP {
        Some(CriticalCondition::SystolicHigh(vitals.systolic_bp))
    } else if vitals.diastolic_bp >= CRITICAL_DBP {
        Some(CriticalCondition::DiastolicHigh(vitals.diastolic_bp))
    } else if vitals.heart_rate >= CRITICAL_HR_HIGH {
        Some(CriticalCondition::HeartRateHigh(vitals.heart_rate))
    } else if vitals.heart_rate <= CRITICAL_HR_LOW {
        Some(CriticalCondition::HeartRateLow(vitals.heart_rate))
    } else {
        None
    }
}

pub fn is_critical(vitals: &VitalSigns) -> bool {
    critical_condition(vitals).is_some()
}

/// Lý do nguy kịch. Trả về [`VitalsError::NotCritical`] nếu không có điều kiện nào khớp.
pub fn reason_for(vitals: &VitalSigns) -> Result<String, VitalsError> {
    critical_condition(vitals)
        .map(|condition| condition.reason())
        .ok_or(VitalsError::NotCritical)
}

/// Như [`reason_for`] nhưng luôn trả về chuỗi hiển thị được.
pub fn reason_or_unknown(vitals: &VitalSigns) -> String {
    reason_for(vitals).unwrap_or_else(|_| UNKNOWN_CRITICAL_REASON.to_string())
}
