//! Bridge WASM <-> JavaScript cho bộ phân loại và bộ tính mục tiêu.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use vitals_core::{
    daily_targets, format_alert_message, is_critical, reason_for, ActivityLevel, Gender,
    GoalType, Location, TargetError, UserProfile, VitalSigns, TIMESTAMP_FORMAT,
};
use wasm_bindgen::prelude::*;

#[derive(Debug, Serialize, PartialEq)]
struct Classification {
    critical: bool,
    reason: Option<String>,
}

fn classify(vitals: &VitalSigns) -> Classification {
    Classification {
        critical: is_critical(vitals),
        reason: reason_for(vitals).ok(),
    }
}

/// Hồ sơ từ JS, các trường thiếu lấy giá trị mặc định.
#[derive(Deserialize)]
struct JsUserProfile {
    age: u32,
    weight_kg: f64,
    height_cm: f64,
    #[serde(default)]
    gender: Option<Gender>,
    #[serde(default)]
    activity_level: Option<ActivityLevel>,
}

impl From<JsUserProfile> for UserProfile {
    fn from(profile: JsUserProfile) -> Self {
        Self {
            age: profile.age,
            gender: profile.gender.unwrap_or(Gender::Other),
            activity_level: profile
                .activity_level
                .unwrap_or(ActivityLevel::ModeratelyActive),
            weight_kg: profile.weight_kg,
            height_cm: profile.height_cm,
        }
    }
}

fn parse_timestamp(input: Option<&str>) -> Result<NaiveDateTime, String> {
    match input {
        Some(raw) => NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
            .map_err(|err| format!("Thời điểm không hợp lệ '{raw}': {err}")),
        None => Ok(Local::now().naive_local()),
    }
}

fn install_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn classify_vitals(vitals: JsValue) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let vitals: VitalSigns = from_value(vitals)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được chỉ số sống: {err}")))?;

    to_value(&classify(&vitals))
        .map_err(|err| JsValue::from_str(&format!("Không serialize kết quả: {err}")))
}

#[wasm_bindgen]
pub fn format_alert(
    vitals: JsValue,
    location: Option<JsValue>,
    timestamp: Option<String>,
) -> Result<String, JsValue> {
    install_panic_hook();

    let vitals: VitalSigns = from_value(vitals)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được chỉ số sống: {err}")))?;

    let location = match location {
        Some(js_location) if !js_location.is_null() && !js_location.is_undefined() => {
            let location: Location = from_value(js_location)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được vị trí: {err}")))?;
            Some(location)
        }
        _ => None,
    };

    let at = parse_timestamp(timestamp.as_deref()).map_err(|err| JsValue::from_str(&err))?;

    Ok(format_alert_message(&vitals, location.as_ref(), at))
}

#[wasm_bindgen]
pub fn calculate_targets(profile: JsValue, goal: Option<JsValue>) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let profile: JsUserProfile = from_value(profile)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được hồ sơ: {err}")))?;

    let goal = match goal {
        Some(js_goal) if !js_goal.is_null() && !js_goal.is_undefined() => from_value(js_goal)
            .map_err(|err| JsValue::from_str(&format!("Không đọc được mục tiêu: {err}")))?,
        _ => GoalType::default(),
    };

    let targets = daily_targets(&UserProfile::from(profile), goal)
        .map_err(|err| JsValue::from_str(&format_target_error(err)))?;

    to_value(&targets)
        .map_err(|err| JsValue::from_str(&format!("Không serialize mục tiêu: {err}")))
}

fn format_target_error(err: TargetError) -> String {
    format!("Target error: {err}")
}
