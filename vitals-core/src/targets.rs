//! Tính mục tiêu số bước và lượng calo hằng ngày theo hồ sơ người dùng.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Mức độ vận động thường ngày.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    fn step_multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 0.8,
            Self::LightlyActive => 0.9,
            Self::ModeratelyActive => 1.0,
            Self::VeryActive => 1.15,
            Self::ExtraActive => 1.3,
        }
    }

    fn calorie_multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
            Self::ExtraActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    LoseWeight,
    #[default]
    Maintain,
    GainWeight,
}

impl GoalType {
    fn adjustment(self) -> f64 {
        match self {
            Self::LoseWeight => 0.80,
            Self::Maintain => 1.00,
            Self::GainWeight => 1.15,
        }
    }
}

/// Hồ sơ dùng để tính mục tiêu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub weight_kg: f64,
    pub height_cm: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyTargets {
    pub steps: u32,
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TargetError {
    #[error("Giá trị {field} không hợp lệ: {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },
}

impl UserProfile {
    fn validate(&self) -> Result<(), TargetError> {
        for (field, value) in [("weight_kg", self.weight_kg), ("height_cm", self.height_cm)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TargetError::InvalidMeasurement { field, value });
            }
        }
        Ok(())
    }

    fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }
}

/// Mục tiêu số bước, làm tròn tới hàng trăm.
pub fn daily_step_goal(profile: &UserProfile) -> Result<u32, TargetError> {
    profile.validate()?;

    let base = match profile.age {
        0..=17 => 12_000.0,
        18..=64 => 10_000.0,
        _ => 7_000.0,
    };

    let gender = match profile.gender {
        Gender::Male => 1.0,
        Gender::Female => 0.95,
        Gender::Other => 0.975,
    };

    let bmi = profile.bmi();
    let bmi_adjustment = if bmi >= 30.0 {
        1.10
    } else if bmi >= 25.0 {
        1.05
    } else {
        1.0
    };

    let steps = base * profile.activity_level.step_multiplier() * gender * bmi_adjustment;
    Ok(((steps / 100.0).round() * 100.0) as u32)
}

/// Mục tiêu calo: BMR Harris-Benedict (bản sửa đổi) × hệ số vận động × hệ số mục tiêu.
pub fn daily_calorie_goal(profile: &UserProfile, goal: GoalType) -> Result<u32, TargetError> {
    profile.validate()?;

    let calories = basal_metabolic_rate(profile)
        * profile.activity_level.calorie_multiplier()
        * goal.adjustment();
    Ok(calories.round().max(0.0) as u32)
}

pub fn daily_targets(profile: &UserProfile, goal: GoalType) -> Result<DailyTargets, TargetError> {
    Ok(DailyTargets {
        steps: daily_step_goal(profile)?,
        calories: daily_calorie_goal(profile, goal)?,
    })
}

fn basal_metabolic_rate(profile: &UserProfile) -> f64 {
    let weight = profile.weight_kg;
    let height = profile.height_cm;
    let age = f64::from(profile.age);

    let male = 88.362 + 13.397 * weight + 4.799 * height - 5.677 * age;
    let female = 447.593 + 9.247 * weight + 3.098 * height - 4.330 * age;

    match profile.gender {
        Gender::Male => male,
        Gender::Female => female,
        Gender::Other => (male + female) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adult_male() -> UserProfile {
        UserProfile {
            age: 30,
            gender: Gender::Male,
            activity_level: ActivityLevel::ModeratelyActive,
            weight_kg: 70.0,
            height_cm: 175.0,
        }
    }

    #[test]
    fn adult_with_normal_bmi_gets_base_steps() {
        assert_eq!(daily_step_goal(&adult_male()).unwrap(), 10_000);
    }

    #[test]
    fn senior_sedentary_obese_female_steps() {
        let profile = UserProfile {
            age: 70,
            gender: Gender::Female,
            activity_level: ActivityLevel::Sedentary,
            weight_kg: 80.0,
            height_cm: 160.0,
        };
        // 7000 × 0.8 × 0.95 × 1.1 = 5852
        assert_eq!(daily_step_goal(&profile).unwrap(), 5_900);
    }

    #[test]
    fn calories_follow_harris_benedict() {
        // BMR ≈ 1695.67, × 1.55 ≈ 2628.28
        assert_eq!(daily_calorie_goal(&adult_male(), GoalType::Maintain).unwrap(), 2_628);
        assert_eq!(daily_calorie_goal(&adult_male(), GoalType::LoseWeight).unwrap(), 2_103);
    }

    #[test]
    fn female_bmr_branch_is_used() {
        let profile = UserProfile {
            gender: Gender::Female,
            ..adult_male()
        };
        let female = daily_calorie_goal(&profile, GoalType::Maintain).unwrap();
        let male = daily_calorie_goal(&adult_male(), GoalType::Maintain).unwrap();
        assert!(female < male);

        let other = daily_calorie_goal(
            &UserProfile {
                gender: Gender::Other,
                ..adult_male()
            },
            GoalType::Maintain,
        )
        .unwrap();
        assert!(female <= other && other <= male);
    }

    #[test]
    fn gaining_weight_raises_calories() {
        let maintain = daily_calorie_goal(&adult_male(), GoalType::Maintain).unwrap();
        let gain = daily_calorie_goal(&adult_male(), GoalType::GainWeight).unwrap();
        assert!(gain > maintain);
    }

    #[test]
    fn invalid_measurements_are_rejected() {
        let profile = UserProfile {
            height_cm: 0.0,
            ..adult_male()
        };
        assert_eq!(
            daily_targets(&profile, GoalType::Maintain),
            Err(TargetError::InvalidMeasurement {
                field: "height_cm",
                value: 0.0
            })
        );

        let profile = UserProfile {
            weight_kg: f64::NAN,
            ..adult_male()
        };
        assert!(daily_step_goal(&profile).is_err());
    }
}
