//! Health metrics calculations module
//!
//! Provides BMI, BMR (Mifflin-St Jeor), TDEE and the BMI category label
//! for a single user profile.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Display Rounding**: Results are rounded the way they are shown to the user
//! 3. **No Range Validation**: Out-of-range input gives nonsensical numbers, never errors
//! 4. **Type Safety**: Gender, activity and category are explicit enums

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Profile Types
// ============================================================================

/// Gender used by the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Polish label used in the analysis prompt
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Mężczyzna",
            Gender::Female => "Kobieta",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Activity level offered by the calculator form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// No exercise
    Sedentary,
    /// Light exercise
    #[default]
    Light,
    /// Moderate exercise
    Moderate,
    /// Hard exercise
    High,
    /// Very hard exercise or physical job
    Extreme,
}

impl ActivityLevel {
    /// Every level, in ascending multiplier order
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::High,
        ActivityLevel::Extreme,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::High => 1.725,
            ActivityLevel::Extreme => 1.9,
        }
    }

    /// Polish label shown next to the multiplier
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Brak",
            ActivityLevel::Light => "Niska",
            ActivityLevel::Moderate => "Średnia",
            ActivityLevel::High => "Wysoka",
            ActivityLevel::Extreme => "Bardzo wysoka",
        }
    }

    /// Find the level whose multiplier equals `multiplier`
    pub fn from_multiplier(multiplier: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| (level.multiplier() - multiplier).abs() < f64::EPSILON)
    }
}

/// Calculator input for one user
///
/// `activity` is the raw multiplier, as the form submits it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    /// Weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Age in years
    pub age: u32,
    pub gender: Gender,
    /// Activity multiplier
    pub activity: f64,
}

impl Default for ProfileInput {
    fn default() -> Self {
        Self {
            weight: 70.0,
            height: 175.0,
            age: 30,
            gender: Gender::Male,
            activity: ActivityLevel::default().multiplier(),
        }
    }
}

impl ProfileInput {
    /// Activity level matching the multiplier, if it is one of the offered ones
    pub fn activity_level(&self) -> Option<ActivityLevel> {
        ActivityLevel::from_multiplier(self.activity)
    }
}

// ============================================================================
// Rounding
// ============================================================================

/// Round to `decimals` places, halves away from zero
///
/// Rounds the exact decimal value of the double, the same way a number is
/// rounded for display. `1.45` is stored as `1.4499999...` and rounds to `1.4`,
/// while an exact tie such as `22.25` rounds to `22.3`.
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(exact) => exact
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(value),
        // NaN, infinities and values outside Decimal's range
        None => {
            let factor = 10f64.powi(decimals as i32);
            (value * factor).round() / factor
        }
    }
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Niedowaga,
    Norma,
    Nadwaga,
    #[serde(rename = "Otyłość")]
    Otylosc,
}

impl BmiCategory {
    /// Get the BMI range for this category, lower bound inclusive
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Niedowaga => (0.0, 18.5),
            BmiCategory::Norma => (18.5, 25.0),
            BmiCategory::Nadwaga => (25.0, 30.0),
            BmiCategory::Otylosc => (30.0, f64::INFINITY),
        }
    }

    /// Polish label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Niedowaga => "Niedowaga",
            BmiCategory::Norma => "Norma",
            BmiCategory::Nadwaga => "Nadwaga",
            BmiCategory::Otylosc => "Otyłość",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calculate BMI from weight and height, rounded to one decimal
///
/// Formula: BMI = weight(kg) / height(m)²
///
/// Returns `0.0` when `height_cm <= 0` instead of dividing by zero.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    round_half_away(weight_kg / (height_m * height_m), 1)
}

/// Classify BMI into category
pub fn categorize(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Niedowaga
    } else if bmi < 25.0 {
        BmiCategory::Norma
    } else if bmi < 30.0 {
        BmiCategory::Nadwaga
    } else {
        BmiCategory::Otylosc
    }
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn compute_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> i64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    let bmr = match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    };
    round_half_away(bmr, 0) as i64
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn compute_tdee(bmr: i64, activity_multiplier: f64) -> i64 {
    round_half_away(bmr as f64 * activity_multiplier, 0) as i64
}

/// Everything the calculator derives from a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// BMI, one decimal
    pub bmi: f64,
    /// Basal Metabolic Rate in kcal
    pub bmr: i64,
    /// Total Daily Energy Expenditure in kcal
    pub tdee: i64,
    pub category: BmiCategory,
}

impl DerivedMetrics {
    /// Compute all metrics for a profile
    pub fn compute(profile: &ProfileInput) -> Self {
        let bmi = compute_bmi(profile.weight, profile.height);
        let bmr = compute_bmr(profile.weight, profile.height, profile.age, profile.gender);
        let tdee = compute_tdee(bmr, profile.activity);

        Self {
            bmi,
            bmr,
            tdee,
            category: categorize(bmi),
        }
    }
}
