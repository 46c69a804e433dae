//! MetabolicAI WASM Module
//!
//! This crate exposes the metrics engine and the saved-result history to
//! the browser. Persistence stays in JavaScript: the history is handed over
//! as the serialized string kept under [`HISTORY_STORAGE_KEY`].

use metabolic_ai_shared::health_metrics::{
    categorize, compute_bmi, compute_bmr, round_half_away, DerivedMetrics, Gender,
};
use metabolic_ai_shared::history::{HistoryEntry, HistoryStore, MemoryStorage};
use wasm_bindgen::prelude::*;

pub use metabolic_ai_shared::history::HISTORY_STORAGE_KEY;

fn gender_of(is_male: bool) -> Gender {
    if is_male {
        Gender::Male
    } else {
        Gender::Female
    }
}

/// Calculate BMI from weight (kg) and height (cm), one decimal
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    compute_bmi(weight_kg, height_cm)
}

/// Calculate BMR (Mifflin-St Jeor), whole kcal
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, is_male: bool) -> f64 {
    compute_bmr(weight_kg, height_cm, age_years, gender_of(is_male)) as f64
}

/// Calculate TDEE from a BMR and an activity multiplier, whole kcal
///
/// The BMR is taken as given, fractional part included.
#[wasm_bindgen]
pub fn calculate_tdee(bmr: f64, activity_multiplier: f64) -> f64 {
    round_half_away(bmr * activity_multiplier, 0)
}

/// Polish BMI category label
#[wasm_bindgen]
pub fn bmi_category(bmi: f64) -> String {
    categorize(bmi).label().to_string()
}

/// Saved results, backed by the string JavaScript keeps in local storage
#[wasm_bindgen]
pub struct HistoryBook {
    store: HistoryStore<MemoryStorage>,
}

#[wasm_bindgen]
impl HistoryBook {
    /// Load from the stored string; missing or corrupt content is empty
    #[wasm_bindgen(constructor)]
    pub fn new(serialized: Option<String>) -> HistoryBook {
        let storage = match serialized {
            Some(s) => MemoryStorage::with_history(s),
            None => MemoryStorage::new(),
        };
        HistoryBook {
            store: HistoryStore::load(storage),
        }
    }

    /// Save a result and return the string to write back to storage
    pub fn save(
        &mut self,
        id: String,
        date: String,
        bmi: f64,
        bmr: f64,
        tdee: f64,
        weight: f64,
    ) -> Result<String, JsValue> {
        let metrics = DerivedMetrics {
            bmi,
            bmr: bmr as i64,
            tdee: tdee as i64,
            category: categorize(bmi),
        };
        self.store
            .record(HistoryEntry::new(id, date, &metrics, weight))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.store
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Drop every entry; the caller removes the storage key
    pub fn clear(&mut self) -> Result<(), JsValue> {
        self.store
            .clear()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current entries as a JSON array, oldest first
    pub fn entries(&self) -> String {
        self.store.to_json().unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.store.len()
    }
}
