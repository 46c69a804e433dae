//! Health analysis service - turns a metrics payload into an AI recommendation

use crate::services::completion::CompletionClient;
use metabolic_ai_shared::errors::ServiceError;
use metabolic_ai_shared::types::AnalyzeRequest;
use std::sync::Arc;
use tracing::info;

/// Render the analysis prompt for a payload
///
/// Values are echoed exactly as received; nothing is recomputed. Every line
/// after the first is indented by four spaces, list items by seven.
pub fn render_prompt(req: &AnalyzeRequest) -> String {
    format!(
        "Jesteś ekspertem ds. zdrowia metabolicznego i dietetyki. \n    \
         Przeanalizuj poniższe dane użytkownika i podaj:\n    \
         1. AI-Score (ocena zdrowia metabolicznego 1-100).\n    \
         2. Krótkie podsumowanie obecnego stanu.\n    \
         3. Konkretne, spersonalizowane rekomendacje dotyczące:\n       \
         - Żywienia (ile białka, tłuszczu, węglowodanów)\n       \
         - Aktywności fizycznej (jaki rodzaj treningu)\n       \
         - Stylu życia\n\n    \
         Dane użytkownika:\n    \
         - Płeć: {gender}\n    \
         - Wiek: {age} lat\n    \
         - Waga: {weight} kg\n    \
         - Wzrost: {height} cm\n    \
         - BMI: {bmi}\n    \
         - BMR: {bmr} kcal\n    \
         - TDEE: {tdee} kcal\n    \
         - Poziom aktywności (mnożnik): {activity}\n\n    \
         Odpowiedz w języku polskim, używając profesjonalnego, ale przystępnego tonu.",
        gender = req.gender.label(),
        age = req.age,
        weight = req.weight,
        height = req.height,
        bmi = req.bmi,
        bmr = req.bmr,
        tdee = req.tdee,
        activity = req.activity,
    )
}

/// Analysis service
///
/// Cheap to clone; the completion client is shared behind an `Arc`.
#[derive(Clone)]
pub struct AnalysisService {
    client: Arc<dyn CompletionClient>,
}

impl AnalysisService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Ask the completion service for an analysis of `req`
    ///
    /// Exactly one outbound call; no retry.
    pub async fn analyze(&self, req: &AnalyzeRequest) -> Result<String, ServiceError> {
        let prompt = render_prompt(req);
        let analysis = self.client.complete(&prompt).await?;
        info!(analysis_len = analysis.len(), "Analysis generated");
        Ok(analysis)
    }
}
