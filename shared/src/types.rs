//! API request and response types

use crate::errors::ReplyError;
use crate::health_metrics::{DerivedMetrics, Gender, ProfileInput};
use serde::{Deserialize, Serialize};

/// Path of the analysis endpoint
pub const ANALYZE_PATH: &str = "/api/analyze";

// ============================================================================
// Analysis Types
// ============================================================================

/// Body of `POST /api/analyze`
///
/// The derived values are whatever the client computed; the server echoes
/// them without recomputing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub weight: f64,
    pub height: f64,
    pub age: f64,
    pub gender: Gender,
    pub activity: f64,
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: f64,
}

impl AnalyzeRequest {
    /// Combine a profile with its derived metrics
    pub fn new(profile: &ProfileInput, metrics: &DerivedMetrics) -> Self {
        Self {
            weight: profile.weight,
            height: profile.height,
            age: profile.age as f64,
            gender: profile.gender,
            activity: profile.activity,
            bmi: metrics.bmi,
            bmr: metrics.bmr as f64,
            tdee: metrics.tdee as f64,
        }
    }
}

/// Successful analysis response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

/// Error response body, shared by every failing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Either shape a caller may receive from the analysis endpoint
#[derive(Debug, Default, Deserialize)]
struct AnalyzeReplyBody {
    #[serde(default)]
    analysis: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Interpret an analysis endpoint reply on the caller side
///
/// A reply without a JSON content type is rejected before the body is read.
pub fn parse_analyze_reply(content_type: Option<&str>, body: &str) -> Result<String, ReplyError> {
    let is_json = content_type
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false);
    if !is_json {
        return Err(ReplyError::NotJson(content_type.map(str::to_owned)));
    }

    let reply: AnalyzeReplyBody =
        serde_json::from_str(body).map_err(|e| ReplyError::Malformed(e.to_string()))?;

    match reply {
        AnalyzeReplyBody {
            analysis: Some(analysis),
            ..
        } => Ok(analysis),
        AnalyzeReplyBody {
            error: Some(error), ..
        } => Err(ReplyError::Server(error)),
        _ => Err(ReplyError::Malformed("missing analysis field".to_string())),
    }
}
