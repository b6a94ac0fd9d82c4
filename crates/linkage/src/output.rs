use crate::error::LinkError;
use crate::model::{LinkResult, MatchResult};

/// Render matches as CSV: `<left id>,<right id>,confidence_score`.
pub fn to_csv(
    matches: &[MatchResult],
    left_id_header: &str,
    right_id_header: &str,
) -> Result<String, LinkError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([left_id_header, right_id_header, "confidence_score"])
        .map_err(|e| LinkError::csv(None, e))?;
    for m in matches {
        let score = m.confidence_score.to_string();
        writer
            .write_record([m.business_id.as_str(), m.entity_id.as_str(), score.as_str()])
            .map_err(|e| LinkError::csv(None, e))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| LinkError::csv(None, e.error()))?;
    String::from_utf8(bytes).map_err(|e| LinkError::csv(None, e))
}

/// Pretty JSON report of a whole run.
pub fn to_json(result: &LinkResult) -> Result<String, LinkError> {
    serde_json::to_string_pretty(result)
        .map_err(|e| LinkError::Json(e.to_string()))
}
