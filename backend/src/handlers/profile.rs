//! HTTP handlers for stateless profile endpoints

use axum::{extract::Path, Json};
use shared::{recommendations_for, RoastLevel, RoastProfile, RoastTips};

use crate::error::AppResult;
use crate::services::roasting::{generate_profile, GenerateProfileInput};

/// Generate a roast profile without attaching it to a session
pub async fn generate(Json(input): Json<GenerateProfileInput>) -> AppResult<Json<RoastProfile>> {
    let profile = generate_profile(&input)?;
    Ok(Json(profile))
}

/// Roasting tips for a level
pub async fn get_recommendations(Path(level): Path<String>) -> AppResult<Json<RoastTips>> {
    let level: RoastLevel = level.parse()?;
    Ok(Json(recommendations_for(level)))
}
