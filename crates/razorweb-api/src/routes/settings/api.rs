//! Settings API endpoints - JSON API

use crate::AppState;
use razorweb_config::Config;

pub async fn api_settings(state: axum::extract::State<AppState>) -> axum::Json<Config> {
    axum::Json(state.config.clone())
}
