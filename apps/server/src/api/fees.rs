use std::sync::Arc;

use crate::main_lib::AppState;
use axum::{extract::State, routing::get, Json, Router};

async fn list_fee_rules(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.transfer_service.fee_rules())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/fees/rules", get(list_fee_rules))
}
