use rocket::get;
use rocket::serde::json::Json;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct ApiInfo {
    pub message: &'static str,
    pub description: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[get("/")]
pub fn handle_root() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Media Kit Search API",
        description: "Search for media kits and advertising materials from Korean media outlets",
        endpoints: BTreeMap::from([(
            "POST /search",
            "Search for media kit URL by media name",
        )]),
    })
}

/// Liveness only: reports healthy without checking the model or scrape
/// provider.
#[get("/health")]
pub fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
