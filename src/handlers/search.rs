use crate::agent::MediaKitAgent;
use crate::firecrawl::FirecrawlClient;
use crate::server::ServerState;
use rocket::http::Status;
use rocket::post;
use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{error, info};

#[derive(Deserialize, Debug, Clone)]
pub struct MediaSearchRequest {
    pub media_name: String,
    /// Per-request model credential; overrides the process-wide one.
    #[serde(default)]
    pub model_api_key: Option<String>,
    /// Per-request scrape credential; overrides the process-wide one.
    #[serde(default)]
    pub scrape_api_key: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct MediaSearchResponse {
    pub result: BTreeMap<String, String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct SearchErrorResponse {
    pub message: String,
    pub error_type: String,
}

#[post("/search", data = "<request>")]
pub async fn handle_search(
    state: &State<ServerState>,
    request: Json<MediaSearchRequest>,
) -> Result<Json<MediaSearchResponse>, (Status, Json<SearchErrorResponse>)> {
    let media_name = request.media_name.trim().to_string();
    if media_name.is_empty() {
        return Err((
            Status::BadRequest,
            Json(SearchErrorResponse {
                message: "Media name cannot be empty".to_string(),
                error_type: "empty_media_name".to_string(),
            }),
        ));
    }
    info!(%media_name, "received search request");

    let config = &state.config;
    let model_api_key = match request
        .model_api_key
        .clone()
        .or_else(|| config.openai_api_key.clone())
    {
        Some(key) => key,
        None => return Err(server_error("no model API key configured")),
    };
    let scrape_api_key = match request
        .scrape_api_key
        .clone()
        .or_else(|| config.firecrawl_api_key.clone())
    {
        Some(key) => key,
        None => return Err(server_error("no scrape API key configured")),
    };

    let firecrawl = match FirecrawlClient::new(scrape_api_key) {
        Ok(client) => client,
        Err(e) => return Err(server_error(&e.to_string())),
    };
    let model = state.model_factory.build(config.model.clone(), model_api_key);
    // Fresh agent per request: no conversational context survives the response.
    let agent = MediaKitAgent::new(model, firecrawl, config.policy);

    let result = agent.search_media_kit(&media_name).await;
    info!(%media_name, ?result, "returning result");
    Ok(Json(MediaSearchResponse { result }))
}

fn server_error(detail: &str) -> (Status, Json<SearchErrorResponse>) {
    error!(detail, "search request failed");
    (
        Status::InternalServerError,
        Json(SearchErrorResponse {
            message: format!("Internal server error: {detail}"),
            error_type: "internal_error".to_string(),
        }),
    )
}
