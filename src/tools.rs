use crate::firecrawl::FirecrawlClient;
use crate::llm::{FunctionCall, ToolSpec};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

pub const SEARCH_TOOL_NAME: &str = "search";
pub const SCRAPE_TOOL_NAME: &str = "scrape";
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

#[derive(Deserialize, Debug)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Deserialize, Debug)]
pub struct ScrapeArgs {
    pub url: String,
    /// Accepted so the model's calls never fail to parse, but never forwarded:
    /// the scrape request always asks for markdown only.
    #[serde(default)]
    #[allow(dead_code)]
    pub formats: Option<Vec<String>>,
}

/// The two function declarations advertised to the model. This is the whole
/// capability surface; the model cannot reach anything else.
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::function(
            SEARCH_TOOL_NAME,
            "Search the web. Returns a list of results with url, title, description and scraped markdown content.",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results to return (default 5)"
                    }
                },
                "required": ["query"]
            }),
        ),
        ToolSpec::function(
            SCRAPE_TOOL_NAME,
            "Scrape a single web page and return its content as markdown.",
            json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "The URL to scrape"
                    }
                },
                "required": ["url"]
            }),
        ),
    ]
}

fn search_failure(message: String) -> Value {
    json!([{
        "error": true,
        "message": message,
        "type": "search_error",
    }])
}

fn scrape_failure(message: String) -> Value {
    json!({
        "error": true,
        "message": message,
        "type": "scrape_error",
    })
}

/// Execute one tool call from the model. Failures come back as sentinel error
/// records, never as `Err`, so the model can keep reasoning with them.
pub async fn dispatch_tool_call(client: &FirecrawlClient, call: &FunctionCall) -> Value {
    match call.name.as_str() {
        SEARCH_TOOL_NAME => run_search(client, &call.arguments).await,
        SCRAPE_TOOL_NAME => run_scrape(client, &call.arguments).await,
        other => {
            error!(tool = other, "model called an unknown tool");
            json!({
                "error": true,
                "message": format!("unknown tool: {other}"),
                "type": "unknown_tool",
            })
        }
    }
}

async fn run_search(client: &FirecrawlClient, arguments: &str) -> Value {
    let args: SearchArgs = match serde_json::from_str(arguments) {
        Ok(args) => args,
        Err(e) => {
            error!(%e, "search tool got malformed arguments");
            return search_failure(e.to_string());
        }
    };
    let limit = args.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    info!(query = %args.query, limit, "tool call: search");
    match client.search(&args.query, limit).await {
        Ok(records) => json!(records),
        Err(e) => {
            error!(%e, "search tool failed");
            search_failure(e.to_string())
        }
    }
}

async fn run_scrape(client: &FirecrawlClient, arguments: &str) -> Value {
    let args: ScrapeArgs = match serde_json::from_str(arguments) {
        Ok(args) => args,
        Err(e) => {
            error!(%e, "scrape tool got malformed arguments");
            return scrape_failure(e.to_string());
        }
    };
    info!(url = %args.url, "tool call: scrape");
    match client.scrape(&args.url).await {
        Ok(data) => data,
        Err(e) => {
            error!(%e, "scrape tool failed");
            scrape_failure(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_client() -> FirecrawlClient {
        // Port 9 (discard) is never listening locally; calls fail fast.
        FirecrawlClient::with_base_url("fc-test".to_string(), "http://127.0.0.1:9".to_string())
            .unwrap()
    }

    #[test]
    fn specs_declare_exactly_search_and_scrape() {
        let specs = tool_specs();
        let names: Vec<&str> = specs.iter().map(|s| s.function.name.as_str()).collect();
        assert_eq!(names, vec![SEARCH_TOOL_NAME, SCRAPE_TOOL_NAME]);
    }

    #[test]
    fn search_args_default_limit_is_none() {
        let args: SearchArgs = serde_json::from_str(r#"{"query": "중앙일보 미디어킷"}"#).unwrap();
        assert_eq!(args.query, "중앙일보 미디어킷");
        assert!(args.limit.is_none());
    }

    #[test]
    fn scrape_args_accept_and_ignore_formats() {
        let args: ScrapeArgs = serde_json::from_str(
            r#"{"url": "https://example.com", "formats": ["html", "links"]}"#,
        )
        .unwrap();
        // Whatever was requested, the provider only ever sees markdown.
        let body = crate::firecrawl::scrape_request_body(&args.url);
        assert_eq!(body["formats"], json!(["markdown"]));
    }

    #[tokio::test]
    async fn search_failure_is_a_one_element_sentinel_list() {
        let client = unreachable_client();
        let call = FunctionCall {
            name: SEARCH_TOOL_NAME.to_string(),
            arguments: r#"{"query": "기자협회보 미디어킷"}"#.to_string(),
        };
        let outcome = dispatch_tool_call(&client, &call).await;
        let records = outcome.as_array().expect("search outcome is a list");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["error"], true);
        assert_eq!(records[0]["type"], "search_error");
        assert!(records[0]["message"].as_str().is_some());
    }

    #[tokio::test]
    async fn scrape_failure_is_a_sentinel_record() {
        let client = unreachable_client();
        let call = FunctionCall {
            name: SCRAPE_TOOL_NAME.to_string(),
            arguments: r#"{"url": "https://example.com"}"#.to_string(),
        };
        let outcome = dispatch_tool_call(&client, &call).await;
        assert_eq!(outcome["error"], true);
        assert_eq!(outcome["type"], "scrape_error");
    }

    #[tokio::test]
    async fn malformed_search_arguments_become_a_sentinel() {
        let client = unreachable_client();
        let call = FunctionCall {
            name: SEARCH_TOOL_NAME.to_string(),
            arguments: "not json".to_string(),
        };
        let outcome = dispatch_tool_call(&client, &call).await;
        assert_eq!(outcome[0]["error"], true);
        assert_eq!(outcome[0]["type"], "search_error");
    }

    #[tokio::test]
    async fn unknown_tool_name_becomes_a_sentinel() {
        let client = unreachable_client();
        let call = FunctionCall {
            name: "delete_everything".to_string(),
            arguments: "{}".to_string(),
        };
        let outcome = dispatch_tool_call(&client, &call).await;
        assert_eq!(outcome["error"], true);
        assert_eq!(outcome["type"], "unknown_tool");
    }
}
