use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "tool")]
    Tool,
}

/// One chat message. Assistant messages may carry tool calls instead of (or in
/// addition to) text content; tool messages carry the id of the call they answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn tool(tool_call_id: String, content: String) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content),
            tool_calls: None,
            tool_call_id: Some(tool_call_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded argument object, as produced by the model.
    pub arguments: String,
}

/// A function declaration advertised to the model in the request's `tools` array.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub spec_type: String,
    pub function: FunctionSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolSpec {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            spec_type: "function".to_string(),
            function: FunctionSpec {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

/// The model's side of one request/response exchange.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub message: Message,
    pub finish_reason: Option<String>,
}

impl ChatTurn {
    pub fn wants_tool_calls(&self) -> bool {
        self.finish_reason.as_deref() == Some("tool_calls")
            && self
                .message
                .tool_calls
                .as_ref()
                .is_some_and(|calls| !calls.is_empty())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    tools: &'a [ToolSpec],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Message,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("LLM request building failed: {0}")]
    RequestBuildingError(String),
    #[error("LLM request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("LLM API error (status {status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("LLM response is empty")]
    EmptyResponse,
}

#[derive(Debug, Clone, Default)]
pub struct CompletionBuilder {
    model: Option<String>,
    api_key: Option<String>,
    messages: Vec<Message>,
    tools: Vec<ToolSpec>,
}

impl CompletionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: String) -> Self {
        self.model = Some(model);
        self
    }

    pub fn api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }

    pub async fn build(self) -> Result<ChatTurn, LLMError> {
        let model = match self.model {
            Some(m) => m,
            None => {
                return Err(LLMError::RequestBuildingError(
                    "model is required".to_string(),
                ))
            }
        };
        let api_key = match self.api_key {
            Some(k) => k,
            None => {
                return Err(LLMError::RequestBuildingError(
                    "api key is required".to_string(),
                ))
            }
        };

        let mut headers = HeaderMap::new();
        let auth_header = match HeaderValue::from_str(&format!("Bearer {api_key}")) {
            Ok(header) => header,
            Err(e) => return Err(LLMError::RequestBuildingError(e.to_string())),
        };
        headers.insert(AUTHORIZATION, auth_header);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let req_body = ChatRequest {
            model: &model,
            messages: &self.messages,
            tools: &self.tools,
        };

        let client = reqwest::Client::new();
        let response = match client
            .post(OPENAI_API_URL)
            .headers(headers)
            .json(&req_body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return Err(LLMError::RequestError(e)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) => body,
            };
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let response_body: ChatResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => return Err(LLMError::RequestError(e)),
        };

        response_body
            .choices
            .into_iter()
            .next()
            .map(|choice| ChatTurn {
                message: choice.message,
                finish_reason: choice.finish_reason,
            })
            .ok_or(LLMError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tool_call_response() {
        let raw = r#"{
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {"name": "search", "arguments": "{\"query\": \"중앙일보 미디어킷\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let choice = &parsed.choices[0];
        let calls = choice.message.tool_calls.as_ref().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function.name, "search");
        let turn = ChatTurn {
            message: choice.message.clone(),
            finish_reason: choice.finish_reason.clone(),
        };
        assert!(turn.wants_tool_calls());
    }

    #[test]
    fn plain_reply_does_not_want_tool_calls() {
        let turn = ChatTurn {
            message: Message {
                role: Role::Assistant,
                content: Some("{\"중앙일보\": \"https://example.com\"}".to_string()),
                tool_calls: None,
                tool_call_id: None,
            },
            finish_reason: Some("stop".to_string()),
        };
        assert!(!turn.wants_tool_calls());
    }

    #[test]
    fn tool_message_serializes_with_call_id() {
        let msg = Message::tool("call_1".to_string(), "{}".to_string());
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "tool");
        assert_eq!(value["tool_call_id"], "call_1");
        assert!(value.get("tool_calls").is_none());
    }

    #[test]
    fn system_message_omits_tool_fields() {
        let value = serde_json::to_value(Message::system("hello")).unwrap();
        assert_eq!(value["role"], "system");
        assert!(value.get("tool_call_id").is_none());
    }

    #[tokio::test]
    async fn build_requires_model_and_api_key() {
        let err = CompletionBuilder::new().build().await.unwrap_err();
        assert!(matches!(err, LLMError::RequestBuildingError(_)));
        let err = CompletionBuilder::new()
            .model("o3".to_string())
            .build()
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::RequestBuildingError(_)));
    }
}
