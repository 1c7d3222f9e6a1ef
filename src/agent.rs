use crate::config::PromptPolicy;
use crate::firecrawl::FirecrawlClient;
use crate::llm::{ChatTurn, CompletionBuilder, LLMError, Message, Role, ToolSpec};
use crate::tools::{dispatch_tool_call, tool_specs};
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

pub const NOT_FOUND: &str = "찾을 수 없음";

/// Safety cap on tool rounds so a model that never stops calling tools cannot
/// hold a request forever. Hitting it degrades to a not-found result.
const MAX_TOOL_ROUNDS: usize = 20;

/// The narrow seam over the externally hosted model: one chat exchange in,
/// one turn out. Everything the model does between those two points (including
/// deciding whether to call tools) is opaque to this system.
pub trait ChatModel {
    fn chat(
        &self,
        messages: Vec<Message>,
        tools: Vec<ToolSpec>,
    ) -> impl std::future::Future<Output = Result<ChatTurn, LLMError>> + Send;
}

/// Production model handle: OpenAI chat completions with an explicit key.
pub struct OpenAiChat {
    model: String,
    api_key: String,
}

impl OpenAiChat {
    pub fn new(model: String, api_key: String) -> Self {
        Self { model, api_key }
    }
}

impl ChatModel for OpenAiChat {
    async fn chat(
        &self,
        messages: Vec<Message>,
        tools: Vec<ToolSpec>,
    ) -> Result<ChatTurn, LLMError> {
        CompletionBuilder::new()
            .model(self.model.clone())
            .api_key(self.api_key.clone())
            .messages(messages)
            .tools(tools)
            .build()
            .await
    }
}

/// A model handle that answers every chat with the same reply and never calls
/// tools. Lets the endpoint run without the hosted model.
pub struct FixedReplyModel {
    reply: String,
}

impl FixedReplyModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl ChatModel for FixedReplyModel {
    async fn chat(
        &self,
        _messages: Vec<Message>,
        _tools: Vec<ToolSpec>,
    ) -> Result<ChatTurn, LLMError> {
        Ok(ChatTurn {
            message: Message {
                role: Role::Assistant,
                content: Some(self.reply.clone()),
                tool_calls: None,
                tool_call_id: None,
            },
            finish_reason: Some("stop".to_string()),
        })
    }
}

/// The concrete model a request-scoped agent is bound to.
pub enum ModelHandle {
    OpenAi(OpenAiChat),
    Fixed(FixedReplyModel),
}

impl ChatModel for ModelHandle {
    async fn chat(
        &self,
        messages: Vec<Message>,
        tools: Vec<ToolSpec>,
    ) -> Result<ChatTurn, LLMError> {
        match self {
            ModelHandle::OpenAi(model) => model.chat(messages, tools).await,
            ModelHandle::Fixed(model) => model.chat(messages, tools).await,
        }
    }
}

/// Decides which model handle each request gets. The server holds one of
/// these; handlers build a fresh handle per request from it.
#[derive(Debug, Clone)]
pub enum ModelFactory {
    OpenAi,
    Fixed(String),
}

impl ModelFactory {
    pub fn build(&self, model: String, api_key: String) -> ModelHandle {
        match self {
            ModelFactory::OpenAi => ModelHandle::OpenAi(OpenAiChat::new(model, api_key)),
            ModelFactory::Fixed(reply) => ModelHandle::Fixed(FixedReplyModel::new(reply.clone())),
        }
    }
}

/// Per-request orchestrator: one instruction document, two tools, one model
/// handle. Constructed fresh for every request so no conversational context
/// leaks between requests.
pub struct MediaKitAgent<M: ChatModel> {
    model: M,
    firecrawl: FirecrawlClient,
    instructions: &'static str,
}

impl<M: ChatModel> MediaKitAgent<M> {
    pub fn new(model: M, firecrawl: FirecrawlClient, policy: PromptPolicy) -> Self {
        Self {
            model,
            firecrawl,
            instructions: policy.instructions(),
        }
    }

    /// Resolve a media outlet name to a media kit URL. Always returns a result
    /// mapping; model failures are folded into the value, never raised.
    pub async fn search_media_kit(&self, media_name: &str) -> BTreeMap<String, String> {
        info!(media_name, "agent start: searching media kit");
        match self.run_conversation(media_name).await {
            Ok(reply) => {
                let preview: String = reply.chars().take(200).collect();
                info!(media_name, reply = %preview, "agent got final reply");
                parse_reply(&reply, media_name)
            }
            Err(e) => {
                error!(media_name, error = %e, "model invocation failed");
                classify_model_error(media_name, &e)
            }
        }
    }

    /// Drive the model's tool-use protocol: keep executing requested tool calls
    /// and feeding their outcomes back until the model answers in plain text.
    async fn run_conversation(&self, media_name: &str) -> Result<String, LLMError> {
        let mut messages = vec![Message::system(self.instructions), Message::user(media_name)];
        let tools = tool_specs();

        for _ in 0..MAX_TOOL_ROUNDS {
            let turn = self.model.chat(messages.clone(), tools.clone()).await?;
            if !turn.wants_tool_calls() {
                return Ok(turn.message.content.unwrap_or_default());
            }
            let calls = turn.message.tool_calls.clone().unwrap_or_default();
            messages.push(turn.message);
            for call in &calls {
                let outcome = dispatch_tool_call(&self.firecrawl, &call.function).await;
                messages.push(Message::tool(call.id.clone(), outcome.to_string()));
            }
        }
        warn!(media_name, "model did not stop calling tools; giving up");
        Ok(String::new())
    }
}

/// Pull the first brace-delimited substring out of the model's free text and
/// parse it as JSON. The matcher is intentionally shallow (no nested braces),
/// matching the output contract of a single flat object. Anything unparseable
/// falls back to a not-found mapping.
pub fn parse_reply(content: &str, media_name: &str) -> BTreeMap<String, String> {
    let re = Regex::new(r"\{[^}]+\}").unwrap();
    if let Some(found) = re.find(content) {
        match serde_json::from_str::<BTreeMap<String, String>>(found.as_str()) {
            Ok(result) => return result,
            Err(e) => warn!(error = %e, "reply contained braces but no parseable JSON"),
        }
    }
    BTreeMap::from([(media_name.to_string(), NOT_FOUND.to_string())])
}

/// Best-effort classification of provider error text into a localized message.
/// The wording of provider errors is not stable, so nothing downstream may
/// depend on which branch was taken.
pub fn classify_model_error(media_name: &str, error: &LLMError) -> BTreeMap<String, String> {
    let msg = error.to_string();
    let lower = msg.to_lowercase();
    let value = if lower.contains("rate limit") {
        format!("에러: Rate limit 초과 - {msg}")
    } else if lower.contains("context") && lower.contains("token") {
        format!("에러: Context token 초과 - {msg}")
    } else if lower.contains("api") && lower.contains("key") {
        format!("에러: API 키 문제 - {msg}")
    } else {
        format!("에러: {msg}")
    };
    BTreeMap::from([(media_name.to_string(), value)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PromptPolicy;

    struct FailingModel {
        message: String,
    }

    impl ChatModel for FailingModel {
        async fn chat(
            &self,
            _messages: Vec<Message>,
            _tools: Vec<ToolSpec>,
        ) -> Result<ChatTurn, LLMError> {
            Err(LLMError::ApiError {
                status: 429,
                message: self.message.clone(),
            })
        }
    }

    fn test_agent<M: ChatModel>(model: M) -> MediaKitAgent<M> {
        let firecrawl = FirecrawlClient::new("fc-test".to_string()).unwrap();
        MediaKitAgent::new(model, firecrawl, PromptPolicy::Strict)
    }

    #[test]
    fn extracts_json_embedded_in_free_text() {
        let result = parse_reply(
            r#"foo {"중앙일보": "https://ad.joongang.co.kr/intro/service/mediakit.do"} bar"#,
            "중앙일보",
        );
        assert_eq!(
            result.get("중앙일보").map(String::as_str),
            Some("https://ad.joongang.co.kr/intro/service/mediakit.do")
        );
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn text_without_braces_falls_back_to_not_found() {
        let result = parse_reply("죄송합니다, 결과 없음", "기자협회보");
        assert_eq!(result.get("기자협회보").map(String::as_str), Some(NOT_FOUND));
    }

    #[test]
    fn unparseable_braces_fall_back_to_not_found() {
        let result = parse_reply("{not json at all}", "한겨레");
        assert_eq!(result.get("한겨레").map(String::as_str), Some(NOT_FOUND));
    }

    #[test]
    fn rate_limit_errors_get_the_rate_limit_prefix() {
        let err = LLMError::ApiError {
            status: 429,
            message: "Rate limit reached for o3".to_string(),
        };
        let result = classify_model_error("중앙일보", &err);
        assert!(result["중앙일보"].starts_with("에러: Rate limit 초과 - "));
    }

    #[test]
    fn context_token_errors_get_the_context_prefix() {
        let err = LLMError::ApiError {
            status: 400,
            message: "This model's maximum context length is 200000 tokens".to_string(),
        };
        let result = classify_model_error("중앙일보", &err);
        assert!(result["중앙일보"].starts_with("에러: Context token 초과 - "));
    }

    #[test]
    fn credential_errors_get_the_api_key_prefix() {
        let err = LLMError::ApiError {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        };
        let result = classify_model_error("중앙일보", &err);
        assert!(result["중앙일보"].starts_with("에러: API 키 문제 - "));
    }

    #[test]
    fn other_errors_get_the_generic_prefix() {
        let err = LLMError::EmptyResponse;
        let result = classify_model_error("중앙일보", &err);
        let value = &result["중앙일보"];
        assert!(value.starts_with("에러: "));
        assert!(!value.starts_with("에러: Rate limit"));
        assert!(!value.starts_with("에러: Context token"));
        assert!(!value.starts_with("에러: API 키"));
    }

    #[tokio::test]
    async fn stubbed_model_reply_yields_one_entry_for_the_input_name() {
        let agent = test_agent(FixedReplyModel::new(
            r#"{"중앙일보": "https://ad.joongang.co.kr/intro/service/mediakit.do"}"#,
        ));
        let result = agent.search_media_kit("중앙일보").await;
        assert_eq!(result.len(), 1);
        assert!(result.contains_key("중앙일보"));
    }

    #[tokio::test]
    async fn model_failure_is_absorbed_into_the_result_value() {
        let agent = test_agent(FailingModel {
            message: "Rate limit reached".to_string(),
        });
        let result = agent.search_media_kit("기자협회보").await;
        assert!(result["기자협회보"].starts_with("에러: Rate limit 초과 - "));
    }
}
