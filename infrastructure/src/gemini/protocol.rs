//! Gemini `generateContent` wire types (v1beta REST API)

use duaonai_application::ChatRequest;
use duaonai_domain::{Message, Role};
use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Flatten a chat request into alternating `user`/`model` turns.
    ///
    /// The system instruction goes first as a user turn; the history then
    /// starts with the model's acknowledgement of it.
    pub fn from_chat(request: &ChatRequest) -> Self {
        let mut contents = Vec::with_capacity(request.history.len() + 2);
        contents.push(Content::text(Role::User, &request.system_instruction));
        contents.extend(request.history.iter().map(Content::from));
        contents.push(Content::text(Role::User, &request.message));
        Self { contents }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.as_str().to_string()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

impl From<&Message> for Content {
    fn from(message: &Message) -> Self {
        Content::text(message.role, message.text.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response body of `generateContent`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, if any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// Reason the prompt was blocked, when the API refused to answer.
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use duaonai_domain::Model;

    #[test]
    fn test_request_alternates_roles() {
        let chat = ChatRequest::new(
            Model::Gemini15Flash,
            "system prompt",
            vec![
                Message::model("ack"),
                Message::user("first"),
                Message::model("reply"),
            ],
            "retry",
        );
        let body = serde_json::to_value(GenerateContentRequest::from_chat(&chat)).unwrap();

        let contents = body["contents"].as_array().unwrap();
        let roles: Vec<&str> = contents
            .iter()
            .map(|c| c["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["user", "model", "user", "model", "user"]);
        assert_eq!(contents[0]["parts"][0]["text"], "system prompt");
        assert_eq!(contents[4]["parts"][0]["text"], "retry");
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "{\"title\": "}, {"text": "\"Dua\"}"}]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {"totalTokenCount": 12}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().as_deref(), Some(r#"{"title": "Dua"}"#));
        assert_eq!(
            response.candidates[0].finish_reason.as_deref(),
            Some("STOP")
        );
    }

    #[test]
    fn test_response_without_candidates() {
        let json = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), None);
        assert_eq!(response.block_reason(), Some("SAFETY"));
    }

    #[test]
    fn test_error_envelope() {
        let json = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.code, 400);
        assert_eq!(envelope.error.message, "API key not valid.");
        assert_eq!(envelope.error.status.as_deref(), Some("INVALID_ARGUMENT"));
    }
}
