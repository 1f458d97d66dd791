//! Request construction for the chat completions endpoint.

use serde::{Deserialize, Serialize};

use super::GenerationError;
use crate::locale::to_upper_tr;

pub const MODEL: &str = "gpt-3.5-turbo";
pub const MAX_TOKENS: u32 = 1500;
pub const TEMPERATURE: f32 = 0.7;

/// Validated generation input. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    subject_text: String,
    institution_name: String,
}

impl GenerationRequest {
    pub fn new(subject_text: &str, institution_name: &str) -> Result<Self, GenerationError> {
        let subject_text = subject_text.trim();
        if subject_text.is_empty() {
            return Err(GenerationError::InvalidInput("Dilekçe konusu boş olamaz"));
        }
        let institution_name = institution_name.trim();
        if institution_name.is_empty() {
            return Err(GenerationError::InvalidInput("Kurum bilgisi boş olamaz"));
        }

        Ok(Self {
            subject_text: subject_text.to_string(),
            institution_name: institution_name.to_string(),
        })
    }

    pub fn subject_text(&self) -> &str {
        &self.subject_text
    }

    pub fn institution_name(&self) -> &str {
        &self.institution_name
    }

    fn system_prompt(&self) -> String {
        format!(
            "Sen profesyonel bir hukuk dilekçesi hazırlama uzmanısın. \
             Dilekçeyi {} kurumuna hitaben hazırla. \
             Yalnızca resmi dilekçe formatında, hukuki bir dil kullan. \
             Ek bilgi, gereksiz açıklama veya bağlam ekleme. \
             Sadece gerekli yasal unsurları içeren bir dilekçe hazırla.",
            to_upper_tr(&self.institution_name)
        )
    }

    fn user_prompt(&self) -> String {
        format!("Dilekçe konusu: {}", self.subject_text)
    }

    /// Build the wire body with the fixed model parameters.
    pub fn to_body(&self) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: self.system_prompt(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: self.user_prompt(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ErrorKind;

    #[test]
    fn test_rejects_blank_subject() {
        let err = GenerationRequest::new("   \n", "Aile Mahkemesi").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "Dilekçe konusu boş olamaz");
    }

    #[test]
    fn test_rejects_blank_institution() {
        let err = GenerationRequest::new("Boşanma", "").unwrap_err();
        assert_eq!(err.to_string(), "Kurum bilgisi boş olamaz");
    }

    #[test]
    fn test_body_embeds_institution_and_subject() {
        let request = GenerationRequest::new(
            "  Şiddetli geçimsizlik nedeniyle boşanma ",
            " Aile Mahkemesi ",
        )
        .unwrap();
        let body = request.to_body();

        assert_eq!(body.model, MODEL);
        assert_eq!(body.max_tokens, MAX_TOKENS);
        assert_eq!(body.messages.len(), 2);
        assert_eq!(body.messages[0].role, "system");
        assert!(body.messages[0].content.contains("AİLE MAHKEMESİ"));
        assert_eq!(body.messages[1].role, "user");
        assert_eq!(
            body.messages[1].content,
            "Dilekçe konusu: Şiddetli geçimsizlik nedeniyle boşanma"
        );
    }

    #[test]
    fn test_body_serializes_openai_shape() {
        let body = GenerationRequest::new("Kira artışı", "Sulh Hukuk")
            .unwrap()
            .to_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["max_tokens"], 1500);
        assert!(json["temperature"].is_number());
    }
}
