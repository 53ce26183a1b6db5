use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::config::redact_credentials;
use crate::errors::InfraFlowError;
use super::json::parse_json_response;
use super::provider::LLMProvider;
use super::types::LLMResponse;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or("gemini-2.5-flash").to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn contents(prompt: &str, system: Option<&str>) -> Value {
        let text = match system {
            Some(sys) => format!("System: {}\n\n{}", sys, prompt),
            None => prompt.to_string(),
        };
        json!([{"role": "user", "parts": [{"text": text}]}])
    }

    async fn generate_content(&self, body: &Value) -> Result<LLMResponse, InfraFlowError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let resp = self.client.post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors echo the URL, which carries the key.
                let message = redact_credentials(&e.to_string(), &[self.api_key.as_str()]);
                if e.is_timeout() {
                    InfraFlowError::Timeout(format!("Gemini request timed out: {}", message))
                } else {
                    InfraFlowError::Network(format!("Gemini request failed: {}", message))
                }
            })?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(InfraFlowError::RateLimit("Gemini rate limit".into()));
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(InfraFlowError::Authentication("Gemini rejected the API key".into()));
        }

        let data: Value = resp.json().await
            .map_err(|e| InfraFlowError::LLMApi(format!(
                "Parse error: {}",
                redact_credentials(&e.to_string(), &[self.api_key.as_str()])
            )))?;

        if let Some(error) = data.get("error") {
            return Err(InfraFlowError::LLMApi(error["message"].as_str().unwrap_or("Unknown").to_string()));
        }

        let content = data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| InfraFlowError::LLMApi("No content in Gemini response".into()))?
            .to_string();

        Ok(LLMResponse {
            content,
            input_tokens: data["usageMetadata"]["promptTokenCount"].as_u64(),
            output_tokens: data["usageMetadata"]["candidatesTokenCount"].as_u64(),
            model: self.model.clone(),
        })
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, InfraFlowError> {
        let body = json!({
            "contents": Self::contents(prompt, system),
            "generationConfig": {
                "maxOutputTokens": 8192,
            }
        });
        self.generate_content(&body).await
    }

    async fn complete_structured(&self, prompt: &str, schema: &Value, system: Option<&str>) -> Result<Value, InfraFlowError> {
        let body = json!({
            "contents": Self::contents(prompt, system),
            "generationConfig": {
                "maxOutputTokens": 16384,
                "responseMimeType": "application/json",
                "responseSchema": to_gemini_schema(schema),
            }
        });
        let response = self.generate_content(&body).await?;
        parse_json_response(&response.content)
    }

    fn provider_name(&self) -> &str { "gemini" }
    fn model_name(&self) -> &str { &self.model }
}

/// Convert a JSON Schema fragment into Gemini's OpenAPI-style schema, which
/// spells type names in upper case and does not accept `additionalProperties`.
pub fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, value) in map {
                match key.as_str() {
                    "type" => {
                        let upper = value.as_str().map(|t| Value::String(t.to_uppercase()));
                        out.insert(key.clone(), upper.unwrap_or_else(|| value.clone()));
                    }
                    "additionalProperties" | "$schema" => {}
                    "properties" => {
                        let props = value.as_object()
                            .map(|p| p.iter().map(|(k, v)| (k.clone(), to_gemini_schema(v))).collect())
                            .unwrap_or_default();
                        out.insert(key.clone(), Value::Object(props));
                    }
                    _ => {
                        out.insert(key.clone(), to_gemini_schema(value));
                    }
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_types_uppercased() {
        let schema = json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "projectTitle": { "type": "string" },
                "type": { "type": "string" }
            },
            "required": ["projectTitle", "type"]
        });
        let converted = to_gemini_schema(&schema);
        assert_eq!(converted["type"], "OBJECT");
        assert_eq!(converted["properties"]["projectTitle"]["type"], "STRING");
        // A property literally named "type" keeps its schema body.
        assert_eq!(converted["properties"]["type"]["type"], "STRING");
        assert!(converted.get("additionalProperties").is_none());
        assert_eq!(converted["required"][1], "type");
    }

    #[test]
    fn test_default_model() {
        let provider = GeminiProvider::new("key", None);
        assert_eq!(provider.model_name(), "gemini-2.5-flash");
        assert_eq!(provider.provider_name(), "gemini");
    }

    #[test]
    fn test_contents_with_system() {
        let contents = GeminiProvider::contents("hello", Some("be brief"));
        assert_eq!(contents[0]["parts"][0]["text"], "System: be brief\n\nhello");
    }
}
