pub struct ProviderInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub env_var: &'static str,
    pub generation_model: &'static str,
    pub log_model: &'static str,
    pub base_url: Option<&'static str>,
    pub requires_key: bool,
}

pub static PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        id: "gemini",
        name: "Google Gemini",
        env_var: "GEMINI_API_KEY",
        generation_model: "gemini-2.5-pro",
        log_model: "gemini-2.5-flash",
        base_url: None,
        requires_key: true,
    },
    ProviderInfo {
        id: "openai",
        name: "OpenAI",
        env_var: "OPENAI_API_KEY",
        generation_model: "gpt-4o",
        log_model: "gpt-4o-mini",
        base_url: None,
        requires_key: true,
    },
    ProviderInfo {
        id: "local",
        name: "Local / Ollama",
        env_var: "",
        generation_model: "qwen2.5-coder:7b",
        log_model: "qwen2.5-coder:1.5b",
        base_url: Some("http://localhost:11434/v1"),
        requires_key: false,
    },
];

pub fn get_provider(id: &str) -> Option<&'static ProviderInfo> {
    PROVIDERS.iter().find(|p| p.id == id)
}
