use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "llm": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "provider": { "type": "string", "enum": ["gemini", "openai", "local"] },
                    "api_key": { "type": "string" },
                    "base_url": { "type": "string" },
                    "generation_model": { "type": "string" },
                    "log_model": { "type": "string" },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "pacing": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "line_delay_min_ms": { "type": "integer", "minimum": 0 },
                    "line_delay_max_ms": { "type": "integer", "minimum": 0 },
                    "step_pause_ms": { "type": "integer", "minimum": 0 }
                }
            },
            "server": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 }
                }
            }
        }
    })
});
