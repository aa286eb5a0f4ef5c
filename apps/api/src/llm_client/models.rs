//! Registry of chat models the service knows how to call.

/// Per-model request settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSpec {
    pub name: &'static str,
    /// `None` leaves the provider default in place (reasoning models reject it).
    pub temperature: Option<f32>,
    /// Whether the model accepts a strict `json_schema` response format.
    /// Older models fall back to plain JSON mode.
    pub strict_schema: bool,
}

pub const GPT_35_TURBO: ModelSpec = ModelSpec {
    name: "gpt-3.5-turbo",
    temperature: None,
    strict_schema: false,
};

pub const GPT_4O_MINI: ModelSpec = ModelSpec {
    name: "gpt-4o-mini",
    temperature: None,
    strict_schema: true,
};

pub const GPT_4O: ModelSpec = ModelSpec {
    name: "gpt-4o",
    temperature: Some(0.0),
    strict_schema: true,
};

pub const O3_MINI: ModelSpec = ModelSpec {
    name: "o3-mini",
    temperature: None,
    strict_schema: true,
};

pub const KNOWN_MODELS: &[ModelSpec] = &[GPT_35_TURBO, GPT_4O_MINI, GPT_4O, O3_MINI];

pub fn lookup_model(name: &str) -> Option<ModelSpec> {
    KNOWN_MODELS.iter().copied().find(|m| m.name == name.trim())
}
