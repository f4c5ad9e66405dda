use serde_json::Value;

/// Body keys that must all be present and truthy for a generate request.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "category",
    "role",
    "job_description",
    "resume",
    "years_of_experience",
];

/// Raw generate request as read from the JSON body. Values are kept untyped
/// because `years_of_experience` may arrive as a number or a string.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub category: Option<Value>,
    pub role: Option<Value>,
    pub job_description: Option<Value>,
    pub resume: Option<Value>,
    pub years_of_experience: Option<Value>,
}

/// Validated request context, every field rendered to prompt-ready text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestContext {
    pub category: String,
    pub role: String,
    pub job_description: String,
    pub resume: String,
    pub years_of_experience: String,
}

impl GenerateRequest {
    /// Reads the five fields from a JSON body. A body that is not an object
    /// yields a request with every field absent.
    pub fn from_body(body: &Value) -> Self {
        let field = |key: &str| body.get(key).cloned();
        Self {
            category: field("category"),
            role: field("role"),
            job_description: field("job_description"),
            resume: field("resume"),
            years_of_experience: field("years_of_experience"),
        }
    }

    /// Names of required fields that are absent or falsy.
    fn missing_fields(&self) -> Vec<&'static str> {
        let values = [
            &self.category,
            &self.role,
            &self.job_description,
            &self.resume,
            &self.years_of_experience,
        ];
        REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| !matches!(value, Some(v) if is_truthy(v)))
            .map(|(name, _)| *name)
            .collect()
    }

    /// Renders the request into a `RequestContext`, or returns the names of
    /// every absent or falsy field.
    pub fn validate(self) -> Result<RequestContext, Vec<&'static str>> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(RequestContext {
            category: render(self.category),
            role: render(self.role),
            job_description: render(self.job_description),
            resume: render(self.resume),
            years_of_experience: render(self.years_of_experience),
        })
    }
}

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Strings are used verbatim and booleans as `True`/`False`; anything else is
/// rendered as its JSON text.
fn render(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
