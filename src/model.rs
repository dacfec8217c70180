use serde::Serialize;
use serde_json::{Map, Value};

/// One categorized ingredient with a short plain-language explanation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub name: String,
    pub explanation: String,
}

impl Finding {
    pub fn new(name: impl Into<String>, explanation: impl Into<String>) -> Self {
        Finding {
            name: name.into(),
            explanation: explanation.into(),
        }
    }

    /// Parse an `"ingredient: brief explanation"` line.
    ///
    /// Splits at the first colon; without one the whole line is the name.
    pub fn from_line(line: &str) -> Self {
        match line.split_once(':') {
            Some((name, explanation)) => Finding::new(name.trim(), explanation.trim()),
            None => Finding::new(line.trim(), ""),
        }
    }

    /// Entries whose name is blank after trimming are dropped.
    fn from_value(value: &Value) -> Option<Self> {
        let finding = match value {
            Value::String(line) => Finding::from_line(line),
            Value::Object(obj) => {
                let name = first_str(obj, &["name", "ingredient"])?;
                let explanation = first_str(obj, &["explanation", "reason"]).unwrap_or_default();
                Finding::new(name.trim(), explanation.trim())
            }
            _ => return None,
        };
        (!finding.name.is_empty()).then_some(finding)
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.explanation.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}: {}", self.name, self.explanation)
        }
    }
}

/// Categorized breakdown of an ingredient list, as returned by the model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub safe_ingredients: Vec<Finding>,
    pub concerns: Vec<Finding>,
    pub summary: String,
    pub uncertainty_note: Option<String>,
}

impl AnalysisResult {
    /// Build a result from the model's JSON object.
    ///
    /// Only the top-level value is checked. Sections that are missing or have
    /// an unexpected type come back empty, and unusable entries are skipped.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        Some(AnalysisResult {
            safe_ingredients: findings(obj.get("okay")),
            concerns: findings(obj.get("concerns")),
            summary: obj
                .get("summary")
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            uncertainty_note: obj
                .get("uncertainty")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }

    /// True when no section has anything to show
    pub fn is_empty(&self) -> bool {
        self.safe_ingredients.is_empty()
            && self.concerns.is_empty()
            && self.summary.is_empty()
            && self.uncertainty_note.is_none()
    }
}

fn findings(section: Option<&Value>) -> Vec<Finding> {
    section
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Finding::from_value).collect())
        .unwrap_or_default()
}

fn first_str(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
