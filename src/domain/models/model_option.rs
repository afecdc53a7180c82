use crate::domain::DomainError;

/// A selectable model: the label shown to the user and the provider's model id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    label: &'static str,
    model_id: &'static str,
}

impl ModelOption {
    pub const fn new(label: &'static str, model_id: &'static str) -> Self {
        Self { label, model_id }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn model_id(&self) -> &'static str {
        self.model_id
    }
}

/// Groq-hosted models offered for selection. The first entry is the default.
pub const MODEL_CATALOG: [ModelOption; 6] = [
    ModelOption::new("Llama 3.1 70B", "llama-3.1-70b-versatile"),
    ModelOption::new("Mixtral 8x7B", "mixtral-8x7b-32768"),
    ModelOption::new("Llama 3.1 8B", "llama-3.1-8b-instant"),
    ModelOption::new("Meta Llama 3 70B", "llama3-70b-8192"),
    ModelOption::new("Gemma 7B", "gemma-7b-it"),
    ModelOption::new("Gemma 2 9B", "gemma2-9b-it"),
];

pub fn default_model() -> ModelOption {
    MODEL_CATALOG[0]
}

/// Resolve a label to its catalog entry. Matching is exact.
pub fn find_model(label: &str) -> Result<ModelOption, DomainError> {
    MODEL_CATALOG
        .iter()
        .copied()
        .find(|m| m.label == label)
        .ok_or_else(|| {
            let known: Vec<&str> = MODEL_CATALOG.iter().map(|m| m.label).collect();
            DomainError::invalid_input(format!(
                "unknown model '{}' (expected one of: {})",
                label,
                known.join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_six_unique_labels() {
        let mut labels: Vec<_> = MODEL_CATALOG.iter().map(|m| m.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 6);
    }

    #[test]
    fn test_find_model_maps_label_to_id() {
        let model = find_model("Gemma 2 9B").unwrap();
        assert_eq!(model.model_id(), "gemma2-9b-it");
    }

    #[test]
    fn test_find_model_rejects_unknown_label() {
        let err = find_model("gemma 2 9b").unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("Llama 3.1 70B"));
    }

    #[test]
    fn test_default_is_first_entry() {
        assert_eq!(default_model().model_id(), "llama-3.1-70b-versatile");
    }
}
