use crate::domain::{FewShotExample, FEW_SHOT_EXAMPLES};

const INSTRUCTIONS: &str = "\
You are a Virtual Mechanic Assistant.
Your task is to answer the mechanical queries of the user.
The user will describe the context and symptoms; based on that, suggest actions for their query.
Always use a polite tone and be as helpful as you can. Give a concise answer.";

const EXAMPLES_HEADING: &str = "Here are some few-shot examples to structure the response:";
const CONVERSATION_HEADING: &str = "Recent conversation:";

/// Label the user's query is placed under.
pub const QUERY_LABEL: &str = "symptom: ";
/// Trailing cue the completion continues from.
pub const ACTION_CUE: &str = "action: ";

/// Builds the single completion prompt for a user query.
///
/// The query is interpolated verbatim: no trimming, truncation or escaping.
#[derive(Debug, Clone, Copy)]
pub struct PromptComposer {
    examples: &'static [FewShotExample],
}

impl PromptComposer {
    pub fn new() -> Self {
        Self::with_examples(&FEW_SHOT_EXAMPLES)
    }

    pub fn with_examples(examples: &'static [FewShotExample]) -> Self {
        Self { examples }
    }

    pub fn examples(&self) -> &'static [FewShotExample] {
        self.examples
    }

    pub fn compose(&self, query: &str) -> String {
        self.compose_with_context(query, "")
    }

    /// Like [`compose`](Self::compose), with rendered recent conversation
    /// placed between the examples and the query. An empty `conversation`
    /// yields exactly the output of `compose`.
    pub fn compose_with_context(&self, query: &str, conversation: &str) -> String {
        let examples = self
            .examples
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut prompt = String::with_capacity(
            INSTRUCTIONS.len() + examples.len() + conversation.len() + query.len() + 128,
        );
        prompt.push_str(INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(EXAMPLES_HEADING);
        prompt.push_str("\n\n");
        prompt.push_str(&examples);
        prompt.push_str("\n\n");

        if !conversation.is_empty() {
            prompt.push_str(CONVERSATION_HEADING);
            prompt.push('\n');
            prompt.push_str(conversation);
            prompt.push_str("\n\n");
        }

        prompt.push_str(QUERY_LABEL);
        prompt.push_str(query);
        prompt.push('\n');
        prompt.push_str(ACTION_CUE);
        prompt
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_query_verbatim() {
        let composer = PromptComposer::new();
        for query in [
            "Engine is making a knocking noise",
            "  leading and trailing spaces  ",
            "line one\nline two",
            "{braces} and \"quotes\" and émojis 🚗",
        ] {
            let prompt = composer.compose(query);
            assert!(prompt.contains(query), "missing query: {query:?}");
        }
    }

    #[test]
    fn test_prompt_lists_examples_in_order() {
        let prompt = PromptComposer::new().compose("Battery light is on");

        let mut cursor = 0;
        for example in FEW_SHOT_EXAMPLES {
            let symptom_at = prompt[cursor..]
                .find(example.symptom())
                .map(|i| i + cursor)
                .unwrap_or_else(|| panic!("symptom out of order: {}", example.symptom()));
            let action_at = prompt[symptom_at..]
                .find(example.action())
                .map(|i| i + symptom_at)
                .unwrap_or_else(|| panic!("action out of order: {}", example.action()));
            cursor = action_at + example.action().len();
        }
    }

    #[test]
    fn test_prompt_ends_with_action_cue_after_query() {
        let query = "Steering wheel shakes at speed";
        let prompt = PromptComposer::new().compose(query);

        assert!(prompt.ends_with(ACTION_CUE));
        assert!(prompt.ends_with(&format!("{QUERY_LABEL}{query}\n{ACTION_CUE}")));
    }

    #[test]
    fn test_examples_are_not_rendered_as_containers() {
        let prompt = PromptComposer::new().compose("x");
        assert!(!prompt.contains("{'symptom'"));
        assert!(!prompt.contains("\"symptom\":"));
        assert!(prompt.contains("symptom: Brakes are squeaking loudly\naction: Squeaky brakes"));
    }

    #[test]
    fn test_instructions_request_polite_concise_answers() {
        let prompt = PromptComposer::new().compose("x");
        assert!(prompt.starts_with("You are a Virtual Mechanic Assistant."));
        assert!(prompt.contains("polite tone"));
        assert!(prompt.contains("concise answer"));
    }

    #[test]
    fn test_empty_context_matches_plain_prompt() {
        let composer = PromptComposer::new();
        assert_eq!(composer.compose("q"), composer.compose_with_context("q", ""));
    }

    #[test]
    fn test_context_sits_between_examples_and_query() {
        let composer = PromptComposer::new();
        let prompt = composer.compose_with_context("It got worse", "User: Car pulls left");

        let last_example = FEW_SHOT_EXAMPLES[4].action();
        let examples_end = prompt.find(last_example).unwrap() + last_example.len();
        let context_at = prompt.find("Recent conversation:\nUser: Car pulls left").unwrap();
        let query_at = prompt.rfind("symptom: It got worse").unwrap();

        assert!(examples_end < context_at);
        assert!(context_at < query_at);
    }
}
