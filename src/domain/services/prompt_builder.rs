//! Prompt templates for the enhancement and synthesis pipelines, plus the
//! canned fallback text used when generation fails outright.

use crate::domain::QuestionSpec;

const SYNTHESIS_INSTRUCTIONS: &str = "You generate realistic, diverse synthetic data answers \
for contract-like or enterprise datasets. Focus on creating highly varied and random responses \
with different formats, styles, and approaches. Return strictly JSON only, no code fences, \
no commentary.";

/// Prompt asking the model to enhance a whole batch as a numbered list.
/// `start_number` continues the numbering of earlier batches so the model
/// sees the same indices the caller tracks.
pub fn batch_enhancement(texts: &[&str], start_number: usize) -> String {
    let numbered: Vec<String> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| format!("{}. {}", start_number + i, text))
        .collect();

    format!(
        "Enhance these {count} texts with contract-style filler sentences. \
Learn from the existing text patterns and maintain consistency in style, tone, and format. \
Each enhanced text should be approximately 300 to 400 tokens long.\n\n\
Return exactly {count} numbered responses:\n\n{list}\n\nEnhanced:",
        count = texts.len(),
        list = numbered.join("\n"),
    )
}

/// Prompt asking the model to wrap a single text in contract-style filler.
pub fn text_enhancement(original: &str) -> String {
    format!(
        "Add contract-style sentences before and after this text to make it a complete \
paragraph: \"{original}\"\n\n\
Learn from the existing text patterns and maintain consistency in style, tone, and format. \
The enhanced text should be approximately 300 to 400 tokens long.\n\n\
Output only the enhanced paragraph:"
    )
}

/// Prompt asking the model for a strict JSON array of `{answer, text}`
/// objects for one synthesis question.
pub fn synthetic_generation(question: &QuestionSpec, num_rows: usize) -> String {
    format!(
        "{SYNTHESIS_INSTRUCTIONS}\n\n\
Task: Generate {num_rows} diverse synthetic answers for the question below.\n\
Each item must be a JSON object with keys: 'answer' (a short label) and 'text' (a detailed \
explanation derived directly from the answer). The 'text' should be a natural, coherent \
expansion of the 'answer', and must be approximately 300 to 400 tokens long.\n\n\
IMPORTANT: Ensure maximum diversity and randomness in both 'answer' and 'text' fields. \
Use different formats, styles, and approaches for each response. Vary the length, tone, \
and structure of both answers and descriptions. Include realistic variations, edge cases, \
and unexpected but valid responses.\n\n\
Question (field_name={field_name}): {field_question}\n\n\
Return a JSON array with exactly {num_rows} items.",
        field_name = question.field_name(),
        field_question = question.field_question(),
    )
}

/// Contract-style filler wrapped around the original text when generation
/// fails or produces something too short to use.
pub fn fallback_enhanced_text(original: &str) -> String {
    format!(
        "Pursuant to the terms and conditions outlined in this healthcare policy document, \
{original}. This provision shall remain in effect for the duration of the policy period \
and may be subject to review and modification as deemed necessary by the policy administrator."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_prompt_numbers_from_start() {
        let prompt = batch_enhancement(&["alpha", "beta"], 6);
        assert!(prompt.contains("6. alpha"));
        assert!(prompt.contains("7. beta"));
        assert!(prompt.contains("Enhance these 2 texts"));
        assert!(prompt.ends_with("Enhanced:"));
    }

    #[test]
    fn synthesis_prompt_embeds_question_and_count() {
        let question = QuestionSpec::new("term", "How long is the term?", 1);
        let prompt = synthetic_generation(&question, 5);
        assert!(prompt.contains("Generate 5 diverse synthetic answers"));
        assert!(prompt.contains("field_name=term"));
        assert!(prompt.contains("exactly 5 items"));
    }

    #[test]
    fn fallback_text_embeds_original_verbatim() {
        let fallback = fallback_enhanced_text("the insured party");
        assert!(fallback.contains("the insured party"));
        assert!(fallback.starts_with("Pursuant to"));
    }
}
