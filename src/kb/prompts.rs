//! Prompt templates for formatting, QA generation, and grading

/// System prompt for the rolling knowledge-base formatting conversation
pub const FORMAT_SYSTEM: &str = "You will help format a long knowledge base in small parts. \
Each part continues the previous one. Maintain coherence and don't repeat what has been said.";

/// System prompt for answer grading
///
/// The grader must return a bare JSON array so the response parses
/// without any surrounding prose.
pub const EVALUATE_SYSTEM: &str = "You are a strict grader comparing an assistant's answers \
against reference answers. For each item you receive (with keys 'index', 'question', \
'reference', and 'actual'), judge whether the actual answer conveys the meaning of the \
reference answer. Return ONLY a JSON array, with one object per item, each having exactly \
these keys: 'index' (the item's index), 'verdict' (one of 'Correct', 'Partial', or \
'Incorrect'), 'score' (a number from 0.0 to 1.0), and 'notes' (a short justification). \
Do not wrap the array in Markdown fences or add any other text.";

/// Build the user prompt for formatting one chunk of extracted text
pub fn format_chunk(chunk_text: &str) -> String {
    format!(
        "Task: Format the following extracted text into a well-structured, coherent \
knowledge base for an AI assistant.\n\n\
Guidelines:\n\
1. Format the text into clear, organized Markdown.\n\
2. Remove any unnecessary information or repetitive details.\n\
3. Retain all critical and important information.\n\
4. Merge similar pieces of information where applicable.\n\
5. Do not omit any new or crucial details.\n\
6. Ensure the output is complete and easy to read.\n\n\
Extracted Text:\n{chunk_text}\n\n\
Provide your final formatted content as a complete Markdown document."
    )
}

/// Build the system prompt for QA generation over one chunk
pub fn qa_system(num_pairs: usize) -> String {
    format!(
        "You are a highly experienced educational content generator. Your task is to \
generate exactly {num_pairs} diverse and high-quality question-answer pairs based on the \
provided knowledge base text. Return only valid JSON with a single key 'qas', whose value \
is a list of exactly {num_pairs} objects. Each object must have two keys: 'question' and \
'answer'."
    )
}

/// Build the user prompt for QA generation over one chunk
pub fn qa_user(num_pairs: usize, chunk_text: &str) -> String {
    format!(
        "Based on the following knowledge base text, generate exactly {num_pairs} diverse \
question-answer pairs that test key concepts. Return the output strictly as a JSON object \
with a key 'qas' that is a list of exactly {num_pairs} objects, each with keys 'question' \
and 'answer'.\n\nKnowledge base text:\n{chunk_text}"
    )
}

/// Build the user prompt for grading, from the serialized item array
pub fn evaluate_user(items_json: &str) -> String {
    format!(
        "Evaluate the following items and return ONLY the JSON array described above:\n\n\
{items_json}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_chunk_embeds_text() {
        let prompt = format_chunk("the raw extracted page");
        assert!(prompt.contains("Extracted Text:\nthe raw extracted page"));
    }

    #[test]
    fn test_qa_prompts_carry_pair_count() {
        assert!(qa_system(7).contains("exactly 7 diverse"));
        assert!(qa_user(7, "text").contains("list of exactly 7 objects"));
    }
}
