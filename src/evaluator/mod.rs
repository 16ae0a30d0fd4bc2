//! Answer evaluator
//!
//! Grades an assistant's answers against reference answers with a
//! single grading completion call, then renders the merged rows as a
//! Markdown report.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{instrument, warn};

use crate::error::{Error, Result};
use crate::kb::{QaSet, prompts, strip_code_fences};
use crate::llm::Client;

/// One grading item sent to the evaluator model
#[derive(Debug, Serialize)]
struct EvalItem {
    index: usize,
    question: String,
    reference: String,
    actual: String,
}

/// One grade row returned by the evaluator model
#[derive(Debug, Deserialize)]
struct Grade {
    index: usize,
    #[serde(default)]
    verdict: String,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    notes: String,
}

/// A graded answer, merging the original item with its grade
#[derive(Debug, Clone, Serialize)]
pub struct GradedAnswer {
    /// 1-based question number
    pub index: usize,
    pub question: String,

    /// The reference answer
    pub reference: String,

    /// The assistant's answer, empty when the assistant gave none
    pub actual: String,

    /// `Correct`, `Partial`, `Incorrect`, `ParseError`, or `Missing`
    pub verdict: String,

    /// Score from 0.0 to 1.0
    pub score: f64,
    pub notes: String,
}

/// Grades assistant answers against a QA set
pub struct Evaluator {
    client: Client,
    model: String,
}

impl Evaluator {
    /// Create an evaluator using the given grading model
    pub fn new(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn build_items(qa_set: &QaSet, answers: &[String]) -> Vec<EvalItem> {
        qa_set
            .qas
            .iter()
            .enumerate()
            .map(|(i, qa)| EvalItem {
                index: i + 1,
                question: qa.question.clone(),
                reference: qa.answer.trim().to_string(),
                actual: answers.get(i).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// Grade every answer in one completion call
    ///
    /// An empty grading response is an error. An unparseable one is not:
    /// every item then gets an explicit `ParseError` row so no grade is
    /// silently dropped.
    #[instrument(skip(self, qa_set, answers), fields(model = %self.model))]
    pub async fn evaluate(&self, qa_set: &QaSet, answers: &[String]) -> Result<Vec<GradedAnswer>> {
        let items = Self::build_items(qa_set, answers);
        let items_json = serde_json::to_string_pretty(&items)?;
        let user_prompt = prompts::evaluate_user(&items_json);

        let content = self
            .client
            .complete(prompts::EVALUATE_SYSTEM, &user_prompt, &self.model)
            .await?;
        if content.trim().is_empty() {
            return Err(Error::Evaluate(
                "grading response was empty".to_string(),
            ));
        }

        let cleaned = strip_code_fences(&content);
        let grades: Vec<Grade> = match serde_json::from_str(&cleaned) {
            Ok(grades) => grades,
            Err(e) => {
                warn!("Could not parse grading response: {}", e);
                items
                    .iter()
                    .map(|item| Grade {
                        index: item.index,
                        verdict: "ParseError".to_string(),
                        score: 0.0,
                        notes: format!("Could not parse evaluator response ({e})"),
                    })
                    .collect()
            }
        };

        let grade_map: HashMap<usize, Grade> =
            grades.into_iter().map(|g| (g.index, g)).collect();

        Ok(items
            .into_iter()
            .map(|item| {
                let grade = grade_map.get(&item.index);
                GradedAnswer {
                    index: item.index,
                    question: item.question,
                    reference: item.reference,
                    actual: item.actual,
                    verdict: grade
                        .map(|g| g.verdict.clone())
                        .unwrap_or_else(|| "Missing".to_string()),
                    score: grade.map(|g| g.score).unwrap_or(0.0),
                    notes: grade.map(|g| g.notes.clone()).unwrap_or_default(),
                }
            })
            .collect())
    }
}

/// Render graded rows as a Markdown report with totals and a table
pub fn render_report(rows: &[GradedAnswer]) -> String {
    let total = rows.len();
    let avg_score = if rows.is_empty() {
        0.0
    } else {
        rows.iter().map(|r| r.score).sum::<f64>() / total as f64
    };
    let count_of = |verdict: &str| rows.iter().filter(|r| r.verdict == verdict).count();

    let mut report = format!(
        "# Evaluation Report\n\n\
* **Total questions:** {total}\n\
* **Average score:** {avg_score:.2}\n\
* **Correct / Partial / Incorrect:** {} / {} / {}\n\n",
        count_of("Correct"),
        count_of("Partial"),
        count_of("Incorrect"),
    );

    report.push_str(
        "| # | Verdict | Score | Question | Notes |\n\
|---|---------|-------|----------|-------|\n",
    );
    for row in rows {
        report.push_str(&format!(
            "| {} | {} | {:.1} | {} | {} |\n",
            row.index,
            row.verdict,
            row.score,
            row.question.replace('|', "\\|"),
            row.notes.replace('|', "\\|"),
        ));
    }

    report
}
