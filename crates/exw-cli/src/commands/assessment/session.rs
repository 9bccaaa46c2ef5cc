use std::collections::BTreeMap;

use anyhow::Context;
use exw_core::assessment::{
    AnswerValue, Assessment, AssessmentSession, Progress, Question, SessionState,
    effective_category_scores, next_unanswered,
};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Questions, the current assessment and a session loaded from both.
pub(super) struct Loaded {
    pub questions: Vec<Question>,
    pub assessment: Assessment,
    pub session: AssessmentSession,
}

pub(super) async fn load(ctx: &AppContext) -> anyhow::Result<Loaded> {
    let (questions, assessment) = tokio::try_join!(ctx.api.assessment_questions(), ctx.api.current_assessment())?;
    let mut session = AssessmentSession::new(ctx.advance_policy());
    session
        .load(&questions, assessment.answers())
        .context("failed to load the assessment session")?;
    Ok(Loaded {
        questions,
        assessment,
        session,
    })
}

#[derive(Serialize)]
pub(super) struct AnswerOption {
    pub value: u8,
    pub label: &'static str,
}

#[derive(Serialize)]
pub(super) struct QuestionView {
    pub question_id: String,
    pub category: String,
    pub subject: Option<String>,
    pub question_text: String,
    pub rule_of_thumb: Option<String>,
    pub considerations: Option<String>,
    pub scale: String,
    pub options: Vec<AnswerOption>,
}

impl QuestionView {
    pub(super) fn new(question: &Question) -> Self {
        let scale = question.scale();
        let options = (0..=AnswerValue::MAX)
            .filter_map(|value| AnswerValue::new(i64::from(value)).ok())
            .map(|value| AnswerOption {
                value: value.get(),
                label: value.label(scale),
            })
            .collect();
        Self {
            question_id: question.question_id.clone(),
            category: question
                .category_display
                .clone()
                .unwrap_or_else(|| question.category.clone()),
            subject: question.subject.clone(),
            question_text: question.question_text.clone(),
            rule_of_thumb: question.rule_of_thumb.clone(),
            considerations: question.considerations.clone(),
            scale: scale.to_string(),
            options,
        }
    }
}

#[derive(Serialize)]
struct CategoryStatus {
    key: String,
    name: String,
    answered: usize,
    total: usize,
    percent: f64,
    /// Position of the first open question within the category.
    next_question: usize,
}

#[derive(Serialize)]
struct StatusResponse {
    assessment_id: i64,
    #[serde(flatten)]
    state: SessionState,
    progress: Progress,
    overall_score: Option<f64>,
    attractiveness_score: Option<f64>,
    category_scores: BTreeMap<String, f64>,
    categories: Vec<CategoryStatus>,
}

pub async fn status(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let loaded = load(ctx).await?;
    let session = &loaded.session;
    let categories = session
        .categories()
        .iter()
        .enumerate()
        .map(|(index, category)| {
            let progress = session.category_progress(index).unwrap_or_default();
            CategoryStatus {
                key: category.key.clone(),
                name: category.name.clone(),
                answered: progress.answered,
                total: progress.total,
                percent: progress.percent,
                next_question: next_unanswered(&category.questions, session.answers()),
            }
        })
        .collect();

    output(
        &StatusResponse {
            assessment_id: loaded.assessment.id,
            state: session.state(),
            progress: session.progress(),
            overall_score: loaded.assessment.overall_score,
            attractiveness_score: loaded.assessment.attractiveness_score,
            category_scores: effective_category_scores(
                &loaded.assessment.category_scores,
                &loaded.questions,
                &loaded.assessment.responses,
            ),
            categories,
        },
        flags.format,
    )
}

#[derive(Serialize)]
struct NextResponse {
    #[serde(flatten)]
    state: SessionState,
    progress: Progress,
    question: Option<QuestionView>,
}

pub async fn next(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let loaded = load(ctx).await?;
    let session = &loaded.session;
    output(
        &NextResponse {
            state: session.state(),
            progress: session.progress(),
            question: session.first_unanswered().map(|(_, question)| QuestionView::new(question)),
        },
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use exw_core::assessment::Question;
    use pretty_assertions::assert_eq;

    use super::QuestionView;

    #[test]
    fn question_view_lists_scale_labels() {
        let question: Question = serde_json::from_value(serde_json::json!({
            "question_id": "LC-02",
            "question_text": "Are your contracts documented?",
            "category": "legal_compliance",
            "category_display": "Legal & Compliance",
            "scale_type": "documentation"
        }))
        .unwrap();

        let view = QuestionView::new(&question);
        assert_eq!(view.scale, "documentation");
        assert_eq!(view.category, "Legal & Compliance");
        assert_eq!(view.options.len(), 7);
        assert_eq!(view.options[0].label, "N/A - Not Applicable");
        assert_eq!(view.options[6].label, "It's Perfect - No Improvement Possible");
    }
}
