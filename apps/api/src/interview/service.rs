//! Interview orchestration: prompt → model → session.
//!
//! Every function validates the phase first, calls the model, and only mutates
//! the session once the model has answered. A failed call leaves it untouched.

use tracing::info;

use crate::errors::AppError;
use crate::ingest::ResumeText;
use crate::interview::models::{FeedbackReport, InterviewSession, Phase};
use crate::interview::prompts::{build_prompt, PromptPhase};
use crate::llm_client::prompts::INTERVIEWER_SYSTEM;
use crate::llm_client::InterviewModel;

/// Stores the resume and the model's opening question (`Empty` → `Questioning`).
pub async fn open_interview(
    model: &dyn InterviewModel,
    session: &mut InterviewSession,
    resume: ResumeText,
) -> Result<(), AppError> {
    session.ensure_empty()?;

    let prompt = build_prompt(&resume, &[], PromptPhase::Questioning);
    let question = model.generate(&prompt, INTERVIEWER_SYSTEM).await?;

    info!(
        "interview opened (session_id={}, format={}, resume_chars={}, model={})",
        session.id(),
        resume.format(),
        resume.char_count(),
        model.model_name()
    );
    session.begin(resume, question.trim().to_string())?;
    Ok(())
}

/// Records the candidate's answer together with the next interviewer question.
pub async fn submit_answer(
    model: &dyn InterviewModel,
    session: &mut InterviewSession,
    answer: &str,
) -> Result<(), AppError> {
    let answer = answer.trim();
    let resume = session.ensure_questioning()?;
    if answer.is_empty() {
        return Err(AppError::Validation("Answer cannot be empty.".to_string()));
    }

    let history = session.history_with_answer(answer);
    let prompt = build_prompt(resume, &history, PromptPhase::Questioning);
    let question = model.generate(&prompt, INTERVIEWER_SYSTEM).await?;

    session.record_exchange(answer.to_string(), question.trim().to_string())?;
    info!(
        "answer recorded (session_id={}, turns={})",
        session.id(),
        session.turns().len()
    );
    Ok(())
}

/// Ends the interview with a feedback report (`Questioning` → `Feedback`).
///
/// Asking again once the report exists returns it without another model call.
pub async fn request_feedback(
    model: &dyn InterviewModel,
    session: &mut InterviewSession,
) -> Result<FeedbackReport, AppError> {
    if session.phase() == Phase::Feedback {
        if let Some(report) = session.feedback() {
            return Ok(report.clone());
        }
    }

    let resume = session.ensure_questioning()?;
    let prompt = build_prompt(resume, session.turns(), PromptPhase::Feedback);
    let report = model.generate(&prompt, INTERVIEWER_SYSTEM).await?;

    let report = session.conclude(report.trim().to_string())?.clone();
    info!(
        "feedback produced (session_id={}, turns={})",
        session.id(),
        session.turns().len()
    );
    Ok(report)
}
