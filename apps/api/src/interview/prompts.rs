//! Prompt Builder — renders (resume, transcript, phase) into one prompt string.
//!
//! Output depends only on the inputs: no timestamps, ids or randomness are embedded,
//! so the same session state always yields the same prompt.

use crate::ingest::ResumeText;
use crate::interview::models::Turn;

/// What the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPhase {
    Questioning,
    Feedback,
}

pub const OPENING_INSTRUCTION: &str = "\
Analyze the resume above and start the interview by asking your first question. \
Ask exactly one question and nothing else.";

pub const FOLLOW_UP_INSTRUCTION: &str = "\
Continue the interview. Respond to the candidate's latest answer with exactly one next question: \
either dig deeper into that answer or explore a new area of the resume. \
Do not give feedback yet and do not ask more than one question.";

pub const FEEDBACK_INSTRUCTION: &str = "\
The interview is now complete. Provide comprehensive feedback on the candidate's performance, \
analyzing every answer in the transcript against the resume. Use Markdown with these sections:
## Overall Assessment
## Strengths
## Weaknesses
## Advice
Be specific and actionable, and quote the candidate's answers where it helps.";

const NO_TURNS_YET: &str = "(no questions asked yet)";

/// Builds the user prompt for one model call.
///
/// With `PromptPhase::Questioning`, an empty transcript asks for the opening
/// question and a non-empty one for a follow-up.
pub fn build_prompt(resume: &ResumeText, turns: &[Turn], phase: PromptPhase) -> String {
    let instruction = match (phase, turns.is_empty()) {
        (PromptPhase::Questioning, true) => OPENING_INSTRUCTION,
        (PromptPhase::Questioning, false) => FOLLOW_UP_INSTRUCTION,
        (PromptPhase::Feedback, _) => FEEDBACK_INSTRUCTION,
    };

    format!(
        "Here is the candidate's resume.\n\
         --- RESUME TEXT ---\n\
         {resume}\n\
         --- END RESUME TEXT ---\n\
         \n\
         --- INTERVIEW TRANSCRIPT ---\n\
         {transcript}\n\
         --- END INTERVIEW TRANSCRIPT ---\n\
         \n\
         {instruction}",
        resume = resume.content(),
        transcript = render_transcript(turns),
    )
}

fn render_transcript(turns: &[Turn]) -> String {
    if turns.is_empty() {
        return NO_TURNS_YET.to_string();
    }
    turns
        .iter()
        .map(|t| format!("[{}] {}: {}", t.seq, t.speaker.label(), t.text.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
