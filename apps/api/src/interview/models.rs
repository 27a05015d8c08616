//! Interview aggregate: one resume, one ordered transcript, one phase.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::ingest::{DocumentFormat, ResumeText};

pub type SessionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Interviewer,
    Candidate,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Interviewer => "Interviewer",
            Speaker::Candidate => "Candidate",
        }
    }
}

/// Lifecycle stage of a session. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Empty,
    Questioning,
    Feedback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// 1-based, gapless.
    pub seq: u32,
    pub speaker: Speaker,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackReport {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("A resume was already uploaded for this interview. Start a new interview to use another resume.")]
    ResumeAlreadyLoaded,

    #[error("Upload a resume before answering or asking for feedback.")]
    NoResume,

    #[error("This interview has ended. Start a new interview to continue.")]
    InterviewEnded,

    #[error("Answer cannot be empty.")]
    EmptyAnswer,
}

/// Serializable projection of a session. The resume body is never echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub phase: Phase,
    pub resume: Option<ResumeSummary>,
    pub turns: Vec<Turn>,
    pub feedback: Option<FeedbackReport>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeSummary {
    pub format: DocumentFormat,
    pub char_count: usize,
}

#[derive(Debug, Clone)]
pub struct InterviewSession {
    id: SessionId,
    resume: Option<ResumeText>,
    turns: Vec<Turn>,
    phase: Phase,
    feedback: Option<FeedbackReport>,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

impl InterviewSession {
    pub fn new(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            resume: None,
            turns: Vec::new(),
            phase: Phase::Empty,
            feedback: None,
            created_at: now,
            last_active: now,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn resume(&self) -> Option<&ResumeText> {
        self.resume.as_ref()
    }

    pub fn feedback(&self) -> Option<&FeedbackReport> {
        self.feedback.as_ref()
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    pub fn is_idle(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_active > ttl
    }

    /// Fails unless the session still waits for its resume.
    pub fn ensure_empty(&self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Empty => Ok(()),
            Phase::Questioning => Err(SessionError::ResumeAlreadyLoaded),
            Phase::Feedback => Err(SessionError::InterviewEnded),
        }
    }

    /// Returns the resume when turns may still be exchanged.
    pub fn ensure_questioning(&self) -> Result<&ResumeText, SessionError> {
        match (self.phase, self.resume.as_ref()) {
            (Phase::Questioning, Some(resume)) => Ok(resume),
            (Phase::Feedback, _) => Err(SessionError::InterviewEnded),
            _ => Err(SessionError::NoResume),
        }
    }

    /// The transcript as it would read once `answer` is recorded.
    pub fn history_with_answer(&self, answer: &str) -> Vec<Turn> {
        let mut history = self.turns.clone();
        history.push(self.make_turn(Speaker::Candidate, answer.to_string()));
        history
    }

    /// `Empty` → `Questioning`: stores the resume and the opening question together.
    pub fn begin(&mut self, resume: ResumeText, opening_question: String) -> Result<(), SessionError> {
        self.ensure_empty()?;
        self.resume = Some(resume);
        self.push(Speaker::Interviewer, opening_question);
        self.phase = Phase::Questioning;
        self.touch();
        Ok(())
    }

    /// Appends the candidate's answer and the interviewer's reply as one step.
    pub fn record_exchange(&mut self, answer: String, next_question: String) -> Result<(), SessionError> {
        self.ensure_questioning()?;
        if answer.trim().is_empty() {
            return Err(SessionError::EmptyAnswer);
        }
        self.push(Speaker::Candidate, answer);
        self.push(Speaker::Interviewer, next_question);
        self.touch();
        Ok(())
    }

    /// `Questioning` → `Feedback`. Terminal.
    pub fn conclude(&mut self, report: String) -> Result<&FeedbackReport, SessionError> {
        self.ensure_questioning()?;
        self.phase = Phase::Feedback;
        self.touch();
        Ok(&*self.feedback.insert(FeedbackReport {
            text: report,
            created_at: Utc::now(),
        }))
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            phase: self.phase,
            resume: self.resume().map(|r| ResumeSummary {
                format: r.format(),
                char_count: r.char_count(),
            }),
            turns: self.turns.clone(),
            feedback: self.feedback.clone(),
            created_at: self.created_at,
        }
    }

    fn make_turn(&self, speaker: Speaker, text: String) -> Turn {
        Turn {
            seq: self.turns.len() as u32 + 1,
            speaker,
            text,
            created_at: Utc::now(),
        }
    }

    fn push(&mut self, speaker: Speaker, text: String) {
        let turn = self.make_turn(speaker, text);
        self.turns.push(turn);
    }
}
