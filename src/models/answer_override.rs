/// An operator-written answer that replaces the bot's answer to a question.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOverride {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: Option<String>,
}

/// Values pre-filled into the "new manual answer" form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideDraft {
    pub question: String,
    pub answer: String,
}

impl OverrideDraft {
    pub fn new(question: &str, answer: &str) -> Self {
        Self { question: question.to_string(), answer: answer.to_string() }
    }
}
