//! AnswerQuestionHandler - free-text questions answered by the chat model.

use std::sync::Arc;

use crate::application::ServiceError;
use crate::domain::generation::prompts::SEARCH_SYSTEM_PROMPT;
use crate::ports::{AIProvider, CompletionRequest, Message};

const ANSWER_MAX_TOKENS: u32 = 300;

#[derive(Debug, Clone, Default)]
pub struct AnswerQuestionCommand {
    pub question: String,
    /// Optional background sent ahead of the question.
    pub context: Option<String>,
}

pub struct AnswerQuestionHandler {
    ai: Arc<dyn AIProvider>,
}

impl AnswerQuestionHandler {
    pub fn new(ai: Arc<dyn AIProvider>) -> Self {
        Self { ai }
    }

    pub async fn handle(&self, cmd: AnswerQuestionCommand) -> Result<String, ServiceError> {
        if cmd.question.trim().is_empty() {
            return Err(ServiceError::invalid_input("Question is required"));
        }

        let mut request = CompletionRequest::new()
            .with_system_prompt(SEARCH_SYSTEM_PROMPT)
            .with_max_tokens(ANSWER_MAX_TOKENS);
        if let Some(context) = cmd.context.filter(|c| !c.trim().is_empty()) {
            request = request.with_message(Message::user(context));
        }
        request = request.with_message(Message::user(cmd.question));

        let response = self.ai.complete(request).await?;
        Ok(response.content)
    }
}
