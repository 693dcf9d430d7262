use crate::answer::AnswerRequest;
use crate::error::AnswerError;
use async_trait::async_trait;

/// Generates an answer from a question and its retrieved contexts.
#[async_trait]
pub trait AnswerService {
    async fn answer(&self, request: &AnswerRequest) -> Result<String, AnswerError>;
}
