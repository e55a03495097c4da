// src/ai/mod.rs
//! Model-assisted flows: objective generation, job-description analysis and
//! responsibility enhancement.

pub mod client;
pub mod flows;

pub use client::{extract_json, HttpModelClient, NoModel, TextModel};
pub use flows::{
    analyze_job_description, enhance_responsibility, generate_objective, EnhanceInput,
    EnhanceOutput, JobAnalysisInput, JobAnalysisOutput, ObjectiveInput, ObjectiveOutput,
};

#[cfg(test)]
pub mod testing {
    //! In-process model stubs for flow and controller tests.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::TextModel;
    use crate::error::{BuilderError, Result};

    /// Replies with the same string on every call.
    pub struct StubModel {
        reply: String,
        calls: AtomicUsize,
    }

    impl StubModel {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TextModel for StubModel {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    /// Replies from a script, one entry per call, then errors.
    pub struct ScriptedModel {
        replies: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        pub fn new(mut replies: Vec<String>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TextModel for ScriptedModel {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BuilderError::ModelCall("script exhausted".to_string()))
        }
    }

    /// Fails every call.
    pub struct FailingModel;

    impl TextModel for FailingModel {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(BuilderError::ModelCall("model unavailable".to_string()))
        }
    }
}
