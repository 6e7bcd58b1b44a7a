use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, info_span, warn, Instrument};

use crate::callback::{AckResponse, CallbackDispatcher, DeliveryContext};
use crate::error::RelayError;
use crate::intake::{Submission, TranslationRequest};
use crate::translate::{TranslationOutcome, TranslationRequester};

/// Accepts submissions and runs each translation as a detached background unit.
pub struct TaskOrchestrator {
    requester: Arc<TranslationRequester>,
    dispatcher: Arc<CallbackDispatcher>,
    start_message: String,
}

impl TaskOrchestrator {
    pub fn new(
        requester: Arc<TranslationRequester>,
        dispatcher: Arc<CallbackDispatcher>,
        start_message: impl Into<String>,
    ) -> Self {
        Self {
            requester,
            dispatcher,
            start_message: start_message.into(),
        }
    }

    /// Validates and schedules without awaiting any network I/O.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, submission: &Submission) -> Result<AckResponse, RelayError> {
        match submission.validate() {
            Ok(request) => {
                self.schedule(request);
                Ok(AckResponse::ephemeral(self.start_message.clone()))
            }
            Err(err) => {
                warn!(
                    requester = %submission.user_id,
                    "Rejected submission: {}",
                    err
                );
                // Without a callback URL there is nowhere to mirror the rejection.
                if !submission.response_url.trim().is_empty() {
                    self.schedule_rejection_notice(&err, submission);
                }
                Err(err)
            }
        }
    }

    /// Spawns the {translate -> deliver} unit for one request.
    pub(crate) fn schedule(&self, request: TranslationRequest) -> JoinHandle<()> {
        let requester = self.requester.clone();
        let dispatcher = self.dispatcher.clone();
        let context = DeliveryContext::new(request.requester_id.clone());
        let span = info_span!(
            "translation",
            request_id = %context.request_id,
            requester = %context.requester_id
        );

        info!(
            request_id = %context.request_id,
            "Accepted translation into {}",
            request.target.description()
        );

        tokio::spawn(
            async move {
                let outcome = AssertUnwindSafe(requester.translate(&request.raw_text, request.target))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| {
                        TranslationOutcome::failure(&RelayError::Internal(
                            "translation task panicked".to_string(),
                        ))
                    });
                if outcome.is_success() {
                    info!("Translation completed, delivering result");
                }
                dispatcher
                    .deliver(&outcome, &request.callback_url, &context)
                    .await;
            }
            .instrument(span),
        )
    }

    fn schedule_rejection_notice(&self, err: &RelayError, submission: &Submission) -> JoinHandle<()> {
        let dispatcher = self.dispatcher.clone();
        let context = DeliveryContext::new(submission.user_id.clone());
        let callback_url = submission.response_url.clone();
        let err = err.clone();
        let span = info_span!(
            "rejection_notice",
            request_id = %context.request_id,
            requester = %context.requester_id
        );

        tokio::spawn(
            async move {
                dispatcher
                    .notify_rejection(&err, &callback_url, &context)
                    .await;
            }
            .instrument(span),
        )
    }
}
