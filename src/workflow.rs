use crate::error::AppError;
use crate::predict::AnalysisResult;
use crate::selection::PendingSelection;

/// Request state for the single logging workflow instance. Submission is only
/// reachable by taking the payload out of `Selected` (or a retained failed
/// selection), so an illegal resubmission has nothing to submit.
#[derive(Debug)]
pub enum Workflow {
    Idle,
    Selected(PendingSelection),
    Submitting,
    Result(AnalysisResult),
    Failed {
        selection: PendingSelection,
        message: String,
    },
}

impl Workflow {
    pub fn new() -> Self {
        Workflow::Idle
    }

    /// A new selection replaces whatever came before and clears any error.
    /// Rejected only while a request is in flight.
    pub fn select(&mut self, selection: PendingSelection) -> Result<(), AppError> {
        if matches!(self, Workflow::Submitting) {
            return Err(AppError::SubmissionInFlight);
        }
        *self = Workflow::Selected(selection);
        Ok(())
    }

    /// Moves to `Submitting` and hands the caller the payload to send. With no
    /// selection this fails locally; no network call happens.
    pub fn begin_submit(&mut self) -> Result<PendingSelection, AppError> {
        match std::mem::replace(self, Workflow::Submitting) {
            Workflow::Selected(selection) => Ok(selection),
            Workflow::Failed { selection, .. } => Ok(selection),
            Workflow::Submitting => Err(AppError::SubmissionInFlight),
            other => {
                *self = other;
                Err(AppError::NoImageSelected)
            }
        }
    }

    pub fn complete(&mut self, result: AnalysisResult) {
        if matches!(self, Workflow::Submitting) {
            *self = Workflow::Result(result);
        }
    }

    /// Records the failure but keeps the selection so the user can resubmit.
    pub fn fail(&mut self, selection: PendingSelection, error: &AppError) {
        if matches!(self, Workflow::Submitting) {
            *self = Workflow::Failed {
                selection,
                message: error.to_string(),
            };
        }
    }

    /// Confirmation takes the result out for logging and ends the cycle.
    pub fn confirm(&mut self) -> Option<AnalysisResult> {
        match std::mem::replace(self, Workflow::Idle) {
            Workflow::Result(result) => Some(result),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Discards selection, result, and error alike.
    pub fn reset(&mut self) {
        *self = Workflow::Idle;
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod workflow_tests {
    use super::*;
    use crate::predict::{present, PredictResponse};
    use bytes::Bytes;

    fn selection() -> PendingSelection {
        PendingSelection {
            file_name: "pizza.png".into(),
            bytes: Bytes::from_static(b"png"),
            content_type: "image/png".into(),
            preview_url: "file:///tmp/pizza.png".into(),
        }
    }

    fn result() -> AnalysisResult {
        let resp: PredictResponse =
            serde_json::from_str(r#"{"food":"pizza","is_piecewise":false,"total_calories":800}"#)
                .expect("body");
        present(&resp, "", None, "file:///tmp/pizza.png")
    }

    #[test]
    fn submit_without_selection_is_a_local_error() {
        let mut wf = Workflow::new();
        let err = wf.begin_submit().unwrap_err();
        assert!(matches!(err, AppError::NoImageSelected));
        assert!(matches!(wf, Workflow::Idle));
    }

    #[test]
    fn full_cycle_returns_to_idle_on_confirm() {
        let mut wf = Workflow::new();
        wf.select(selection()).expect("select");
        let payload = wf.begin_submit().expect("submit");
        assert_eq!(payload.file_name, "pizza.png");
        assert!(matches!(wf, Workflow::Submitting));

        wf.complete(result());
        assert!(matches!(wf, Workflow::Result(_)));

        let confirmed = wf.confirm().expect("result available");
        assert_eq!(confirmed.food_name, "pizza");
        assert!(matches!(wf, Workflow::Idle));
    }

    #[test]
    fn resubmission_while_in_flight_is_rejected() {
        let mut wf = Workflow::new();
        wf.select(selection()).expect("select");
        wf.begin_submit().expect("submit");
        let err = wf.begin_submit().unwrap_err();
        assert!(matches!(err, AppError::SubmissionInFlight));
        assert!(matches!(wf, Workflow::Submitting));
    }

    #[test]
    fn failure_keeps_the_selection_for_retry() {
        let mut wf = Workflow::new();
        wf.select(selection()).expect("select");
        let payload = wf.begin_submit().expect("submit");
        wf.fail(payload, &AppError::Analysis("model unavailable".into()));
        match &wf {
            Workflow::Failed { message, .. } => {
                assert_eq!(message, "Failed to analyze food image: model unavailable")
            }
            other => panic!("expected Failed, got {other:?}"),
        }

        let retried = wf.begin_submit().expect("retry uses retained selection");
        assert_eq!(retried.file_name, "pizza.png");
    }

    #[test]
    fn selecting_again_clears_a_failure() {
        let mut wf = Workflow::new();
        wf.select(selection()).expect("select");
        let payload = wf.begin_submit().expect("submit");
        wf.fail(payload, &AppError::Analysis("timeout".into()));

        wf.select(selection()).expect("select clears error");
        assert!(matches!(wf, Workflow::Selected(_)));
    }

    #[tokio::test]
    async fn reset_discards_a_result_and_leaves_the_log_untouched() {
        use crate::meals::{self, InMemoryRepo};

        let repo = InMemoryRepo::default();

        // First cycle is confirmed and logged.
        let mut wf = Workflow::new();
        wf.select(selection()).expect("select");
        wf.begin_submit().expect("submit");
        wf.complete(result());
        let confirmed = wf.confirm().expect("result available");
        meals::append(&repo, &confirmed, None).await.expect("append");
        let before: Vec<String> = meals::list(&repo).await.into_iter().map(|m| m.id).collect();

        // Second cycle reaches a result but is reset without confirming.
        wf.select(selection()).expect("select");
        wf.begin_submit().expect("submit");
        wf.complete(result());
        wf.reset();
        assert!(matches!(wf, Workflow::Idle));
        assert!(wf.confirm().is_none());

        let after: Vec<String> = meals::list(&repo).await.into_iter().map(|m| m.id).collect();
        assert_eq!(before, after);
    }
}
