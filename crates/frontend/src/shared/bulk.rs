//! Concurrent per-id operations (bulk delete, bulk status change).

use crate::shared::api_utils::ApiError;
use futures::future::join_all;
use std::future::Future;

#[derive(Debug, Clone, PartialEq)]
pub struct BulkOutcome {
    pub id: String,
    pub result: Result<(), ApiError>,
}

/// Issue one call per id, all at once. Outcomes come back in the order of
/// `ids`, however the calls complete. A failure does not stop the others.
pub async fn run_bulk<F, Fut>(ids: Vec<String>, op: F) -> Vec<BulkOutcome>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    let calls = ids.iter().map(|id| op(id.clone()));
    let results = join_all(calls).await;
    ids.into_iter()
        .zip(results)
        .map(|(id, result)| BulkOutcome { id, result })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkSummary {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl BulkSummary {
    pub fn from_outcomes(outcomes: &[BulkOutcome]) -> Self {
        let mut summary = Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        };
        for outcome in outcomes {
            match &outcome.result {
                Ok(()) => summary.succeeded.push(outcome.id.clone()),
                Err(e) => summary.failed.push((outcome.id.clone(), e.to_string())),
            }
        }
        summary
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Ids to keep selected, so confirming again retries only these
    pub fn failed_ids(&self) -> Vec<String> {
        self.failed.iter().map(|(id, _)| id.clone()).collect()
    }

    /// Result handed to the confirmation: any failure keeps it open
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(ApiError::Partial(self.message()))
        }
    }

    /// Text for the message strip above the list
    pub fn message(&self) -> String {
        if self.failed.is_empty() {
            return format!("{} registro(s) procesado(s)", self.succeeded.len());
        }
        let details = self
            .failed
            .iter()
            .map(|(id, err)| format!("{id}: {err}"))
            .collect::<Vec<_>>()
            .join("; ");
        format!(
            "{} correcto(s), {} con error. {}",
            self.succeeded.len(),
            self.failed.len(),
            details
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::testing::{client, MockTransport};
    use crate::shared::api_utils::DeleteMode;
    use crate::shared::components::confirm_dialog::ConfirmState;
    use contracts::domain::a003_category::Category;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;
    use std::future::poll_fn;
    use std::rc::Rc;
    use std::task::Poll;

    /// Yields `n` times before resolving
    async fn yield_times(n: usize) {
        let mut left = n;
        poll_fn(move |cx| {
            if left == 0 {
                Poll::Ready(())
            } else {
                left -= 1;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        })
        .await
    }

    #[test]
    fn test_outcomes_follow_input_order() {
        let finished = Rc::new(RefCell::new(Vec::new()));
        let ids: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();

        let log = finished.clone();
        let outcomes = block_on(run_bulk(ids.clone(), move |id| {
            let log = log.clone();
            async move {
                // A is slowest, D is fastest
                let delay = match id.as_str() {
                    "A" => 6,
                    "B" => 4,
                    "C" => 2,
                    _ => 0,
                };
                yield_times(delay).await;
                log.borrow_mut().push(id.clone());
                if id == "C" {
                    Err(ApiError::Server {
                        status: 409,
                        message: "en uso".into(),
                    })
                } else {
                    Ok(())
                }
            }
        }));

        assert_eq!(*finished.borrow(), vec!["D", "C", "B", "A"]);
        let order: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C", "D"]);
        assert!(outcomes[2].result.is_err());
        assert_eq!(outcomes.iter().filter(|o| o.result.is_ok()).count(), 3);
    }

    #[test]
    fn test_summary_message() {
        let outcomes = vec![
            BulkOutcome {
                id: "A".into(),
                result: Ok(()),
            },
            BulkOutcome {
                id: "B".into(),
                result: Err(ApiError::Network("offline".into())),
            },
        ];
        let summary = BulkSummary::from_outcomes(&outcomes);
        assert!(!summary.is_complete());
        assert!(summary.message().starts_with("1 correcto(s), 1 con error. B:"));
    }

    #[test]
    fn test_failed_bulk_delete_keeps_confirmation_open() {
        let mock = MockTransport::new();
        mock.respond(200, json!({}))
            .respond(500, json!({ "messageUSR": "Categoría en uso" }))
            .respond(200, json!({}));
        let api = client(&mock);
        let ids: Vec<String> = ["CAT_A", "CAT_B", "CAT_C"].iter().map(|s| s.to_string()).collect();

        let outcomes = block_on(run_bulk(ids, |id| {
            let api = api.clone();
            async move { api.delete::<Category>(&id, DeleteMode::Logical).await }
        }));
        let summary = BulkSummary::from_outcomes(&outcomes);
        assert_eq!(summary.failed_ids(), vec!["CAT_B"]);

        let mut state = ConfirmState::default();
        state.request();
        state.begin();
        state.resolve(&summary.into_result());
        assert!(state.open);
        assert_eq!(
            state.error.as_deref(),
            Some("2 correcto(s), 1 con error. CAT_B: Categoría en uso")
        );
    }

    #[test]
    fn test_all_failed_is_an_error() {
        let summary = BulkSummary::from_outcomes(&[BulkOutcome {
            id: "A".into(),
            result: Err(ApiError::Network("offline".into())),
        }]);
        assert_eq!(summary.failed_ids(), vec!["A"]);
        assert!(matches!(summary.into_result(), Err(ApiError::Partial(_))));

        let done = BulkSummary::from_outcomes(&[BulkOutcome {
            id: "A".into(),
            result: Ok(()),
        }]);
        assert!(done.failed_ids().is_empty());
        assert_eq!(done.into_result(), Ok(()));
    }

    #[test]
    fn test_empty_selection() {
        let outcomes = block_on(run_bulk(Vec::new(), |_| async { Ok(()) }));
        assert!(outcomes.is_empty());
        assert_eq!(BulkSummary::from_outcomes(&outcomes).message(), "0 registro(s) procesado(s)");
    }
}
