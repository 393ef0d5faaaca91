//! Change counter - main evaluation logic.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::common_passwords::CommonPasswordIndex;
use crate::policy::Policy;
use crate::report::ChangeReport;
use crate::scan::scan;
use crate::sections::SECTIONS;

/// Delay before an asynchronous evaluation starts, so rapid edits can cancel it.
#[cfg(feature = "async")]
pub const EVALUATION_DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(300);

/// Counts the changes needed to make `password` comply with `policy`.
///
/// The count is a heuristic: every deficiency is fixed independently, so one
/// edit that would resolve two problems at once is still counted twice.
///
/// # Arguments
/// * `password` - The password to evaluate
/// * `index` - Common passwords that must not appear as substrings
/// * `policy` - Length and succession limits
///
/// # Returns
/// A `ChangeReport` with the total and the deficiency behind each change.
pub fn evaluate_changes(
    password: &SecretString,
    index: &CommonPasswordIndex,
    policy: &Policy,
) -> ChangeReport {
    let mut tally = scan(password.expose_secret(), index, policy);
    let mut deficiencies = Vec::new();

    // Orchestrator: execute sections in sequence
    for (_section_name, section_fn) in SECTIONS {
        if let Some(deficiency) = section_fn(&mut tally, policy) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "Section {} requires {} change(s): {}",
                _section_name,
                deficiency.changes,
                deficiency
            );
            deficiencies.push(deficiency);
        }
    }

    ChangeReport {
        changes: deficiencies.iter().map(|d| d.changes).sum(),
        deficiencies,
    }
}

/// Returns only the number of changes needed.
pub fn count_changes(password: &SecretString, index: &CommonPasswordIndex, policy: &Policy) -> usize {
    evaluate_changes(password, index, policy).changes
}

/// Async version that sends the report via channel.
///
/// Waits for [`EVALUATION_DEBOUNCE`] first and gives up without sending if
/// `token` was cancelled in the meantime.
#[cfg(feature = "async")]
pub async fn evaluate_changes_tx(
    password: &SecretString,
    index: &CommonPasswordIndex,
    policy: &Policy,
    token: CancellationToken,
    tx: mpsc::Sender<ChangeReport>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("evaluation is about to start...");

    tokio::time::sleep(EVALUATION_DEBOUNCE).await;
    if token.is_cancelled() {
        #[cfg(feature = "tracing")]
        tracing::debug!("evaluation cancelled before start");
        return;
    }

    let report = evaluate_changes(password, index, policy);

    if let Err(_e) = tx.send(report).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send change report: {}", _e);
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;

    fn secret(password: &str) -> SecretString {
        SecretString::new(password.to_string().into())
    }

    #[tokio::test(start_paused = true)]
    async fn test_evaluate_changes_tx() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        let index = CommonPasswordIndex::builtin().unwrap();

        evaluate_changes_tx(&secret("ab1234AB"), &index, &Policy::default(), token, tx).await;

        let report = rx.recv().await.expect("Should receive report");
        assert_eq!(report.changes, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_evaluate_changes_tx_cancelled() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        token.cancel();
        let index = CommonPasswordIndex::builtin().unwrap();

        evaluate_changes_tx(&secret("ab1234AB"), &index, &Policy::default(), token, tx).await;

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_evaluate_changes_tx_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let index = CommonPasswordIndex::builtin().unwrap();

        // Must not panic when nobody listens
        evaluate_changes_tx(&secret("aA1"), &index, &Policy::default(), CancellationToken::new(), tx)
            .await;
    }
}
