// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use std::future::Future;
use std::time::Duration;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("gave up after {attempts} attempts")]
pub(crate) struct Exhausted {
    pub(crate) attempts: u32,
}

/// Run an async probe up to `max_attempts` times with a fixed delay between
/// attempts. The probe reports `Ok(Some(_))` when it has a result,
/// `Ok(None)` when there is nothing yet, and `Err` on a transient failure.
/// Failures are logged and consume an attempt rather than aborting.
pub(crate) async fn poll_until<F, Fut, T, E>(
    max_attempts: u32,
    delay: Duration,
    operation_id: &str,
    mut probe: F,
) -> Result<T, Exhausted>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
    E: std::fmt::Debug,
{
    for attempt in 1..=max_attempts {
        match probe().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {
                debug!("{operation_id}: nothing yet on attempt {attempt}/{max_attempts}");
            }
            Err(err) => {
                warn!("{operation_id}: attempt {attempt}/{max_attempts} failed: {err:?}");
            }
        }

        if attempt < max_attempts {
            tokio::time::sleep(delay).await;
        }
    }

    error!("{operation_id} exhausted its {max_attempts} attempts");
    Err(Exhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn returns_as_soon_as_the_probe_succeeds() {
        let attempts = AtomicU32::new(0);
        let attempts = &attempts;
        let result = poll_until(5, Duration::from_secs(1), "probe", || async move {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            Ok::<_, ()>((n == 3).then_some(n))
        })
        .await;
        assert_eq!(result, Ok(3));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn errors_consume_attempts_instead_of_aborting() {
        let attempts = AtomicU32::new(0);
        let attempts = &attempts;
        let result: Result<u32, Exhausted> =
            poll_until(4, Duration::from_secs(1), "probe", || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<Option<u32>, &str>("flaky rpc")
            })
            .await;
        assert_eq!(result, Err(Exhausted { attempts: 4 }));
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_the_configured_delay_between_attempts() {
        let started = tokio::time::Instant::now();
        let result: Result<(), Exhausted> =
            poll_until(3, Duration::from_secs(5), "probe", || async {
                Ok::<Option<()>, ()>(None)
            })
            .await;
        assert_eq!(result, Err(Exhausted { attempts: 3 }));
        // Two inter-attempt delays, none after the final attempt.
        assert_eq!(started.elapsed(), Duration::from_secs(10));
    }
}
