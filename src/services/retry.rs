use std::future::Future;
use std::time::Duration;

use rand::Rng;

/// Bounded retries with a fixed base delay plus uniform jitter. No exponential
/// backoff and no circuit breaking, the remote side is the bottleneck either way.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u8, // Should be > 0
    base_delay: Duration,
    max_jitter: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u8, base_delay: Duration, max_jitter: Duration) -> Self {
        RetryPolicy {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_jitter,
        }
    }

    pub fn once() -> Self {
        RetryPolicy::new(1, Duration::ZERO, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }

    fn delay(&self) -> Duration {
        match self.max_jitter.is_zero() {
            true => self.base_delay,
            false => {
                let jitter_ms = rand::thread_rng().gen_range(0..=self.max_jitter.as_millis() as u64);
                self.base_delay + Duration::from_millis(jitter_ms)
            }
        }
    }

    /// Runs `op` until it succeeds or the attempt budget is spent, sleeping
    /// between attempts. The last error is returned as-is.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut(u8) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if attempt >= self.max_attempts {
                        return Err(error);
                    }
                    attempt += 1;
                    tokio::time::sleep(self.delay()).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use super::RetryPolicy;

    fn no_wait(max_attempts: u8) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    #[tokio::test]
    async fn gives_up_after_exactly_max_attempts() {
        let calls = Cell::new(0_u8);

        let result: Result<(), &str> = no_wait(3)
            .run(|_| {
                calls.set(calls.get() + 1);
                async { Err("boom") }
            })
            .await;

        assert_eq!(result, Err("boom"));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn first_success_wins() {
        let calls = Cell::new(0_u8);

        let result: Result<u8, &str> = no_wait(5)
            .run(|attempt| {
                calls.set(calls.get() + 1);
                async move {
                    match attempt < 3 {
                        true => Err("not yet"),
                        false => Ok(attempt),
                    }
                }
            })
            .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn zero_attempts_still_runs_once() {
        let calls = Cell::new(0_u8);

        let result: Result<(), &str> = no_wait(0)
            .run(|_| {
                calls.set(calls.get() + 1);
                async { Err("boom") }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}
