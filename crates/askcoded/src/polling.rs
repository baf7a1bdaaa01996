//! Bounded retry for results that become available eventually.
//!
//! Language engines answer code-action queries with an empty list until they
//! have indexed a freshly staged buffer. [`poll_until_non_empty`] re-asks a
//! fixed number of times with a fixed pause in between.

use std::thread;
use std::time::Duration;

use tracing::debug;

const POLLING_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::polling");

/// Invokes `producer` until it yields a non-empty list or `attempts` calls
/// have been made, sleeping `interval` between calls.
///
/// Exhausting the budget is not a failure: the result is then an empty list.
/// No pause follows the final attempt.
///
/// # Errors
///
/// A producer error ends polling immediately and is returned unchanged.
pub fn poll_until_non_empty<T, E, F>(
    attempts: u32,
    interval: Duration,
    mut producer: F,
) -> Result<Vec<T>, E>
where
    F: FnMut() -> Result<Vec<T>, E>,
{
    for attempt in 1..=attempts {
        let results = producer()?;
        if !results.is_empty() {
            debug!(
                target: POLLING_TARGET,
                attempt,
                count = results.len(),
                "results available"
            );
            return Ok(results);
        }
        debug!(
            target: POLLING_TARGET,
            attempt,
            remaining = attempts - attempt,
            "no results yet"
        );
        if attempt < attempts {
            thread::sleep(interval);
        }
    }
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::convert::Infallible;
    use std::rc::Rc;
    use std::time::Instant;

    use rstest::rstest;

    use super::*;

    type Producer = Box<dyn FnMut() -> Result<Vec<u32>, Infallible>>;

    fn empty_then_ready(ready_after: u32) -> (Producer, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let producer = move || {
            let call = counter.get() + 1;
            counter.set(call);
            Ok(if call > ready_after { vec![call] } else { Vec::new() })
        };
        (Box::new(producer), calls)
    }

    #[rstest]
    #[case::immediately(0)]
    #[case::after_one(1)]
    #[case::after_five(5)]
    #[case::on_last_attempt(9)]
    fn stops_at_first_non_empty_result(#[case] empty_calls: u32) {
        let (producer, calls) = empty_then_ready(empty_calls);
        let results = poll_until_non_empty(10, Duration::ZERO, producer).expect("infallible");

        assert_eq!(results, vec![empty_calls + 1]);
        assert_eq!(calls.get(), empty_calls + 1);
    }

    #[test]
    fn gives_up_after_the_attempt_budget() {
        let (producer, calls) = empty_then_ready(u32::MAX);
        let results = poll_until_non_empty(10, Duration::ZERO, producer).expect("infallible");

        assert!(results.is_empty());
        assert_eq!(calls.get(), 10);
    }

    #[test]
    fn zero_attempts_never_calls_the_producer() {
        let (producer, calls) = empty_then_ready(0);
        let results = poll_until_non_empty(0, Duration::ZERO, producer).expect("infallible");

        assert!(results.is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn propagates_producer_errors_without_retrying() {
        let mut calls = 0;
        let result: Result<Vec<u32>, &str> = poll_until_non_empty(10, Duration::ZERO, || {
            calls += 1;
            Err("engine crashed")
        });

        assert_eq!(result, Err("engine crashed"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn sleeps_between_attempts_but_not_after_the_last() {
        let (producer, _) = empty_then_ready(u32::MAX);
        let started = Instant::now();
        poll_until_non_empty(3, Duration::from_millis(40), producer).expect("infallible");
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(80), "slept {elapsed:?}");
        assert!(elapsed < Duration::from_millis(120 + 400), "slept {elapsed:?}");
    }
}
