//! Concurrent batch fetching with per-slot failure isolation

use std::future::Future;

use futures::future::join_all;
use tracing::warn;

/// Runs a set of labeled queries concurrently and returns their results in
/// input order.
///
/// A query that resolves to `Err` yields `None` in its slot and is logged
/// under its label; sibling slots are unaffected. There is no retry and no
/// backoff. Query futures must resolve to a `Result` rather than panic -
/// a panicking future is a caller contract violation and propagates.
pub async fn batch_fetch<T, E, F>(queries: Vec<(String, F)>) -> Vec<Option<T>>
where
    E: std::fmt::Display,
    F: Future<Output = Result<T, E>>,
{
    let (labels, futures): (Vec<String>, Vec<F>) = queries.into_iter().unzip();

    join_all(futures)
        .await
        .into_iter()
        .zip(labels)
        .map(|(result, label)| match result {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(label = %label, error = %error, "batch query failed");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::time::Duration;

    fn ok_after(ms: u64, value: i32) -> BoxFuture<'static, Result<i32, DomainError>> {
        async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Ok(value)
        }
        .boxed()
    }

    fn err_after(ms: u64, message: &str) -> BoxFuture<'static, Result<i32, DomainError>> {
        let message = message.to_string();
        async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Err(DomainError::upstream(message))
        }
        .boxed()
    }

    #[tokio::test]
    async fn test_all_slots_succeed() {
        let results = batch_fetch(vec![
            ("first".to_string(), ok_after(0, 1)),
            ("second".to_string(), ok_after(0, 2)),
        ])
        .await;

        assert_eq!(results, vec![Some(1), Some(2)]);
    }

    #[tokio::test]
    async fn test_failed_slot_is_null_others_unaffected() {
        let results = batch_fetch(vec![
            ("categories".to_string(), ok_after(0, 10)),
            ("clients".to_string(), err_after(0, "query failed")),
            ("orders".to_string(), ok_after(0, 30)),
        ])
        .await;

        assert_eq!(results, vec![Some(10), None, Some(30)]);
    }

    #[tokio::test]
    async fn test_order_preserved_regardless_of_completion_order() {
        // The slow query finishes last but still occupies slot 0.
        let results = batch_fetch(vec![
            ("slow".to_string(), ok_after(50, 1)),
            ("fast".to_string(), ok_after(0, 2)),
            ("medium".to_string(), ok_after(20, 3)),
        ])
        .await;

        assert_eq!(results, vec![Some(1), Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let results: Vec<Option<i32>> =
            batch_fetch(Vec::<(String, BoxFuture<'static, Result<i32, DomainError>>)>::new()).await;
        assert!(results.is_empty());
    }
}
