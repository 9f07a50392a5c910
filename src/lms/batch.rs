//! 有限并发的扇出执行

use std::fmt::Display;
use std::future::Future;

use futures_util::{StreamExt, stream};

use crate::errors::Result;
use crate::models::lms::BatchFailure;

/// 批量请求结果：成功项保持输入顺序，失败项逐条记录
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome<T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<BatchFailure>,
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<T> BatchOutcome<T> {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 以最多 `limit` 个并发执行，返回值与输入一一对应
pub async fn buffered_ordered<I, F, Fut>(inputs: I, limit: usize, f: F) -> Vec<Fut::Output>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future,
{
    stream::iter(inputs)
        .map(f)
        .buffered(limit.max(1))
        .collect()
        .await
}

/// 对每个 key 执行 `f`，失败项不会中断其他项
pub async fn run_batch<K, T, F, Fut>(keys: Vec<K>, limit: usize, f: F) -> BatchOutcome<T>
where
    K: Display + Clone,
    F: FnMut(K) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let results = buffered_ordered(keys.iter().cloned(), limit, f).await;

    let mut outcome = BatchOutcome::default();
    for (key, result) in keys.into_iter().zip(results) {
        match result {
            Ok(value) => outcome.succeeded.push(value),
            Err(e) => outcome.failed.push(BatchFailure {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PortalError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_order_follows_input_not_completion() {
        // 越靠前的任务越慢
        let results = buffered_ordered(vec![30u64, 20, 10, 0], 4, |delay| async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            delay
        })
        .await;
        assert_eq!(results, vec![30, 20, 10, 0]);
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        buffered_ordered(0..10, 3, |_| {
            let running = running.clone();
            let peak = peak.clone();
            async move {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                running.fetch_sub(1, Ordering::SeqCst);
            }
        })
        .await;

        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_partial_failures_are_recorded() {
        let outcome = run_batch(vec![1, 2, 3, 4], 2, |n| async move {
            if n % 2 == 0 {
                Err(PortalError::upstream(format!("course {n} unavailable")))
            } else {
                Ok(n * 10)
            }
        })
        .await;

        assert_eq!(outcome.succeeded, vec![10, 30]);
        let keys: Vec<_> = outcome.failed.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["2", "4"]);
        assert!(outcome.failed[0].message.contains("course 2 unavailable"));
        assert!(!outcome.is_complete());
    }
}
