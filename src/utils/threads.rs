use anyhow::{Result, anyhow};
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// 并发执行一组Future，最多同时运行 `max_concurrent` 个，0表示不限制。
/// 返回结果与输入顺序一致。
pub async fn do_parallel_with_limit<F, T>(futures: Vec<F>, max_concurrent: usize) -> Vec<T>
where
    F: Future<Output = T>,
{
    if max_concurrent == 0 || max_concurrent >= futures.len() {
        return join_all(futures).await;
    }

    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let controlled_futures: Vec<_> = futures
        .into_iter()
        .map(|fut| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                // semaphore从不close，acquire只会在等待后成功
                let _permit = semaphore.acquire().await;
                fut.await
            }
        })
        .collect();

    join_all(controlled_futures).await
}

/// 为单次外部调用加上超时，`seconds` 为0时不限制
pub async fn with_timeout<F, T>(seconds: u64, label: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if seconds == 0 {
        return fut.await;
    }

    match tokio::time::timeout(Duration::from_secs(seconds), fut).await {
        Ok(result) => result,
        Err(_) => Err(anyhow!("{} 超时（{}秒）", label, seconds)),
    }
}
