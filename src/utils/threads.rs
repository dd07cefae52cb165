use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// 并发执行一组future，同时运行的数量不超过 `max_parallels`，结果保持输入顺序
pub async fn do_parallel_with_limit<F, T>(futures: Vec<F>, max_parallels: usize) -> Vec<T>
where
    F: Future<Output = T>,
{
    let semaphore = Arc::new(Semaphore::new(max_parallels.max(1)));

    let controlled_futures = futures.into_iter().map(|fut| {
        let semaphore = semaphore.clone();
        async move {
            let _permit = semaphore.acquire().await;
            fut.await
        }
    });

    join_all(controlled_futures).await
}
