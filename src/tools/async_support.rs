//! Timeout and timing helpers for the network legs of a transfer.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::info;

use crate::core::errors::WalletError;

pub type AsyncResult<T> = Result<T, WalletError>;

#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    pub duration: Duration,
    pub operation_name: String,
}

impl TimeoutConfig {
    pub fn new(duration: Duration, operation_name: impl Into<String>) -> Self {
        Self { duration, operation_name: operation_name.into() }
    }

    /// 120 seconds, the receipt wait used by EVM transfers.
    pub fn receipt(operation_name: impl Into<String>) -> Self {
        Self::new(Duration::from_secs(120), operation_name)
    }
}

pub struct AsyncExecutor;

impl AsyncExecutor {
    /// Run `future`, turning an elapsed deadline into `WalletError::TimeoutError`.
    pub async fn execute_with_timeout<F, T>(future: F, config: TimeoutConfig) -> AsyncResult<T>
    where
        F: Future<Output = AsyncResult<T>>,
    {
        match timeout(config.duration, future).await {
            Ok(result) => result,
            Err(_) => Err(WalletError::TimeoutError(format!(
                "Operation '{}' timed out after {:?}",
                config.operation_name, config.duration
            ))),
        }
    }
}

/// Measures one operation and logs its duration when finished.
pub struct AsyncPerformanceMonitor {
    start_time: Instant,
    operation_name: String,
}

impl AsyncPerformanceMonitor {
    pub fn start(operation_name: impl Into<String>) -> Self {
        Self { start_time: Instant::now(), operation_name: operation_name.into() }
    }

    pub fn finish_with_duration(self) -> Duration {
        let duration = self.start_time.elapsed();
        info!(operation = %self.operation_name, ?duration, "operation completed");
        duration
    }
}
