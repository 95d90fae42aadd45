//! Routes a transfer request to the EVM or Solana path and normalises every outcome
//! into a [`TransferResult`].

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::ethereum::EvmTransferPath;
use crate::blockchain::solana::SolanaTransferPath;
use crate::blockchain::traits::TransferPath;
use crate::core::config::AppConfig;
use crate::core::domain::{TransferProgress, TransferRequest, TransferResult, TransferState};
use crate::core::registry::RegistryStore;
use crate::core::validation::is_solana_chain;
use crate::security::redaction::redact_key;
use crate::service::event_log::{EventLog, TracingEventLog};
use crate::tools::async_support::AsyncPerformanceMonitor;

#[derive(Clone)]
pub struct TransferDispatcher {
    registry: RegistryStore,
    evm: Arc<dyn TransferPath>,
    solana: Arc<dyn TransferPath>,
    log: Arc<dyn EventLog>,
}

impl TransferDispatcher {
    /// Production wiring: HTTP EVM path, public Solana mainnet path.
    pub fn new(config: &AppConfig, log: Arc<dyn EventLog>) -> Self {
        Self {
            registry: RegistryStore::new(&config.registry.chain_file, &config.registry.token_file),
            evm: Arc::new(EvmTransferPath::new(config.evm.clone())),
            solana: Arc::new(SolanaTransferPath::mainnet(config.solana.rpc_timeout_secs)),
            log,
        }
    }

    pub fn with_paths(
        registry: RegistryStore,
        evm: Arc<dyn TransferPath>,
        solana: Arc<dyn TransferPath>,
        log: Arc<dyn EventLog>,
    ) -> Self {
        Self { registry, evm, solana, log }
    }

    /// Same as [`TransferDispatcher::new`] with events going to `tracing`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config, Arc::new(TracingEventLog))
    }

    pub fn registry(&self) -> &RegistryStore {
        &self.registry
    }

    /// The single entry point front ends call. Never fails and never panics:
    /// every problem comes back as a result with `success == false`.
    pub async fn transfer(
        &self,
        private_key: impl Into<String>,
        to_address: impl Into<String>,
        chain_name: impl Into<String>,
        coin_name: impl Into<String>,
        amount: impl Into<String>,
    ) -> TransferResult {
        let request = TransferRequest::new(private_key, to_address, chain_name, coin_name, amount);
        self.submit(request).wait().await
    }

    /// Run the request on its own task and hand back a handle to watch it.
    pub fn submit(&self, request: TransferRequest) -> TransferHandle {
        let id = Uuid::new_v4();
        let (tx, rx) = watch::channel(TransferState::Idle);
        let progress = TransferProgress::new(tx);
        let chain_name = request.chain_name.clone();

        let dispatcher = self.clone();
        let task_progress = progress.clone();
        let span = tracing::info_span!("transfer", request_id = %id, chain = %chain_name);
        let join = tokio::spawn(
            async move { dispatcher.execute(id, request, &task_progress).await }.instrument(span),
        );

        TransferHandle { id, chain_name, state: rx, progress, join, log: Arc::clone(&self.log) }
    }

    /// Resolve, route, run. Errors are folded into the result here.
    pub async fn execute(&self, id: Uuid, request: TransferRequest, progress: &TransferProgress) -> TransferResult {
        let request_id = id.to_string();
        let monitor = AsyncPerformanceMonitor::start(format!("{} transfer", request.chain_name));
        self.log.info(
            &request_id,
            &format!(
                "starting {} transfer: private_key={}, to_address={}, coin_name={}, amount={}",
                request.chain_name,
                request.with_private_key(redact_key),
                request.to_address,
                request.coin_name,
                request.amount
            ),
        );
        progress.set(TransferState::Validating);

        let outcome = match self.registry.resolve(&request.chain_name, &request.coin_name) {
            Ok((chain, token)) => {
                let path = if is_solana_chain(&request.chain_name) { &self.solana } else { &self.evm };
                self.log.info(
                    &request_id,
                    &format!(
                        "routing to {} path (rpc={}, native={}, decimals={})",
                        path.name(),
                        chain.rpc_url,
                        token.is_native,
                        token.decimals
                    ),
                );
                path.transfer(&request, &chain, &token, progress).await
            }
            Err(e) => Err(e),
        };

        let result = match outcome {
            Ok(r) => r,
            Err(e) => TransferResult::failed(e.to_string()).with_chain_prefix(&request.chain_name),
        };

        let elapsed = monitor.finish_with_duration();
        let rendered = serde_json::to_string(&result).unwrap_or_default();
        if result.success() {
            progress.set(TransferState::Succeeded);
            self.log.info(
                &request_id,
                &format!("completed {} transfer in {:?}: {}", request.chain_name, elapsed, rendered),
            );
        } else {
            progress.set(TransferState::Failed);
            self.log.error(&request_id, &format!("{} transfer failed: {}", request.chain_name, rendered));
        }
        result
    }
}

/// A submitted transfer. Dropping it does not cancel the work.
pub struct TransferHandle {
    id: Uuid,
    chain_name: String,
    state: watch::Receiver<TransferState>,
    progress: TransferProgress,
    join: JoinHandle<TransferResult>,
    log: Arc<dyn EventLog>,
}

impl TransferHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> TransferState {
        *self.state.borrow()
    }

    /// Receiver that sees every state change.
    pub fn subscribe(&self) -> watch::Receiver<TransferState> {
        self.state.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the result. A panicked worker becomes a failed result.
    pub async fn wait(self) -> TransferResult {
        match self.join.await {
            Ok(result) => result,
            Err(e) => {
                let reason = if e.is_panic() { "worker panicked" } else { "worker was cancelled" };
                self.progress.set(TransferState::Failed);
                self.log.error(&self.id.to_string(), reason);
                TransferResult::failed(reason).with_chain_prefix(&self.chain_name)
            }
        }
    }
}
