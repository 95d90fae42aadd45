pub mod dispatcher;
pub mod event_log;

pub use dispatcher::{TransferDispatcher, TransferHandle};
pub use event_log::{EventLog, MemoryEventLog, NullEventLog, TracingEventLog};
