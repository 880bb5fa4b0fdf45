//! Recording of confirmed swaps into account history
//!
//! [`HistoryCompletionSink`] is the completion sink used by the swap
//! confirmation flow: it appends the swap and its pending operation to the
//! source main account, then moves navigation to the pending-operation screen.

pub mod navigation;
pub mod record;
pub mod sink;
pub mod store;

pub use navigation::*;
pub use record::*;
pub use sink::*;
pub use store::*;
