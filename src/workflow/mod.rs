pub mod page_flow;
pub mod tick_ctx;

pub use page_flow::{PageFlow, TickOutcome};
pub use tick_ctx::TickCtx;
