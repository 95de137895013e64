pub mod advance_gate;
pub mod classifier;
pub mod completion_cache;
pub mod keepalive;
pub mod page_probe;
pub mod video_control;

pub use advance_gate::AdvanceGate;
pub use classifier::{PageClassifier, PageKind};
pub use completion_cache::CompletionCache;
pub use keepalive::KeepaliveService;
pub use page_probe::PageProbe;
pub use video_control::{ConfirmOutcome, VideoControl};
