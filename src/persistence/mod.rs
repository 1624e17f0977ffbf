//! Save record, byte framing and the file-backed save manager.

pub mod record;
pub mod save_manager;

pub use record::{deserialize, deserialize_with_curve, serialize, AchievementRecord, SaveRecord};
pub use save_manager::{LoadOutcome, LoadSource, SaveManager};
