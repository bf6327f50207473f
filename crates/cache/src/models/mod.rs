mod video;

pub use self::video::{SyncSummary, VideoRecord};
