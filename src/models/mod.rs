pub mod feed;
pub mod item;
pub mod stats;

pub use item::{
    ItemRecord,
    ParseMode,
    ParseWarning,
    ParsedItem,
};

pub use feed::{
    FeedItem,
    FeedResponse,
    ModValue,
};

pub use stats::{
    OutlierPass,
    OutlierReport,
    Quartiles,
    SummaryStats,
};
