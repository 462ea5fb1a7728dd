pub mod codec;
pub mod history;
pub mod paging;
pub mod search;
pub mod store;

pub use codec::{Codec, Layout};
pub use history::HistoryLog;
pub use search::SearchField;
pub use store::RecordStore;
