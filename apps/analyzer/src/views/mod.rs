pub mod history;
pub mod tabs;
pub mod upload;

pub use history::{HistoryState, HistoryView};
pub use tabs::{Tab, TabSwitcher};
pub use upload::UploadView;
