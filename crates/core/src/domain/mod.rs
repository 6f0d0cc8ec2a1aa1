pub mod contract;
pub mod report;
pub mod section;

pub use report::{Report, SectionBody, Sections};
pub use section::{SectionKey, SectionMeta};
