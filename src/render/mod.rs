// Render module.
// Page model plus the adapter that writes stats records into it.

pub mod adapter;
pub mod page;

pub use adapter::RenderAdapter;
pub use page::{Element, MetricKey, Page, ProjectCard};
