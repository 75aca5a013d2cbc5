// Layout: date formatting, section projection, font metrics, pagination,
// and page fill analysis. Everything here is pure and synchronous.

pub mod dates;
pub mod font_metrics;
pub mod page_fill;
pub mod paginate;
pub mod projector;

pub use page_fill::analyze_page_fill;
pub use paginate::paginate;
pub use projector::project;
