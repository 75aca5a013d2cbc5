// Presentation adapters over the shared projection: browser preview (HTML)
// and print output (PDF).

pub mod html;
pub mod pdf;

pub use html::PreviewRenderer;
pub use pdf::render_pdf;
