//! Page fill analysis: checks how a paginated résumé uses its pages.
//!
//! A Harvard CV is expected to fit on a single A4 page. The analysis does not
//! change the layout; callers decide whether to warn about an overflow.

use serde::Serialize;

use crate::layout::paginate::PaginatedDocument;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PageFillVerdict {
    /// Everything fits on one page.
    SinglePage,
    /// Content spills onto `pages` pages.
    Overflow { pages: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageFillAnalysis {
    pub page_count: usize,
    /// Share of the last page's content area in use, 0.0 to 1.0.
    pub last_page_fill: f32,
    pub whitespace_fraction: f32,
    pub verdict: PageFillVerdict,
}

impl PageFillAnalysis {
    pub fn is_single_page(&self) -> bool {
        self.verdict == PageFillVerdict::SinglePage
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

pub fn analyze_page_fill(doc: &PaginatedDocument) -> PageFillAnalysis {
    let available = doc.config.content_bottom() - doc.config.content_top();
    let used = doc.pages.last().map(|p| p.used_height).unwrap_or(0.0);
    let last_page_fill = if available > 0.0 {
        (used / available).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let page_count = doc.page_count();
    let verdict = if page_count <= 1 {
        PageFillVerdict::SinglePage
    } else {
        PageFillVerdict::Overflow { pages: page_count }
    };

    PageFillAnalysis {
        page_count,
        last_page_fill,
        whitespace_fraction: 1.0 - last_page_fill,
        verdict,
    }
}
