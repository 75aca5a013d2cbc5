//! PDF output for a [`PaginatedDocument`], built directly with `lopdf`.
//!
//! Text uses the standard Times faces with WinAnsi encoding, so no font files
//! are embedded. Links become URI annotations over their runs.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

use crate::errors::RenderError;
use crate::layout::font_metrics::FontFace;
use crate::layout::paginate::{Color, PageLayout, PaginatedDocument};

pub fn render_pdf(doc: &PaginatedDocument) -> Result<Vec<u8>, RenderError> {
    let mut document = Document::with_version("1.7");
    let pages_id = document.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in FontFace::ALL {
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = document.add_object(dictionary! { "Font" => fonts });

    let width = doc.config.width_pt;
    let height = doc.config.height_pt;
    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(doc.pages.len());

    for page in &doc.pages {
        let content = page_content(page, height);
        let stream = Stream::new(lopdf::Dictionary::new(), content.encode()?);
        let content_id = document.add_object(stream);

        let annots: Vec<Object> = link_annotations(page, height)
            .into_iter()
            .map(|annot| document.add_object(annot).into())
            .collect();

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        };
        if !annots.is_empty() {
            page_dict.set("Annots", annots);
        }
        page_ids.push(document.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );
    let catalog_id = document.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    document.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    document
        .save_to(&mut bytes)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    debug!(pages = page_ids.len(), bytes = bytes.len(), "Rendered PDF");
    Ok(bytes)
}

fn fill_color(c: Color) -> Operation {
    Operation::new(
        "rg",
        vec![
            (c.r as f32 / 255.0).into(),
            (c.g as f32 / 255.0).into(),
            (c.b as f32 / 255.0).into(),
        ],
    )
}

/// Drawing operators for one page. Layout y grows downward; PDF y upward.
fn page_content(page: &PageLayout, page_height: f32) -> Content {
    let mut ops = Vec::new();

    for rule in &page.rules {
        let y = page_height - rule.y;
        ops.push(Operation::new("w", vec![rule.thickness.into()]));
        ops.push(Operation::new("RG", vec![0.into(), 0.into(), 0.into()]));
        ops.push(Operation::new("m", vec![rule.x1.into(), y.into()]));
        ops.push(Operation::new("l", vec![rule.x2.into(), y.into()]));
        ops.push(Operation::new("S", vec![]));
    }

    for run in &page.runs {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![run.face.resource_name().into(), run.size.into()],
        ));
        ops.push(fill_color(run.color));
        ops.push(Operation::new(
            "Td",
            vec![run.x.into(), (page_height - run.baseline).into()],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(&run.text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    Content { operations: ops }
}

fn link_annotations(page: &PageLayout, page_height: f32) -> Vec<lopdf::Dictionary> {
    page.links
        .iter()
        .map(|link| {
            let rect = vec![
                link.x.into(),
                (page_height - (link.top + link.height)).into(),
                (link.x + link.width).into(),
                (page_height - link.top).into(),
            ];
            dictionary! {
                "Type" => "Annot",
                "Subtype" => "Link",
                "Rect" => rect,
                "Border" => vec![0.into(), 0.into(), 0.into()],
                "A" => dictionary! {
                    "Type" => "Action",
                    "S" => "URI",
                    "URI" => Object::string_literal(link.url.clone()),
                },
            }
        })
        .collect()
}

/// Latin-1 passes through; bullets and dashes map to their WinAnsi slots.
/// Anything else becomes `?`.
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '•' => 0x95,
            '—' => 0x97,
            '–' => 0x96,
            c if (c as u32) <= 0xff => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{make_full_document, make_valid_document};
    use crate::layout::font_metrics::PageConfig;
    use crate::layout::paginate::paginate;
    use crate::layout::projector::project;

    fn make_pdf(doc: &crate::models::ResumeDocument) -> Vec<u8> {
        let paginated = paginate(&project(doc).unwrap(), &PageConfig::default());
        render_pdf(&paginated).unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_pdf_header_and_trailer() {
        let bytes = make_pdf(&make_valid_document());
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(contains(&bytes, b"%%EOF"));
    }

    #[test]
    fn test_pdf_contains_text_and_fonts() {
        let bytes = make_pdf(&make_full_document());
        assert!(contains(&bytes, b"ANA RUIZ, SOFTWARE ENGINEER"));
        assert!(contains(&bytes, b"Times-Bold"));
        assert!(contains(&bytes, b"Times-Italic"));
        assert!(contains(&bytes, b"WinAnsiEncoding"));
    }

    #[test]
    fn test_pdf_has_uri_links() {
        let bytes = make_pdf(&make_valid_document());
        assert!(contains(&bytes, b"/URI"));
        assert!(contains(&bytes, b"https://linkedin.com/in/anaruiz"));
    }

    #[test]
    fn test_pdf_loads_back_with_expected_page_count() {
        let bytes = make_pdf(&make_full_document());
        let loaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), 1);
    }

    #[test]
    fn test_win_ansi_mapping() {
        assert_eq!(to_win_ansi("FORMACIÓN"), b"FORMACI\xd3N".to_vec());
        assert_eq!(to_win_ansi("•"), vec![0x95]);
        assert_eq!(to_win_ansi("Marzo — Presente"), b"Marzo \x97 Presente".to_vec());
        assert_eq!(to_win_ansi("日本"), b"??".to_vec());
    }
}
