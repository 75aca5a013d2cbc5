//! Pagination: places a [`ProjectedResume`] onto fixed-size pages.
//!
//! # Rules
//! - Each entry (one job, one degree, ...) is a block that moves to the next
//!   page as a whole when it does not fit in the space left.
//! - A section title travels with its first entry, so it is never stranded at
//!   the bottom of a page.
//! - A block taller than a full page is split between rows.
//!
//! Coordinates are top-down points from the page's top-left corner; the PDF
//! renderer flips them.

use serde::Serialize;
use tracing::debug;

use crate::layout::font_metrics::{get_metrics, FontFace, PageConfig};
use crate::layout::projector::{
    ComplementaryBlock, EducationBlock, ExperienceBlock, Header, LanguageLine, Link,
    ProjectedResume, Section, SkillLine, LINK_SEPARATOR,
};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const DARK: Color = Color::rgb(0x44, 0x44, 0x44);
    pub const MUTED: Color = Color::rgb(0x66, 0x66, 0x66);
    pub const LINK: Color = Color::rgb(0x00, 0x66, 0xcc);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One piece of text drawn at a fixed position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub x: f32,
    /// Distance from the top of the page to the baseline.
    pub baseline: f32,
    pub text: String,
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
}

/// Clickable rectangle over a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkArea {
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub url: String,
}

/// Horizontal rule (section underline).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub thickness: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLayout {
    pub runs: Vec<TextRun>,
    pub rules: Vec<Rule>,
    pub links: Vec<LinkArea>,
    /// Vertical space consumed below the top margin.
    pub used_height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedDocument {
    pub config: PageConfig,
    pub pages: Vec<PageLayout>,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct RowRun {
    x: f32,
    text: String,
    face: FontFace,
    size: f32,
    color: Color,
    link: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct Row {
    height: f32,
    runs: Vec<RowRun>,
    /// Rule drawn just under the row, spanning the content width.
    underline: bool,
}

#[derive(Debug, Clone, Default)]
struct Block {
    rows: Vec<Row>,
    space_after: f32,
}

impl Block {
    fn height(&self) -> f32 {
        self.rows.iter().map(|r| r.height).sum()
    }
}

/// Text style shorthand for the block builders.
#[derive(Debug, Clone, Copy)]
struct Style {
    face: FontFace,
    size: f32,
    color: Color,
}

/// Font sizes and spacing for the Harvard layout, scaled from the body size.
struct Metrics<'a> {
    config: &'a PageConfig,
    scale: f32,
}

impl<'a> Metrics<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            scale: config.font_size_pt / 11.0,
        }
    }

    fn style(&self, face: FontFace, size: f32, color: Color) -> Style {
        Style {
            face,
            size: size * self.scale,
            color,
        }
    }

    fn pt(&self, v: f32) -> f32 {
        v * self.scale
    }

    fn left(&self) -> f32 {
        self.config.margin_pt
    }

    fn width(&self) -> f32 {
        self.config.content_width()
    }

    /// Date/location column: 30% of the content width minus a 15pt gutter.
    fn date_column_width(&self) -> f32 {
        self.width() * 0.30 - self.pt(15.0)
    }

    fn body_x(&self) -> f32 {
        self.left() + self.width() * 0.30
    }

    fn body_width(&self) -> f32 {
        self.width() * 0.70
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Line helpers
// ────────────────────────────────────────────────────────────────────────────

/// One visual line: its runs and height.
type Line = (f32, Vec<RowRun>);

fn run(x: f32, text: impl Into<String>, style: Style) -> RowRun {
    RowRun {
        x,
        text: text.into(),
        face: style.face,
        size: style.size,
        color: style.color,
        link: None,
    }
}

fn wrapped(config: &PageConfig, text: &str, style: Style, x: f32, width: f32) -> Vec<Line> {
    get_metrics(style.face)
        .wrap(text, style.size, width)
        .into_iter()
        .map(|line| (config.line_height(style.size), vec![run(x, line, style)]))
        .collect()
}

fn centered(config: &PageConfig, text: &str, style: Style) -> Vec<Line> {
    let metrics = get_metrics(style.face);
    metrics
        .wrap(text, style.size, config.content_width())
        .into_iter()
        .map(|line| {
            let w = metrics.width_pt(&line, style.size);
            let x = config.margin_pt + (config.content_width() - w) / 2.0;
            (config.line_height(style.size), vec![run(x, line, style)])
        })
        .collect()
}

/// Zips a left and a right column line by line into rows.
fn two_columns(left: Vec<Line>, right: Vec<Line>) -> Vec<Row> {
    let n = left.len().max(right.len());
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    (0..n)
        .map(|_| {
            let (lh, mut lruns) = left.next().unwrap_or_default();
            let (rh, rruns) = right.next().unwrap_or_default();
            lruns.extend(rruns);
            Row {
                height: lh.max(rh),
                runs: lruns,
                underline: false,
            }
        })
        .collect()
}

fn rows(lines: Vec<Line>) -> Vec<Row> {
    lines
        .into_iter()
        .map(|(height, runs)| Row {
            height,
            runs,
            underline: false,
        })
        .collect()
}

fn spacer(height: f32) -> Row {
    Row {
        height,
        ..Row::default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Block builders
// ────────────────────────────────────────────────────────────────────────────

fn header_block(m: &Metrics, header: &Header) -> Block {
    let mut lines = centered(
        m.config,
        &header.name_line,
        m.style(FontFace::Bold, 15.0, Color::BLACK),
    );
    lines.push((m.pt(6.0), Vec::new()));
    lines.extend(centered(
        m.config,
        &header.contact_line,
        m.style(FontFace::Regular, 11.0, Color::DARK),
    ));
    Block {
        rows: rows(lines),
        space_after: m.pt(20.0),
    }
}

fn title_rows(m: &Metrics, title: &str) -> Vec<Row> {
    let style = m.style(FontFace::Bold, 14.0, Color::BLACK);
    vec![
        Row {
            height: m.config.line_height(style.size),
            runs: vec![run(m.left(), title, style)],
            underline: true,
        },
        spacer(m.pt(8.0)),
    ]
}

fn links_block(m: &Metrics, links: &[Link]) -> Block {
    let link_style = m.style(FontFace::Regular, 10.0, Color::LINK);
    let sep_style = m.style(FontFace::Regular, 10.0, Color::DARK);
    let mut x = m.left();
    let mut runs = Vec::new();
    for (i, link) in links.iter().enumerate() {
        if i > 0 {
            runs.push(run(x, LINK_SEPARATOR, sep_style));
            x += get_metrics(sep_style.face).width_pt(LINK_SEPARATOR, sep_style.size);
        }
        let mut r = run(x, link.label(), link_style);
        r.link = Some(link.url.clone());
        x += get_metrics(link_style.face).width_pt(link.label(), link_style.size);
        runs.push(r);
    }
    Block {
        rows: vec![Row {
            height: m.config.line_height(link_style.size),
            runs,
            underline: false,
        }],
        space_after: 0.0,
    }
}

fn profile_block(m: &Metrics, profile: &str) -> Block {
    let style = m.style(FontFace::Regular, 10.0, Color::BLACK);
    let lines = profile
        .lines()
        .flat_map(|p| wrapped(m.config, p, style, m.left(), m.width()))
        .collect();
    Block {
        rows: rows(lines),
        space_after: 0.0,
    }
}

fn date_column(m: &Metrics, date_range: &str, location: &str) -> Vec<Line> {
    let mut left = wrapped(
        m.config,
        date_range,
        m.style(FontFace::Regular, 9.0, Color::MUTED),
        m.left(),
        m.date_column_width(),
    );
    left.extend(wrapped(
        m.config,
        location,
        m.style(FontFace::Regular, 10.0, Color::DARK),
        m.left(),
        m.date_column_width(),
    ));
    left
}

fn experience_block(m: &Metrics, entry: &ExperienceBlock) -> Block {
    let left = date_column(m, &entry.date_range, &entry.location);

    let mut right = wrapped(
        m.config,
        &entry.heading,
        m.style(FontFace::Bold, 10.0, Color::BLACK),
        m.body_x(),
        m.body_width(),
    );
    let bullet_style = m.style(FontFace::Regular, 10.0, Color::BLACK);
    let indent = m.pt(15.0);
    for bullet in &entry.bullets {
        let mut lines = wrapped(
            m.config,
            bullet,
            bullet_style,
            m.body_x() + indent,
            m.body_width() - indent,
        );
        if let Some((_, runs)) = lines.first_mut() {
            runs.insert(0, run(m.body_x(), "•", bullet_style));
        }
        right.extend(lines);
    }

    Block {
        rows: two_columns(left, right),
        space_after: m.pt(15.0),
    }
}

fn education_block(m: &Metrics, entry: &EducationBlock) -> Block {
    let left = date_column(m, &entry.date_range, &entry.location);

    let mut right = wrapped(
        m.config,
        &entry.institution,
        m.style(FontFace::Bold, 10.0, Color::BLACK),
        m.body_x(),
        m.body_width(),
    );
    right.extend(wrapped(
        m.config,
        &entry.degree,
        m.style(FontFace::Regular, 10.0, Color::DARK),
        m.body_x(),
        m.body_width(),
    ));
    if let Some(description) = &entry.description {
        right.extend(wrapped(
            m.config,
            description,
            m.style(FontFace::Regular, 10.0, Color::MUTED),
            m.body_x(),
            m.body_width(),
        ));
    }

    Block {
        rows: two_columns(left, right),
        space_after: m.pt(15.0),
    }
}

fn skill_block(m: &Metrics, line: &SkillLine) -> Block {
    let mut lines = wrapped(
        m.config,
        &line.category,
        m.style(FontFace::Bold, 10.0, Color::BLACK),
        m.left(),
        m.width(),
    );
    lines.extend(wrapped(
        m.config,
        &line.items,
        m.style(FontFace::Regular, 10.0, Color::DARK),
        m.left(),
        m.width(),
    ));
    Block {
        rows: rows(lines),
        space_after: m.pt(8.0),
    }
}

fn complementary_block(m: &Metrics, entry: &ComplementaryBlock) -> Block {
    let left = wrapped(
        m.config,
        &entry.date_range,
        m.style(FontFace::Regular, 9.0, Color::MUTED),
        m.left(),
        m.date_column_width(),
    );
    let mut right = wrapped(
        m.config,
        &entry.title,
        m.style(FontFace::Bold, 10.0, Color::BLACK),
        m.body_x(),
        m.body_width(),
    );
    right.extend(wrapped(
        m.config,
        &entry.institution,
        m.style(FontFace::Regular, 10.0, Color::DARK),
        m.body_x(),
        m.body_width(),
    ));
    right.extend(wrapped(
        m.config,
        &entry.kind,
        m.style(FontFace::Italic, 10.0, Color::MUTED),
        m.body_x(),
        m.body_width(),
    ));
    Block {
        rows: two_columns(left, right),
        space_after: m.pt(8.0),
    }
}

fn language_block(m: &Metrics, line: &LanguageLine) -> Block {
    let name_style = m.style(FontFace::Bold, 11.0, Color::BLACK);
    let level_style = m.style(FontFace::Regular, 11.0, Color::DARK);
    let level_w = get_metrics(level_style.face).width_pt(&line.level, level_style.size);
    Block {
        rows: vec![Row {
            height: m.config.line_height(name_style.size),
            runs: vec![
                run(m.left(), line.language.as_str(), name_style),
                run(m.left() + m.width() - level_w, line.level.as_str(), level_style),
            ],
            underline: false,
        }],
        space_after: m.pt(5.0),
    }
}

/// All blocks of one section, with the title folded into the first.
fn section_blocks(m: &Metrics, section: &Section) -> Vec<Block> {
    let mut blocks: Vec<Block> = match section {
        Section::Links(links) => vec![links_block(m, links)],
        Section::Profile(text) => vec![profile_block(m, text)],
        Section::Experience(entries) => entries.iter().map(|e| experience_block(m, e)).collect(),
        Section::Education(entries) => entries.iter().map(|e| education_block(m, e)).collect(),
        Section::Skills(lines) => lines.iter().map(|l| skill_block(m, l)).collect(),
        Section::Complementary(entries) => {
            entries.iter().map(|e| complementary_block(m, e)).collect()
        }
        Section::Languages(lines) => lines.iter().map(|l| language_block(m, l)).collect(),
    };

    let mut title = title_rows(m, section.title());
    match blocks.first_mut() {
        Some(first) => {
            title.append(&mut first.rows);
            first.rows = title;
        }
        None => blocks.push(Block {
            rows: title,
            space_after: 0.0,
        }),
    }
    // Section gap replaces the last entry's own gap.
    if let Some(last) = blocks.last_mut() {
        last.space_after = last.space_after.max(m.pt(20.0));
    }
    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Page filling
// ────────────────────────────────────────────────────────────────────────────

struct Paginator<'a> {
    config: &'a PageConfig,
    pages: Vec<PageLayout>,
    current: PageLayout,
    y: f32,
    /// Bottom edge of the last row drawn on the current page.
    content_end: f32,
}

impl<'a> Paginator<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            current: PageLayout::default(),
            y: config.content_top(),
            content_end: config.content_top(),
        }
    }

    fn at_page_top(&self) -> bool {
        self.y <= self.config.content_top()
    }

    fn fits(&self, height: f32) -> bool {
        self.y + height <= self.config.content_bottom()
    }

    fn new_page(&mut self) {
        self.current.used_height = self.content_end - self.config.content_top();
        self.pages.push(std::mem::take(&mut self.current));
        self.y = self.config.content_top();
        self.content_end = self.config.content_top();
    }

    fn place(&mut self, block: Block) {
        if !self.fits(block.height()) && !self.at_page_top() {
            self.new_page();
        }
        for row in block.rows {
            if !self.fits(row.height) && !self.at_page_top() {
                self.new_page();
            }
            self.emit_row(row);
        }
        // Trailing space never pushes content onto a new page by itself.
        self.y = (self.y + block.space_after).min(self.config.content_bottom());
    }

    fn emit_row(&mut self, row: Row) {
        let top = self.y;
        for r in row.runs {
            let baseline = top + r.size;
            if let Some(url) = r.link {
                let width = get_metrics(r.face).width_pt(&r.text, r.size);
                self.current.links.push(LinkArea {
                    x: r.x,
                    top,
                    width,
                    height: row.height,
                    url,
                });
            }
            self.current.runs.push(TextRun {
                x: r.x,
                baseline,
                text: r.text,
                face: r.face,
                size: r.size,
                color: r.color,
            });
        }
        self.y += row.height;
        self.content_end = self.y;
        if row.underline {
            let y = self.y - 1.0;
            self.current.rules.push(Rule {
                x1: self.config.margin_pt,
                x2: self.config.margin_pt + self.config.content_width(),
                y,
                thickness: 1.0,
            });
        }
    }

    fn finish(mut self) -> Vec<PageLayout> {
        self.new_page();
        self.pages
    }
}

/// Lays the projected résumé out on pages of `config`'s size.
pub fn paginate(resume: &ProjectedResume, config: &PageConfig) -> PaginatedDocument {
    let m = Metrics::new(config);
    let mut paginator = Paginator::new(config);

    paginator.place(header_block(&m, &resume.header));
    for section in &resume.sections {
        for block in section_blocks(&m, section) {
            paginator.place(block);
        }
    }

    let pages = paginator.finish();
    debug!(pages = pages.len(), "Paginated document");
    PaginatedDocument {
        config: config.clone(),
        pages,
    }
}
