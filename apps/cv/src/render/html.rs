//! Standalone HTML preview of a projected résumé.
//!
//! The page is a handlebars template rendered with the projection as its
//! context; handlebars escapes every interpolated value. The print button
//! carries `no-print` and is hidden by the print stylesheet.

use handlebars::Handlebars;
use serde::Serialize;

use crate::errors::RenderError;
use crate::layout::projector::{Header, ProjectedResume, Section};

const PREVIEW_TEMPLATE: &str = "preview";

const WHEN_PARTIAL: &str = r#"<div class="when"><div class="dates">{{date_range}}</div>{{#if location}}<div class="place">{{location}}</div>{{/if}}</div>"#;

const PREVIEW: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>{{header.name_line}}</title>
<style>
  body { margin: 0; background: #f3f3f3; font-family: "Times New Roman", Times, serif; color: #000; }
  .actions { display: flex; justify-content: flex-end; max-width: 21cm; margin: 1rem auto; }
  .actions button { font: inherit; padding: .4rem 1rem; border: 1px solid #444; background: #fff; color: #000; cursor: pointer; }
  .sheet { box-sizing: border-box; width: 21cm; min-height: 29.7cm; margin: 0 auto 2rem; padding: 50pt; background: #fff; box-shadow: 0 0 8px rgba(0,0,0,.2); }
  header { text-align: center; margin-bottom: 20pt; }
  header h1 { font-size: 15pt; margin: 0 0 6pt; }
  header p { font-size: 11pt; color: #444; margin: 0; }
  section { margin-bottom: 20pt; }
  h2 { font-size: 14pt; border-bottom: 1px solid #000; margin: 0 0 8pt; padding-bottom: 2pt; }
  .entry { display: flex; margin-bottom: 15pt; font-size: 10pt; }
  .when { width: 30%; padding-right: 15pt; box-sizing: border-box; }
  .when .dates { font-size: 9pt; color: #666; }
  .when .place { color: #444; }
  .what { width: 70%; }
  .what ul { margin: 0; padding-left: 15pt; }
  .strong { font-weight: bold; }
  .dim { color: #444; }
  .muted { color: #666; }
  .kind { font-style: italic; color: #666; }
  .links a { color: #0066cc; text-decoration: none; }
  .links, .profile, .skill { font-size: 10pt; }
  .profile { white-space: pre-line; margin: 0; }
  .skill { margin-bottom: 8pt; }
  .language { display: flex; justify-content: space-between; font-size: 11pt; margin-bottom: 5pt; }
  @page { size: A4; margin: 0; }
  @media print {
    body { background: #fff; }
    .no-print { display: none !important; }
    .sheet { margin: 0; box-shadow: none; }
  }
</style>
</head>
<body>
<div class="actions no-print"><button type="button" onclick="window.print()">Imprimir</button></div>
<main class="sheet">
<header>
<h1>{{header.name_line}}</h1>
{{#if header.contact_line}}<p>{{header.contact_line}}</p>
{{/if}}
</header>
{{#each sections}}
<section>
<h2>{{title}}</h2>
{{#if links}}<p class="links">{{#each links}}{{#unless @first}} • {{/unless}}<a href="{{url}}" target="_blank" rel="noopener">{{label}}</a>{{/each}}</p>
{{/if}}
{{#if Profile}}<p class="profile">{{Profile}}</p>
{{/if}}
{{#each Experience}}
<div class="entry">{{> when}}<div class="what"><div class="strong">{{heading}}</div>{{#if bullets}}<ul>{{#each bullets}}<li>{{this}}</li>{{/each}}</ul>{{/if}}</div></div>
{{/each}}
{{#each Education}}
<div class="entry">{{> when}}<div class="what"><div class="strong">{{institution}}</div><div class="dim">{{degree}}</div>{{#if description}}<div class="muted">{{description}}</div>{{/if}}</div></div>
{{/each}}
{{#each Skills}}
<div class="skill"><div class="strong">{{category}}</div><div class="dim">{{items}}</div></div>
{{/each}}
{{#each Complementary}}
<div class="entry">{{> when}}<div class="what"><div class="strong">{{title}}</div><div class="dim">{{institution}}</div><div class="kind">{{kind}}</div></div></div>
{{/each}}
{{#each Languages}}
<div class="language"><span class="strong">{{language}}</span><span class="dim">{{level}}</span></div>
{{/each}}
</section>
{{/each}}
</main>
</body>
</html>
"#;

#[derive(Serialize)]
struct PreviewContext<'a> {
    header: &'a Header,
    sections: Vec<SectionContext<'a>>,
}

/// A section plus its title; the body serializes under its variant name
/// (`Experience`, `Skills`, ...) so the template can branch on it.
#[derive(Serialize)]
struct SectionContext<'a> {
    title: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    links: Vec<LinkContext<'a>>,
    #[serde(flatten)]
    body: &'a Section,
}

#[derive(Serialize)]
struct LinkContext<'a> {
    label: &'static str,
    url: &'a str,
}

impl<'a> PreviewContext<'a> {
    fn new(resume: &'a ProjectedResume) -> Self {
        let sections = resume
            .sections
            .iter()
            .map(|section| SectionContext {
                title: section.title(),
                links: match section {
                    Section::Links(links) => links
                        .iter()
                        .map(|l| LinkContext {
                            label: l.label(),
                            url: &l.url,
                        })
                        .collect(),
                    _ => Vec::new(),
                },
                body: section,
            })
            .collect();
        Self {
            header: &resume.header,
            sections,
        }
    }
}

/// Holds the registered preview template; build once, render many times.
pub struct PreviewRenderer {
    registry: Handlebars<'static>,
}

impl PreviewRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.register_partial("when", WHEN_PARTIAL)?;
        registry.register_template_string(PREVIEW_TEMPLATE, PREVIEW)?;
        Ok(Self { registry })
    }

    /// Renders a complete HTML document for the browser preview.
    pub fn render(&self, resume: &ProjectedResume) -> Result<String, RenderError> {
        let html = self
            .registry
            .render(PREVIEW_TEMPLATE, &PreviewContext::new(resume))?;
        Ok(html)
    }
}
