//! Document to Typst markup
//!
//! Every piece of user text is emitted as a Typst string literal, never as
//! raw markup, so characters such as `#`, `*` or `$` in a client's narrative
//! cannot change the layout.

use std::collections::HashMap;
use std::fmt::Write;

use shared_types::{Align, Cell, Direction, Document, Heading, Image, Node, Paragraph, Run, Table};
use typst::foundations::Bytes;

/// Fallback families appended after the configured one
const FALLBACK_FONTS: [&str; 3] = ["David CLM", "Noto Serif Hebrew", "Libertinus Serif"];

/// Generated source plus the images it references
#[derive(Debug, Clone, Default)]
pub struct TypstMarkup {
    pub source: String,
    /// Virtual path (e.g. "assets/img-0.png") to image bytes
    pub assets: HashMap<String, Bytes>,
}

/// Translate a document into a single Typst source file
pub fn to_markup(document: &Document) -> TypstMarkup {
    let mut writer = MarkupWriter {
        out: String::with_capacity(4096),
        assets: HashMap::new(),
        direction: document.direction,
    };
    writer.preamble(document);
    for node in &document.nodes {
        writer.node(node);
    }
    TypstMarkup {
        source: writer.out,
        assets: writer.assets,
    }
}

/// Quote `text` as a Typst string literal
pub fn string_literal(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => {}
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

/// File extension Typst needs to decode an image
pub fn sniff_extension(data: &[u8]) -> &'static str {
    if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        "png"
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "jpg"
    } else if data.starts_with(b"GIF8") {
        "gif"
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        "webp"
    } else if looks_like_svg(data) {
        "svg"
    } else {
        "png"
    }
}

fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

fn align_keyword(align: Align) -> &'static str {
    match align {
        Align::Start | Align::Justify => "start",
        Align::Center => "center",
        Align::End => "end",
    }
}

struct MarkupWriter {
    out: String,
    assets: HashMap<String, Bytes>,
    direction: Direction,
}

impl MarkupWriter {
    fn preamble(&mut self, document: &Document) {
        let style = &document.style;
        let mut fonts = vec![string_literal(&style.font_family)];
        fonts.extend(FALLBACK_FONTS.iter().map(|font| string_literal(font)));
        let (lang, dir) = match document.direction {
            Direction::Rtl => ("he", "rtl"),
            Direction::Ltr => ("en", "ltr"),
        };
        // Typst's default leading is 0.65em at single spacing
        let leading = 0.65 * style.line_spacing.max(1.0);

        let _ = writeln!(self.out, "#set document(title: {})", string_literal(&document.title));
        let _ = writeln!(self.out, "#set page(paper: \"a4\", margin: (x: 2.5cm, y: 2cm))");
        let _ = writeln!(
            self.out,
            "#set text(font: ({},), size: {}pt, lang: \"{}\", dir: {})",
            fonts.join(", "),
            style.body_size,
            lang,
            dir
        );
        let _ = writeln!(self.out, "#set par(leading: {:.2}em)", leading);
        self.out.push('\n');
    }

    fn node(&mut self, node: &Node) {
        match node {
            Node::Heading(heading) => self.heading(heading),
            Node::Paragraph(paragraph) => self.paragraph(paragraph),
            Node::Table(table) => self.table(table),
            Node::Image(image) => self.image(image),
            Node::PageBreak => self.out.push_str("#pagebreak(weak: true)\n\n"),
        }
    }

    fn heading(&mut self, heading: &Heading) {
        let mut body = format!(
            "text(size: {}pt, weight: \"bold\", {})",
            heading.size,
            string_literal(&heading.text)
        );
        if heading.underline {
            body = format!("underline({})", body);
        }
        let _ = writeln!(
            self.out,
            "#block(width: 100%, above: 1.2em, below: 0.8em, align({}, {}))\n",
            align_keyword(heading.align),
            body
        );
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        if paragraph.runs.iter().all(|run| run.text.is_empty()) {
            self.out.push_str("#v(0.65em)\n\n");
            return;
        }

        let runs: String = paragraph.runs.iter().map(run_expr).collect();
        let justify = paragraph.align == Align::Justify;
        let mut body = format!(
            "align({}, par(justify: {}, [{}]))",
            align_keyword(paragraph.align),
            justify,
            runs
        );
        if paragraph.indent > 0 {
            let side = match self.direction {
                Direction::Rtl => "right",
                Direction::Ltr => "left",
            };
            body = format!("pad({}: {}em, {})", side, 1.5 * f32::from(paragraph.indent), body);
        }
        let _ = writeln!(self.out, "#block(width: 100%, {})\n", body);
    }

    fn table(&mut self, table: &Table) {
        let columns = table.columns.len().max(1);
        let widths: Vec<String> = if table.columns.is_empty() {
            vec!["1fr".to_string()]
        } else {
            table
                .columns
                .iter()
                .map(|width| format!("{}fr", (*width).max(1)))
                .collect()
        };
        let stroke = if table.borders { "0.5pt" } else { "none" };

        let _ = writeln!(
            self.out,
            "#table(\n  columns: ({},),\n  stroke: {},\n  inset: 5pt,",
            widths.join(", "),
            stroke
        );
        for row in &table.rows {
            let cells = row
                .iter()
                .map(Some)
                .chain(std::iter::repeat(None))
                .take(columns);
            let rendered: Vec<String> = cells.map(cell_expr).collect();
            let _ = writeln!(self.out, "  {},", rendered.join(", "));
        }
        self.out.push_str(")\n\n");
    }

    fn image(&mut self, image: &Image) {
        let path = format!(
            "assets/img-{}.{}",
            self.assets.len(),
            sniff_extension(&image.data)
        );
        let _ = writeln!(
            self.out,
            "#align({}, image({}, width: {}mm))\n",
            align_keyword(image.align),
            string_literal(&format!("/{}", path)),
            image.width_mm
        );
        self.assets.insert(path, Bytes::from(image.data.clone()));
    }
}

fn run_expr(run: &Run) -> String {
    let mut args = Vec::new();
    if run.bold {
        args.push("weight: \"bold\"".to_string());
    }
    if run.italic {
        args.push("style: \"italic\"".to_string());
    }
    if let Some(size) = run.size {
        args.push(format!("size: {}pt", size));
    }
    args.push(string_literal(&run.text));

    let text = format!("text({})", args.join(", "));
    if run.underline {
        format!("#underline({})", text)
    } else {
        format!("#{}", text)
    }
}

fn cell_expr(cell: Option<&Cell>) -> String {
    match cell {
        None => "[]".to_string(),
        Some(cell) => {
            let runs: String = cell.runs.iter().map(run_expr).collect();
            if cell.shaded {
                format!("table.cell(fill: luma(230), [{}])", runs)
            } else {
                format!("[{}]", runs)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::StyleConfig;

    fn document(nodes: Vec<Node>) -> Document {
        let mut doc = Document::new("כתב תביעה", StyleConfig::default());
        doc.extend(nodes);
        doc
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("a\"b\\c"), "\"a\\\"b\\\\c\"");
        assert_eq!(string_literal("שורה\nשנייה\r"), "\"שורה\\nשנייה\"");
        assert_eq!(string_literal("#set *bold* $x$"), "\"#set *bold* $x$\"");
    }

    #[test]
    fn test_preamble_is_hebrew_rtl() {
        let markup = to_markup(&document(vec![]));
        assert!(markup.source.contains("lang: \"he\", dir: rtl"));
        assert!(markup.source.contains("font: (\"David\", \"David CLM\""));
        assert!(markup.source.contains("size: 12pt"));
        assert!(markup.source.contains("#set par(leading: 0.9"));
    }

    #[test]
    fn test_paragraph_runs() {
        let paragraph = Paragraph::new(vec![Run::bold("סכום התביעה: "), Run::plain("100 ₪")]);
        let markup = to_markup(&document(vec![Node::Paragraph(paragraph)]));
        assert!(markup.source.contains(
            "[#text(weight: \"bold\", \"סכום התביעה: \")#text(\"100 ₪\")]"
        ));
    }

    #[test]
    fn test_indented_paragraph_pads_the_start_side() {
        let paragraph = Paragraph::new(vec![Run::plain("• פריט")]).indented(1);
        let markup = to_markup(&document(vec![Node::Paragraph(paragraph)]));
        assert!(markup.source.contains("pad(right: 1.5em"));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = Table::new(vec![1, 2, 1]).row(vec![Cell::header("שם"), Cell::text("דנה")]);
        let markup = to_markup(&document(vec![Node::Table(table)]));
        assert!(markup.source.contains("columns: (1fr, 2fr, 1fr,)"));
        assert!(markup.source.contains(
            "table.cell(fill: luma(230), [#text(weight: \"bold\", \"שם\")]), [#text(\"דנה\")], []"
        ));
    }

    #[test]
    fn test_images_become_assets() {
        let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A];
        let jpg = vec![0xFF, 0xD8, 0xFF, 0xE0];
        let markup = to_markup(&document(vec![
            Node::Image(Image {
                data: png,
                width_mm: 45,
                align: Align::End,
            }),
            Node::PageBreak,
            Node::Image(Image {
                data: jpg,
                width_mm: 160,
                align: Align::Center,
            }),
        ]));

        assert_eq!(markup.assets.len(), 2);
        assert!(markup.assets.contains_key("assets/img-0.png"));
        assert!(markup.assets.contains_key("assets/img-1.jpg"));
        assert!(markup
            .source
            .contains("#align(end, image(\"/assets/img-0.png\", width: 45mm))"));
        assert!(markup.source.contains("#pagebreak(weak: true)"));
    }

    #[test]
    fn test_sniff_svg() {
        assert_eq!(sniff_extension(b"<?xml version=\"1.0\"?><svg></svg>"), "svg");
        assert_eq!(sniff_extension(b"GIF89a"), "gif");
        assert_eq!(sniff_extension(b"unknown"), "png");
    }
}
