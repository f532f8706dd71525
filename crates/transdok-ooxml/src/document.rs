//! Document content parsing (word/document.xml)
//!
//! Extracts the visible text of body paragraphs. Tables are kept as their own
//! blocks so that callers can tell top-level paragraphs apart from cell
//! content. Text box content is ignored.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// A parsed Word document
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Document body blocks
    pub blocks: Vec<Block>,
}

/// Block-level elements
#[derive(Debug, Clone)]
pub enum Block {
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}

/// A paragraph with its text runs
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    /// Text runs in order
    pub runs: Vec<Run>,
}

/// A text run
#[derive(Debug, Clone, Default)]
pub struct Run {
    /// The text content, with tabs and breaks as `\t` and `\n`
    pub text: String,
}

/// A table
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Table rows
    pub rows: Vec<TableRow>,
}

/// A table row
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    /// Cells in this row
    pub cells: Vec<TableCell>,
}

/// A table cell
///
/// Paragraphs of nested tables are flattened into the outer cell.
#[derive(Debug, Clone, Default)]
pub struct TableCell {
    /// Paragraphs in this cell
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Parse a document from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        // Don't trim text - preserve whitespace in runs
        reader.config_mut().trim_text(false);

        let mut blocks = Vec::new();
        let mut buf = Vec::new();

        let mut in_body = false;
        let mut textbox_depth = 0u32;
        let mut table_depth = 0u32;
        let mut in_text_element = false;
        let mut current_para: Option<Paragraph> = None;
        let mut current_run: Option<Run> = None;
        let mut current_table: Option<Table> = None;
        let mut current_row: Option<TableRow> = None;
        let mut current_cell: Option<TableCell> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"body" => in_body = true,
                    b"txbxContent" => textbox_depth += 1,
                    _ if textbox_depth > 0 || !in_body => {}
                    b"tbl" => {
                        table_depth += 1;
                        if table_depth == 1 {
                            current_table = Some(Table::default());
                        }
                    }
                    b"tr" if table_depth == 1 => current_row = Some(TableRow::default()),
                    b"tc" if table_depth == 1 => current_cell = Some(TableCell::default()),
                    b"p" => current_para = Some(Paragraph::default()),
                    b"r" if current_para.is_some() && !is_math(e.name()) => {
                        current_run = Some(Run::default())
                    }
                    b"t" if current_run.is_some() => in_text_element = true,
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"body" => in_body = false,
                    b"txbxContent" => textbox_depth = textbox_depth.saturating_sub(1),
                    _ if textbox_depth > 0 || !in_body => {}
                    b"t" => in_text_element = false,
                    b"r" if !is_math(e.name()) => {
                        if let (Some(run), Some(para)) = (current_run.take(), current_para.as_mut())
                        {
                            if !run.text.is_empty() {
                                para.runs.push(run);
                            }
                        }
                    }
                    b"p" => {
                        if let Some(para) = current_para.take() {
                            if table_depth == 0 {
                                blocks.push(Block::Paragraph(para));
                            } else if let Some(cell) = current_cell.as_mut() {
                                cell.paragraphs.push(para);
                            }
                        }
                    }
                    b"tc" if table_depth == 1 => {
                        if let (Some(cell), Some(row)) = (current_cell.take(), current_row.as_mut())
                        {
                            row.cells.push(cell);
                        }
                    }
                    b"tr" if table_depth == 1 => {
                        if let (Some(row), Some(table)) =
                            (current_row.take(), current_table.as_mut())
                        {
                            table.rows.push(row);
                        }
                    }
                    b"tbl" => {
                        table_depth = table_depth.saturating_sub(1);
                        if table_depth == 0 {
                            if let Some(table) = current_table.take() {
                                blocks.push(Block::Table(table));
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    _ if textbox_depth > 0 || !in_body => {}
                    b"p" => {
                        // Self-closing paragraph is an empty line
                        if table_depth == 0 {
                            blocks.push(Block::Paragraph(Paragraph::default()));
                        } else if let Some(cell) = current_cell.as_mut() {
                            cell.paragraphs.push(Paragraph::default());
                        }
                    }
                    name => {
                        if let Some(run) = current_run.as_mut() {
                            match name {
                                b"tab" | b"ptab" => run.text.push('\t'),
                                b"br" if is_page_or_column_break(e) => {}
                                b"br" | b"cr" => run.text.push('\n'),
                                b"noBreakHyphen" => run.text.push('-'),
                                _ => {}
                            }
                        }
                    }
                },
                Ok(Event::Text(ref e)) => {
                    // Only capture text inside <w:t> elements, not <w:instrText>
                    if in_text_element && textbox_depth == 0 {
                        if let Some(run) = current_run.as_mut() {
                            let text = e.unescape().unwrap_or_default();
                            run.text.push_str(&text);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Document { blocks })
    }

    /// Top-level body paragraphs, excluding table content
    pub fn body_paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    /// Plain text of every top-level body paragraph, in order
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.body_paragraphs().map(|p| p.plain_text()).collect()
    }

    /// Get all paragraphs (flattening tables)
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().flat_map(|block| match block {
            Block::Paragraph(p) => vec![p].into_iter(),
            Block::Table(t) => t
                .rows
                .iter()
                .flat_map(|r| r.cells.iter())
                .flat_map(|c| c.paragraphs.iter())
                .collect::<Vec<_>>()
                .into_iter(),
        })
    }
}

/// Office Math runs (`m:r`) share the local name of text runs
fn is_math(name: QName) -> bool {
    name.prefix().is_some_and(|prefix| prefix.as_ref() == b"m")
}

/// Page and column breaks carry no text; only text-wrapping breaks do
fn is_page_or_column_break(e: &BytesStart) -> bool {
    e.attributes().flatten().any(|attr| {
        attr.key.local_name().as_ref() == b"type"
            && matches!(attr.value.as_ref(), b"page" | b"column")
    })
}

impl Paragraph {
    /// Get plain text of this paragraph
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if this paragraph has no visible text
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap_body(body: &str) -> Vec<u8> {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>{}</w:body>
</w:document>"#,
            body
        )
        .into_bytes()
    }

    #[test]
    fn test_parse_simple_paragraph() {
        let xml = wrap_body("<w:p><w:r><w:t>Hello, world!</w:t></w:r></w:p>");
        let doc = Document::parse(&xml).unwrap();
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.paragraph_texts(), vec!["Hello, world!"]);
    }

    #[test]
    fn test_multiple_runs_concatenation() {
        let xml = wrap_body(
            r#"<w:p>
                <w:r><w:rPr><w:b/></w:rPr><w:t>JOHN:</w:t></w:r>
                <w:r><w:t xml:space="preserve"> Hello </w:t></w:r>
                <w:r><w:t>there</w:t></w:r>
            </w:p>"#,
        );
        let doc = Document::parse(&xml).unwrap();
        assert_eq!(doc.paragraph_texts(), vec!["JOHN: Hello there"]);
    }

    #[test]
    fn test_ignore_field_codes() {
        let xml = wrap_body(
            r#"<w:p>
                <w:r><w:fldChar w:fldCharType="begin"/></w:r>
                <w:r><w:instrText>PAGE \* MERGEFORMAT</w:instrText></w:r>
                <w:r><w:fldChar w:fldCharType="separate"/></w:r>
                <w:r><w:t>3</w:t></w:r>
                <w:r><w:fldChar w:fldCharType="end"/></w:r>
            </w:p>"#,
        );
        let doc = Document::parse(&xml).unwrap();
        assert_eq!(doc.paragraph_texts(), vec!["3"]);
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:t>0:15</w:t><w:tab/><w:t>ANNA:</w:t><w:br/><w:t>Hi</w:t></w:r></w:p>"#,
        );
        let doc = Document::parse(&xml).unwrap();
        assert_eq!(doc.paragraph_texts(), vec!["0:15\tANNA:\nHi"]);
    }

    #[test]
    fn test_page_and_column_breaks_dropped() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:t>one</w:t><w:br w:type="page"/><w:t>two</w:t><w:br w:type="column"/><w:t>three</w:t><w:br w:type="textWrapping"/><w:t>four</w:t></w:r></w:p>"#,
        );
        let doc = Document::parse(&xml).unwrap();
        assert_eq!(doc.paragraph_texts(), vec!["onetwothree\nfour"]);
    }

    #[test]
    fn test_content_control_paragraphs_read() {
        let xml = wrap_body(
            r#"<w:sdt><w:sdtPr/><w:sdtContent><w:p><w:r><w:t>IN SDT</w:t></w:r></w:p></w:sdtContent></w:sdt>
               <w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        );
        let doc = Document::parse(&xml).unwrap();
        assert_eq!(doc.paragraph_texts(), vec!["IN SDT", "after"]);
    }

    #[test]
    fn test_math_runs_ignored() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
            xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math">
  <w:body><w:p><w:r><w:t>x is </w:t></w:r><m:oMath><m:r><m:t>y+1</m:t></m:r></m:oMath></w:p></w:body>
</w:document>"#;
        let doc = Document::parse(xml.as_bytes()).unwrap();
        assert_eq!(doc.paragraph_texts(), vec!["x is "]);
    }

    #[test]
    fn test_escaped_text() {
        let xml = wrap_body("<w:p><w:r><w:t>Tom &amp; Jerry &lt;3</w:t></w:r></w:p>");
        let doc = Document::parse(&xml).unwrap();
        assert_eq!(doc.paragraph_texts(), vec!["Tom & Jerry <3"]);
    }

    #[test]
    fn test_empty_paragraphs_kept() {
        let xml = wrap_body("<w:p/><w:p></w:p><w:p><w:r><w:t>x</w:t></w:r></w:p>");
        let doc = Document::parse(&xml).unwrap();
        assert_eq!(doc.paragraph_texts(), vec!["", "", "x"]);
        let first = doc.body_paragraphs().next().unwrap();
        assert!(first.is_empty());
    }

    #[test]
    fn test_table_paragraphs_excluded_from_body() {
        let xml = wrap_body(
            r#"<w:p><w:r><w:t>Intro</w:t></w:r></w:p>
            <w:tbl>
                <w:tr>
                    <w:tc><w:p><w:r><w:t>Cell 1</w:t></w:r></w:p></w:tc>
                    <w:tc><w:p><w:r><w:t>Cell 2</w:t></w:r></w:p></w:tc>
                </w:tr>
            </w:tbl>
            <w:p><w:r><w:t>Outro</w:t></w:r></w:p>"#,
        );
        let doc = Document::parse(&xml).unwrap();
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.paragraph_texts(), vec!["Intro", "Outro"]);

        let Block::Table(t) = &doc.blocks[1] else {
            panic!("Expected Table");
        };
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0].cells.len(), 2);
        assert_eq!(t.rows[0].cells[1].paragraphs[0].plain_text(), "Cell 2");
        assert_eq!(doc.paragraphs().count(), 4);
    }

    #[test]
    fn test_nested_table_flattened_into_cell() {
        let xml = wrap_body(
            r#"<w:tbl><w:tr><w:tc>
                <w:p><w:r><w:t>Outer</w:t></w:r></w:p>
                <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
            </w:tc></w:tr></w:tbl>"#,
        );
        let doc = Document::parse(&xml).unwrap();
        assert_eq!(doc.blocks.len(), 1);
        let Block::Table(t) = &doc.blocks[0] else {
            panic!("Expected Table");
        };
        let texts: Vec<_> = t.rows[0].cells[0]
            .paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect();
        assert_eq!(texts, vec!["Outer", "Inner"]);
    }

    #[test]
    fn test_textbox_content_ignored() {
        let xml = wrap_body(
            r#"<w:p>
                <w:r><w:t>Visible</w:t></w:r>
                <w:r><w:drawing><wps:wsp><wps:txbx><w:txbxContent>
                    <w:p><w:r><w:t>Hidden</w:t></w:r></w:p>
                </w:txbxContent></wps:txbx></wps:wsp></w:drawing></w:r>
            </w:p>"#,
        );
        let doc = Document::parse(&xml).unwrap();
        assert_eq!(doc.paragraph_texts(), vec!["Visible"]);
    }

    #[test]
    fn test_parse_empty_document() {
        let xml = wrap_body("");
        let doc = Document::parse(&xml).unwrap();
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn test_parse_malformed_xml() {
        let result = Document::parse(b"<w:document><w:body><w:p></w:body>");
        assert!(matches!(result, Err(OoxmlError::Xml(_))));
    }
}
