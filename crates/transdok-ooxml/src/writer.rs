//! DOCX Writer
//!
//! Writes a [`TranscriptLayout`] as a new DOCX package holding a single
//! borderless two-column table. No template is needed: every part of the
//! package is generated here.
//!
//! # Example
//!
//! ```ignore
//! use transdok_core::{Settings, TranscriptTransformer};
//! use transdok_ooxml::TranscriptWriter;
//!
//! let settings = Settings::default();
//! let layout = TranscriptTransformer::new(&settings).transform(paragraphs);
//! let output = TranscriptWriter::new(&settings).generate(&layout)?;
//! std::fs::write("output.docx", output)?;
//! ```

use std::io::Cursor;

use tracing::debug;
use transdok_core::{Row, Settings, TranscriptLayout};

use crate::archive::{OoxmlArchive, CONTENT_TYPES_PART, DOCUMENT_PART};
use crate::error::Result;
use crate::units::{cm_to_twips, inches_to_twips, points_to_half_points, points_to_twentieths};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/settings.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings" Target="settings.xml"/>
</Relationships>"#;

const SETTINGS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:defaultTabStop w:val="720"/>
  <w:compat>
    <w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/>
  </w:compat>
</w:settings>"#;

const APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">
  <Application>transdok</Application>
</Properties>"#;

/// DOCX Writer for two-column transcript tables
pub struct TranscriptWriter {
    /// XML output buffer
    output: String,
    /// Layout settings (fonts, widths, margins, colors)
    settings: Settings,
    /// Document title for docProps/core.xml
    title: Option<String>,
}

impl TranscriptWriter {
    /// Create a writer for the given settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            output: String::new(),
            settings: settings.clone(),
            title: None,
        }
    }

    /// Set the document title stored in the core properties
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Generate the DOCX package as bytes
    pub fn generate(&mut self, layout: &TranscriptLayout) -> Result<Vec<u8>> {
        let archive = self.build_archive(layout);

        let mut output = Cursor::new(Vec::new());
        archive.write_to(&mut output)?;

        Ok(output.into_inner())
    }

    /// Assemble every package part in memory
    pub fn build_archive(&mut self, layout: &TranscriptLayout) -> OoxmlArchive {
        let mut archive = OoxmlArchive::new();

        archive.set_string(CONTENT_TYPES_PART, CONTENT_TYPES_XML);
        archive.set_string("_rels/.rels", PACKAGE_RELS_XML);
        archive.set_string("word/_rels/document.xml.rels", DOCUMENT_RELS_XML);
        archive.set_string("word/settings.xml", SETTINGS_XML);
        archive.set_string("word/styles.xml", self.generate_styles_xml());
        archive.set_string(DOCUMENT_PART, self.generate_document_xml(layout));
        archive.set_string("docProps/core.xml", self.generate_core_xml());
        archive.set_string("docProps/app.xml", APP_XML);

        archive
    }

    /// Generate word/styles.xml with the body font as document default
    fn generate_styles_xml(&self) -> String {
        let fonts = &self.settings.fonts;
        let rfonts = font_element(&fonts.family);
        let size = points_to_half_points(fonts.body_size);

        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!("<w:styles xmlns:w=\"{}\">\n", W_NS));
        xml.push_str("<w:docDefaults>\n<w:rPrDefault>\n<w:rPr>\n");
        xml.push_str(&rfonts);
        xml.push_str(&format!(
            "<w:sz w:val=\"{}\"/>\n<w:szCs w:val=\"{}\"/>\n",
            size, size
        ));
        xml.push_str("</w:rPr>\n</w:rPrDefault>\n<w:pPrDefault/>\n</w:docDefaults>\n");

        xml.push_str(
            "<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\">\n\
             <w:name w:val=\"Normal\"/>\n<w:qFormat/>\n<w:rPr>\n",
        );
        xml.push_str(&rfonts);
        xml.push_str(&format!("<w:sz w:val=\"{}\"/>\n", size));
        xml.push_str("</w:rPr>\n</w:style>\n");

        xml.push_str(
            "<w:style w:type=\"table\" w:default=\"1\" w:styleId=\"TableNormal\">\n\
             <w:name w:val=\"Normal Table\"/>\n<w:tblPr>\n\
             <w:tblInd w:w=\"0\" w:type=\"dxa\"/>\n<w:tblCellMar>\n\
             <w:top w:w=\"0\" w:type=\"dxa\"/>\n<w:left w:w=\"108\" w:type=\"dxa\"/>\n\
             <w:bottom w:w=\"0\" w:type=\"dxa\"/>\n<w:right w:w=\"108\" w:type=\"dxa\"/>\n\
             </w:tblCellMar>\n</w:tblPr>\n</w:style>\n",
        );
        xml.push_str("</w:styles>");
        xml
    }

    /// Generate docProps/core.xml
    fn generate_core_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            "<cp:coreProperties \
             xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
             xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n",
        );
        if let Some(ref title) = self.title {
            xml.push_str(&format!("<dc:title>{}</dc:title>\n", escape_xml(title)));
        }
        xml.push_str("<dc:creator>transdok</dc:creator>\n");
        xml.push_str("</cp:coreProperties>");
        xml
    }

    /// Generate the complete document.xml content
    fn generate_document_xml(&mut self, layout: &TranscriptLayout) -> String {
        self.output.clear();

        self.output
            .push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.output.push('\n');
        self.output.push_str(&format!(
            "<w:document xmlns:w=\"{}\" xmlns:r=\"{}\">\n",
            W_NS, R_NS
        ));
        self.output.push_str("<w:body>\n");

        self.generate_table(&layout.rows);

        // Word expects a paragraph between a trailing table and sectPr
        self.output.push_str("<w:p/>\n");
        self.generate_section_properties();

        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");

        self.output.clone()
    }

    fn speaker_width(&self) -> u32 {
        cm_to_twips(self.settings.table.speaker_width)
    }

    fn content_width(&self) -> u32 {
        cm_to_twips(self.settings.table.content_width)
    }

    /// Generate the borderless two-column table
    fn generate_table(&mut self, rows: &[Row]) {
        let speaker_width = self.speaker_width();
        let content_width = self.content_width();

        self.output.push_str("<w:tbl>\n");
        self.output.push_str("<w:tblPr>\n");
        self.output.push_str(&format!(
            "<w:tblW w:w=\"{}\" w:type=\"dxa\"/>\n",
            speaker_width + content_width
        ));
        self.output.push_str("<w:tblLayout w:type=\"fixed\"/>\n");
        self.output.push_str("<w:tblBorders>\n");
        for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
            self.output
                .push_str(&format!("<w:{} w:val=\"nil\"/>\n", edge));
        }
        self.output.push_str("</w:tblBorders>\n");
        self.output.push_str("</w:tblPr>\n");

        self.output.push_str("<w:tblGrid>\n");
        self.output
            .push_str(&format!("<w:gridCol w:w=\"{}\"/>\n", speaker_width));
        self.output
            .push_str(&format!("<w:gridCol w:w=\"{}\"/>\n", content_width));
        self.output.push_str("</w:tblGrid>\n");

        for row in rows {
            match row {
                Row::Separator { text, bold } => self.generate_separator_row(text, *bold),
                Row::Split { speaker, content } => {
                    self.generate_split_row(speaker.as_deref(), content.as_deref())
                }
            }
        }

        self.output.push_str("</w:tbl>\n");
    }

    /// Full-width row: one cell spanning both grid columns
    fn generate_separator_row(&mut self, text: &str, bold: bool) {
        let width = self.speaker_width() + self.content_width();

        self.output.push_str("<w:tr>\n<w:tc>\n<w:tcPr>\n");
        self.output
            .push_str(&format!("<w:tcW w:w=\"{}\" w:type=\"dxa\"/>\n", width));
        self.output.push_str("<w:gridSpan w:val=\"2\"/>\n");
        self.output.push_str("</w:tcPr>\n");

        self.output.push_str("<w:p>\n");
        self.generate_spacing();
        self.output.push_str("<w:r>\n<w:rPr>\n");
        self.output
            .push_str(&font_element(&self.settings.fonts.family));
        if bold {
            self.output.push_str("<w:b/>\n");
        }
        let size = points_to_half_points(self.settings.fonts.separator_size);
        self.output
            .push_str(&format!("<w:sz w:val=\"{}\"/>\n", size));
        self.output.push_str("</w:rPr>\n");
        self.generate_text(text);
        self.output.push_str("</w:r>\n</w:p>\n");

        self.output.push_str("</w:tc>\n</w:tr>\n");
        debug!("Added separator line: {}", text);
    }

    /// Speaker cell plus content cell
    fn generate_split_row(&mut self, speaker: Option<&str>, content: Option<&str>) {
        let speaker_width = self.speaker_width();
        let content_width = self.content_width();
        let color = self.settings.speaker.color.to_ascii_uppercase();

        self.output.push_str("<w:tr>\n");
        self.generate_cell(speaker_width, speaker, Some(color.as_str()));
        self.generate_cell(content_width, content, None);
        self.output.push_str("</w:tr>\n");

        debug!(
            "Added split content for speaker: {}, content: {}...",
            speaker.unwrap_or(""),
            content.unwrap_or("").chars().take(30).collect::<String>()
        );
    }

    fn generate_cell(&mut self, width: u32, text: Option<&str>, color: Option<&str>) {
        self.output.push_str("<w:tc>\n<w:tcPr>\n");
        self.output
            .push_str(&format!("<w:tcW w:w=\"{}\" w:type=\"dxa\"/>\n", width));
        self.output.push_str("</w:tcPr>\n");

        match text {
            Some(text) => {
                self.output.push_str("<w:p>\n");
                self.generate_spacing();
                self.output.push_str("<w:r>\n");
                if let Some(color) = color {
                    self.output.push_str(&format!(
                        "<w:rPr>\n<w:color w:val=\"{}\"/>\n</w:rPr>\n",
                        color
                    ));
                }
                self.generate_text(text);
                self.output.push_str("</w:r>\n</w:p>\n");
            }
            // Every cell needs at least one paragraph
            None => self.output.push_str("<w:p/>\n"),
        }

        self.output.push_str("</w:tc>\n");
    }

    fn generate_spacing(&mut self) {
        let after = points_to_twentieths(self.settings.fonts.space_after);
        self.output.push_str(&format!(
            "<w:pPr>\n<w:spacing w:after=\"{}\"/>\n</w:pPr>\n",
            after
        ));
    }

    /// Run content; line breaks and tabs become `w:br` and `w:tab`
    fn generate_text(&mut self, text: &str) {
        let mut segment = String::new();
        for ch in text.chars() {
            let marker = match ch {
                '\n' | '\r' => "<w:br/>\n",
                '\t' => "<w:tab/>\n",
                _ => {
                    segment.push(ch);
                    continue;
                }
            };
            self.push_text_segment(&segment);
            segment.clear();
            self.output.push_str(marker);
        }
        self.push_text_segment(&segment);
    }

    fn push_text_segment(&mut self, segment: &str) {
        if segment.is_empty() {
            return;
        }
        self.output.push_str("<w:t xml:space=\"preserve\">");
        self.output.push_str(&escape_xml(segment));
        self.output.push_str("</w:t>\n");
    }

    /// Page size and margins
    fn generate_section_properties(&mut self) {
        let page = &self.settings.page;
        let section = format!(
            "<w:sectPr>\n\
             <w:pgSz w:w=\"{}\" w:h=\"{}\"/>\n\
             <w:pgMar w:top=\"{}\" w:right=\"{}\" w:bottom=\"{}\" w:left=\"{}\" \
             w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/>\n\
             </w:sectPr>\n",
            inches_to_twips(page.width),
            inches_to_twips(page.height),
            inches_to_twips(page.top_margin),
            inches_to_twips(page.right_margin),
            inches_to_twips(page.bottom_margin),
            inches_to_twips(page.left_margin),
        );
        self.output.push_str(&section);
    }
}

/// `w:rFonts` element setting every script slot to one family
fn font_element(family: &str) -> String {
    let family = escape_xml(family);
    format!(
        "<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\" w:cs=\"{0}\" w:eastAsia=\"{0}\"/>\n",
        family
    )
}

/// Escape special XML characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
