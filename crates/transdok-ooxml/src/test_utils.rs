//! Shared test utilities for transdok-ooxml
//!
//! Builds small transcript DOCX fixtures in memory.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

use crate::archive::OoxmlArchive;

/// Create a minimal valid DOCX whose body holds one paragraph per entry
pub fn create_transcript_docx(paragraphs: &[&str]) -> Vec<u8> {
    let mut body = String::new();
    for text in paragraphs {
        body.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
        body.push_str(
            &text
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;"),
        );
        body.push_str("</w:t></w:r></w:p>\n");
    }
    create_docx_with_body(&body)
}

/// Create a minimal valid DOCX around raw `w:body` content
pub fn create_docx_with_body(body: &str) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    // [Content_Types].xml
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#,
    )
    .unwrap();

    // _rels/.rels
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#,
    )
    .unwrap();

    // word/document.xml
    zip.start_file("word/document.xml", options).unwrap();
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
{}  </w:body>
</w:document>"#,
        body
    );
    zip.write_all(document.as_bytes()).unwrap();

    zip.finish().unwrap();
    buffer.into_inner()
}

/// Extract document.xml content from a DOCX byte array
pub fn extract_document_xml(docx: &[u8]) -> String {
    let cursor = Cursor::new(docx);
    let archive = OoxmlArchive::from_reader(cursor).unwrap();
    archive.get_string("word/document.xml").unwrap().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn test_create_transcript_docx() {
        let docx = create_transcript_docx(&["JOHN: a < b", "plain"]);

        let archive = OoxmlArchive::from_reader(Cursor::new(&docx)).unwrap();
        assert!(archive.contains("[Content_Types].xml"));
        assert!(archive.contains("_rels/.rels"));

        let doc = Document::parse(archive.document_xml().unwrap()).unwrap();
        assert_eq!(doc.paragraph_texts(), vec!["JOHN: a < b", "plain"]);
    }

    #[test]
    fn test_extract_document_xml() {
        let docx = create_docx_with_body("<w:p/>");
        let doc_xml = extract_document_xml(&docx);

        assert!(doc_xml.contains("w:document"));
        assert!(doc_xml.contains("<w:p/>"));
    }
}
