//! Archive handling for DOCX files
//!
//! DOCX files are ZIP archives of XML parts. The whole package is unpacked
//! into memory; transcripts are small.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use zip::read::ZipArchive;
use zip::write::ZipWriter;
use zip::CompressionMethod;

use crate::error::{OoxmlError, Result};

/// Path of the main document part
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Path of the package content types part
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Represents an unpacked OOXML document
#[derive(Debug, Default)]
pub struct OoxmlArchive {
    /// All files in the archive, keyed by path
    files: HashMap<String, Vec<u8>>,
}

impl OoxmlArchive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Open and unpack a DOCX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut files = HashMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(name, contents);
        }

        Ok(Self { files })
    }

    /// Get a file's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_slice())
    }

    /// Get a file's contents as a string
    pub fn get_string(&self, path: &str) -> Result<Option<String>> {
        match self.files.get(path) {
            Some(bytes) => {
                let s = String::from_utf8_lossy(bytes).into_owned();
                Ok(Some(s))
            }
            None => Ok(None),
        }
    }

    /// Get the main document content (word/document.xml)
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.get(DOCUMENT_PART)
            .ok_or_else(|| OoxmlError::MissingFile(DOCUMENT_PART.to_string()))
    }

    /// Check if a file exists in the archive
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Number of files in the archive
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the archive holds no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Set or update a file's contents
    pub fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.files.insert(path.into(), contents);
    }

    /// Set a file's contents from a string
    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into().into_bytes());
    }

    /// Write the archive to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Write the archive to any writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated);

        // [Content_Types].xml first, then sorted for deterministic output
        let mut paths: Vec<_> = self.files.keys().collect();
        paths.sort_by(|a, b| {
            let a_key = (a.as_str() != CONTENT_TYPES_PART, a.as_str());
            let b_key = (b.as_str() != CONTENT_TYPES_PART, b.as_str());
            a_key.cmp(&b_key)
        });

        for path in paths {
            let contents = &self.files[path];
            zip.start_file(path.as_str(), options)?;
            zip.write_all(contents)?;
        }

        zip.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_file_operations() {
        let mut archive = OoxmlArchive::new();
        assert!(archive.is_empty());

        archive.set_string("test.xml", "<root/>");
        assert!(archive.contains("test.xml"));
        assert_eq!(archive.len(), 1);
        assert_eq!(
            archive.get_string("test.xml").unwrap(),
            Some("<root/>".to_string())
        );
        assert_eq!(archive.get_string("missing.xml").unwrap(), None);
    }

    #[test]
    fn test_document_xml_missing() {
        let archive = OoxmlArchive::new();
        let err = archive.document_xml().unwrap_err();
        assert!(matches!(err, OoxmlError::MissingFile(ref p) if p == DOCUMENT_PART));
    }

    #[test]
    fn test_roundtrip_through_buffer() {
        let mut archive = OoxmlArchive::new();
        archive.set_string("word/document.xml", "<w:document/>");
        archive.set_string("[Content_Types].xml", "<Types/>");
        archive.set("docProps/app.xml", b"<Properties/>".to_vec());

        let mut buffer = Cursor::new(Vec::new());
        archive.write_to(&mut buffer).unwrap();

        buffer.set_position(0);
        {
            let mut zip = ZipArchive::new(&mut buffer).unwrap();
            assert_eq!(zip.by_index(0).unwrap().name(), CONTENT_TYPES_PART);
        }

        buffer.set_position(0);
        let restored = OoxmlArchive::from_reader(buffer).unwrap();
        assert_eq!(restored.len(), 3);
        assert_eq!(restored.document_xml().unwrap(), b"<w:document/>");
    }

    #[test]
    fn test_from_reader_rejects_non_zip() {
        let result = OoxmlArchive::from_reader(Cursor::new(b"not a zip".to_vec()));
        assert!(matches!(result, Err(OoxmlError::Archive(_))));
    }
}
