use crate::reader::DocumentReader;
use anyhow::{Context, Result};
use rbook::prelude::*;
use rbook::Epub;
use scraper::Html;
use std::path::Path;

pub struct EpubData {
    epub: Epub,
}

impl EpubData {
    /// Raw markup of every XHTML/HTML content document, in manifest order.
    ///
    /// This includes documents left out of the spine, such as the navigation
    /// document. Stylesheets, images and fonts are not content documents.
    pub fn sections(&self) -> Result<Vec<String>> {
        let mut sections = Vec::new();

        for entry in self.epub.manifest().readable_content() {
            let href = entry
                .resource()
                .key()
                .value()
                .unwrap_or("unknown")
                .to_string();

            let bytes = entry
                .read_bytes()
                .with_context(|| format!("Failed to read content document: {}", href))?;

            sections.push(String::from_utf8_lossy(&bytes).into_owned());
        }

        Ok(sections)
    }
}

impl DocumentReader for EpubData {
    fn open(path: &Path) -> Result<Self> {
        let epub = Epub::options()
            .strict(false)
            .open(path)
            .with_context(|| format!("Failed to open EPUB: {}", path.display()))?;
        Ok(Self { epub })
    }

    fn text(&self) -> Result<String> {
        let mut text = String::new();
        for html in self.sections()? {
            text.push_str(&strip_markup(&html));
            text.push('\n');
        }
        Ok(text)
    }
}

/// Concatenate every text node of an HTML document.
pub fn strip_markup(html: &str) -> String {
    Html::parse_document(html).root_element().text().collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::reader::read_text;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    const CONTAINER: &str = r#"<?xml version="1.0" encoding="UTF-8"?><container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container"><rootfiles><rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/></rootfiles></container>"#;

    const OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="uid">urn:uuid:6f1c2d3e-0000-4000-8000-000000000001</dc:identifier>
    <dc:title>Fixture</dc:title>
    <dc:language>en</dc:language>
    <meta property="dcterms:modified">2024-01-01T00:00:00Z</meta>
  </metadata>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item id="style" href="style.css" media-type="text/css"/>
    <item id="c1" href="c1.xhtml" media-type="application/xhtml+xml"/>
    <item id="c2" href="c2.xhtml" media-type="application/xhtml+xml"/>
    <item id="notes" href="notes.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine>
    <itemref idref="c1"/>
    <itemref idref="c2"/>
  </spine>
</package>"#;

    const NAV: &str = r#"<?xml version="1.0" encoding="UTF-8"?><html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops"><head><title>Contents</title></head><body><nav epub:type="toc"><ol><li><a href="c1.xhtml">One</a></li><li><a href="c2.xhtml">Two</a></li></ol></nav></body></html>"#;

    const C1: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><html xmlns=\"http://www.w3.org/1999/xhtml\"><head><title>One</title></head><body><h1>Chapter One</h1>\n<p>It was a <em>dark</em> night.</p></body></html>";

    const C2: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><html xmlns=\"http://www.w3.org/1999/xhtml\"><head><title>Two</title></head><body><p>The end.</p></body></html>";

    const NOTES: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><html xmlns=\"http://www.w3.org/1999/xhtml\"><head></head><body><p>Unlisted notes.</p></body></html>";

    /// Write a two-chapter EPUB 3 book to `path`, plus a nav document and a
    /// notes page that are in the manifest but not in the spine.
    pub(crate) fn write_epub(path: &Path) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        let entries = [
            ("mimetype", "application/epub+zip"),
            ("META-INF/container.xml", CONTAINER),
            ("OEBPS/content.opf", OPF),
            ("OEBPS/nav.xhtml", NAV),
            ("OEBPS/style.css", "p { margin: 0 }"),
            ("OEBPS/c1.xhtml", C1),
            ("OEBPS/c2.xhtml", C2),
            ("OEBPS/notes.xhtml", NOTES),
        ];
        for (name, body) in entries {
            zip.start_file(name, stored).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn strip_markup_keeps_only_text() {
        let html = "<html><body><p>Hello <b>bold</b> &amp; <i>world</i></p></body></html>";
        assert_eq!(strip_markup(html), "Hello bold & world");
    }

    #[test]
    fn content_documents_follow_manifest_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.epub");
        write_epub(&path);

        let data = EpubData::open(&path).unwrap();
        let sections = data.sections().unwrap();
        assert_eq!(sections.len(), 4);
        assert!(sections[0].contains("epub:type=\"toc\""));
        assert!(sections[1].contains("Chapter One"));
        assert!(sections[2].contains("The end."));
        assert!(sections[3].contains("Unlisted notes."));
    }

    #[test]
    fn each_section_ends_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.epub");
        write_epub(&path);

        let text = read_text::<EpubData>(&path).unwrap();
        assert_eq!(
            text,
            "ContentsOneTwo\nOneChapter One\nIt was a dark night.\nTwoThe end.\nUnlisted notes.\n"
        );
        assert!(!text.contains("margin"));
    }

    #[test]
    fn garbage_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.epub");
        std::fs::write(&path, "not a zip").unwrap();

        assert!(EpubData::open(&path).is_err());
    }
}
