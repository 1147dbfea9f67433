use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::debug;

use crate::objects::{ObjId, PdfObject};
use crate::shape::Shape;
use crate::writer::PdfWriter;

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FIRST_PAGE_OBJ_NUM: u32 = 3;

/// High-level API for building PDF documents.
///
/// Generic over `Write` so it works with files (`BufWriter<File>`),
/// in-memory buffers (`Vec<u8>`), or any other writer.
///
/// Pages are written incrementally: `end_page()` flushes page data
/// to the writer and frees page content from memory. Vector drawing
/// is collected in a [`Shape`] and placed on the open page with
/// [`commit_shape`](PdfDocument::commit_shape).
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    page_obj_ids: Vec<ObjId>,
    current_page: Option<PageBuilder>,
    next_obj_num: u32,
    compress: bool,
}

struct PageBuilder {
    width: f64,
    height: f64,
    content_ops: Vec<u8>,
}

impl PdfDocument<BufWriter<File>> {
    /// Create a new PDF document that writes to a file.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> PdfDocument<W> {
    /// Create a new PDF document that writes to the given writer.
    /// Writes the PDF header immediately.
    pub fn new(writer: W) -> io::Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;

        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            page_obj_ids: Vec::new(),
            current_page: None,
            next_obj_num: FIRST_PAGE_OBJ_NUM,
            compress: false,
        })
    }

    /// Enable or disable Flate compression of page content streams.
    /// Applies to pages ended after the call.
    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    /// Set a document info entry (e.g. "Creator", "Title").
    /// Setting a key again replaces the earlier value.
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        match self.info.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.info.push((key.to_string(), value.to_string())),
        }
        self
    }

    /// Set several info entries at once, in iteration order.
    pub fn set_metadata<'a, I>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in fields {
            self.set_info(key, value);
        }
        self
    }

    /// Begin a new page with the given dimensions in points.
    /// If a page is currently open, it is ended first; a failure to
    /// write it is returned and no new page is opened.
    pub fn begin_page(&mut self, width: f64, height: f64) -> io::Result<&mut Self> {
        if self.current_page.is_some() {
            self.end_page()?;
        }
        self.current_page = Some(PageBuilder {
            width,
            height,
            content_ops: Vec::new(),
        });
        Ok(self)
    }

    /// Place the finished paths of `shape` on the current page.
    /// The shape's graphics state is isolated with `q`/`Q`.
    pub fn commit_shape(&mut self, shape: Shape) -> &mut Self {
        let page = self
            .current_page
            .as_mut()
            .expect("commit_shape called with no open page");
        if shape.has_pending_path() {
            debug!("discarding unfinished path on shape commit");
        }
        debug!("committing shape with {} paths", shape.path_count());
        page.content_ops.extend_from_slice(b"q\n");
        page.content_ops.extend_from_slice(&shape.into_content());
        page.content_ops.extend_from_slice(b"Q\n");
        self
    }

    /// End the current page. Writes page objects to the
    /// writer and frees page content from memory.
    pub fn end_page(&mut self) -> io::Result<()> {
        let page = self
            .current_page
            .take()
            .expect("end_page called with no open page");

        let content_id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;
        let page_id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;

        // Write content stream.
        let content_stream = if self.compress {
            let raw_len = page.content_ops.len();
            let data = deflate(&page.content_ops)?;
            debug!("page content deflated {} -> {} bytes", raw_len, data.len());
            PdfObject::stream(vec![("Filter", PdfObject::name("FlateDecode"))], data)
        } else {
            PdfObject::stream(vec![], page.content_ops)
        };
        self.writer.write_object(content_id, &content_stream)?;

        // Write page dictionary.
        let page_dict = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Reference(PAGES_OBJ)),
            (
                "MediaBox",
                PdfObject::array(vec![
                    PdfObject::Integer(0),
                    PdfObject::Integer(0),
                    PdfObject::Real(page.width),
                    PdfObject::Real(page.height),
                ]),
            ),
            ("Contents", PdfObject::Reference(content_id)),
            ("Resources", PdfObject::dict(vec![])),
        ]);
        self.writer.write_object(page_id, &page_dict)?;

        self.page_obj_ids.push(page_id);
        debug!("page {} written", self.page_obj_ids.len());
        Ok(())
    }

    /// Number of pages ended so far.
    pub fn page_count(&self) -> usize {
        self.page_obj_ids.len()
    }

    /// Finish the document. Writes the info dictionary, catalog,
    /// pages tree, xref table, and trailer, then flushes the writer.
    /// Consumes self; no further operations are possible.
    pub fn end_document(mut self) -> io::Result<W> {
        // Auto-close any open page.
        if self.current_page.is_some() {
            self.end_page()?;
        }

        // Write info dictionary if any entries exist.
        let info_id = if !self.info.is_empty() {
            let id = ObjId(self.next_obj_num, 0);
            self.next_obj_num += 1;
            let entries: Vec<(&str, PdfObject)> = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::text_string(v)))
                .collect();
            let info_obj = PdfObject::dict(entries);
            self.writer.write_object(id, &info_obj)?;
            Some(id)
        } else {
            None
        };

        // Write pages tree (obj 2).
        let kids: Vec<PdfObject> = self
            .page_obj_ids
            .iter()
            .map(|id| PdfObject::Reference(*id))
            .collect();
        let page_count = self.page_obj_ids.len() as i64;
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::Array(kids)),
            ("Count", PdfObject::Integer(page_count)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        // Write catalog (obj 1).
        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Reference(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        // Write xref and trailer.
        self.writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        self.writer.flush()?;

        Ok(self.writer.into_inner())
    }
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Format a coordinate value for PDF content streams.
pub(crate) fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        let s = s.trim_end_matches('0');
        let s = s.trim_end_matches('.');
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_coord_trims_zeros() {
        assert_eq!(format_coord(150.0), "150");
        assert_eq!(format_coord(12.5), "12.5");
        assert_eq!(format_coord(1.0 / 3.0), "0.3333");
        assert_eq!(format_coord(-2.25), "-2.25");
    }

    #[test]
    fn deflate_round_trips_through_zlib() {
        use flate2::read::ZlibDecoder;
        use std::io::Read;

        let data = b"0 0 m\n10 0 l\n5 8 l\nh\nf\n".repeat(20);
        let packed = deflate(&data).unwrap();
        assert!(packed.len() < data.len());
        let mut unpacked = Vec::new();
        ZlibDecoder::new(&packed[..])
            .read_to_end(&mut unpacked)
            .unwrap();
        assert_eq!(unpacked, data);
    }
}
