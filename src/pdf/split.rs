//! Horizontal page splitting using lopdf
//!
//! Pages whose rule has a single ratio are carried over untouched. Every other
//! page is wrapped once as a Form XObject, and each strip becomes a new page
//! that clips and shifts that XObject so only its slice of the source shows.

use std::path::PathBuf;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use log::{debug, info};
use crate::error::{Error, Result};
use crate::layout::{plan_strips, StripPlacement};
use crate::pdf::metadata::{inherited_attribute, page_box, PageBox, INHERITABLE_KEYS};
use crate::ratio::{parse_split_spec, SplitSpec};

/// Resource name of the source page XObject on every strip page
const SOURCE_XOBJECT: &str = "SrcPage";

/// Options for splitting a PDF
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Input PDF file path
    pub input_path: PathBuf,
    /// Output PDF file path (overwritten if it exists)
    pub output_path: PathBuf,
    /// Comma-separated split configuration, e.g. `"h1:1,1,h35:36:37"`
    pub split_config: String,
    /// Flate-compress uncompressed streams before saving
    pub compress: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            output_path: PathBuf::new(),
            split_config: String::new(),
            compress: true,
        }
    }
}

/// What a successful split produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSummary {
    pub source_pages: usize,
    pub output_pages: usize,
}

/// Split the pages of a PDF file and save the result
///
/// The input path is checked first, then the configuration is parsed, and
/// only then is the document loaded. Nothing is written unless every step
/// before saving succeeded.
///
/// # Example
///
/// ```no_run
/// use pdf_hsplit::pdf::{split_pdf, SplitOptions};
/// use std::path::PathBuf;
///
/// let options = SplitOptions {
///     input_path: PathBuf::from("spreads.pdf"),
///     output_path: PathBuf::from("pages.pdf"),
///     split_config: "h1:1,1,h35:36:37".to_string(),
///     ..Default::default()
/// };
///
/// let summary = split_pdf(&options).expect("Failed to split");
/// println!("{} pages in, {} pages out", summary.source_pages, summary.output_pages);
/// ```
pub fn split_pdf(options: &SplitOptions) -> Result<SplitSummary> {
    if !options.input_path.exists() {
        return Err(Error::FileNotFound(options.input_path.clone()));
    }

    let spec = parse_split_spec(&options.split_config)?;
    debug!("Parsed {} page rule(s) from {:?}", spec.rules().len(), options.split_config);

    let source = Document::load(&options.input_path)?;
    let source_pages = source.get_pages().len();

    if source_pages == 0 {
        return Err(Error::EmptyPdf(options.input_path.clone()));
    }

    let mut output = split_document(&source, &spec)?;

    if options.compress {
        output.compress();
    }
    output.save(&options.output_path)?;

    let summary = SplitSummary {
        source_pages,
        output_pages: spec.output_page_count(source_pages),
    };

    info!(
        "Split {} page(s) of {} into {} page(s)",
        summary.source_pages,
        options.input_path.display(),
        summary.output_pages
    );

    Ok(summary)
}

/// Build a new document with every page of `source` split according to `spec`
///
/// The output shares the source's object graph: pages that are not split keep
/// their original dictionary and content streams. Objects that end up
/// unreachable from the new catalog are pruned.
pub fn split_document(source: &Document, spec: &SplitSpec) -> Result<Document> {
    let mut output = Document::with_version(source.version.clone());
    output.objects = source.objects.clone();
    output.max_id = source.max_id;

    let pages_id = output.new_object_id();
    let mut kids: Vec<Object> = Vec::new();

    for (index, (&page_number, &page_id)) in source.get_pages().iter().enumerate() {
        let rule = spec.rule_for_page(index);

        if !rule.is_split() {
            debug!("Page {}: copied unchanged", page_number);
            adopt_page(source, &mut output, page_id, pages_id)?;
            kids.push(Object::Reference(page_id));
            continue;
        }

        let page_box = page_box(source, page_number, page_id)?;
        debug!(
            "Page {}: {} strips from {:.2} x {:.2} pt",
            page_number,
            rule.len(),
            page_box.width(),
            page_box.height()
        );

        let form_id = add_page_xobject(source, &mut output, page_id, &page_box)?;

        for placement in plan_strips(&page_box.dimensions(), rule) {
            let strip_id = add_strip_page(&mut output, pages_id, form_id, &page_box, &placement)?;
            kids.push(Object::Reference(strip_id));
        }
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(kids.len() as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    output.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    output.trailer.set("Root", Object::Reference(catalog_id));

    if let Ok(info) = source.trailer.get(b"Info") {
        output.trailer.set("Info", info.clone());
    }

    let pruned = output.prune_objects();
    debug!("Pruned {} unreachable object(s)", pruned.len());

    Ok(output)
}

/// Move a page into the new page tree as-is
///
/// Inherited attributes are copied onto the page itself because its old
/// ancestors are no longer part of the tree.
fn adopt_page(source: &Document, output: &mut Document, page_id: ObjectId, pages_id: ObjectId) -> Result<()> {
    let inherited: Vec<(&[u8], Object)> = INHERITABLE_KEYS
        .iter()
        .filter_map(|&key| inherited_attribute(source, page_id, key).map(|value| (key, value)))
        .collect();

    let page = output.get_dictionary_mut(page_id)?;
    for (key, value) in inherited {
        if !page.has(key) {
            page.set(key.to_vec(), value);
        }
    }
    page.set("Parent", Object::Reference(pages_id));

    Ok(())
}

/// Concatenate a page's content streams, decoding filtered ones
fn page_content(source: &Document, page_id: ObjectId) -> Result<Vec<u8>> {
    let mut combined = Vec::new();

    for content_id in source.get_page_contents(page_id) {
        if let Ok(Object::Stream(stream)) = source.get_object(content_id) {
            if stream.dict.has(b"Filter") {
                combined.extend(stream.decompressed_content()?);
            } else {
                combined.extend_from_slice(&stream.content);
            }
            combined.push(b'\n');
        }
    }

    Ok(combined)
}

/// Wrap a whole source page as a Form XObject in the output document
fn add_page_xobject(source: &Document, output: &mut Document, page_id: ObjectId, page_box: &PageBox) -> Result<ObjectId> {
    let content = page_content(source, page_id)?;
    let resources = inherited_attribute(source, page_id, b"Resources")
        .unwrap_or_else(|| Object::Dictionary(Dictionary::new()));

    let xobject_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Form".to_vec())),
        ("FormType", Object::Integer(1)),
        ("BBox", page_box.to_object()),
        ("Resources", resources),
    ]);

    Ok(output.add_object(Stream::new(xobject_dict, content)))
}

/// Content stream drawing one strip: clip to the page, shift the source into place, draw it
fn strip_content(placement: &StripPlacement, page_box: &PageBox) -> Content {
    let size = placement.page_dimensions();
    let dest = &placement.dest;
    let src = &placement.source;

    // Bottom-left corners in PDF user space
    let dest_x = dest.left;
    let dest_y = size.height - dest.bottom;
    let src_x = page_box.llx + src.left;
    let src_y = page_box.ury - src.bottom;

    let real = |v: f64| Object::Real(v as f32);

    Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "re",
                vec![real(dest_x), real(dest_y), real(dest.width()), real(dest.height())],
            ),
            Operation::new("W", vec![]),
            Operation::new("n", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Integer(1),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(1),
                    real(dest_x - src_x),
                    real(dest_y - src_y),
                ],
            ),
            Operation::new("Do", vec![Object::Name(SOURCE_XOBJECT.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    }
}

/// Create an output page holding one strip of a source page
fn add_strip_page(
    output: &mut Document,
    pages_id: ObjectId,
    form_id: ObjectId,
    page_box: &PageBox,
    placement: &StripPlacement,
) -> Result<ObjectId> {
    let size = placement.page_dimensions();

    let content = strip_content(placement, page_box).encode()?;
    let content_id = output.add_object(Stream::new(Dictionary::new(), content));

    let mut xobjects = Dictionary::new();
    xobjects.set(SOURCE_XOBJECT, Object::Reference(form_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let media_box = PageBox { llx: 0.0, lly: 0.0, urx: size.width, ury: size.height };

    let page = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        ("MediaBox", media_box.to_object()),
        ("Resources", Object::Dictionary(resources)),
        ("Contents", Object::Reference(content_id)),
    ]);

    Ok(output.add_object(page))
}
