//! Page count and page geometry lookup

use std::path::Path;
use lopdf::{Document, Object, ObjectId};
use crate::error::{Error, Result};
use crate::layout::PageDimensions;

/// Page attributes a page may inherit from its ancestors in the page tree
pub const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic /Parent chains in malformed files
const MAX_TREE_DEPTH: usize = 32;

/// Count pages by reading the Count field from the Pages dictionary
/// This is more reliable than get_pages() which doesn't handle nested page trees
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog = doc.catalog()?;

    let pages_id = catalog.get(b"Pages")?.as_reference()?;
    let pages_dict = doc.get_dictionary(pages_id)?;

    let count = pages_dict.get(b"Count")?.as_i64()?;
    Ok(count.max(0) as usize)
}

/// Count the number of pages in a PDF file
///
/// This is a quick operation that reads the Count field from the Pages dictionary.
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let page_count = count_pages_from_catalog(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(page_count)
}

/// A page rectangle in PDF user space (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl PageBox {
    /// Build from a 4-element PDF rectangle array, normalising swapped corners
    fn from_array(values: &[Object]) -> Option<Self> {
        if values.len() != 4 {
            return None;
        }

        let nums: Vec<f64> = values.iter().filter_map(number).collect();
        if nums.len() != 4 {
            return None;
        }

        Some(Self {
            llx: nums[0].min(nums[2]),
            lly: nums[1].min(nums[3]),
            urx: nums[0].max(nums[2]),
            ury: nums[1].max(nums[3]),
        })
    }

    pub fn width(&self) -> f64 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f64 {
        self.ury - self.lly
    }

    pub fn dimensions(&self) -> PageDimensions {
        PageDimensions::new(self.width(), self.height())
    }

    pub fn to_object(&self) -> Object {
        Object::Array(vec![
            Object::Real(self.llx as f32),
            Object::Real(self.lly as f32),
            Object::Real(self.urx as f32),
            Object::Real(self.ury as f32),
        ])
    }
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Look up a page attribute, walking up the /Parent chain if the page does not set it
///
/// Indirect values are returned as stored (a reference stays a reference).
pub fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node_id = page_id;

    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_dictionary(node_id).ok()?;

        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }

        node_id = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }

    None
}

/// Resolve a rectangle attribute, following an indirect reference if needed
fn inherited_box(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<PageBox> {
    let value = inherited_attribute(doc, page_id, key)?;

    let array = match value {
        Object::Array(arr) => arr,
        Object::Reference(id) => match doc.get_object(id) {
            Ok(Object::Array(arr)) => arr.clone(),
            _ => return None,
        },
        _ => return None,
    };

    PageBox::from_array(&array)
}

/// Visible rectangle of a page: its CropBox if present, otherwise its MediaBox
///
/// `page_number` is 1-based and only used for error reporting.
pub fn page_box(doc: &Document, page_number: u32, page_id: ObjectId) -> Result<PageBox> {
    let page_box = inherited_box(doc, page_id, b"CropBox")
        .or_else(|| inherited_box(doc, page_id, b"MediaBox"))
        .ok_or_else(|| Error::MalformedPage {
            page: page_number,
            reason: "no usable MediaBox".to_string(),
        })?;

    if page_box.width() <= 0.0 || page_box.height() <= 0.0 {
        return Err(Error::MalformedPage {
            page: page_number,
            reason: format!("empty page rectangle {:?}", page_box),
        });
    }

    Ok(page_box)
}
