//! Structural checks on generated PDF bytes.
//!
//! Documents are parsed with `lopdf` and the page content stream is decoded
//! into operations, so assertions see what a viewer would draw.

use lopdf::content::Content;
use lopdf::{Document, Object};

/// One drawn text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub font: String,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    /// String bytes read as Latin-1, which matches WinAnsi outside 0x80-0x9F.
    pub text: String,
}

impl TextRun {
    pub fn is_label(&self) -> bool {
        self.font == "F2"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageDraw {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// An embedded image XObject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageObject {
    pub width: i64,
    pub height: i64,
    pub filter: String,
}

fn load(pdf: &[u8]) -> Document {
    Document::load_mem(pdf).expect("parseable PDF")
}

fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r as f32,
        other => panic!("expected a number, got {other:?}"),
    }
}

fn name(obj: &Object) -> String {
    String::from_utf8_lossy(obj.as_name().expect("name operand")).into_owned()
}

/// Decoded content stream of the only page.
pub fn content(pdf: &[u8]) -> Content {
    let doc = load(pdf);
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1, "expected exactly one page");
    let page_id = *pages.values().next().expect("page id");
    let raw = doc.get_page_content(page_id).expect("page content");
    Content::decode(&raw).expect("decodable content")
}

fn operator_count(pdf: &[u8], operator: &str) -> usize {
    content(pdf)
        .operations
        .iter()
        .filter(|op| op.operator == operator)
        .count()
}

/// Every text run in drawing order.
pub fn texts(pdf: &[u8]) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let (mut font, mut size, mut x, mut y) = (String::new(), 0.0, 0.0, 0.0);
    for op in content(pdf).operations {
        match op.operator.as_str() {
            "Tf" => {
                font = name(&op.operands[0]);
                size = number(&op.operands[1]);
            }
            "Td" => {
                x = number(&op.operands[0]);
                y = number(&op.operands[1]);
            }
            "Tj" => {
                let Object::String(bytes, _) = &op.operands[0] else {
                    panic!("Tj without a string operand");
                };
                runs.push(TextRun {
                    font: font.clone(),
                    size,
                    x,
                    y,
                    text: bytes.iter().copied().map(char::from).collect(),
                });
            }
            _ => {}
        }
    }
    runs
}

/// Every image placement in drawing order.
pub fn images(pdf: &[u8]) -> Vec<ImageDraw> {
    let mut draws = Vec::new();
    let mut matrix = [0.0_f32; 6];
    for op in content(pdf).operations {
        match op.operator.as_str() {
            "cm" => {
                for (slot, operand) in matrix.iter_mut().zip(&op.operands) {
                    *slot = number(operand);
                }
            }
            "Do" => draws.push(ImageDraw {
                name: name(&op.operands[0]),
                width: matrix[0],
                height: matrix[3],
                x: matrix[4],
                y: matrix[5],
            }),
            _ => {}
        }
    }
    draws
}

/// Number of stroked line segments.
pub fn line_count(pdf: &[u8]) -> usize {
    operator_count(pdf, "l")
}

/// Number of clipping paths installed.
pub fn clip_count(pdf: &[u8]) -> usize {
    operator_count(pdf, "W")
}

/// Image XObjects embedded in the file, in object order.
pub fn image_objects(pdf: &[u8]) -> Vec<ImageObject> {
    let doc = load(pdf);
    doc.objects
        .values()
        .filter_map(|obj| match obj {
            Object::Stream(stream) => Some(&stream.dict),
            _ => None,
        })
        .filter(|dict| dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(&b"Image"[..]))
        .map(|dict| ImageObject {
            width: dict.get(b"Width").and_then(Object::as_i64).expect("width"),
            height: dict.get(b"Height").and_then(Object::as_i64).expect("height"),
            filter: dict.get(b"Filter").map(name).unwrap_or_default(),
        })
        .collect()
}

pub fn image_xobjects(pdf: &[u8]) -> usize {
    image_objects(pdf).len()
}

/// Assert the file parses as a single-page PDF 1.4 document with a catalog.
pub fn assert_well_formed(pdf: &[u8]) {
    assert!(pdf.starts_with(b"%PDF-1.4\n"), "missing PDF header");
    assert!(
        String::from_utf8_lossy(pdf).trim_end().ends_with("%%EOF"),
        "missing %%EOF"
    );
    let doc = load(pdf);
    assert_eq!(doc.get_pages().len(), 1, "expected exactly one page");
    let root = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .expect("trailer /Root");
    let catalog = doc.get_dictionary(root).expect("catalog");
    assert_eq!(catalog.get(b"Type").and_then(Object::as_name).ok(), Some(&b"Catalog"[..]));
}
