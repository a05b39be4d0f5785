//! Document assembly.
//!
//! Objects are added in a fixed order (pages, fonts, images, content, page,
//! catalog, info) so object numbers depend only on the plan.

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Result, StickerError};
use crate::layout::{FontFace, PagePlan};

use super::content::{num, page_content};

pub const PDF_VERSION: &str = "1.4";

const PRODUCER: &str = concat!("lab_stickers ", env!("CARGO_PKG_VERSION"));

pub fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn font(face: FontFace) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Build the single-page document for `plan`.
pub fn build_document(plan: &PagePlan) -> Result<Document> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id: ObjectId = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in [FontFace::Regular, FontFace::Bold] {
        let id = doc.add_object(font(face));
        fonts.set(face.resource_name(), id);
    }

    let mut xobjects = Dictionary::new();
    for (index, logo) in plan.images.iter().enumerate() {
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(logo.width),
                "Height" => i64::from(logo.height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
                "Filter" => "DCTDecode",
            },
            logo.jpeg.clone(),
        );
        let id = doc.add_object(image);
        xobjects.set(image_name(index), id);
    }

    let mut resources = dictionary! { "Font" => fonts };
    if !xobjects.is_empty() {
        resources.set("XObject", xobjects);
    }

    let content = page_content(plan, image_name)
        .encode()
        .map_err(|e| StickerError::PdfWrite(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), num(plan.width), num(plan.height)],
        "Resources" => resources,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1_i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    Ok(doc)
}

/// Serialize `doc` into memory.
pub fn to_bytes(mut doc: Document) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| StickerError::PdfWrite(e.to_string()))?;
    Ok(buf)
}
