#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Read;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use rol_procedimentos::{HttpError, HttpSource};
use url::Url;

/// One-page-per-entry PDF with each line drawn by a single `Tj` in Courier.
pub fn pdf_bytes(pages: &[Vec<&str>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("TL", vec![14.into()]),
            Operation::new("Td", vec![40.into(), 800.into()]),
        ];
        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations }.encode().expect("content encodes");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = i64::try_from(kids.len()).expect("page count fits");
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("document saves");
    bytes
}

/// In-memory site: fixed bodies keyed by URL, every request recorded.
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, String>,
    files: HashMap<String, Vec<u8>>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeSite {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_file(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(url.to_string(), bytes);
        self
    }

    fn not_found(url: &Url) -> HttpError {
        HttpError::Status {
            url: url.to_string(),
            status: 404,
        }
    }
}

impl HttpSource for FakeSite {
    fn get_text(&self, url: &Url) -> Result<String, HttpError> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| Self::not_found(url))
    }

    fn get_stream(&self, url: &Url) -> Result<Box<dyn Read + '_>, HttpError> {
        self.requests.borrow_mut().push(url.to_string());
        let bytes = self.files.get(url.as_str()).ok_or_else(|| Self::not_found(url))?;
        Ok(Box::new(bytes.as_slice()))
    }
}
