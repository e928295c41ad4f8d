//! Action replay onto PDF documents
//!
//! Loads a document, replays a validated action list in order, and
//! serializes the result. Text is drawn as real page content (not
//! annotations) so the output renders identically everywhere: each action
//! becomes a content stream appended after the page's existing streams.

use crate::action::{ActionList, Align, PlacementAction};
use crate::color::parse_hex_color;
use crate::error::StampError;
use crate::font;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Font resource names registered on touched pages
const FONT_REGULAR: &str = "TxHelv";
const FONT_BOLD: &str = "TxHelvBold";

/// Counts reported back to the caller after a replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Actions drawn onto a page
    pub applied: usize,
    /// Actions whose page index was out of range
    pub skipped: usize,
}

/// Replay all actions onto the document, strictly in list order.
///
/// An out-of-range page index skips that action and continues; everything
/// else about the action either succeeds or fails the whole request.
/// Replaying the same list on the same bytes is deterministic.
pub fn apply_actions(pdf_bytes: &[u8], list: &ActionList) -> Result<(Vec<u8>, ApplyOutcome), StampError> {
    list.validate()?;

    if list.is_empty() {
        return Ok((
            pdf_bytes.to_vec(),
            ApplyOutcome {
                applied: 0,
                skipped: 0,
            },
        ));
    }

    let mut doc =
        Document::load_mem(pdf_bytes).map_err(|e| StampError::ParseError(e.to_string()))?;

    // get_pages is keyed by 1-based page number; collecting the values in
    // order gives the 0-based index the wire contract uses.
    let pages: Vec<ObjectId> = doc.get_pages().values().copied().collect();

    // Both standard weights are registered once per document and shared by
    // every action.
    let fonts = StandardFonts::register(&mut doc);

    let mut outcome = ApplyOutcome {
        applied: 0,
        skipped: 0,
    };

    for action in &list.actions {
        match action {
            PlacementAction::AddText { page, .. } => {
                let Some(&page_id) = pages.get(*page as usize) else {
                    outcome.skipped += 1;
                    continue;
                };
                draw_text(&mut doc, page_id, &fonts, action)?;
                outcome.applied += 1;
            }
        }
    }

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| StampError::OperationError(e.to_string()))?;

    Ok((output, outcome))
}

/// Object ids of the two standard font dictionaries
struct StandardFonts {
    regular: ObjectId,
    bold: ObjectId,
}

impl StandardFonts {
    fn register(doc: &mut Document) -> Self {
        let regular = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        StandardFonts { regular, bold }
    }
}

fn draw_text(
    doc: &mut Document,
    page_id: ObjectId,
    fonts: &StandardFonts,
    action: &PlacementAction,
) -> Result<(), StampError> {
    let PlacementAction::AddText {
        x,
        y,
        text,
        size,
        color,
        bold,
        align,
        width,
        line_height,
        ..
    } = action;

    ensure_page_fonts(doc, page_id, fonts)?;

    let (r, g, b) = parse_hex_color(color.as_deref().unwrap_or(""));
    let font_name = if *bold { FONT_BOLD } else { FONT_REGULAR };
    let line_height = line_height.unwrap_or(size * 1.2);

    let mut operations = vec![
        Operation::new("q", vec![]),
        Operation::new("rg", vec![r.into(), g.into(), b.into()]),
    ];

    for (i, line) in text.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let x_line = x + alignment_offset(line, *size, *bold, *align, *width);
        let y_line = y - i as f64 * line_height;

        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![
                Object::Name(font_name.as_bytes().to_vec()),
                (*size as f32).into(),
            ],
        ));
        operations.push(Operation::new(
            "Td",
            vec![(x_line as f32).into(), (y_line as f32).into()],
        ));
        operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
        operations.push(Operation::new("ET", vec![]));
    }

    operations.push(Operation::new("Q", vec![]));

    let content = Content { operations };
    let data = content
        .encode()
        .map_err(|e| StampError::OperationError(e.to_string()))?;
    let stream_id = doc.add_object(Object::Stream(Stream::new(Dictionary::new(), data)));

    append_content_stream(doc, page_id, stream_id)
}

/// Horizontal shift of a line inside its box. Lines wider than the box are
/// never shifted left of the origin.
fn alignment_offset(line: &str, size: f64, bold: bool, align: Align, width: Option<f64>) -> f64 {
    let Some(width) = width else {
        return 0.0;
    };
    match align {
        Align::Left => 0.0,
        Align::Center => ((width - font::text_width(line, size, bold)) / 2.0).max(0.0),
        Align::Right => (width - font::text_width(line, size, bold)).max(0.0),
    }
}

/// Make both standard fonts visible from the page's `Resources/Font`.
///
/// Resources and Font may be direct dictionaries or references shared
/// between pages; the resolved dictionary is copied onto the page directly
/// so shared resources on other pages are untouched.
fn ensure_page_fonts(
    doc: &mut Document,
    page_id: ObjectId,
    fonts: &StandardFonts,
) -> Result<(), StampError> {
    let mut resources = match page_dict(doc, page_id)?.get(b"Resources") {
        Ok(obj) => resolve_dict(doc, obj)?.clone(),
        Err(_) => Dictionary::new(),
    };

    let mut font_dict = match resources.get(b"Font") {
        Ok(obj) => resolve_dict(doc, obj)?.clone(),
        Err(_) => Dictionary::new(),
    };

    font_dict.set(FONT_REGULAR, Object::Reference(fonts.regular));
    font_dict.set(FONT_BOLD, Object::Reference(fonts.bold));
    resources.set("Font", Object::Dictionary(font_dict));

    page_dict_mut(doc, page_id)?.set("Resources", Object::Dictionary(resources));
    Ok(())
}

/// Append a content stream after the page's existing content, covering the
/// reference, array, and absent forms of `Contents`.
fn append_content_stream(
    doc: &mut Document,
    page_id: ObjectId,
    stream_id: ObjectId,
) -> Result<(), StampError> {
    let page = page_dict_mut(doc, page_id)?;

    match page.get_mut(b"Contents") {
        Ok(Object::Reference(existing)) => {
            let existing = *existing;
            page.set(
                "Contents",
                Object::Array(vec![
                    Object::Reference(existing),
                    Object::Reference(stream_id),
                ]),
            );
        }
        Ok(Object::Array(arr)) => arr.push(Object::Reference(stream_id)),
        _ => page.set("Contents", Object::Reference(stream_id)),
    }
    Ok(())
}

fn page_dict<'a>(doc: &'a Document, page_id: ObjectId) -> Result<&'a Dictionary, StampError> {
    doc.get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(|e| StampError::OperationError(format!("invalid page object: {}", e)))
}

fn page_dict_mut<'a>(
    doc: &'a mut Document,
    page_id: ObjectId,
) -> Result<&'a mut Dictionary, StampError> {
    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| StampError::OperationError(format!("invalid page object: {}", e)))
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Dictionary, StampError> {
    match obj {
        Object::Reference(id) => doc
            .get_object(*id)
            .and_then(Object::as_dict)
            .map_err(|e| StampError::OperationError(e.to_string())),
        Object::Dictionary(dict) => Ok(dict),
        _ => Err(StampError::OperationError(
            "expected dictionary or reference".into(),
        )),
    }
}
