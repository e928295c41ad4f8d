//! Converting placed boxes into placement actions
//!
//! The only place canvas pixels become PDF points. Boxes with blank text
//! are dropped here; everything else is emitted in collection order, which
//! is also the order the server replays.

use crate::boxes::BoxSet;
use crate::error::EditorError;
use crate::render::RenderCoordinator;
use stamp_core::{ActionList, PlacementAction};

/// Fixed leading: baselines sit one-point-two font sizes apart
const LINE_HEIGHT_FACTOR: f64 = 1.2;

pub fn export_actions(
    boxes: &BoxSet,
    render: &RenderCoordinator,
) -> Result<ActionList, EditorError> {
    let mut actions = Vec::new();

    for text_box in boxes.boxes() {
        if text_box.text.trim().is_empty() {
            continue;
        }

        // A box on a page that never finished rendering means the preview
        // and the document are out of sync; refuse to guess.
        let viewport = render
            .viewport(text_box.page)
            .ok_or(EditorError::MissingViewport(text_box.page))?;

        let (x, _) = viewport.canvas_to_pdf(text_box.rect.x, 0.0);
        let y = viewport.baseline_for_box_top(text_box.rect.y, text_box.size);

        actions.push(PlacementAction::AddText {
            // Pages are 1-based in the preview, 0-based on the wire
            page: text_box.page - 1,
            x,
            y,
            text: text_box.text.clone(),
            size: text_box.size,
            color: Some(text_box.color.clone()),
            bold: text_box.bold,
            align: text_box.align,
            width: Some(viewport.to_points(text_box.rect.width)),
            line_height: Some(text_box.size * LINE_HEIGHT_FACTOR),
        });
    }

    Ok(ActionList { actions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::CanvasRect;
    use crate::geometry::Viewport;
    use stamp_core::Align;

    fn render_with_page(page: u32, viewport: Viewport) -> RenderCoordinator {
        let mut rc = RenderCoordinator::new();
        rc.register_surface(page);
        let token = rc.begin_render(page).unwrap();
        assert!(rc.finish_render(page, token, viewport));
        rc
    }

    #[test]
    fn blank_boxes_are_filtered() {
        let mut boxes = BoxSet::new();
        let blank = boxes.insert(1, CanvasRect::new(10.0, 10.0, 120.0, 40.0));
        boxes.set_text(&blank, "   \n  ");
        let filled = boxes.insert(1, CanvasRect::new(50.0, 50.0, 120.0, 40.0));
        boxes.set_text(&filled, "keep me");

        let render = render_with_page(1, Viewport::new(612.0, 792.0, 1.0));
        let list = export_actions(&boxes, &render).unwrap();
        assert_eq!(list.len(), 1);

        let PlacementAction::AddText { text, .. } = &list.actions[0];
        assert_eq!(text, "keep me");
    }

    #[test]
    fn exports_in_collection_order() {
        let mut boxes = BoxSet::new();
        for label in ["first", "second", "third"] {
            let id = boxes.insert(1, CanvasRect::new(10.0, 10.0, 120.0, 40.0));
            boxes.set_text(&id, label);
        }

        let render = render_with_page(1, Viewport::new(612.0, 792.0, 1.0));
        let list = export_actions(&boxes, &render).unwrap();

        let texts: Vec<_> = list
            .actions
            .iter()
            .map(|a| {
                let PlacementAction::AddText { text, .. } = a;
                text.as_str()
            })
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn transforms_through_the_page_viewport() {
        let mut boxes = BoxSet::new();
        // 1.5x scale page, box top-left at (150, 138) px, 16pt text
        let id = boxes.insert(1, CanvasRect::new(150.0, 138.0, 270.0, 60.0));
        boxes.set_text(&id, "hello");
        boxes.set_size(&id, 16.0);

        let render = render_with_page(1, Viewport::new(918.0, 1188.0, 1.5));
        let list = export_actions(&boxes, &render).unwrap();

        let PlacementAction::AddText {
            page,
            x,
            y,
            width,
            line_height,
            size,
            ..
        } = &list.actions[0];
        assert_eq!(*page, 0);
        assert_eq!(*x, 100.0);
        // (1188 - 138) / 1.5 - 16 = 684
        assert_eq!(*y, 684.0);
        assert_eq!(*width, Some(180.0));
        assert_eq!(*size, 16.0);
        assert_eq!(*line_height, Some(16.0 * 1.2));
    }

    #[test]
    fn carries_style_through() {
        let mut boxes = BoxSet::new();
        let id = boxes.insert(1, CanvasRect::new(0.0, 0.0, 100.0, 40.0));
        boxes.set_text(&id, "styled");
        boxes.set_color(&id, "#ff0000");
        boxes.set_bold(&id, true);
        boxes.set_align(&id, Align::Right);

        let render = render_with_page(1, Viewport::new(612.0, 792.0, 1.0));
        let list = export_actions(&boxes, &render).unwrap();

        let PlacementAction::AddText {
            color, bold, align, ..
        } = &list.actions[0];
        assert_eq!(color.as_deref(), Some("#ff0000"));
        assert!(*bold);
        assert_eq!(*align, Align::Right);
    }

    #[test]
    fn missing_viewport_is_an_error() {
        let mut boxes = BoxSet::new();
        let id = boxes.insert(3, CanvasRect::new(0.0, 0.0, 100.0, 40.0));
        boxes.set_text(&id, "orphan");

        let render = RenderCoordinator::new();
        match export_actions(&boxes, &render) {
            Err(EditorError::MissingViewport(page)) => assert_eq!(page, 3),
            other => panic!("expected missing viewport, got {:?}", other.err()),
        }
    }

    #[test]
    fn empty_box_set_exports_empty_list() {
        let boxes = BoxSet::new();
        let render = RenderCoordinator::new();
        let list = export_actions(&boxes, &render).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn exported_list_serializes_to_wire_form() {
        let mut boxes = BoxSet::new();
        let id = boxes.insert(1, CanvasRect::new(150.0, 138.0, 270.0, 60.0));
        boxes.set_text(&id, "wire");

        let render = render_with_page(1, Viewport::new(918.0, 1188.0, 1.5));
        let list = export_actions(&boxes, &render).unwrap();

        let json = serde_json::to_string(&list).unwrap();
        assert!(json.starts_with(r#"{"actions":[{"type":"addText""#));
        assert!(json.contains(r#""page":0"#));
        assert!(json.contains(r#""lineHeight""#));
    }
}
