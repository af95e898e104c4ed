//! DOM Patch Application
//!
//! Executes render plans against the board elements. Anchors are resolved
//! once when a board view is attached; a missing anchor aborts the board.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::models::{ColumnKey, ShapeType};
use crate::render::{CardPatch, CardView, ShapePatch, ShapeView};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("required element `{0}` is missing")]
    MissingAnchor(&'static str),
    #[error("column `{0}` is missing")]
    MissingColumn(&'static str),
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for RenderError {
    fn from(value: JsValue) -> Self {
        RenderError::Dom(format!("{:?}", value))
    }
}

/// Element an event was dispatched to, if it is one
pub fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// `data-*` attribute of the closest ancestor matching `selector`
pub fn closest_data(element: &Element, selector: &str, attribute: &str) -> Option<String> {
    element.closest(selector).ok().flatten()?.get_attribute(attribute)
}

fn require(root: &Element, selector: &'static str) -> Result<Element, RenderError> {
    root.query_selector(selector)?
        .ok_or(RenderError::MissingAnchor(selector))
}

/// `[name="value"]` with the value escaped as a CSS string
fn attribute_selector(name: &str, value: &str) -> String {
    let mut selector = format!("[{}=\"", name);
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                selector.push('\\');
                selector.push(c);
            }
            '\n' => selector.push_str("\\a "),
            _ => selector.push(c),
        }
    }
    selector.push_str("\"]");
    selector
}

fn find_by_id(root: &Element, id: &str) -> Result<Option<Element>, RenderError> {
    Ok(root.query_selector(&attribute_selector("data-id", id))?)
}

fn set_background(element: &Element, color: &str) -> Result<(), RenderError> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.style().set_property("background-color", color)?;
    }
    Ok(())
}

fn button(document: &Document, label: &str, action: &str, class: &str, disabled: bool) -> Result<Element, RenderError> {
    let button = document.create_element("button")?;
    button.set_attribute("type", "button")?;
    button.set_class_name(class);
    button.set_attribute("data-action", action)?;
    button.set_text_content(Some(label));
    if disabled {
        button.set_attribute("disabled", "")?;
    }
    Ok(button)
}

fn log_failure(board: &str, result: Result<(), RenderError>) {
    if let Err(e) = result {
        log::warn!("{} patch failed: {}", board, e);
    }
}

// ========================
// Shape board
// ========================

pub struct ShapeBoardView {
    document: Document,
    board: Element,
    count_squares: Element,
    count_circles: Element,
}

impl ShapeBoardView {
    pub fn attach(root: &Element) -> Result<Self, RenderError> {
        let document = root.owner_document().ok_or(RenderError::MissingAnchor("document"))?;
        Ok(Self {
            board: require(root, r#"[data-role="board"]"#)?,
            count_squares: require(root, r#"[data-role="count-squares"]"#)?,
            count_circles: require(root, r#"[data-role="count-circles"]"#)?,
            document,
        })
    }

    pub fn apply(&self, patches: &[ShapePatch]) {
        for patch in patches {
            log_failure("shape board", self.apply_one(patch));
        }
    }

    fn apply_one(&self, patch: &ShapePatch) -> Result<(), RenderError> {
        match patch {
            ShapePatch::Clear => self.board.set_inner_html(""),
            ShapePatch::Append(view) => {
                let tile = self.build(view)?;
                self.board.append_child(&tile)?;
            }
            ShapePatch::Remove { id } => {
                if let Some(element) = find_by_id(&self.board, id)? {
                    element.remove();
                }
            }
            ShapePatch::SetColor { id, color } => {
                if let Some(element) = find_by_id(&self.board, id)? {
                    set_background(&element, color)?;
                }
            }
            ShapePatch::SetCount { shape_type, count } => {
                let counter = match shape_type {
                    ShapeType::Square => &self.count_squares,
                    ShapeType::Circle => &self.count_circles,
                };
                counter.set_text_content(Some(&count.to_string()));
            }
        }
        Ok(())
    }

    fn build(&self, view: &ShapeView) -> Result<Element, RenderError> {
        let element = self.document.create_element("div")?;
        element.set_class_name(&format!("shape {}", view.shape_type.as_str()));
        element.set_attribute("data-id", &view.id)?;
        element.set_attribute("data-type", view.shape_type.as_str())?;
        element.set_attribute("role", "button")?;
        element.set_attribute("aria-label", &view.aria_label())?;
        set_background(&element, &view.color)?;
        Ok(element)
    }
}

// ========================
// Kanban board
// ========================

struct ColumnAnchors {
    key: ColumnKey,
    cards: Element,
    counter: Element,
}

pub struct KanbanBoardView {
    document: Document,
    root: Element,
    columns: Vec<ColumnAnchors>,
}

impl KanbanBoardView {
    pub fn attach(root: &Element) -> Result<Self, RenderError> {
        let document = root.owner_document().ok_or(RenderError::MissingAnchor("document"))?;
        let mut columns = Vec::with_capacity(ColumnKey::ALL.len());
        for key in ColumnKey::ALL {
            let column = root
                .query_selector(&attribute_selector("data-column", key.as_str()))?
                .ok_or(RenderError::MissingColumn(key.as_str()))?;
            columns.push(ColumnAnchors {
                key,
                cards: require(&column, r#"[data-role="cards"]"#)?,
                counter: require(&column, r#"[data-role="counter"]"#)?,
            });
        }
        Ok(Self {
            document,
            root: root.clone(),
            columns,
        })
    }

    pub fn apply(&self, patches: &[CardPatch]) {
        for patch in patches {
            log_failure("kanban", self.apply_one(patch));
        }
    }

    fn column(&self, key: ColumnKey) -> Result<&ColumnAnchors, RenderError> {
        self.columns
            .iter()
            .find(|column| column.key == key)
            .ok_or(RenderError::MissingColumn(key.as_str()))
    }

    fn apply_one(&self, patch: &CardPatch) -> Result<(), RenderError> {
        match patch {
            CardPatch::ClearColumn(key) => self.column(*key)?.cards.set_inner_html(""),
            CardPatch::Append { column, view } => {
                let card = self.build(view)?;
                self.column(*column)?.cards.append_child(&card)?;
            }
            CardPatch::Remove { id } => {
                if let Some(card) = find_by_id(&self.root, id)? {
                    card.remove();
                }
            }
            CardPatch::SetColor { id, color } => {
                if let Some(card) = find_by_id(&self.root, id)? {
                    set_background(&card, color)?;
                }
            }
            CardPatch::SetCount { column, count } => {
                self.column(*column)?.counter.set_text_content(Some(&count.to_string()));
            }
            CardPatch::FocusTitle { id } => self.focus_title(id)?,
        }
        Ok(())
    }

    fn build(&self, view: &CardView) -> Result<Element, RenderError> {
        let card = self.document.create_element("article")?;
        card.set_class_name("card");
        card.set_attribute("data-id", &view.id)?;
        set_background(&card, &view.color)?;

        let body = self.document.create_element("div")?;
        body.set_class_name("card-body");
        body.set_attribute("contenteditable", "true")?;
        body.set_attribute("data-role", "card-body")?;
        body.set_attribute("aria-label", "Treść karty")?;
        body.set_text_content(Some(&view.title));

        let actions = self.document.create_element("div")?;
        actions.set_class_name("card-actions");
        let buttons = [
            ("←", "move-left", "btn icon", !view.can_move_left),
            ("→", "move-right", "btn icon", !view.can_move_right),
            ("🎨", "color-card", "btn icon", false),
            ("×", "delete-card", "btn icon danger", false),
        ];
        for (label, action, class, disabled) in buttons {
            let element = button(&self.document, label, action, class, disabled)?;
            actions.append_child(&element)?;
        }

        card.append_child(&body)?;
        card.append_child(&actions)?;
        Ok(card)
    }

    fn focus_title(&self, id: &str) -> Result<(), RenderError> {
        let selector = format!(r#".card{} [data-role="card-body"]"#, attribute_selector("data-id", id));
        let Some(body) = self.root.query_selector(&selector)? else {
            return Ok(());
        };
        if let Some(html) = body.dyn_ref::<HtmlElement>() {
            html.focus()?;
        }
        if let Some(selection) = self.document.get_selection()? {
            selection.select_all_children(&body)?;
        }
        Ok(())
    }
}
