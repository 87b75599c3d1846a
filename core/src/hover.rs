use serde::{Deserialize, Serialize};

use crate::geom::Rect;
use crate::outline::{outline_box, OutlineBox, OutlineKind};

/// Ancestors inspected above the event target before giving up.
pub const MAX_ANCESTOR_DEPTH: usize = 8;
pub const BRAND_LINK_ATTRIBUTE: &str = "data-brand-link";

const NON_TEXT_INPUT_TYPES: &[&str] = &[
    "button", "submit", "reset", "checkbox", "radio", "range", "color", "file", "image",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionVariant {
    #[default]
    Default,
    Pointer,
    Text,
    Nav,
}

impl InteractionVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionVariant::Default => "default",
            InteractionVariant::Pointer => "pointer",
            InteractionVariant::Text => "text",
            InteractionVariant::Nav => "nav",
        }
    }
}

/// Capability descriptor of a single element, captured at event time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementTraits {
    /// Lowercase local name.
    pub tag: String,
    pub input_type: Option<String>,
    pub cursor: Option<String>,
    pub role: Option<String>,
    pub has_click_handler: bool,
    pub content_editable: bool,
    pub brand_link: bool,
}

impl ElementTraits {
    pub fn is_body(&self) -> bool {
        self.tag == "body" || self.tag == "html"
    }

    /// Drops a computed cursor that merely repeats the parent's. `cursor` is
    /// inherited, so the children of a link report `pointer` as well.
    pub fn without_inherited_cursor(&self, parent: Option<&ElementTraits>) -> ElementTraits {
        let inherited =
            self.cursor.is_some() && parent.is_some_and(|parent| parent.cursor == self.cursor);
        if !inherited {
            return self.clone();
        }
        ElementTraits {
            cursor: None,
            ..self.clone()
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.cursor.as_deref() == Some("pointer")
            || self.tag == "a"
            || self.tag == "button"
            || self.has_click_handler
            || self
                .role
                .as_deref()
                .is_some_and(|role| role.eq_ignore_ascii_case("button"))
    }

    pub fn is_text_like(&self) -> bool {
        if self.content_editable || self.tag == "textarea" {
            return true;
        }
        if self.tag == "input" {
            let input_type = self.input_type.as_deref().unwrap_or("text");
            return !NON_TEXT_INPUT_TYPES
                .iter()
                .any(|kind| input_type.eq_ignore_ascii_case(kind));
        }
        self.cursor.as_deref() == Some("text")
    }
}

/// Read-only view of a DOM element used by [`detect_hover`].
pub trait ElementProbe: Clone {
    fn traits(&self) -> ElementTraits;
    fn within_nav(&self) -> bool;
    /// Bounding rect and computed border radius. `None` once the element has
    /// left the document.
    fn geometry(&self) -> Option<(Rect, f64)>;
    fn parent(&self) -> Option<Self>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoverState {
    pub variant: InteractionVariant,
    pub outline: Option<OutlineBox>,
}

impl HoverState {
    pub fn text() -> Self {
        Self {
            variant: InteractionVariant::Text,
            outline: None,
        }
    }
}

/// Classifies what sits under the pointer. Depends only on `target` and its
/// ancestors, never on earlier calls.
pub fn detect_hover<E: ElementProbe>(target: &E) -> HoverState {
    let mut current = Some((target.clone(), target.traits()));
    let mut depth = 0;
    while let Some((element, traits)) = current {
        if depth > MAX_ANCESTOR_DEPTH || traits.is_body() {
            break;
        }
        let parent = element.parent().map(|parent| {
            let traits = parent.traits();
            (parent, traits)
        });
        let own = traits.without_inherited_cursor(parent.as_ref().map(|(_, traits)| traits));
        if own.is_text_like() {
            return HoverState::text();
        }
        if own.is_interactive() {
            return classify_interactive(&element, &own);
        }
        current = parent;
        depth += 1;
    }
    HoverState::default()
}

fn classify_interactive<E: ElementProbe>(element: &E, traits: &ElementTraits) -> HoverState {
    let (variant, kind) = if element.within_nav() {
        (InteractionVariant::Nav, OutlineKind::Nav)
    } else if traits.brand_link {
        (InteractionVariant::Pointer, OutlineKind::Brand)
    } else {
        (InteractionVariant::Pointer, OutlineKind::Standard)
    };
    let outline = element
        .geometry()
        .filter(|(rect, _)| !rect.is_empty())
        .map(|(rect, radius)| outline_box(rect, radius, kind));
    HoverState { variant, outline }
}
