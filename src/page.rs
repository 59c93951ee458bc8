//! Lookups over a parsed status page.
//!
//! The status page has no machine readable schema. Values are reached either
//! through element ids and classes, or positionally through the `div` that
//! follows one of the HTML comments the firmware uses as section markers.

use crate::ScrapeError;
use scraper::node::Element;
use scraper::{ElementRef, Html, Node};
use std::fmt;
use tracing::debug;

/// Section marker comments in the status page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Apns,
    PrimaryCell,
    SecondaryCell,
}

impl Anchor {
    pub fn marker(self) -> &'static str {
        match self {
            Anchor::Apns => "APNs card",
            Anchor::PrimaryCell => "Primary Cell information card",
            Anchor::SecondaryCell => "Secondary Cell information card",
        }
    }
}

/// Which lookup failed, carried by [`ScrapeError::NotFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(String),
    Class(String),
    Comment(&'static str),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "Element with id {:?}", id),
            Lookup::Class(class) => write!(f, "Element with class {:?}", class),
            Lookup::Comment(marker) => write!(f, "Section after comment {:?}", marker),
        }
    }
}

/// A tree node as seen by the lookups.
enum PageNode<'a> {
    Element(&'a Element),
    Comment(&'a str),
    Other,
}

impl<'a> PageNode<'a> {
    fn classify(node: &'a Node) -> Self {
        match node {
            Node::Element(el) => PageNode::Element(el),
            Node::Comment(comment) => PageNode::Comment(comment.trim()),
            _ => PageNode::Other,
        }
    }
}

/// One parsed status page.
///
/// The underlying `scraper::Html` tree is neither `Send` nor `Sync`, so a page
/// stays on the thread that parsed it. Extractors on that thread may borrow it
/// as often as they like; to work on another thread, send the raw HTML and
/// parse it there.
#[derive(Debug)]
pub struct StatusPage {
    html: Html,
}

impl StatusPage {
    pub fn parse(html: &str) -> Self {
        StatusPage {
            html: Html::parse_document(html),
        }
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.root_element().descendants().filter_map(ElementRef::wrap)
    }

    pub fn find_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|el| el.value().id() == Some(id))
    }

    pub fn by_id(&self, id: &str) -> Result<ElementRef<'_>, ScrapeError> {
        self.find_id(id)
            .ok_or_else(|| ScrapeError::NotFound(Lookup::Id(id.to_string())))
    }

    /// First element carrying `class`, searched under `scope` or the whole page.
    pub fn by_class<'a>(
        &'a self,
        class: &str,
        scope: Option<ElementRef<'a>>,
    ) -> Result<ElementRef<'a>, ScrapeError> {
        let found = match scope {
            Some(scope) => descendants(scope).find(|el| has_class(el, class)),
            None => self.elements().find(|el| has_class(el, class)),
        };
        found.ok_or_else(|| ScrapeError::NotFound(Lookup::Class(class.to_string())))
    }

    /// Every element carrying `class` under `scope` or the whole page, in
    /// document order.
    pub fn all_by_class<'a>(
        &'a self,
        class: &str,
        scope: Option<ElementRef<'a>>,
    ) -> Vec<ElementRef<'a>> {
        match scope {
            Some(scope) => descendants(scope).filter(|el| has_class(el, class)).collect(),
            None => self.elements().filter(|el| has_class(el, class)).collect(),
        }
    }

    /// The `div` following the comment whose trimmed text is the anchor marker.
    pub fn after_comment(&self, anchor: Anchor) -> Result<ElementRef<'_>, ScrapeError> {
        let marker = anchor.marker();
        let not_found = || ScrapeError::NotFound(Lookup::Comment(marker));

        let comment = self
            .html
            .tree
            .root()
            .descendants()
            .find(|node| {
                matches!(PageNode::classify(node.value()), PageNode::Comment(text) if text == marker)
            })
            .ok_or_else(not_found)?;

        let section = comment
            .next_siblings()
            .find(|node| match PageNode::classify(node.value()) {
                PageNode::Element(el) => el.name() == "div",
                PageNode::Comment(_) | PageNode::Other => false,
            })
            .and_then(ElementRef::wrap)
            .ok_or_else(not_found)?;

        debug!("Resolved section {:?}", marker);
        Ok(section)
    }
}

/// Elements strictly below `scope`, in document order.
pub fn descendants(scope: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    scope.descendants().skip(1).filter_map(ElementRef::wrap)
}

fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Text of an element with every text node trimmed and the empty ones dropped.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}
