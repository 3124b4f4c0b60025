use scraper::{ElementRef, Html, Selector};
use tracing::{info, info_span};

use crate::error::ScheduleError;
use crate::renderer::{DomNode, NodeHandle, Renderer, Scope};

/// Immutable snapshot of one page: the source it was parsed from and its DOM.
///
/// Node handles are pre-order positions in the parsed tree, so a node's
/// descendants always occupy the positions right after it.
#[derive(Debug)]
pub struct HtmlPage {
    url: String,
    source: String,
    document: Html,
}

impl HtmlPage {
    pub fn parse(url: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let document = Html::parse_document(&source);
        Self { url: url.into(), source, document }
    }

    /// Fetch a page as served, without running any script.
    pub fn fetch(url: &str) -> Result<Self, ScheduleError> {
        let response = {
            let _span = info_span!("page_fetch", url = %url).entered();
            ureq::get(url).call()?
        };
        let mut body_reader = response.into_body();
        let source = body_reader.read_to_string()?;
        info!(bytes = source.len(), "Fetched page source");
        Ok(Self::parse(url, source))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Elements matching the CSS selector `css` inside `scope`, in document order.
    pub fn select(&self, scope: Scope, css: &str) -> Result<Vec<DomNode>, ScheduleError> {
        let selector = Selector::parse(css).map_err(|e| ScheduleError::Selector {
            selector: css.to_string(),
            reason: format!("{e:?}"),
        })?;

        let (start, end) = match scope {
            Scope::FollowingSiblings(origin) => return self.following_siblings(origin, &selector),
            Scope::Document => (0, self.len()),
            Scope::Within(origin) => (origin.0 + 1, self.subtree_end(origin)?),
            Scope::Following(origin) => (self.subtree_end(origin)?, self.len()),
            Scope::Parent(origin) => match self.parent_of(origin)? {
                Some(parent) => (parent.0 + 1, self.subtree_end(parent)?),
                None => return Ok(Vec::new()),
            },
            Scope::NearestAncestor(origin, tag) => match self.ancestor_of(origin, tag)? {
                Some(ancestor) => (ancestor.0 + 1, self.subtree_end(ancestor)?),
                None => return Ok(Vec::new()),
            },
        };

        Ok(self
            .document
            .tree
            .root()
            .descendants()
            .enumerate()
            .take(end)
            .skip(start)
            .filter_map(|(index, node)| ElementRef::wrap(node).map(|element| (index, element)))
            .filter(|(_, element)| selector.matches(element))
            .map(|(index, element)| DomNode { handle: NodeHandle(index), text: visible_text(element) })
            .collect())
    }

    fn len(&self) -> usize {
        self.document.tree.root().descendants().count()
    }

    fn element_at(&self, handle: NodeHandle) -> Result<ElementRef<'_>, ScheduleError> {
        self.document
            .tree
            .root()
            .descendants()
            .nth(handle.0)
            .and_then(ElementRef::wrap)
            .ok_or(ScheduleError::UnknownNode(handle.0))
    }

    fn handle_of(&self, element: ElementRef<'_>) -> Option<NodeHandle> {
        self.document
            .tree
            .root()
            .descendants()
            .position(|node| node == *element)
            .map(NodeHandle)
    }

    /// One past the last position of `handle`'s subtree.
    fn subtree_end(&self, handle: NodeHandle) -> Result<usize, ScheduleError> {
        let element = self.element_at(handle)?;
        Ok(handle.0 + element.descendants().count())
    }

    fn parent_of(&self, handle: NodeHandle) -> Result<Option<NodeHandle>, ScheduleError> {
        let element = self.element_at(handle)?;
        Ok(element
            .parent()
            .and_then(ElementRef::wrap)
            .and_then(|parent| self.handle_of(parent)))
    }

    fn ancestor_of(&self, handle: NodeHandle, tag: &str) -> Result<Option<NodeHandle>, ScheduleError> {
        let element = self.element_at(handle)?;
        Ok(element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| ancestor.value().name() == tag)
            .and_then(|ancestor| self.handle_of(ancestor)))
    }

    fn following_siblings(&self, origin: NodeHandle, selector: &Selector) -> Result<Vec<DomNode>, ScheduleError> {
        let element = self.element_at(origin)?;
        Ok(element
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .filter(|sibling| selector.matches(sibling))
            .filter_map(|sibling| {
                self.handle_of(sibling)
                    .map(|handle| DomNode { handle, text: visible_text(sibling) })
            })
            .collect())
    }
}

impl Renderer for HtmlPage {
    fn load(&mut self, url: &str) -> Result<(), ScheduleError> {
        *self = Self::fetch(url)?;
        Ok(())
    }

    fn page_text(&self) -> Result<String, ScheduleError> {
        Ok(self.source.clone())
    }

    fn query(&self, scope: Scope, selector: &str) -> Result<Vec<DomNode>, ScheduleError> {
        self.select(scope, selector)
    }
}

/// Text as a reader sees it: all text nodes joined, whitespace runs collapsed.
fn visible_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
