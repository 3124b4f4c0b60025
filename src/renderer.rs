use crate::error::ScheduleError;

/// Opaque identity of an element inside the currently loaded page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub usize);

/// An element matched by a query, with its whitespace-collapsed visible text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomNode {
    pub handle: NodeHandle,
    pub text: String,
}

/// Where a selector is evaluated, relative to an already-found node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Every element of the page.
    Document,
    /// Descendants of the node.
    Within(NodeHandle),
    /// Siblings after the node (the siblings themselves, not their children).
    FollowingSiblings(NodeHandle),
    /// Everything after the node in document order, excluding its own descendants.
    Following(NodeHandle),
    /// Descendants of the node's parent.
    Parent(NodeHandle),
    /// Descendants of the nearest ancestor with the given tag name.
    NearestAncestor(NodeHandle, &'static str),
}

/// A loaded page that can be inspected as raw source and as a DOM.
///
/// Results are in document order. Handles are only valid until the next `load`.
pub trait Renderer {
    fn load(&mut self, url: &str) -> Result<(), ScheduleError>;

    fn page_text(&self) -> Result<String, ScheduleError>;

    fn query(&self, scope: Scope, selector: &str) -> Result<Vec<DomNode>, ScheduleError>;
}
