use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Shared error type for the Spotlight kernel crates.
#[derive(Debug, Error, Clone)]
pub enum SpotlightError {
    #[error("{message}")]
    Message { message: String },
}

impl SpotlightError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

/// Opaque identifier for one registered renderer instance.
///
/// Many renderers may be registered at the same time and the set is mutable
/// over the session lifetime; ids are never reused.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RendererId(pub String);

impl RendererId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for RendererId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RendererId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Element id scoped to one renderer's tree. Not meaningful across renderers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque token for a host-native node (a DOM node, a native view).
///
/// The kernel never looks inside the handle; it only forwards it to overlays
/// and compares it for consecutive-target dedup.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NodeHandle(pub u64);

/// Fully qualified reference to one inspectable element.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    pub renderer: RendererId,
    pub element: ElementId,
}

impl ElementRef {
    pub fn new(renderer: RendererId, element: ElementId) -> Self {
        Self { renderer, element }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "renderer={} element={}", self.renderer.0, self.element.0)
    }
}

/// Source position an element was declared at.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One step of an element's owner chain, ordered toward the root.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub id: ElementId,
}

/// Inspection payload for one element, recomputed per lookup and never
/// cached beyond a single resolution.
///
/// `owners` is ordered from the most-immediate declaring scope outward; the
/// source locator walk relies on that ordering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InspectedElementInfo {
    pub id: ElementId,
    pub source: Option<SourceLocation>,
    pub owners: Vec<OwnerRef>,
}

impl InspectedElementInfo {
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            source: None,
            owners: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_owners(mut self, owners: Vec<OwnerRef>) -> Self {
        self.owners = owners;
        self
    }
}

/// Category a component filter rule matches on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentFilterKind {
    ElementType,
    DisplayName,
    SourceLocation,
    HigherOrder,
}

/// Element-type code for nodes with no useful inspection data; hidden by the
/// backend's default filter set.
pub const ELEMENT_TYPE_OTHER_OR_UNKNOWN: u32 = 9;

/// A rule excluding one category of elements from inspection results.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ComponentFilter {
    pub kind: ComponentFilterKind,
    pub value: u32,
    pub is_enabled: bool,
}

impl ComponentFilter {
    pub fn element_type(value: u32) -> Self {
        Self {
            kind: ComponentFilterKind::ElementType,
            value,
            is_enabled: true,
        }
    }
}
