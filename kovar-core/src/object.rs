//! Visual objects - the flat, editor-owned building blocks of a design.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::text::TextContent;

/// Namespace prefix the editor puts in front of shape handles.
const SHAPE_PREFIX: &str = "shape:";

/// Handle of the page that owns the root frame.
const PAGE_HANDLE: &str = "page:page";

/// Opaque, stable handle for a visual object, assigned by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wrap an editor-supplied handle.
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Generate a fresh shape handle.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{SHAPE_PREFIX}{}", Uuid::new_v4()))
    }

    /// Handle of the page that parents the root frame.
    #[must_use]
    pub fn page() -> Self {
        Self(PAGE_HANDLE.to_string())
    }

    /// The raw handle string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The handle with the editor's shape namespace removed.
    ///
    /// Used as the schema id of objects that never received a public name.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.strip_prefix(SHAPE_PREFIX).unwrap_or(&self.0)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(handle: &str) -> Self {
        Self::new(handle)
    }
}

impl From<String> for ObjectId {
    fn from(handle: String) -> Self {
        Self(handle)
    }
}

/// The kind of visual object placed on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectKind {
    /// Rectangle-like geometric shape.
    Rect,
    /// Frame grouping other objects.
    Frame,
    /// Text label.
    Text,
    /// Image backed by an asset.
    Image,
    /// Any other shape type the editor produced.
    Other(String),
}

impl ObjectKind {
    /// Name used for this kind in snapshots and generated public ids.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Rect => "rect",
            Self::Frame => "frame",
            Self::Text => "text",
            Self::Image => "image",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for ObjectKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "rect" | "geo" | "rectangle" => Self::Rect,
            "frame" => Self::Frame,
            "text" => Self::Text,
            "image" => Self::Image,
            _ => Self::Other(kind),
        }
    }
}

impl From<ObjectKind> for String {
    fn from(kind: ObjectKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position and size on the canvas, in editor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// X position relative to the parent.
    pub x: f64,
    /// Y position relative to the parent.
    pub y: f64,
    /// Width, absent for point-like kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height, absent for point-like kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Geometry {
    /// Geometry with a known size.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: Some(width),
            height: Some(height),
        }
    }

    /// Geometry for a point-like object with no intrinsic size.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
        }
    }
}

/// Sibling ordering token.
///
/// Keys compare lexicographically as strings. A key the editor stored as
/// anything other than a string is kept as "malformed" and sorts before every
/// well-formed key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderKey(Option<String>);

impl OrderKey {
    /// Create a key from its string token.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    /// The string token, or `None` if the stored key was malformed.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether the stored key could not be read as a string.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.0.is_none()
    }
}

impl From<&str> for OrderKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl Serialize for OrderKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OrderKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(key) => Ok(Self(Some(key))),
            other => {
                tracing::debug!(key = %other, "non-string order key, sorting first");
                Ok(Self(None))
            }
        }
    }
}

/// Optional visual attributes set in the editor's style panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualStyle {
    /// Named stroke/text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Fill mode (`none`, `semi`, `solid`, `pattern`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Dash style of the outline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
    /// Opacity between 0 and 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Outline width in pixels (1-10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
}

/// Semantic override a user can pick for rectangle-like objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentOverride {
    /// Generic block container (the default).
    Container,
    /// Clickable button.
    Button,
    /// Drawing surface.
    Canvas,
}

fn component_or_default<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ComponentOverride>, D::Error> {
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some("container") => Ok(Some(ComponentOverride::Container)),
        Some("button") => Ok(Some(ComponentOverride::Button)),
        Some("canvas") => Ok(Some(ComponentOverride::Canvas)),
        Some(other) => Err(serde::de::Error::unknown_variant(
            other,
            &["container", "button", "canvas"],
        )),
    }
}

/// Designer metadata stored alongside an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Human-readable unique name, once assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    /// User-chosen semantic override. An empty string means the default.
    #[serde(
        default,
        deserialize_with = "component_or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub component: Option<ComponentOverride>,
    /// Expression controlling visibility at runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_binding: Option<String>,
    /// Text only: render as a display heading instead of body text.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub display: bool,
    /// Marks the frame that represents the canvas boundary.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub root_frame: bool,
}

/// One placed element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualObject {
    /// Stable editor handle.
    pub id: ObjectId,
    /// Object kind.
    pub kind: ObjectKind,
    /// Position and size.
    #[serde(default)]
    pub geometry: Geometry,
    /// Handle of the containing object (or the root frame).
    pub parent: ObjectId,
    /// Sibling ordering token.
    #[serde(default)]
    pub order_key: OrderKey,
    /// Visual attributes.
    #[serde(default)]
    pub style: VisualStyle,
    /// Text content, for text objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    /// Asset reference, for image objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Designer metadata.
    #[serde(default)]
    pub meta: ObjectMeta,
}

impl VisualObject {
    /// Create an object of the given kind under `parent`.
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, kind: ObjectKind, parent: impl Into<ObjectId>) -> Self {
        Self {
            id: id.into(),
            kind,
            geometry: Geometry::default(),
            parent: parent.into(),
            order_key: OrderKey::default(),
            style: VisualStyle::default(),
            text: None,
            image_ref: None,
            meta: ObjectMeta::default(),
        }
    }

    /// Create the root frame representing the canvas boundary.
    #[must_use]
    pub fn root_frame(id: impl Into<ObjectId>, width: f64, height: f64) -> Self {
        let mut frame = Self::new(id, ObjectKind::Frame, ObjectId::page())
            .with_geometry(Geometry::new(0.0, 0.0, width, height));
        frame.meta.root_frame = true;
        frame
    }

    /// Set the geometry.
    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the sibling order key.
    #[must_use]
    pub fn with_order_key(mut self, key: impl Into<String>) -> Self {
        self.order_key = OrderKey::new(key);
        self
    }

    /// Set the public name.
    #[must_use]
    pub fn with_public_id(mut self, name: impl Into<String>) -> Self {
        self.meta.public_id = Some(name.into());
        self
    }

    /// Set the visual style.
    #[must_use]
    pub fn with_style(mut self, style: VisualStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<TextContent>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the image asset reference.
    #[must_use]
    pub fn with_image_ref(mut self, asset: impl Into<String>) -> Self {
        self.image_ref = Some(asset.into());
        self
    }

    /// Set the semantic override.
    #[must_use]
    pub fn with_component(mut self, component: ComponentOverride) -> Self {
        self.meta.component = Some(component);
        self
    }

    /// Whether this object is the canvas root frame.
    #[must_use]
    pub fn is_root_frame(&self) -> bool {
        self.meta.root_frame
    }

    /// The assigned public name, if any.
    #[must_use]
    pub fn public_id(&self) -> Option<&str> {
        self.meta.public_id.as_deref()
    }
}
