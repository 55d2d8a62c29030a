//! In-memory datafile tree.
//!
//! A [`Datafile`] owns its root [`Object`]s; every object owns its
//! [`Property`] list and either a raw payload or its child objects. Trees are
//! built once by the parser (or by the constructors, for writing) and exposed
//! read-only afterwards.

use crate::tags;
use encoding_rs::Encoding;
use oxidat_core::FourCc;
use std::borrow::Cow;
use std::slice;

/// A tagged metadata record attached to an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    id: FourCc,
    value: Vec<u8>,
}

impl Property {
    /// Create a property.
    pub fn new(id: FourCc, value: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }

    /// Property identifier, e.g. `NAME`.
    pub fn id(&self) -> FourCc {
        self.id
    }

    /// Raw value bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Value as UTF-8, replacing invalid sequences.
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }

    /// Value decoded with a legacy code page.
    ///
    /// ```rust
    /// use oxidat_core::FourCc;
    /// use oxidat_datafile::Property;
    ///
    /// let prop = Property::new(FourCc::from_bytes(b"NAME"), vec![0xCC, 0xE0, 0xE3]);
    /// assert_eq!(prop.decode(encoding_rs::WINDOWS_1251), "Маг");
    /// ```
    pub fn decode(&self, encoding: &'static Encoding) -> Cow<'_, str> {
        encoding.decode_without_bom_handling(&self.value).0
    }
}

/// What an object carries after its properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectBody {
    /// Decompressed payload bytes of a leaf object.
    Payload(Vec<u8>),
    /// Children of a `FILE` container.
    Children(Vec<Object>),
}

/// One asset in a datafile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    kind: FourCc,
    properties: Vec<Property>,
    body: ObjectBody,
}

impl Object {
    /// Create a leaf object.
    ///
    /// Leaves of kind `FILE` or `prop` cannot be written back; use
    /// [`Object::container`] for nested lists.
    pub fn new(kind: FourCc, properties: Vec<Property>, payload: Vec<u8>) -> Self {
        Self {
            kind,
            properties,
            body: ObjectBody::Payload(payload),
        }
    }

    /// Create a `FILE` container.
    pub fn container(properties: Vec<Property>, children: Vec<Object>) -> Self {
        Self {
            kind: tags::FILE,
            properties,
            body: ObjectBody::Children(children),
        }
    }

    /// Object type tag.
    pub fn kind(&self) -> FourCc {
        self.kind
    }

    /// Properties in file order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Payload or children.
    pub fn body(&self) -> &ObjectBody {
        &self.body
    }

    /// Payload bytes, `None` for containers.
    pub fn payload(&self) -> Option<&[u8]> {
        match &self.body {
            ObjectBody::Payload(data) => Some(data),
            ObjectBody::Children(_) => None,
        }
    }

    /// Child objects, `None` for leaves.
    pub fn children(&self) -> Option<&[Object]> {
        match &self.body {
            ObjectBody::Children(children) => Some(children),
            ObjectBody::Payload(_) => None,
        }
    }

    /// Whether this object is a `FILE` container.
    pub fn is_container(&self) -> bool {
        matches!(self.body, ObjectBody::Children(_))
    }

    /// First property with the given id.
    pub fn property(&self, id: FourCc) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// All properties with the given id, in file order.
    pub fn properties_with(&self, id: FourCc) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(move |p| p.id == id)
    }

    /// The `NAME` property as text.
    pub fn name(&self) -> Option<Cow<'_, str>> {
        self.property(tags::NAME).map(Property::as_str)
    }
}

/// A parsed datafile: the ordered root objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Datafile {
    objects: Vec<Object>,
}

impl Datafile {
    /// Create a datafile from root objects.
    pub fn new(objects: Vec<Object>) -> Self {
        Self { objects }
    }

    /// Root objects in file order.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Number of root objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether there are no root objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Walk every object depth-first in declaration order.
    ///
    /// Yields `(depth, object)` where root objects have depth 0.
    pub fn iter_depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            stack: vec![self.objects.iter()],
        }
    }

    /// Resolve a `/`-separated path of `NAME` values.
    ///
    /// Every component but the last must name a container.
    pub fn find(&self, path: &str) -> Option<&Object> {
        let mut level = self.objects.as_slice();
        let mut found = None;
        for component in path.split('/').filter(|c| !c.is_empty()) {
            if let Some(parent) = found {
                level = Object::children(parent)?;
            }
            found = Some(
                level
                    .iter()
                    .find(|obj| obj.name().as_deref() == Some(component))?,
            );
        }
        found
    }

    /// Take the root objects out of the datafile.
    pub fn into_objects(self) -> Vec<Object> {
        self.objects
    }
}

/// Depth-first iterator returned by [`Datafile::iter_depth_first`].
#[derive(Debug)]
pub struct DepthFirst<'a> {
    stack: Vec<slice::Iter<'a, Object>>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (usize, &'a Object);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(obj) => {
                    if let Some(children) = obj.children() {
                        self.stack.push(children.iter());
                    }
                    return Some((depth, obj));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
