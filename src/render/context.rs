use crate::{compile::Path, value::Value};

/// An immutable scope chain.
///
/// Entering a section pushes a new frame, the enclosing frames are never
/// modified.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// The innermost value.
    head: &'a Value,
    /// The enclosing frame.
    tail: Option<&'a Context<'a>>,
    /// The value the render started with.
    root: &'a Value,
}

impl<'a> Context<'a> {
    /// Create a new [`Context`] with a single frame.
    #[inline]
    pub fn new(root: &'a Value) -> Self {
        Self {
            head: root,
            tail: None,
            root,
        }
    }

    /// Return a new frame with the given value on top of this one.
    #[inline]
    pub fn push<'b>(&'b self, value: &'b Value) -> Context<'b> {
        Context {
            head: value,
            tail: Some(self),
            root: self.root,
        }
    }

    /// Return the innermost value.
    #[inline]
    pub fn head(&self) -> &'a Value {
        self.head
    }

    /// Return the value the render started with.
    #[inline]
    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// Find the value of a path.
    ///
    /// Frames are tried from the innermost outward, and every segment of the
    /// path must resolve against the value of the previous segment. A falsy
    /// result counts as missing, so the search continues with the next frame.
    pub fn lookup(&self, path: &Path) -> Option<&'a Value> {
        match path {
            Path::Implicit => Some(self.head),
            Path::Keys(keys) => self
                .frames()
                .find_map(|frame| resolve(frame, keys).filter(|value| value.is_truthy())),
        }
    }

    /// Iterate over the frame values, innermost first.
    fn frames(&self) -> impl Iterator<Item = &'a Value> {
        let mut next = Some(*self);
        std::iter::from_fn(move || {
            let current = next?;
            next = current.tail.copied();
            Some(current.head)
        })
    }
}

/// Walk the keys starting at the given value.
fn resolve<'a>(value: &'a Value, keys: &[String]) -> Option<&'a Value> {
    keys.iter().try_fold(value, |current, key| {
        if !current.is_truthy() {
            return None;
        }
        current.get(key)
    })
}
