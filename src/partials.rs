use crate::compile::Template;
use std::collections::{BTreeMap, HashMap};

/// Describes a type which can find a compiled [`Template`] by name when a
/// partial tag such as `{{> header}}` is rendered.
///
/// Lookup happens at render time, so a partial may include itself.
/// A name that cannot be found renders nothing.
pub trait Partials {
    /// Return the template with the given name, if any.
    fn get_partial(&self, name: &str) -> Option<&Template>;
}

/// No partials, every partial tag renders nothing.
impl Partials for () {
    fn get_partial(&self, _name: &str) -> Option<&Template> {
        None
    }
}

impl Partials for HashMap<String, Template> {
    fn get_partial(&self, name: &str) -> Option<&Template> {
        self.get(name)
    }
}

impl Partials for BTreeMap<String, Template> {
    fn get_partial(&self, name: &str) -> Option<&Template> {
        self.get(name)
    }
}

impl<P> Partials for &P
where
    P: Partials + ?Sized,
{
    fn get_partial(&self, name: &str) -> Option<&Template> {
        (**self).get_partial(name)
    }
}

#[cfg(test)]
mod tests {
    use super::Partials;
    use crate::compile::compile;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_map_partials() {
        let hash = HashMap::from([("a".to_string(), compile("A").unwrap())]);
        let tree = BTreeMap::from([("b".to_string(), compile("B").unwrap())]);

        assert!(hash.get_partial("a").is_some());
        assert!(hash.get_partial("b").is_none());
        assert!(tree.get_partial("b").is_some());
        assert!(().get_partial("a").is_none());
        assert!((&hash).get_partial("a").is_some());
    }
}
