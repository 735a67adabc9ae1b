use std::collections::HashSet;

/// An insertion-ordered set of resource names.
///
/// Keeps names in the order they were first inserted alongside a hash index
/// for membership tests. Liveness results feed a rebuild that must follow the
/// original lump order, so iteration order here is never left to hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet {
    order: Vec<String>,
    index: HashSet<String>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name, returning `true` if it was not present yet.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.index.contains(name) {
            return false;
        }
        self.index.insert(name.to_string());
        self.order.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Names in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}

impl<'a> Extend<&'a str> for NameSet {
    fn extend<T: IntoIterator<Item = &'a str>>(&mut self, iter: T) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl<'a> FromIterator<&'a str> for NameSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut set = NameSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a NameSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.order
            .iter()
            .map(String::as_str as fn(&'a String) -> &'a str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_insertion_order() {
        let mut set = NameSet::new();
        assert!(set.insert("SKY1"));
        assert!(set.insert("DOOR1"));
        assert!(!set.insert("SKY1"));
        assert!(set.insert("BROWN1"));

        assert_eq!(set.iter().collect::<Vec<_>>(), ["SKY1", "DOOR1", "BROWN1"]);
        assert!(set.contains("DOOR1"));
        assert!(!set.contains("door1"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_collect() {
        let set = ["A", "B", "A", "C"].into_iter().collect::<NameSet>();
        assert_eq!(set.as_slice(), ["A", "B", "C"]);
    }
}
