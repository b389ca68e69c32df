//! Ordered, appendable container of related records.

/// Records loaded through a relation, in fetch order
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<M> {
    items: Vec<M>,
}

impl<M> Default for Collection<M> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<M> Collection<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return the stored element
    pub fn add(&mut self, record: M) -> &mut M {
        let index = self.items.len();
        self.items.push(record);
        &mut self.items[index]
    }

    pub fn first(&self) -> Option<&M> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&M> {
        self.items.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut M> {
        self.items.last_mut()
    }

    pub fn get(&self, index: usize) -> Option<&M> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, M> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, M> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[M] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<M> {
        self.items
    }
}

impl<M> From<Vec<M>> for Collection<M> {
    fn from(items: Vec<M>) -> Self {
        Self { items }
    }
}

impl<M> FromIterator<M> for Collection<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<M> IntoIterator for Collection<M> {
    type Item = M;
    type IntoIter = std::vec::IntoIter<M>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, M> IntoIterator for &'a Collection<M> {
    type Item = &'a M;
    type IntoIter = std::slice::Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, M> IntoIterator for &'a mut Collection<M> {
    type Item = &'a mut M;
    type IntoIter = std::slice::IterMut<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}
