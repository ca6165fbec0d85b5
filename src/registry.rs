//! Ordered storage for the live entities of one kind.

/// A growable, ordered collection of live entities.
///
/// Order is insertion order and is significant for the formation, where
/// each member follows the one stored before it. Removal is always done
/// either by index (after a search has finished borrowing) or through
/// [`Registry::sweep`], so callers never hold an iterator across a removal.
#[derive(Clone, Debug)]
pub struct Registry<T> {
    items: Vec<T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove the entity at `index`, shifting later entities down by one.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Remove every entity, handing them back so the caller can report them.
    pub fn clear(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }

    /// Visit every entity mutably; entities for which `keep` returns `false`
    /// are removed and returned in their original order.
    pub fn sweep(&mut self, mut keep: impl FnMut(&mut T) -> bool) -> Vec<T> {
        let mut removed = Vec::new();
        for mut item in std::mem::take(&mut self.items) {
            if keep(&mut item) {
                self.items.push(item);
            } else {
                removed.push(item);
            }
        }
        removed
    }

    /// Index of the first entity matching `pred`.
    pub fn find(&self, pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.iter().position(pred)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> FromIterator<T> for Registry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
