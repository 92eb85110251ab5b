pub mod link;
pub use link::*;

/// Rows of type `Data` can be inserted into Self
pub trait Insertable<Data> {
    type Key;
    /// Insert a row into Self
    fn insert(&mut self, data: Data) -> Self::Key;
    /// Insert many rows into Self
    fn insert_many<I: IntoIterator<Item = Data>>(&mut self, data: I) -> Vec<Self::Key> {
        data.into_iter().map(|x| self.insert(x)).collect()
    }
}

/// Rows addressed by `Key` can be removed from Self
pub trait Deleteable<Key> {
    type Output;
    /// Removes the row at Key, returning it
    fn delete(&mut self, key: &Key) -> Option<Self::Output>;
    fn delete_many(&mut self, keys: &[Key]) -> Vec<Option<Self::Output>> {
        keys.iter().map(|x| self.delete(x)).collect()
    }
}

/// Rows addressed by `Key` can be located in Self
pub trait Queryable<Key> {
    /// Position of the row at Key
    fn find_index(&self, key: &Key) -> Option<usize>;
    fn find_many_indexes(&self, keys: &[Key]) -> Vec<Option<usize>> {
        keys.iter().map(|x| self.find_index(x)).collect()
    }
}
