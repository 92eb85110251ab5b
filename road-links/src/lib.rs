pub mod geometry;
pub use geometry::*;

pub mod table;
pub use table::*;

pub mod nearest;
pub use nearest::*;

pub mod index;
pub use index::*;

#[inline]
pub(crate) fn default<T: Default>() -> T {
    T::default()
}

pub type Id = u64;
