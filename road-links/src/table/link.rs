use derive_more::{From, Into};
use geo_types::LineString;
use serde::{Deserialize, Serialize};

use crate::{default, Id};

use super::*;

#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Forward = 0,
    Backward = 1,
    #[default]
    Bidirectional = 2,
}

impl From<u8> for Direction {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Forward,
            1 => Self::Backward,
            _ => Self::Bidirectional,
        }
    }
}

impl From<Direction> for u8 {
    fn from(value: Direction) -> Self {
        value as Self
    }
}

/// Attributes commonly carried by a road link feature.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttributes {
    pub road_link_id: Option<Id>,
    pub direction: Direction,
    pub speed_limit: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct LinkKey(pub Id);

/// An identified polyline and the caller's attributes for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature<A> {
    pub id: Id,
    pub geom: LineString<f64>,
    pub attributes: A,
}

impl<A> Feature<A> {
    pub fn new(id: Id, geom: LineString<f64>, attributes: A) -> Self {
        Self {
            id,
            geom,
            attributes,
        }
    }
}

/// Borrowed view of one feature, whether it lives in a [Feature] or a [Features] row.
#[derive(Debug)]
pub struct FeatureView<'a, A> {
    pub id: Id,
    pub geom: &'a LineString<f64>,
    pub attributes: &'a A,
}

impl<A> Clone for FeatureView<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for FeatureView<'_, A> {}

impl<'a, A> From<&'a Feature<A>> for FeatureView<'a, A> {
    fn from(feature: &'a Feature<A>) -> Self {
        Self {
            id: feature.id,
            geom: &feature.geom,
            attributes: &feature.attributes,
        }
    }
}

/// Column store of link features. Row order is the order features were inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Features<A> {
    pub id: Vec<Id>, // Primary key
    pub geom: Vec<LineString<f64>>,
    pub attributes: Vec<A>,
}

impl<A> Default for Features<A> {
    fn default() -> Self {
        Self {
            id: default(),
            geom: default(),
            attributes: default(),
        }
    }
}

impl<A> Features<A> {
    pub fn new() -> Self {
        default()
    }

    pub fn len(&self) -> usize {
        self.id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// The row at `index`, if there is one.
    pub fn view(&self, index: usize) -> Option<FeatureView<'_, A>> {
        Some(FeatureView {
            id: *self.id.get(index)?,
            geom: self.geom.get(index)?,
            attributes: self.attributes.get(index)?,
        })
    }

    pub fn views(&self) -> impl Iterator<Item = FeatureView<'_, A>> {
        self.id
            .iter()
            .zip(self.geom.iter())
            .zip(self.attributes.iter())
            .map(|((&id, geom), attributes)| FeatureView {
                id,
                geom,
                attributes,
            })
    }
}

impl<A> FromIterator<Feature<A>> for Features<A> {
    fn from_iter<I: IntoIterator<Item = Feature<A>>>(iter: I) -> Self {
        let mut slf: Self = default();
        slf.insert_many(iter);
        slf
    }
}

impl<A> Insertable<Feature<A>> for Features<A> {
    type Key = LinkKey;

    fn insert(&mut self, data: Feature<A>) -> Self::Key {
        // Does not insert duplicates, the first feature with an id is kept
        let key = LinkKey::from(data.id);
        if self.id.contains(&data.id) {
            return key;
        }

        self.id.push(data.id);
        self.geom.push(data.geom);
        self.attributes.push(data.attributes);

        key
    }
}

impl<A> Deleteable<LinkKey> for Features<A> {
    type Output = Feature<A>;

    fn delete(&mut self, key: &LinkKey) -> Option<Self::Output> {
        let index = self.find_index(key)?;
        Some(Self::Output {
            id: self.id.remove(index),
            geom: self.geom.remove(index),
            attributes: self.attributes.remove(index),
        })
    }
}

impl<A> Queryable<LinkKey> for Features<A> {
    fn find_index(&self, key: &LinkKey) -> Option<usize> {
        let id: Id = (*key).into();
        self.id.iter().position(|&x| x == id)
    }
}
