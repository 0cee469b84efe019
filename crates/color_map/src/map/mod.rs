//! Color maps: ordered collections of quantized key colors over [0,1]^2.
//!
//! A [`ColorMap`] keeps its [`ColorMapEntry`] values in insertion order, permits
//! duplicates, and carries the inverse-distance exponent used when it is evaluated.
//! Entries at coincident positions are allowed but give undefined colors there.
use std::ops::{Index, IndexMut, RangeInclusive};

use glam::{Vec2, Vec4};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod color;
pub mod entry;
pub mod registry;

pub use color::{Color8, EMPTY_COLOR};
pub use entry::{ColorMapEntry, PackedPosition, POSITION_SCALE};
pub use registry::ColorMapRegistry;

/// Exponent of a new map; the inverse-square law.
pub const DEFAULT_IDW_EXPONENT: f32 = 2.0;

/// Accepted range of [`ColorMap::idw_exponent`].
pub const IDW_EXPONENT_RANGE: RangeInclusive<f32> = 0.0..=32.0;

/// A 2D color field defined by key colors at scattered positions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "ColorMapRepr", into = "ColorMapRepr")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMap {
    entries: Vec<ColorMapEntry>,
    idw_exponent: f32,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorMap {
    /// Creates an empty map with the default exponent.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            idw_exponent: DEFAULT_IDW_EXPONENT,
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
            idw_exponent: DEFAULT_IDW_EXPONENT,
        }
    }

    /// Sets the exponent, builder style.
    pub fn with_idw_exponent(mut self, exponent: f32) -> Result<Self> {
        self.set_idw_exponent(exponent)?;
        Ok(self)
    }

    /// Adds an entry, builder style.
    pub fn with_entry(mut self, entry: ColorMapEntry) -> Self {
        self.push(entry);
        self
    }

    /// Controls the falloff of colors. Low exponents diffuse quickly, while an exponent of
    /// `32` makes the map look nearly like a Voronoi diagram.
    #[inline]
    pub fn idw_exponent(&self) -> f32 {
        self.idw_exponent
    }

    /// Sets the exponent. Values outside [`IDW_EXPONENT_RANGE`] (or NaN) are rejected with
    /// [`Error::OutOfRange`] and leave the map unchanged.
    pub fn set_idw_exponent(&mut self, exponent: f32) -> Result<()> {
        if !IDW_EXPONENT_RANGE.contains(&exponent) {
            return Err(Error::out_of_range(
                "idw_exponent",
                exponent,
                *IDW_EXPONENT_RANGE.start(),
                *IDW_EXPONENT_RANGE.end(),
            ));
        }
        self.idw_exponent = exponent;
        Ok(())
    }

    /// Overwrites `self` with the contents of `source`, reusing the entry allocation.
    pub(crate) fn assign_from(&mut self, source: &ColorMap) {
        self.entries.clone_from(&source.entries);
        self.idw_exponent = source.idw_exponent;
    }

    /// Clears the entries and sets an exponent already known to be in range.
    pub(crate) fn reset(&mut self, idw_exponent: f32) {
        debug_assert!(IDW_EXPONENT_RANGE.contains(&idw_exponent));
        self.entries.clear();
        self.idw_exponent = idw_exponent;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ColorMapEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorMapEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ColorMapEntry> {
        self.entries.get(index)
    }

    /// Replaces the entry at `index`, returning the old one, or `None` if out of bounds.
    pub fn set(&mut self, index: usize, entry: ColorMapEntry) -> Option<ColorMapEntry> {
        self.entries
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, entry))
    }

    pub fn push(&mut self, entry: ColorMapEntry) {
        self.entries.push(entry);
    }

    /// Packs `position` and appends a new entry.
    pub fn add(&mut self, position: impl Into<Vec2>, color: Color8) -> Result<()> {
        self.push(ColorMapEntry::new(position, color)?);
        Ok(())
    }

    /// Inserts `entry` at `index`, shifting later entries.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, entry: ColorMapEntry) {
        self.entries.insert(index, entry);
    }

    /// Removes and returns the entry at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> ColorMapEntry {
        self.entries.remove(index)
    }

    /// Removes the first entry equal to `entry`. Returns `true` if one was removed.
    pub fn remove_entry(&mut self, entry: &ColorMapEntry) -> bool {
        match self.index_of(entry) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn index_of(&self, entry: &ColorMapEntry) -> Option<usize> {
        self.entries.iter().position(|e| e == entry)
    }

    pub fn contains(&self, entry: &ColorMapEntry) -> bool {
        self.entries.contains(entry)
    }

    /// Removes all entries. The exponent is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Swaps the x and y position of every entry in place.
    pub fn transpose(&mut self) {
        for entry in &mut self.entries {
            *entry = entry.transposed();
        }
    }

    /// Returns the index of the entry closest to `p`. The first of several equally
    /// close entries wins.
    pub fn nearest(&self, p: Vec2) -> Result<usize> {
        let mut best = None;
        let mut best_dist_sq = f32::INFINITY;
        for (i, entry) in self.entries.iter().enumerate() {
            let dist_sq = entry.position().distance_squared(p);
            if best.is_none() || dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best = Some(i);
            }
        }
        best.ok_or(Error::EmptyMap)
    }

    /// Normalized color at `p`; see [`crate::blend::color_at`].
    #[inline]
    pub fn color_at(&self, p: Vec2) -> Vec4 {
        crate::blend::color_at(self, p)
    }

    /// [`ColorMap::color_at`] quantized to 8 bits per channel.
    #[inline]
    pub fn color8_at(&self, p: Vec2) -> Color8 {
        Color8::from_vec4(self.color_at(p))
    }
}

impl Index<usize> for ColorMap {
    type Output = ColorMapEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl IndexMut<usize> for ColorMap {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.entries[index]
    }
}

impl<'a> IntoIterator for &'a ColorMap {
    type Item = &'a ColorMapEntry;
    type IntoIter = std::slice::Iter<'a, ColorMapEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Extend<ColorMapEntry> for ColorMap {
    fn extend<I: IntoIterator<Item = ColorMapEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl FromIterator<ColorMapEntry> for ColorMap {
    fn from_iter<I: IntoIterator<Item = ColorMapEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            idw_exponent: DEFAULT_IDW_EXPONENT,
        }
    }
}

/// Serialized form of a [`ColorMap`]; the exponent is validated on the way in.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct ColorMapRepr {
    entries: Vec<ColorMapEntry>,
    #[serde(default = "default_idw_exponent")]
    idw_exponent: f32,
}

#[cfg(feature = "serde")]
fn default_idw_exponent() -> f32 {
    DEFAULT_IDW_EXPONENT
}

#[cfg(feature = "serde")]
impl TryFrom<ColorMapRepr> for ColorMap {
    type Error = Error;

    fn try_from(repr: ColorMapRepr) -> Result<Self> {
        let mut map = ColorMap {
            entries: repr.entries,
            idw_exponent: DEFAULT_IDW_EXPONENT,
        };
        map.set_idw_exponent(repr.idw_exponent)?;
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl From<ColorMap> for ColorMapRepr {
    fn from(map: ColorMap) -> Self {
        Self {
            entries: map.entries,
            idw_exponent: map.idw_exponent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(x: f32, y: f32, c: Color8) -> ColorMapEntry {
        ColorMapEntry::new(Vec2::new(x, y), c).unwrap()
    }

    fn sample_map() -> ColorMap {
        ColorMap::new()
            .with_entry(entry(0.1, 0.2, Color8::rgb(255, 0, 0)))
            .with_entry(entry(0.9, 0.3, Color8::rgb(0, 255, 0)))
            .with_entry(entry(0.5, 0.8, Color8::rgb(0, 0, 255)))
    }

    #[test]
    fn new_map_is_empty_with_default_exponent() {
        let map = ColorMap::new();
        assert!(map.is_empty());
        assert_eq!(map.idw_exponent(), 2.0);
    }

    #[test]
    fn exponent_outside_range_is_rejected() {
        let mut map = ColorMap::new();
        assert!(matches!(
            map.set_idw_exponent(40.0),
            Err(Error::OutOfRange { what: "idw_exponent", .. })
        ));
        assert!(map.set_idw_exponent(-0.5).is_err());
        assert!(map.set_idw_exponent(f32::NAN).is_err());
        assert_eq!(map.idw_exponent(), 2.0);

        map.set_idw_exponent(32.0).unwrap();
        assert_eq!(map.idw_exponent(), 32.0);
        map.set_idw_exponent(0.0).unwrap();
        assert_eq!(map.idw_exponent(), 0.0);
        assert!(ColorMap::new().with_idw_exponent(33.0).is_err());
    }

    #[test]
    fn list_operations_preserve_insertion_order() {
        let mut map = sample_map();
        let extra = entry(0.0, 0.0, Color8::WHITE);
        map.insert(1, extra);
        assert_eq!(map.len(), 4);
        assert_eq!(map[1], extra);
        assert_eq!(map.index_of(&extra), Some(1));

        let removed = map.remove(0);
        assert_eq!(removed.color(), Color8::rgb(255, 0, 0));
        assert_eq!(map[0], extra);

        assert!(map.remove_entry(&extra));
        assert!(!map.contains(&extra));
        assert!(!map.remove_entry(&extra));
        assert_eq!(map.len(), 2);

        let colors: Vec<_> = map.iter().map(|e| e.color()).collect();
        assert_eq!(colors, vec![Color8::rgb(0, 255, 0), Color8::rgb(0, 0, 255)]);
    }

    #[test]
    fn duplicates_are_permitted() {
        let e = entry(0.5, 0.5, Color8::WHITE);
        let map: ColorMap = [e, e].into_iter().collect();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn set_replaces_and_reports_out_of_bounds() {
        let mut map = sample_map();
        let e = entry(0.4, 0.4, Color8::BLACK);
        let old = map.set(2, e).unwrap();
        assert_eq!(old.color(), Color8::rgb(0, 0, 255));
        assert_eq!(map[2], e);
        assert!(map.set(3, e).is_none());
    }

    #[test]
    fn clear_keeps_exponent() {
        let mut map = sample_map().with_idw_exponent(5.0).unwrap();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.idw_exponent(), 5.0);
    }

    #[test]
    fn add_rejects_out_of_range_positions() {
        let mut map = ColorMap::new();
        assert!(map.add(Vec2::new(1.5, 0.0), Color8::WHITE).is_err());
        assert!(map.is_empty());
        map.add(Vec2::new(1.0, 0.0), Color8::WHITE).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn transpose_is_an_involution() {
        let original = sample_map();
        let mut map = original.clone();
        map.transpose();
        for (a, b) in original.iter().zip(map.iter()) {
            assert_eq!(b.packed_position(), a.packed_position().transposed());
            assert_eq!(b.color(), a.color());
        }
        map.transpose();
        assert_eq!(map, original);
        for (a, b) in original.iter().zip(map.iter()) {
            assert_eq!(a.packed_position(), b.packed_position());
            assert_eq!(a.weight(), b.weight());
        }
    }

    #[test]
    fn nearest_on_empty_map_fails() {
        assert_eq!(
            ColorMap::new().nearest(Vec2::new(0.3, 0.3)),
            Err(Error::EmptyMap)
        );
    }

    #[test]
    fn nearest_finds_closest_entry() {
        let map = sample_map();
        assert_eq!(map.nearest(Vec2::new(0.0, 0.0)), Ok(0));
        assert_eq!(map.nearest(Vec2::new(1.0, 0.3)), Ok(1));
        assert_eq!(map.nearest(Vec2::new(0.5, 1.0)), Ok(2));
    }

    #[test]
    fn nearest_handles_far_queries() {
        let map = sample_map();
        assert!(map.nearest(Vec2::splat(1.0e20)).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_keeps_raw_fields() {
        let map = sample_map().with_idw_exponent(4.0).unwrap();
        let text = ron::to_string(&map).unwrap();
        let back: ColorMap = ron::from_str(&text).unwrap();
        assert_eq!(back, map);
        assert_eq!(back.idw_exponent(), 4.0);
        assert!(text.contains("x:"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_rejects_bad_exponent() {
        let text = "(entries: [], idw_exponent: 64.0)";
        assert!(ron::from_str::<ColorMap>(text).is_err());
    }
}
