//! Registry of color maps addressed by string identifiers.
//!
//! Hosts typically keep a working map next to two morph endpoints. The registry lets
//! them copy and morph between maps by id; because ids can name the same map twice,
//! these operations reject an output id that equals an input id with [`Error::Alias`].
use std::collections::HashMap;

use tracing::warn;

use crate::blend;
use crate::error::{Error, Result};
use crate::map::ColorMap;

/// Registry for storing and managing color maps by unique string identifiers.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct ColorMapRegistry {
    maps: HashMap<String, ColorMap>,
}

impl ColorMapRegistry {
    /// Creates a new, empty [`ColorMapRegistry`].
    pub fn new() -> Self {
        Self {
            maps: HashMap::new(),
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            maps: HashMap::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn clear(&mut self) {
        self.maps.clear();
    }

    /// Registers `map` under `id`, returning the map it replaced.
    pub fn insert(&mut self, id: impl Into<String>, map: ColorMap) -> Option<ColorMap> {
        let id = id.into();
        let old = self.maps.insert(id.clone(), map);
        if old.is_some() {
            warn!("Replacing color map '{}'.", id);
        }
        old
    }

    pub fn remove(&mut self, id: &str) -> Option<ColorMap> {
        self.maps.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.maps.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&ColorMap> {
        self.maps.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ColorMap> {
        self.maps.get_mut(id)
    }

    /// Registered ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    fn require(&self, id: &str) -> Result<&ColorMap> {
        self.maps
            .get(id)
            .ok_or_else(|| Error::MissingMap { id: id.to_owned() })
    }

    /// Deep-copies map `src` into `dst`, reusing the storage of `dst` if it exists.
    pub fn copy(&mut self, src: &str, dst: &str) -> Result<()> {
        if src == dst {
            return Err(Error::Alias);
        }
        self.require(src)?;
        self.with_output(dst, |maps, out| {
            let source = &maps[src];
            blend::deep_copy_into(source, out);
            Ok(())
        })
    }

    /// Morphs from map `a` to map `b` by `t` into `dst`, which is created if missing.
    pub fn morph(&mut self, a: &str, b: &str, t: f32, dst: &str) -> Result<()> {
        if dst == a || dst == b {
            return Err(Error::Alias);
        }
        if !(0.0..=1.0).contains(&t) {
            return Err(Error::out_of_range("t", t, 0.0, 1.0));
        }
        self.require(a)?;
        self.require(b)?;
        self.with_output(dst, |maps, out| blend::morph_into(&maps[a], &maps[b], t, out))
    }

    /// Detaches the output map so the inputs can be borrowed alongside it. A destination
    /// created for this call is only registered if `f` succeeds.
    fn with_output<F>(&mut self, dst: &str, f: F) -> Result<()>
    where
        F: FnOnce(&HashMap<String, ColorMap>, &mut ColorMap) -> Result<()>,
    {
        let existing = self.maps.remove(dst);
        let created = existing.is_none();
        let mut out = existing.unwrap_or_default();
        let result = f(&self.maps, &mut out);
        if result.is_ok() || !created {
            self.maps.insert(dst.to_owned(), out);
        }
        result
    }
}
