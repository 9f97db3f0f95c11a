//! Memoization of renderer resources across one generation pass.
//!
//! Geometry, material pairs and emote textures are shared behind `Arc`, so
//! a hit returns the very object built on the first miss. `cleanup` drops
//! every entry, aborts in-flight texture fetches and starts a new
//! generation; loads issued under an older generation are discarded when
//! they complete.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::AbortHandle;
use text3d_core::{Color, GeometryParams, Style};
use text3d_scene::{MaterialPair, TextGeometry, Texture};

/// Geometry cache key: trimmed text, style and geometry parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometryKey {
    pub text: String,
    pub style: Style,
    params: String,
}

impl GeometryKey {
    pub fn new(text: impl Into<String>, style: Style, params: &GeometryParams) -> Self {
        Self {
            text: text.into(),
            style,
            params: params.cache_fingerprint(),
        }
    }
}

/// Hit/miss counters for one map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
}

impl CacheCounters {
    /// Hit rate (0.0 - 1.0)
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub geometry: CacheCounters,
    pub material: CacheCounters,
    pub texture: CacheCounters,
}

/// What a `cleanup` released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisposeReport {
    pub geometries: usize,
    pub materials: usize,
    pub textures: usize,
    pub aborted_loads: usize,
}

/// Resource cache owned by the caller and lent to the generator.
#[derive(Debug, Default)]
pub struct ResourceCache {
    geometries: HashMap<GeometryKey, Arc<TextGeometry>>,
    materials: HashMap<Color, Arc<MaterialPair>>,
    textures: HashMap<String, Arc<Texture>>,
    in_flight: HashMap<u64, AbortHandle>,
    next_load: u64,
    generation: u64,
    stats: CacheStats,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation. Bumped by every `cleanup`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Return the cached geometry for `key`, building it on a miss.
    pub fn geometry_or_insert_with(
        &mut self,
        key: GeometryKey,
        build: impl FnOnce() -> TextGeometry,
    ) -> Arc<TextGeometry> {
        if let Some(geometry) = self.geometries.get(&key) {
            self.stats.geometry.hits += 1;
            tracing::debug!(text = %key.text, style = %key.style, "text geometry cache hit");
            return Arc::clone(geometry);
        }
        self.stats.geometry.misses += 1;
        tracing::debug!(text = %key.text, style = %key.style, "building text geometry");
        let geometry = Arc::new(build());
        self.stats.geometry.inserts += 1;
        self.geometries.insert(key, Arc::clone(&geometry));
        geometry
    }

    /// Front/side material pair for a color.
    pub fn materials_for(&mut self, color: Color) -> Arc<MaterialPair> {
        if let Some(pair) = self.materials.get(&color) {
            self.stats.material.hits += 1;
            return Arc::clone(pair);
        }
        self.stats.material.misses += 1;
        self.stats.material.inserts += 1;
        let pair = Arc::new(MaterialPair::for_color(color));
        self.materials.insert(color, Arc::clone(&pair));
        pair
    }

    /// Look up a loaded texture by URL.
    pub fn texture(&mut self, url: &str) -> Option<Arc<Texture>> {
        match self.textures.get(url) {
            Some(texture) => {
                self.stats.texture.hits += 1;
                Some(Arc::clone(texture))
            }
            None => {
                self.stats.texture.misses += 1;
                None
            }
        }
    }

    /// Store a loaded texture under the URL it was requested with.
    pub fn insert_texture(&mut self, url: impl Into<String>, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.stats.texture.inserts += 1;
        self.textures.insert(url.into(), Arc::clone(&texture));
        texture
    }

    /// Register an in-flight fetch so `cleanup` can cancel it. Returns the
    /// id to hand back to [`Self::finish_load`] once the fetch has landed.
    pub fn track_load(&mut self, handle: AbortHandle) -> u64 {
        let id = self.next_load;
        self.next_load += 1;
        self.in_flight.insert(id, handle);
        id
    }

    /// Forget a fetch that has completed. Unknown ids are ignored.
    pub fn finish_load(&mut self, id: u64) {
        self.in_flight.remove(&id);
    }

    /// Fetches issued and not yet finished or cancelled.
    pub fn pending_load_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Dispose every cached resource and cancel outstanding fetches.
    pub fn cleanup(&mut self) -> DisposeReport {
        let report = DisposeReport {
            geometries: self.geometries.len(),
            materials: self.materials.len(),
            textures: self.textures.len(),
            aborted_loads: self.in_flight.len(),
        };
        for (_, handle) in self.in_flight.drain() {
            handle.abort();
        }
        self.geometries.clear();
        self.materials.clear();
        self.textures.clear();
        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            geometries = report.geometries,
            materials = report.materials,
            textures = report.textures,
            aborted = report.aborted_loads,
            "resource cache cleared"
        );
        report
    }
}
