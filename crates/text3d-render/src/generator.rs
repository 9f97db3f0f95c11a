//! AST → scene graph.
//!
//! Children are laid out left to right along x. Every emote is placed
//! synchronously, with a flat placeholder sprite when its texture is not yet
//! cached; the fetch is handed back to the caller on [`RenderedText`] and
//! swapped in when it completes.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::{AbortHandle, Abortable, BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use text3d_core::{
    Color, EmoteConfig, GeometryParams, LayoutConfig, Text3dConfig, Text3dResult, Vec3,
};
use text3d_lang::{EmoteNode, Node, RootNode, TextNode};
use text3d_scene::{Camera, SceneGroup, Sprite, SpriteMaterial, TextMesh, Texture};

use crate::cache::{GeometryKey, ResourceCache};
use crate::font::FontSet;
use crate::geometry::build_text_geometry;
use crate::texture::TextureLoader;

/// Inputs that stay fixed across passes.
#[derive(Clone)]
pub struct GeneratorOptions {
    /// Viewer the text is composed for. The generator does not read it;
    /// callers use it to orient the returned pivot.
    pub camera: Camera,
    /// Where the center of the row ends up.
    pub position: Vec3,
    pub fonts: FontSet,
    pub geometry: GeometryParams,
    pub layout: LayoutConfig,
    pub emotes: EmoteConfig,
}

impl GeneratorOptions {
    pub fn new(fonts: FontSet) -> Self {
        Self {
            camera: Camera::default(),
            position: Vec3::zero(),
            fonts,
            geometry: GeometryParams::default(),
            layout: LayoutConfig::default(),
            emotes: EmoteConfig::default(),
        }
    }

    /// Options from a loaded config, reading the fonts it names.
    pub fn from_config(config: &Text3dConfig) -> Text3dResult<Self> {
        Ok(Self {
            camera: Camera::new(config.camera.position),
            position: Vec3::zero(),
            fonts: FontSet::from_config(&config.fonts)?,
            geometry: config.geometry.clone(),
            layout: config.layout.clone(),
            emotes: config.emotes.clone(),
        })
    }

    /// Width of one whitespace character.
    pub fn spacing(&self) -> f32 {
        self.geometry.size * self.layout.spacing_ratio
    }

    /// Smallest gap kept on either side of a run or emote.
    pub fn min_gap(&self) -> f32 {
        self.spacing() * self.layout.min_gap_ratio
    }

    pub fn emote_size(&self) -> f32 {
        self.emotes.size.unwrap_or(self.geometry.size)
    }
}

/// How an emote's depth is faked with stacked sprites.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SpriteStack {
    size: f32,
    depth: f32,
    segments: u32,
}

impl SpriteStack {
    fn fill(&self, group: &mut SceneGroup, texture: &Arc<Texture>) {
        let material = Arc::new(SpriteMaterial::textured(Arc::clone(texture)));
        let segments = self.segments.max(1);
        let step = self.depth / segments as f32;
        let height = self.size / texture.aspect_ratio();
        for i in 0..segments {
            let mut sprite = Sprite::new(Arc::clone(&material));
            sprite.center = [0.0, 0.0];
            sprite.transform.scale = Vec3::new(self.size, height, 1.0);
            sprite.transform.position.z = i as f32 * step;
            group.add(sprite);
        }
    }

    fn placeholder(&self) -> Sprite {
        let mut sprite = Sprite::new(Arc::new(SpriteMaterial::solid(Color::WHITE)));
        sprite.center = [0.0, 0.0];
        sprite.transform.scale = Vec3::new(self.size, self.size, 1.0);
        sprite.placeholder = true;
        sprite
    }
}

/// Result of one texture fetch, tagged with where it belongs.
pub struct TextureLoad {
    pub url: String,
    pub emote_id: String,
    /// Cache generation the fetch was issued under.
    pub generation: u64,
    /// Id the cache tracks this fetch under.
    load_id: u64,
    /// Child indices of the emote groups in the row waiting on this URL.
    slots: Vec<usize>,
    /// `None` when the fetch was cancelled by a cache cleanup.
    result: Option<Text3dResult<Texture>>,
}

/// What applying a finished fetch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureOutcome {
    /// Placeholders replaced by sprite stacks.
    Swapped { url: String, emotes: usize },
    /// Fetch failed; placeholders stay.
    Failed { url: String },
    /// Fetch belongs to a disposed generation; nothing touched.
    Discarded { url: String },
}

/// A generated scene plus the texture fetches still outstanding for it.
pub struct RenderedText {
    /// Pivot at the requested position. The row is attached by [`Self::scene`].
    pub pivot: SceneGroup,
    /// Total advance of the row before centering.
    pub width: f32,
    row: SceneGroup,
    stack: SpriteStack,
    loads: FuturesUnordered<BoxFuture<'static, TextureLoad>>,
}

impl RenderedText {
    /// The centered row of per-node groups.
    pub fn row(&self) -> &SceneGroup {
        &self.row
    }

    pub fn row_mut(&mut self) -> &mut SceneGroup {
        &mut self.row
    }

    /// Snapshot of the full graph: pivot holding the current row.
    pub fn scene(&self) -> SceneGroup {
        let mut pivot = self.pivot.clone();
        pivot.add(self.row.clone());
        pivot
    }

    pub fn pending_loads(&self) -> usize {
        self.loads.len()
    }

    /// Wait for the next texture fetch to finish.
    pub async fn next_texture(&mut self) -> Option<TextureLoad> {
        self.loads.next().await
    }

    /// Swap placeholders for sprite stacks if the load is current and succeeded.
    pub fn apply_texture(&mut self, load: TextureLoad, cache: &mut ResourceCache) -> TextureOutcome {
        let TextureLoad {
            url,
            emote_id,
            generation,
            load_id,
            slots,
            result,
        } = load;
        cache.finish_load(load_id);

        let result = match result {
            Some(result) if generation == cache.generation() => result,
            _ => {
                tracing::debug!(%url, generation, current = cache.generation(), "discarding stale emote load");
                return TextureOutcome::Discarded { url };
            }
        };

        let texture = match result {
            Ok(texture) => cache.insert_texture(url.clone(), texture),
            Err(e) => {
                tracing::error!("Failed to load emote {}: {}", emote_id, e);
                return TextureOutcome::Failed { url };
            }
        };

        let mut swapped = 0;
        for slot in slots {
            if let Some(group) = self.row.child_group_mut(slot) {
                group.clear();
                self.stack.fill(group, &texture);
                swapped += 1;
            }
        }
        TextureOutcome::Swapped {
            url,
            emotes: swapped,
        }
    }

    /// Drive every outstanding fetch to completion, applying each as it lands.
    pub async fn settle(&mut self, cache: &mut ResourceCache) -> Vec<TextureOutcome> {
        let mut outcomes = Vec::with_capacity(self.loads.len());
        while let Some(load) = self.next_texture().await {
            outcomes.push(self.apply_texture(load, cache));
        }
        outcomes
    }

    pub fn into_scene(self) -> SceneGroup {
        let mut pivot = self.pivot;
        pivot.add(self.row);
        pivot
    }
}

/// Walks an AST and emits the positioned scene.
pub struct Generator {
    options: GeneratorOptions,
    loader: Arc<dyn TextureLoader>,
}

impl Generator {
    pub fn new(options: GeneratorOptions, loader: Arc<dyn TextureLoader>) -> Self {
        Self { options, loader }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn sprite_stack(&self) -> SpriteStack {
        SpriteStack {
            size: self.options.emote_size(),
            depth: self.options.geometry.depth,
            segments: self.options.emotes.depth_segments,
        }
    }

    /// Build the scene for `ast`. Returns immediately with every node placed.
    pub fn generate(&self, ast: &RootNode, cache: &mut ResourceCache) -> RenderedText {
        let mut row = SceneGroup::new("row");
        let mut total_width = 0.0f32;
        let mut waiting: BTreeMap<String, (String, Vec<usize>)> = BTreeMap::new();

        for (slot, node) in ast.children.iter().enumerate() {
            let group = match node {
                Node::Text(text) => self.text_group(text, cache, &mut total_width),
                Node::Emote(emote) => {
                    let (group, missing_url) = self.emote_group(emote, cache, &mut total_width);
                    if let Some(url) = missing_url {
                        waiting
                            .entry(url)
                            .or_insert_with(|| (emote.emote_id.clone(), Vec::new()))
                            .1
                            .push(slot);
                    }
                    group
                }
            };
            row.add(group);
        }

        let center = row.local_bounds().center();
        row.transform.position = center.scale(-1.0);

        let pivot = SceneGroup::new("pivot").with_position(self.options.position);

        let loads = FuturesUnordered::new();
        for (url, (emote_id, slots)) in waiting {
            loads.push(self.fetch(url, emote_id, slots, cache));
        }

        RenderedText {
            pivot,
            width: total_width,
            row,
            stack: self.sprite_stack(),
            loads,
        }
    }

    fn text_group(&self, node: &TextNode, cache: &mut ResourceCache, cursor: &mut f32) -> SceneGroup {
        let spacing = self.options.spacing();

        if node.value.trim().is_empty() {
            let group = SceneGroup::new("space").with_position(Vec3::new(*cursor, 0.0, 0.0));
            *cursor += node.value.chars().count() as f32 * spacing;
            return group;
        }

        let leading = node.value.chars().take_while(|c| c.is_whitespace()).count();
        let trailing = node.value.chars().rev().take_while(|c| c.is_whitespace()).count();
        let trimmed = node.value.trim();

        let params = &self.options.geometry;
        let fonts = &self.options.fonts;
        let geometry = cache.geometry_or_insert_with(
            GeometryKey::new(trimmed, node.style, params),
            || build_text_geometry(trimmed, node.style, fonts.for_style(node.style).as_ref(), params),
        );
        let materials = cache.materials_for(resolve_color(&node.color));

        let min_gap = self.options.min_gap();
        let lead = (leading as f32 * spacing).max(min_gap);
        let trail = (trailing as f32 * spacing).max(min_gap);

        let mut group =
            SceneGroup::new(format!("text:{}", trimmed)).with_position(Vec3::new(*cursor + lead, 0.0, 0.0));
        let width = geometry.width();
        group.add(TextMesh::new(geometry, materials));

        *cursor += lead + width + trail;
        group
    }

    /// Returns the group and, on a texture miss, the URL to fetch.
    fn emote_group(
        &self,
        node: &EmoteNode,
        cache: &mut ResourceCache,
        cursor: &mut f32,
    ) -> (SceneGroup, Option<String>) {
        let gap = self.options.min_gap();
        let stack = self.sprite_stack();

        let mut group = SceneGroup::new(format!("emote:{}", node.emote_id))
            .with_position(Vec3::new(*cursor + gap, 0.0, 0.0));
        *cursor += gap + stack.size + gap;

        let url = self.options.emotes.url_for(&node.emote_id);
        match cache.texture(&url) {
            Some(texture) => {
                stack.fill(&mut group, &texture);
                (group, None)
            }
            None => {
                group.add(stack.placeholder());
                (group, Some(url))
            }
        }
    }

    fn fetch(
        &self,
        url: String,
        emote_id: String,
        slots: Vec<usize>,
        cache: &mut ResourceCache,
    ) -> BoxFuture<'static, TextureLoad> {
        let (handle, registration) = AbortHandle::new_pair();
        let load_id = cache.track_load(handle);
        let generation = cache.generation();
        let loader = Arc::clone(&self.loader);
        let fetch_url = url.clone();

        tracing::debug!(%url, emotes = slots.len(), generation, "queueing emote fetch");
        Abortable::new(async move { loader.load(&fetch_url).await }, registration)
            .map(move |result| TextureLoad {
                url,
                emote_id,
                generation,
                load_id,
                slots,
                result: result.ok(),
            })
            .boxed()
    }
}

/// Map a parsed color name to RGB; unknown names render white.
fn resolve_color(name: &str) -> Color {
    Color::from_name(name).unwrap_or_else(|| {
        tracing::warn!(color = name, "unknown color name, using white");
        Color::WHITE
    })
}
