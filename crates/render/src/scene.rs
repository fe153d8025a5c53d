use glam::Vec2;
use tilewalk_common::{Aabb, TextureHandle};
use tilewalk_kernel::World;

use crate::renderer::Renderer;

/// Backend that can blit (part of) a texture at a view-space position.
pub trait DrawTarget {
    /// Draw `texture` with its top-left at `(x, y)`. `clip` selects a source
    /// rectangle; `None` draws the whole texture.
    fn draw(&mut self, texture: TextureHandle, x: f32, y: f32, clip: Option<Aabb>);
}

/// One recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub texture: TextureHandle,
    pub position: Vec2,
    pub clip: Option<Aabb>,
}

/// Draw target that records calls in order instead of drawing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawTarget for DrawList {
    fn draw(&mut self, texture: TextureHandle, x: f32, y: f32, clip: Option<Aabb>) {
        self.commands.push(DrawCommand {
            texture,
            position: Vec2::new(x, y),
            clip,
        });
    }
}

/// Counts from one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub tiles_drawn: usize,
    pub tiles_culled: usize,
    pub entities_drawn: usize,
}

/// Draws the tiles under the camera view, then every entity on top.
#[derive(Debug, Clone, Copy)]
pub struct SceneRenderer {
    tile_sheet: TextureHandle,
}

impl SceneRenderer {
    pub fn new(tile_sheet: TextureHandle) -> Self {
        Self { tile_sheet }
    }

    pub fn tile_sheet(&self) -> TextureHandle {
        self.tile_sheet
    }

    pub fn render_into<T: DrawTarget>(&self, world: &World, target: &mut T) -> RenderStats {
        let camera = world.camera();
        let view = camera.view();
        let map = world.map();
        let size = map.tile_size();
        let mut stats = RenderStats::default();

        for tile in map.visible(&view) {
            let at = camera.to_view(Vec2::new(tile.x(), tile.y()));
            target.draw(
                self.tile_sheet,
                at.x,
                at.y,
                Some(tile.kind().clip_rect(size.x, size.y)),
            );
            stats.tiles_drawn += 1;
        }
        stats.tiles_culled = map.len() - stats.tiles_drawn;

        for entity in world.entities() {
            let at = camera.to_view(entity.position());
            target.draw(entity.texture(), at.x, at.y, None);
            stats.entities_drawn += 1;
        }

        tracing::trace!(
            tiles = stats.tiles_drawn,
            culled = stats.tiles_culled,
            entities = stats.entities_drawn,
            "frame rendered"
        );
        stats
    }
}

impl Renderer for SceneRenderer {
    type Output = DrawList;

    fn render(&self, world: &World) -> DrawList {
        let mut list = DrawList::new();
        self.render_into(world, &mut list);
        list
    }
}
