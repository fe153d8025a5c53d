use std::fmt::Write;

use tilewalk_kernel::World;

/// Produces one frame of output from world state.
///
/// Implementations read the world and its camera; world truth stays
/// kernel-owned.
pub trait Renderer {
    type Output;

    fn render(&self, world: &World) -> Self::Output;
}

/// Human-readable dump of the world, for CLI output and logs.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &World) -> String {
        let map = world.map();
        let view = world.camera().view();
        let target = world.camera().target();
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "=== World (tick={}) ===", world.tick());
        let _ = writeln!(
            out,
            "Map: {}x{} tiles ({}x{} px), structural={}",
            map.columns(),
            map.rows(),
            map.width(),
            map.height(),
            map.structural_count()
        );
        let _ = writeln!(
            out,
            "Camera: view=({:.1}, {:.1}, {:.0}x{:.0}) target=({:.1}, {:.1})",
            view.x, view.y, view.w, view.h, target.x, target.y
        );
        let _ = writeln!(out, "Entities: {}", world.entity_count());
        for entity in world.entities() {
            let p = entity.position();
            let v = entity.velocity();
            let marker = if world.tracked() == Some(entity.id()) { "*" } else { " " };
            let _ = writeln!(
                out,
                " {marker}[{:.8}] pos=({:.2}, {:.2}) vel=({:.2}, {:.2})",
                &entity.id().0.to_string()[..8],
                p.x,
                p.y,
                v.x,
                v.y
            );
        }
        out
    }
}
