use std::hint::black_box;
use std::time::Instant;

use tilewalk_common::{Aabb, Circle};
use tilewalk_geom::Collider;
use tilewalk_tilemap::{MapConfig, TileKind, TileMap};

/// Bordered room of `side` x `side` tiles with a wall ring and floor inside.
fn make_map(side: usize) -> TileMap {
    let grid = (0..side)
        .map(|row| {
            (0..side)
                .map(|column| {
                    if row == 0 || column == 0 || row == side - 1 || column == side - 1 {
                        TileKind::Center
                    } else {
                        TileKind::Red
                    }
                })
                .collect()
        })
        .collect();
    let config = MapConfig {
        tile_width: 80.0,
        tile_height: 80.0,
        read_capacity: usize::MAX,
    };
    TileMap::from_grid(grid, &config).expect("benchmark grid is rectangular")
}

fn bench_touch_walls(side: usize, iterations: usize) {
    let map = make_map(side);
    // Worst case: the collider sits in the middle of the room and misses every wall.
    let center = map.width() / 2.0;
    let target = Collider::Circle(Circle::new(center, center, 10.0));

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(map.touch_walls(black_box(&target)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  touch_walls ({} tiles, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        map.len()
    );
}

fn bench_visible(side: usize, iterations: usize) {
    let map = make_map(side);
    let view = Aabb::new(100.0, 100.0, 640.0, 480.0);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(map.visible(black_box(&view)).count());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  visible ({} tiles, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        map.len()
    );
}

fn main() {
    println!("=== Tile Collision Benchmarks ===\n");

    println!("Wall scan (first hit, full miss):");
    bench_touch_walls(16, 10000);
    bench_touch_walls(64, 1000);
    bench_touch_walls(256, 100);

    println!("\nView culling:");
    bench_visible(16, 10000);
    bench_visible(64, 1000);
    bench_visible(256, 100);

    println!("\n=== Done ===");
}
