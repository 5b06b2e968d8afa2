use isomap_geometry::*;

fn main() {
    let tile_size = Size::new(64, 32);
    let screen_size = Size::new(1024, 800);
    let map_size = Size::new(14, 14);

    match IsoProjection::centered(tile_size, screen_size) {
        Ok(projection) => {
            println!("Projection: {}", projection);
            println!("Map size:   {}", map_size);
            println!("\nCorner tiles:");

            let last_x = map_size.width as i32 - 1;
            let last_y = map_size.height as i32 - 1;
            for pos in [
                MapPosition::new(0, 0),
                MapPosition::new(last_x, 0),
                MapPosition::new(0, last_y),
                MapPosition::new(last_x, last_y),
            ] {
                let screen = projection.map_to_screen(pos);
                let back = projection.screen_to_map(screen);
                let v = projection.tile_vertex(screen);
                println!(
                    "  map [{}] -> screen [{}] -> map [{}]  (top {} left {} bottom {} right {})",
                    pos, screen, back, v.top, v.left, v.bottom, v.right
                );
            }

            println!("\nPicking around the origin:");
            let origin = projection.origin();
            for (dx, dy) in [(0.0, -1.0), (-1.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
                let screen = origin.offset(dx, dy);
                match projection.pick(screen, map_size) {
                    Some(cell) => println!("  [{}] -> on map [{}]", screen, cell),
                    None => println!("  [{}] -> off map [{}]", screen, projection.screen_to_map(screen)),
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to build projection: {}", e);
        }
    }
}
