use isomap_geometry::{Direction, MapPosition, Size};
use isomap_scene::{Layer, Person, Scene, TileMap};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .init();

    let map = TileMap::builder()
        .with_screen_size(Size::new(1024, 800))
        .with_map_size(Size::new(6, 6))
        .with_tile_size(Size::new(64, 32))
        .build();

    let map = match map {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Failed to build tile map: {}", e);
            return;
        }
    };

    let mut scene = Scene::new(map);
    scene.add_tiles();
    scene.place_prism(MapPosition::new(3, 1));

    let Some(walker) = scene.spawn_person(Person::new(MapPosition::new(0, 1))) else {
        eprintln!("Spawn point is off the map");
        return;
    };

    // East along the row, into the prism, then down towards the map edge.
    let route = [
        Direction::SouthEast,
        Direction::SouthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::SouthWest,
        Direction::SouthWest,
        Direction::SouthWest,
        Direction::SouthWest,
    ];

    println!("Walking {} steps on a {} map", route.len(), scene.map().map_size());
    for (i, direction) in route.into_iter().enumerate() {
        scene.steer(walker, Some(direction));
        let moved = scene.update();
        if let Some(entity) = scene.entity(walker) {
            let person = entity.as_person().map(|p| (p.map_pos(), p.sprite()));
            if let Some((pos, sprite)) = person {
                println!(
                    "Step {:>2}: {:<9} moved={} at {} ({}) sprite={}",
                    i + 1,
                    direction.to_string(),
                    moved == 1,
                    pos,
                    entity.screen_pos(),
                    sprite
                );
            }
        }
    }

    println!("\nDraw order (actors layer):");
    for entity in scene.layer(Layer::Actors) {
        println!("  {} {} at {}", entity.id(), entity.kind().label(), entity.screen_pos());
    }
}
