use tessera_world::{DEFAULT_CHUNK_SIZE, TerrainGenerator, TileCoord};

#[test]
fn clearing_a_chunk_recomputes_only_that_chunk() {
    let generator = TerrainGenerator::new(8_675_309, 4_096);
    let size = DEFAULT_CHUNK_SIZE as i32;
    // Two chunks side by side: (-1, 0) and (0, 0).
    for y in 0..size {
        for x in -size..size {
            generator.get_terrain_data(x, y);
        }
    }
    let warm = generator.tiles_computed();
    assert_eq!(warm, (2 * size * size) as u64);

    let removed = generator.clear_chunk_from_cache(-1, 0, None);
    assert_eq!(removed, (size * size) as usize);

    for y in 0..size {
        for x in 0..size {
            generator.get_terrain_data(x, y);
        }
    }
    assert_eq!(generator.tiles_computed(), warm, "untouched chunk recomputed");

    for y in 0..size {
        for x in -size..0 {
            generator.get_terrain_data(x, y);
        }
    }
    assert_eq!(generator.tiles_computed(), warm + (size * size) as u64);
}

#[test]
fn negative_chunks_use_euclidean_bounds() {
    let tile = TileCoord::new(-1, -17);
    let chunk = tile.chunk(16);
    assert_eq!((chunk.cx, chunk.cy), (-1, -2));

    let generator = TerrainGenerator::new(3, 1_024);
    generator.get_terrain_data(-1, -17);
    generator.get_terrain_data(0, -17);
    assert_eq!(generator.clear_chunk_from_cache(-1, -2, Some(16)), 1);
    assert_eq!(generator.cache_stats().entries, 1);
}

#[test]
fn fifo_trim_keeps_cache_near_budget() {
    let generator = TerrainGenerator::new(5, 1);
    let budget = generator.update_cache_size(1, 1, Some(2));
    assert_eq!(budget, 16);
    for i in 0..40 {
        generator.get_terrain_data(i, 0);
    }
    let stats = generator.cache_stats();
    assert_eq!(stats.entries, budget);
    assert_eq!(stats.evictions, 40 - budget as u64);

    // Oldest tiles were evicted first: the earliest is recomputed, the latest is not.
    let before = generator.tiles_computed();
    generator.get_terrain_data(39, 0);
    assert_eq!(generator.tiles_computed(), before);
    generator.get_terrain_data(0, 0);
    assert_eq!(generator.tiles_computed(), before + 1);
}

#[test]
fn clear_cache_forces_full_recompute() {
    let generator = TerrainGenerator::new(12, 256);
    let region = generator.sample_region(0, 0, 8, 8);
    assert_eq!(region.len(), 64);
    assert_eq!(generator.tiles_computed(), 64);
    generator.clear_cache();
    assert_eq!(generator.cache_stats().entries, 0);
    generator.sample_region(0, 0, 8, 8);
    assert_eq!(generator.tiles_computed(), 128);
}
