use std::collections::BTreeMap;
use std::fmt::Write;

use tessera_world::{Rarity, TerrainGenerator};

/// One glyph per tile, one line per row, top row first.
pub fn ascii_map(
    generator: &TerrainGenerator,
    x0: i32,
    y0: i32,
    width: u32,
    height: u32,
) -> String {
    let tiles = generator.sample_region(x0, y0, width, height);
    let mut out = String::with_capacity(tiles.len() + height as usize);
    for row in tiles.chunks(width.max(1) as usize) {
        out.extend(row.iter().map(|t| t.biome.id.glyph()));
        out.push('\n');
    }
    out
}

pub fn region_stats(
    generator: &TerrainGenerator,
    x0: i32,
    y0: i32,
    width: u32,
    height: u32,
) -> String {
    let tiles = generator.sample_region(x0, y0, width, height);
    let total = tiles.len().max(1) as f64;

    let mut biomes: BTreeMap<&'static str, (char, usize)> = BTreeMap::new();
    let mut rarities: BTreeMap<Rarity, usize> = BTreeMap::new();
    let mut water = 0usize;
    for t in &tiles {
        biomes.entry(t.biome.name()).or_insert((t.biome.id.glyph(), 0)).1 += 1;
        *rarities.entry(t.biome.rarity).or_insert(0) += 1;
        if t.biome.id.is_water() {
            water += 1;
        }
    }

    let mut by_count: Vec<_> = biomes.into_iter().collect();
    by_count.sort_by(|a, b| b.1.1.cmp(&a.1.1).then(a.0.cmp(&b.0)));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "region ({}, {}) {}x{}: {} tiles",
        x0,
        y0,
        width,
        height,
        tiles.len()
    );
    let _ = writeln!(out, "water: {} tiles ({:.1}%)", water, 100.0 * water as f64 / total);
    let _ = writeln!(out, "\nbiomes:");
    for (name, (glyph, count)) in by_count {
        let _ = writeln!(
            out,
            "  {} {:<18} {:>6} {:>6.1}%",
            glyph,
            name,
            count,
            100.0 * count as f64 / total
        );
    }
    let _ = writeln!(out, "\nrarity:");
    for (rarity, count) in rarities {
        let _ = writeln!(
            out,
            "  {:<10} {:>6} {:>6.1}%",
            rarity.as_str(),
            count,
            100.0 * count as f64 / total
        );
    }
    let stats = generator.cache_stats();
    let _ = writeln!(
        out,
        "\ncache: {} entries / {} budget, {} hits, {} misses, {} evictions",
        stats.entries, stats.budget, stats.hits, stats.misses, stats.evictions
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_has_one_line_per_row() {
        let generator = TerrainGenerator::new(8_675_309, 256);
        let map = ascii_map(&generator, -5, -5, 12, 4);
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.chars().count() == 12));
    }

    #[test]
    fn stats_cover_every_tile() {
        let generator = TerrainGenerator::new(24_601, 256);
        let report = region_stats(&generator, 0, 0, 10, 10);
        assert!(report.starts_with("region (0, 0) 10x10: 100 tiles"));
        let rarity_total: usize = report
            .lines()
            .skip_while(|l| *l != "rarity:")
            .skip(1)
            .take_while(|l| !l.is_empty())
            .filter_map(|l| l.split_whitespace().nth(1)?.parse::<usize>().ok())
            .sum();
        assert_eq!(rarity_total, 100);
    }

    #[test]
    fn stats_count_water_tiles() {
        let generator = TerrainGenerator::new(8_675_309, 1024);
        let (x0, y0, w, h) = (-16, -16, 32, 32);
        let expected = generator
            .sample_region(x0, y0, w, h)
            .iter()
            .filter(|t| t.biome.id.is_water())
            .count();
        let report = region_stats(&generator, x0, y0, w, h);
        let line = report.lines().find(|l| l.starts_with("water: ")).unwrap();
        let counted: usize = line.split_whitespace().nth(1).unwrap().parse().unwrap();
        assert_eq!(counted, expected);
    }
}
