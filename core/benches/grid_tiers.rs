use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minesweep_core::*;
use std::hint::black_box;

const TIERS: &[(&str, Coord2, CellCount)] = &[
    ("standard", (ROWS, COLS), BOMB_COUNT),
    ("intermediate", (16, 16), 40),
    ("expert", (16, 30), 99),
    ("open", (64, 64), 1),
];

fn generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for &(name, size, mines) in TIERS {
        let config = GameConfig::new(size, mines).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(Grid::new_game(config, RandomLayoutGenerator::new(seed)).unwrap())
            })
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for &(name, size, _) in TIERS {
        // a single mine in the far corner makes the first reveal open almost everything
        let layout = MineLayout::from_mine_coords(size, &[(size.0 - 1, size.1 - 1)]).unwrap();
        let grid = Grid::from_layout(layout);
        group.bench_with_input(BenchmarkId::from_parameter(name), &grid, |b, grid| {
            b.iter(|| {
                let mut grid = grid.clone();
                black_box(grid.reveal((0, 0)).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, generate, flood_fill);
criterion_main!(benches);
