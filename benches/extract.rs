use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use isofield::{
    Bumps, Buffer2d, Dimensions, GridModel, IsolineExtractor, LevelRange, LevelSet, Limits, Renderer,
};
use std::time::Duration;

fn grid_at(size: usize) -> GridModel {
    let mut grid = GridModel::new(Limits::DEFAULT, Dimensions::new(size, size));
    grid.update_values(&Bumps::default(), 1.5);
    grid
}

fn criterion_benchmark(c: &mut Criterion) {
    let levels = LevelSet::new(LevelRange::DEFAULT, 20);

    let mut group = c.benchmark_group("extract");
    for &size in &[10, 25, 80] {
        let grid = grid_at(size);
        let mut extractor = IsolineExtractor::with_capacity(grid.dimensions(), levels.count());
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| extractor.extract(grid.values(), grid.dimensions(), &levels));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("sample");
    for &size in &[25, 80] {
        let mut grid = grid_at(size);
        let field = Bumps::default();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| grid.update_values(&field, 2.0));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("render");
    for &[w, h] in &[[200, 150], [800, 600]] {
        let grid = grid_at(50);
        let mut extractor = IsolineExtractor::new();
        extractor.extract(grid.values(), grid.dimensions(), &levels);
        let mut frame = Buffer2d::fill([w, h], 0);
        let renderer = Renderer::new();
        group.bench_with_input(BenchmarkId::new("frame", format!("{}x{}", w, h)), &(), |b, _| {
            b.iter(|| renderer.draw(&grid, &extractor, &mut frame));
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .warm_up_time(Duration::from_millis(1000));
    targets = criterion_benchmark
}

criterion_main!(benches);
