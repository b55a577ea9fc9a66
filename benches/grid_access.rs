use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};
use snake_route::{Color, Grid};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_access");
    group.sample_size(100);

    let size = 256;
    let mut grid = Grid::new(size, size);
    for x in 0..size {
        for y in 0..size {
            if (x + y) % 3 == 0 {
                grid.set_color_at(x, y, Color::new(((x + y) % 4 + 1) as u8)).unwrap();
            }
        }
    }

    group.bench_function("color_at", |b| {
        b.iter(|| {
            for x in 0..size {
                for y in 0..size {
                    let c = grid.color_at(black_box(x), black_box(y)).unwrap();
                    black_box(c);
                }
            }
        })
    });

    group.bench_function("points_reading_order", |b| {
        b.iter(|| {
            for p in grid.points_reading_order() {
                black_box(p);
            }
        })
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}
criterion_main!(benches);
