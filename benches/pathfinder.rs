use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};
use snake_route::pathfinder::find_path_to_point;
use snake_route::{Color, Grid, Outside, Point, Snake};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathfinder");
    group.sample_size(50);

    let size = 64;
    let mut grid = Grid::new(size, size);
    for x in 0..size {
        for y in 0..size {
            if x % 7 == 3 && y % 5 == 2 {
                grid.set_color_at(x, y, Color::new(3)).unwrap();
            }
        }
    }
    let outside = Outside::compute(&grid);
    let start = Snake::create_horizontal(4).unwrap();
    let goal = Point::new(size - 1, size - 1);

    group.bench_function("find_path_to_point", |b| {
        b.iter(|| {
            let path = find_path_to_point(
                black_box(&start),
                black_box(goal),
                black_box(0),
                black_box(&grid),
                black_box(&outside),
            )
            .unwrap();
            black_box(path);
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}
criterion_main!(benches);
