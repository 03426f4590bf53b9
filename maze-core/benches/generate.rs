use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maze_core::{
    events::NoopSink,
    generator::generate,
    grid::Grid,
    solver::{solve, SolveMethod},
};

const ROWS: i32 = 300;
const COLS: i32 = 300;

pub fn carve_backtracker(c: &mut Criterion) {
    c.bench_function("carve_backtracker", |b| {
        b.iter(|| {
            let mut grid = Grid::new(ROWS, COLS).unwrap();
            generate(&mut grid, black_box(Some(42)), &mut NoopSink).unwrap();
            grid
        })
    });
}

pub fn solve_all(c: &mut Criterion) {
    let mut grid = Grid::new(ROWS, COLS).unwrap();
    generate(&mut grid, Some(42), &mut NoopSink).unwrap();

    for method in SolveMethod::ALL {
        c.bench_function(&format!("solve_{method}"), |b| {
            b.iter(|| solve(&mut grid, black_box(method), &mut NoopSink))
        });
    }
}

criterion_group! {name = benches; config = Criterion::default().sample_size(10); targets = carve_backtracker, solve_all}
criterion_main!(benches);
