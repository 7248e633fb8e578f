use criterion::{Criterion, criterion_group, criterion_main};
use itertools::Itertools;
use killer_sudoku_sat::killer::encoder::generate_cage_clauses;
use killer_sudoku_sat::killer::{Cage, EncoderConfig, GridSize, KillerSudoku};
use killer_sudoku_sat::sat::dimacs::write_dimacs;
use std::hint::black_box;
use std::io;
use std::time::Duration;

fn cage(target: usize, cells: &[(usize, usize)]) -> Cage {
    Cage::new(target, cells.iter().copied())
}

fn nine_by_nine() -> Vec<Cage> {
    vec![
        cage(3, &[(0, 0), (0, 1)]),
        cage(15, &[(0, 2), (0, 3), (0, 4)]),
        cage(22, &[(0, 5), (1, 5), (1, 4), (2, 4)]),
        cage(4, &[(0, 6), (1, 6)]),
        cage(16, &[(0, 7), (1, 7)]),
        cage(15, &[(0, 8), (1, 8), (2, 8), (3, 8)]),
        cage(25, &[(1, 0), (1, 1), (2, 0), (2, 1)]),
        cage(17, &[(1, 2), (1, 3)]),
        cage(9, &[(2, 2), (2, 3), (3, 3)]),
        cage(8, &[(2, 5), (3, 5), (4, 5)]),
        cage(20, &[(2, 6), (2, 7), (3, 6)]),
        cage(6, &[(3, 0), (4, 0)]),
        cage(14, &[(3, 1), (3, 2)]),
        cage(17, &[(3, 4), (4, 4), (5, 4)]),
        cage(17, &[(3, 7), (4, 6), (4, 7)]),
        cage(13, &[(4, 1), (4, 2), (5, 1)]),
        cage(20, &[(4, 3), (5, 3), (6, 3)]),
        cage(12, &[(4, 8), (5, 8)]),
        cage(27, &[(5, 0), (6, 0), (7, 0), (8, 0)]),
        cage(6, &[(5, 2), (6, 1), (6, 2)]),
        cage(20, &[(5, 5), (6, 5), (6, 6)]),
        cage(6, &[(5, 6), (5, 7)]),
        cage(10, &[(6, 4), (7, 4), (7, 3), (8, 3)]),
        cage(14, &[(6, 7), (6, 8), (7, 7), (7, 8)]),
        cage(8, &[(7, 1), (8, 1)]),
        cage(16, &[(7, 2), (8, 2)]),
        cage(15, &[(7, 5), (7, 6)]),
        cage(13, &[(8, 4), (8, 5), (8, 6)]),
        cage(17, &[(8, 7), (8, 8)]),
    ]
}

/// Every 2x2 block of a 16x16 grid as a cage, targets alternating by block row.
fn sixteen_by_sixteen() -> Vec<Cage> {
    const TARGETS: [[usize; 8]; 2] = [
        [14, 22, 30, 38, 46, 54, 30, 38],
        [46, 54, 30, 38, 14, 22, 30, 38],
    ];
    (0..16)
        .step_by(2)
        .cartesian_product((0..16).step_by(2))
        .map(|(r, c)| {
            let pattern = TARGETS[(r / 2) % 2];
            let target = pattern[c / 2];
            Cage::new(target, [(r, c), (r, c + 1), (r + 1, c), (r + 1, c + 1)])
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let nine = KillerSudoku::new(9, nine_by_nine()).unwrap();
    let nine_sequential = KillerSudoku::with_config(
        9,
        nine_by_nine(),
        EncoderConfig::default().with_parallel(false),
    )
    .unwrap();

    let mut group = c.benchmark_group("encode 9x9");
    group.bench_function("parallel", |b| b.iter(|| black_box(nine.to_cnf())));
    group.bench_function("sequential", |b| b.iter(|| black_box(nine_sequential.to_cnf())));
    group.finish();

    let sixteen = KillerSudoku::new(16, sixteen_by_sixteen()).unwrap();
    let mut group = c.benchmark_group("encode 16x16");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));
    group.bench_function("parallel", |b| b.iter(|| black_box(sixteen.to_cnf())));
    group.finish();
}

fn bench_cage(c: &mut Criterion) {
    let size = GridSize::new(9).unwrap();
    let four_cells = cage(22, &[(0, 5), (1, 5), (1, 4), (2, 4)]);
    c.bench_function("cage clauses - 4 cells, n = 9", |b| {
        b.iter(|| black_box(generate_cage_clauses(&four_cells, size)));
    });
}

fn bench_dimacs(c: &mut Criterion) {
    let cnf = KillerSudoku::new(9, nine_by_nine()).unwrap().to_cnf();
    c.bench_function("write dimacs 9x9", |b| {
        b.iter(|| write_dimacs(black_box(&cnf), io::sink()).unwrap());
    });
}

criterion_group!(benches, bench_encode, bench_cage, bench_dimacs);

criterion_main!(benches);
