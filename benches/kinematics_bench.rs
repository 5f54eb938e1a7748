use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec3;
use metavis::animation::AnimationDriver;
use metavis::kinematics::{
    ModuleRegistry, ModuleState, Move, MoveKind, ShapeTable, ShapeType,
};
use metavis::options::PlaybackOptions;
use metavis::sequence::{MoveSet, MoveSetSequence};
use metavis::util::easing::EasingFunction;

fn move_construction_benchmark(c: &mut Criterion) {
    let shapes = ShapeTable::default();
    let mut group = c.benchmark_group("move_construction");
    let cases = [
        ("cube_pivot", 2, DVec3::X, MoveKind::Pivot, ShapeType::Cube),
        ("corner_slide", -1, DVec3::new(1.0, 1.0, 0.0), MoveKind::Sliding, ShapeType::Cube),
        (
            "rd_pivot",
            12,
            DVec3::new(1.0, 0.0, 1.0),
            MoveKind::Pivot,
            ShapeType::RhombicDodecahedron,
        ),
        ("catom_square", 12, DVec3::new(1.0, 0.0, 1.0), MoveKind::Pivot, ShapeType::Catom),
        ("catom_triangle", 1012, DVec3::new(1.0, 0.0, 1.0), MoveKind::Pivot, ShapeType::Catom),
    ];
    for (name, adc, delta, kind, shape) in cases {
        group.bench_function(name, |b| {
            b.iter(|| Move::new(1, black_box(adc), black_box(delta), kind, shape, &shapes));
        });
    }
    group.finish();
}

fn reverse_benchmark(c: &mut Criterion) {
    let mv = Move::new(
        1,
        1012,
        DVec3::new(1.0, 0.0, 1.0),
        MoveKind::Pivot,
        ShapeType::Catom,
        &ShapeTable::default(),
    );
    c.bench_function("catom_reverse", |b| b.iter(|| black_box(&mv).reverse()));
}

fn animate_benchmark(c: &mut Criterion) {
    let mv = Move::new(
        1,
        12,
        DVec3::new(1.0, 0.0, 1.0),
        MoveKind::Pivot,
        ShapeType::Catom,
        &ShapeTable::default(),
    );
    let mut module = ModuleState::new(1, ShapeType::Catom, DVec3::ZERO);
    c.bench_function("animate_two_phase_pivot", |b| {
        b.iter(|| {
            module.animate_move(&mv, black_box(0.7), EasingFunction::SineInOut);
            black_box(module.world_transform())
        });
    });
}

fn driver_tick_benchmark(c: &mut Criterion) {
    let shapes = ShapeTable::default();
    let mut group = c.benchmark_group("driver_tick");

    for count in [10_u32, 100, 1000] {
        let modules: ModuleRegistry = (0..count)
            .map(|i| ModuleState::new(i, ShapeType::Cube, DVec3::new(f64::from(i), 0.0, 0.0)))
            .collect();
        let moves = (0..count)
            .map(|i| Move::new(i, 2, DVec3::X, MoveKind::Pivot, ShapeType::Cube, &shapes))
            .collect();
        let sequence = MoveSetSequence::new(vec![MoveSet::new(moves, false)]);
        let playback = PlaybackOptions {
            speed: 0.0,
            ..PlaybackOptions::default()
        };
        let mut driver = AnimationDriver::new(modules, sequence, playback);
        driver.step_forward();

        group.bench_function(format!("{count}_modules"), |b| {
            b.iter(|| driver.tick(black_box(Duration::from_millis(16))));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    move_construction_benchmark,
    reverse_benchmark,
    animate_benchmark,
    driver_tick_benchmark
);
criterion_main!(benches);
