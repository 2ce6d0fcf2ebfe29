use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pilot_view::display::{AnimatedDisplayStrategy, DirectDisplayStrategy, DisplayContext};
use pilot_view::{DisplayStrategy, ViewKind, VisualElement};
use std::sync::Arc;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn element(n: usize) -> VisualElement<usize, String> {
    VisualElement::bind(Arc::new(n), ViewKind::new("screen"), format!("screen {n}"))
}

/// Show `count` elements back to back, then run frames until everything has settled.
fn burst<S: DisplayStrategy<usize, String>>(strategy: &mut S, count: usize) -> usize {
    for n in 0..count {
        strategy.show(element(n));
    }
    let mut frames = 0;
    while !strategy.is_settled() {
        strategy.advance(FRAME);
        frames += 1;
    }
    strategy.take_detached().len() + frames
}

fn bench_animated_bursts(c: &mut Criterion) {
    let mut group = c.benchmark_group("animated_burst");
    group.measurement_time(Duration::from_secs(5));

    for count in [1usize, 5, 25, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut strategy = AnimatedDisplayStrategy::with_fade(
                    DisplayContext::default(),
                    Duration::from_millis(150),
                );
                black_box(burst(&mut strategy, count))
            });
        });
    }

    group.finish();
}

fn bench_clear_mid_flight(c: &mut Criterion) {
    c.bench_function("clear_all_mid_flight_25", |b| {
        b.iter(|| {
            let mut strategy = AnimatedDisplayStrategy::with_fade(
                DisplayContext::default(),
                Duration::from_millis(150),
            );
            for n in 0..25 {
                strategy.show(element(n));
                strategy.advance(Duration::from_millis(5));
            }
            strategy.clear_all();
            black_box(strategy.take_detached().len())
        });
    });
}

fn bench_direct_swaps(c: &mut Criterion) {
    c.bench_function("direct_swap_100", |b| {
        b.iter(|| {
            let mut strategy = DirectDisplayStrategy::new(DisplayContext::default());
            black_box(burst(&mut strategy, 100))
        });
    });
}

criterion_group!(
    benches,
    bench_animated_bursts,
    bench_clear_mid_flight,
    bench_direct_swaps
);
criterion_main!(benches);
