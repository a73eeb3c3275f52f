#![forbid(unsafe_code)]

//! Benchmarks for the scroll-driven visibility path.
//!
//! The scroll intake is the chrome's only hot path: every host scroll
//! sample flows through `process`, and every frame drains the coalescer
//! into one visibility evaluation. These benches keep both legs honest.

use std::time::Duration;

use awning_chrome::controller::{ChromeConfig, NavChrome};
use awning_chrome::parts::PanelItem;
use awning_chrome::visibility::{ScrollVisibility, VisibilityConfig};
use awning_core::event::InputEvent;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use web_time::Instant;

fn bench_observe_sequence(c: &mut Criterion) {
    let config = VisibilityConfig::default();
    // Sawtooth offsets exercise every rule: top zone, band, both flips.
    let offsets: Vec<f64> = (0..4096)
        .map(|i| f64::from(i % 512) * 1.7)
        .collect();

    c.bench_function("visibility_observe_4096", |b| {
        b.iter(|| {
            let mut vis = ScrollVisibility::new();
            for &offset in &offsets {
                black_box(vis.observe(black_box(offset), &config));
            }
            vis
        });
    });
}

fn bench_controller_scroll_storm(c: &mut Criterion) {
    c.bench_function("controller_storm_1024_samples_per_frame", |b| {
        b.iter(|| {
            let mut nav = NavChrome::new(
                ChromeConfig::new()
                    .item(PanelItem::link("Projects"))
                    .item(PanelItem::link("About")),
            );
            let t0 = Instant::now();
            let mut now = t0;
            for frame in 0..8u32 {
                for i in 0..1024u32 {
                    let offset = f64::from(frame * 400 + i % 400);
                    let event = InputEvent::Scroll { offset };
                    black_box(nav.process(&event, None, now));
                }
                now += Duration::from_millis(16);
                black_box(nav.frame(now));
            }
            nav
        });
    });
}

criterion_group!(
    benches,
    bench_observe_sequence,
    bench_controller_scroll_storm
);
criterion_main!(benches);
