//! Benchmarks for the keydown and search hot paths
//!
//! Every keystroke while the palette is open runs the chord scan, and every
//! edit to the search box re-runs the filter over all labels.
//!
//! Run with: cargo bench dispatch

use std::rc::Rc;

use palette_engine::engine::DispatchEngine;
use palette_engine::filter::{FuzzyFilter, ListFilter, SubstringFilter};
use palette_engine::keymap::{matches, Chord, KeyEvent, Modifiers};
use palette_engine::platform::DryRunPlatform;
use palette_engine::registry::{default_commands, Action, Command, Registry};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// A registry of `n` commands spread over four groups, shift+ctrl chords
fn large_registry(n: usize) -> Registry {
    let groups = ["Navigation", "Links", "Editor", "General"];
    let commands = (0..n)
        .map(|i| {
            let command = Command::new(
                &format!("cmd-{}", i),
                &format!("Command number {} ({})", i, groups[i % 4]),
                groups[i % 4],
                Action::Navigate(format!("/page/{}", i)),
            );
            if i < 26 {
                let key = ((b'a' + i as u8) as char).to_string();
                command.with_chord(Chord::new(&key, Modifiers::SHIFT | Modifiers::ALT))
            } else {
                command
            }
        })
        .collect();
    Registry::new(commands).unwrap()
}

// ============================================================================
// Chord matching
// ============================================================================

#[divan::bench]
fn match_single_chord(bencher: divan::Bencher) {
    let chord = Chord::new("h", Modifiers::SHIFT);
    let event = KeyEvent::new("H", Modifiers::SHIFT);
    bencher.bench(|| matches(divan::black_box(&chord), divan::black_box(&event)));
}

#[divan::bench(args = [10, 100, 1000])]
fn overlay_keydown_miss(bencher: divan::Bencher, n: usize) {
    let mut engine = DispatchEngine::new(
        Rc::new(large_registry(n)),
        DryRunPlatform::default(),
        Box::new(SubstringFilter),
    );
    engine.open();

    bencher.bench_local(|| {
        let mut event = KeyEvent::key("q");
        divan::black_box(engine.handle_keydown(&mut event))
    });
}

#[divan::bench]
fn toggle_open_close(bencher: divan::Bencher) {
    let mut engine = DispatchEngine::new(
        Rc::new(Registry::new(default_commands()).unwrap()),
        DryRunPlatform::default(),
        Box::new(SubstringFilter),
    );

    bencher.bench_local(|| {
        let mut event = KeyEvent::new("k", Modifiers::META);
        divan::black_box(engine.handle_keydown(&mut event))
    });
}

// ============================================================================
// Filtering
// ============================================================================

fn labels(registry: &Registry) -> Vec<&str> {
    registry.iter().map(|c| c.label.as_str()).collect()
}

#[divan::bench(args = [10, 100, 1000])]
fn substring_filter(bencher: divan::Bencher, n: usize) {
    let registry = large_registry(n);
    let items = labels(&registry);
    let mut filter = SubstringFilter;

    bencher.bench_local(|| divan::black_box(filter.filter(&items, "editor")));
}

#[divan::bench(args = [10, 100, 1000])]
fn fuzzy_filter(bencher: divan::Bencher, n: usize) {
    let registry = large_registry(n);
    let items = labels(&registry);
    let mut filter = FuzzyFilter::new();

    bencher.bench_local(|| divan::black_box(filter.filter(&items, "cmd edtr")));
}

#[divan::bench(args = [10, 100, 1000])]
fn set_query_regroup(bencher: divan::Bencher, n: usize) {
    let mut engine = DispatchEngine::new(
        Rc::new(large_registry(n)),
        DryRunPlatform::default(),
        Box::new(FuzzyFilter::new()),
    );
    engine.open();

    bencher.bench_local(|| {
        engine.set_query("num 1");
        divan::black_box(engine.state().visible_commands().len())
    });
}
