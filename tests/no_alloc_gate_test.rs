use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_apples::core::{Round, RoundSnapshot, ScriptedValues};
use tui_apples::term::{FrameBuffer, GameView, Viewport};
use tui_apples::types::{GameConfig, Point};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

fn long_round() -> Round {
    let config = GameConfig {
        round_duration_secs: 100_000,
        ..GameConfig::default()
    };
    // Rows alternate 4 6 4 6 ... so horizontal pairs always match.
    Round::new(config, &mut ScriptedValues::new(vec![4, 6, 4, 6, 4, 6, 4, 6, 4, 6, 4, 6, 4, 6, 4, 6]))
        .unwrap()
}

#[test]
fn round_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut round = long_round();
    round.pointer_down(Point::new(0.0, 0.0));
    round.pointer_move(Point::new(600.0, 320.0));
    round.pointer_up(Point::new(600.0, 320.0));

    let allocs = with_alloc_counting(|| {
        // Sweeping drags that miss.
        for i in 0..200 {
            let x = (i % 600) as f32;
            let _ = round.pointer_down(Point::new(0.0, 0.0));
            let _ = round.pointer_move(Point::new(x, 320.0));
            let _ = round.pointer_move(Point::new(600.0 - x, 160.0));
            let _ = round.pointer_up(Point::new(600.0 - x, 160.0));
        }

        // Pair drags that match and remove tokens.
        for row in 0..8u16 {
            for pair in 0..7u16 {
                let y = row as f32 * 40.0 + 20.0;
                let x0 = pair as f32 * 80.0 + 20.0;
                let _ = round.pointer_down(Point::new(x0, y));
                let _ = round.pointer_move(Point::new(x0 + 40.0, y));
                let _ = round.pointer_up(Point::new(x0 + 40.0, y));
            }
        }

        // Frame-sized clock steps.
        for _ in 0..1_000 {
            let _ = round.advance(16);
        }
        let _ = round.tick();
    });

    assert!(round.score() > 0);
    assert_eq!(allocs, 0);
}

#[test]
fn snapshot_and_render_reuse_buffers() {
    let mut round = long_round();
    let view = GameView::default();
    let vp = Viewport::new(100, 30);

    let mut snap = RoundSnapshot::default();
    let mut fb = FrameBuffer::new(vp.width, vp.height);
    // Warm-up grows both buffers to size.
    round.snapshot_into(&mut snap);
    view.render_into(&snap, vp, &mut fb);

    let allocs = with_alloc_counting(|| {
        for i in 0..60 {
            let _ = round.pointer_down(Point::new(0.0, 0.0));
            let _ = round.pointer_move(Point::new((i * 10) as f32, 200.0));
            round.snapshot_into(&mut snap);
            view.render_into(&snap, vp, &mut fb);
            let _ = snap.fingerprint();
        }
    });

    assert_eq!(allocs, 0);
}
