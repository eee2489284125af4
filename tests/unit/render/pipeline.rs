use super::*;
use crate::render::sink::InMemorySink;

fn metrics() -> DisplayMetrics {
    DisplayMetrics::new(64.0, 48.0, 2.0)
}

#[test]
fn render_frame_is_deterministic_and_physical_sized() {
    let cfg = DotGridConfig::seeded_default();
    let field = cfg.build_composer();
    let a = render_frame(&cfg, &field, metrics(), FrameTick(100.0)).unwrap();
    let b = render_frame(&cfg, &field, metrics(), FrameTick(100.0)).unwrap();
    assert_eq!((a.width, a.height), (128, 96));
    assert!(a.premultiplied);
    assert_eq!(a, b);
    assert!(!a.is_blank());
}

#[test]
fn parallel_and_sequential_renders_match() {
    let cfg = DotGridConfig::seeded_default();
    let ticks = ticks_at_fps(0.0, 30.0, 5).unwrap();

    let mut seq = InMemorySink::new();
    let seq_stats = render_frames(&cfg, metrics(), &ticks, &RenderThreading::default(), &mut seq)
        .unwrap();

    let mut par = InMemorySink::new();
    let threading = RenderThreading {
        parallel: true,
        chunk_size: 2,
        threads: Some(2),
    };
    let par_stats = render_frames(&cfg, metrics(), &ticks, &threading, &mut par).unwrap();

    assert_eq!(seq_stats.frames_rendered, 5);
    assert_eq!(par_stats.frames_rendered, 5);
    assert_eq!(par_stats.chunks, 3);
    assert_eq!(seq.frames.len(), par.frames.len());
    for (s, p) in seq.frames.iter().zip(par.frames.iter()) {
        assert_eq!(s.0, p.0);
        assert_eq!(s.1, p.1);
        assert_eq!(s.2, p.2);
    }
}

#[test]
fn empty_ticks_and_bad_threads_are_rejected() {
    let cfg = DotGridConfig::seeded_default();
    let mut sink = InMemorySink::new();
    assert!(render_frames(&cfg, metrics(), &[], &RenderThreading::default(), &mut sink).is_err());

    let threading = RenderThreading {
        parallel: true,
        threads: Some(0),
        ..RenderThreading::default()
    };
    let ticks = [FrameTick(0.0)];
    assert!(render_frames(&cfg, metrics(), &ticks, &threading, &mut sink).is_err());
}

#[test]
fn ticks_follow_frame_interval() {
    let ticks = ticks_at_fps(10.0, 50.0, 3).unwrap();
    assert_eq!(ticks, vec![FrameTick(10.0), FrameTick(30.0), FrameTick(50.0)]);
    assert!(ticks_at_fps(0.0, 0.0, 3).is_err());
}
