use super::*;
use crate::render::sink::InMemorySink;

fn host(max_frames: u64) -> HeadlessHost<InMemorySink> {
    HeadlessHost::new(
        DisplayMetrics::new(40.0, 30.0, 1.0),
        50.0,
        max_frames,
        InMemorySink::new(),
    )
    .unwrap()
}

#[test]
fn no_request_means_no_events() {
    let mut h = host(3);
    assert_eq!(h.next_event(), None);
}

#[test]
fn requests_are_fulfilled_on_the_virtual_clock() {
    let mut h = host(3).with_start_ms(100.0);
    let a = h.request_animation_frame();
    assert_eq!(
        h.next_event(),
        Some(HostEvent::Frame {
            id: a,
            tick: FrameTick(100.0)
        })
    );
    assert!(!h.has_pending_request());

    let b = h.request_animation_frame();
    assert_ne!(a, b);
    assert_eq!(
        h.next_event(),
        Some(HostEvent::Frame {
            id: b,
            tick: FrameTick(120.0)
        })
    );
}

#[test]
fn cancel_withdraws_pending_request() {
    let mut h = host(3);
    let id = h.request_animation_frame();
    h.cancel_animation_frame(FrameRequestId(99));
    assert!(h.has_pending_request());
    h.cancel_animation_frame(id);
    assert!(!h.has_pending_request());
    assert_eq!(h.next_event(), None);
}

#[test]
fn scripted_resize_precedes_its_frame() {
    let mut h = host(3);
    let big = DisplayMetrics::new(80.0, 60.0, 2.0);
    h.schedule_resize(0, big);
    let id = h.request_animation_frame();

    assert_eq!(h.next_event(), Some(HostEvent::Resize));
    assert_eq!(h.display_metrics(), big);
    assert!(matches!(h.next_event(), Some(HostEvent::Frame { id: got, .. }) if got == id));
}

#[test]
fn present_snapshots_into_sink_and_limits_frames() {
    let mut h = host(1);
    h.surface()
        .unwrap()
        .resize_backing(4, 4)
        .unwrap();
    let _ = h.request_animation_frame();
    h.present(FrameTick(0.0)).unwrap();
    assert_eq!(h.presented(), 1);

    let _ = h.request_animation_frame();
    assert_eq!(h.next_event(), None);

    let sink = h.finish().unwrap();
    assert_eq!(sink.frames.len(), 1);
    assert_eq!(sink.frames[0].2.width, 4);
}

#[test]
fn surfaceless_host_reports_none() {
    let mut h = host(1).without_surface();
    assert!(h.surface().is_none());
    assert!(h.cpu_surface().is_none());
    assert!(h.present(FrameTick(0.0)).is_ok());
    assert_eq!(h.presented(), 0);
}

#[test]
fn invalid_fps_is_rejected() {
    assert!(
        HeadlessHost::new(DisplayMetrics::new(1.0, 1.0, 1.0), 0.0, 1, InMemorySink::new())
            .is_err()
    );
}
