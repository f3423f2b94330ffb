//! Offline export of the reveal into a frame sink.

mod common;

use std::time::Duration;

use common::fixtures;
use common::*;
use pretty_assertions::assert_eq;
use retro_dither::{PaletteCatalog, RevealOptions};
use retrovision::error::ExportError;
use retrovision::rendering::Canvas;
use retrovision::services::{ExportSettings, MemorySink, Session, VideoExporter};

fn converted_session(duration_ms: u64) -> Session<Canvas> {
    let mut session = Session::new(PaletteCatalog::builtin(), "ega", Canvas::new()).unwrap();
    session.set_source(fixtures::gradient(40, 25));
    session.set_block_size(8);
    session.set_duration(Duration::from_millis(duration_ms));
    session.convert().unwrap();
    session
}

#[test]
fn test_export_frames_progress_to_full_image() {
    let session = converted_session(1000);
    let image = session.converted().unwrap().clone();
    let settings = ExportSettings {
        fps: 30,
        hold: Duration::from_millis(100),
    };
    let mut sink = MemorySink::new();
    let output = session.export(&mut sink, settings).unwrap();

    // Frames at 0/30 .. 30/30 s, then ceil(0.1 * 30) = 3 hold frames.
    assert_eq!(output.reveal_frames, 31);
    assert_eq!(output.hold_frames, 3);
    assert_eq!(sink.frames().len(), 34);
    assert!(sink.is_finalized());

    let spec = sink.spec().unwrap();
    assert_eq!((spec.width, spec.height, spec.fps), (40, 25, 30));

    let full = image.to_rgba_bytes();
    let mut last_lit = 0;
    for frame in sink.frames() {
        assert_frame_in_palette(frame, image.palette());
        let lit = lit_pixels(frame);
        assert!(lit >= last_lit);
        last_lit = lit;
    }
    for frame in &sink.frames()[30..] {
        assert_eq!(frame, &full);
    }
    assert_ne!(sink.frames()[29], full);
    assert_eq!(output.bytes.len(), 34 * full.len());
}

#[test]
fn test_export_timestamps_are_frame_times() {
    let session = converted_session(200);
    let settings = ExportSettings {
        fps: 10,
        hold: Duration::ZERO,
    };
    let mut sink = MemorySink::new();
    let output = session.export(&mut sink, settings).unwrap();

    assert_eq!(output.reveal_frames, 3);
    assert_eq!(output.hold_frames, 1);
    assert_eq!(
        sink.timestamps(),
        &[
            Duration::ZERO,
            Duration::from_millis(100),
            Duration::from_millis(200),
            Duration::from_millis(300),
        ]
    );
}

#[test]
fn test_export_is_independent_of_live_reveal() {
    let mut session = converted_session(500);
    session.start_reveal(Duration::ZERO).unwrap();

    let mut sink = MemorySink::new();
    session
        .export(&mut sink, ExportSettings::default())
        .unwrap();
    assert!(session.renderer().is_running());
    assert_eq!(lit_pixels(session.renderer().surface().rgba()), 0);
}

#[test]
fn test_export_rejects_bad_settings_before_starting_sink() {
    let session = converted_session(500);
    let image = session.converted().unwrap().clone();
    let exporter = VideoExporter::new(ExportSettings {
        fps: 0,
        hold: Duration::ZERO,
    });
    let mut sink = MemorySink::new();
    let result = exporter.export(&image, &RevealOptions::default(), &mut sink);
    assert!(matches!(result, Err(ExportError::InvalidSettings(_))));
    assert!(sink.spec().is_none());
}
