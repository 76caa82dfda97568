//! Rendering behavior across buffer, flags and surface

use console_lines::{parse_line, DisplayBuffer, FrameRecorder, MarkupSurface, FLAG_TABLE};

fn sized_buffer(height: u32) -> DisplayBuffer {
    let mut buffer = DisplayBuffer::new(24, 2);
    buffer.update_capacity(height);
    buffer
}

#[test]
fn test_well_formed_flags_fully_stripped() {
    let mut text = String::from("start");
    let mut expected_styles = 0;
    let mut expected_markers = 0;
    for def in FLAG_TABLE {
        match def.kind {
            console_lines::FlagKind::Style { parameterized, .. } => {
                expected_styles += 1;
                if parameterized {
                    text.push_str(&format!(" $@{}=v$", def.name));
                } else {
                    text.push_str(&format!(" $@{}$", def.name));
                }
            }
            console_lines::FlagKind::Behavior => {
                expected_markers += 1;
                text.push_str(&format!(" $@{}$", def.name));
            }
        }
    }

    let parsed = parse_line(&text);
    assert!(!parsed.visible.contains("$@"));
    assert!(parsed.visible.starts_with("start"));
    assert_eq!(parsed.styles.len(), expected_styles);
    assert_eq!(parsed.markers.len(), expected_markers);
}

#[test]
fn test_consecutive_flushes_write_at_most_once() {
    let mut buffer = sized_buffer(480);
    let mut surface = MarkupSurface::new();

    buffer.set_line(0, "Welcome to UpsicronOS!", false);
    buffer.flush(&mut surface);
    buffer.flush(&mut surface);
    buffer.flush(&mut surface);

    assert_eq!(surface.writes(), 1);
    assert!(surface.markup().contains("Welcome to UpsicronOS!"));
}

#[test]
fn test_resize_drops_stale_lines() {
    let mut buffer = sized_buffer(480);
    assert_eq!(buffer.capacity(), 18);
    buffer.set_line(0, "stale", true);
    buffer.set_line(17, "stale", false);

    assert!(buffer.update_capacity(240));
    assert_eq!(buffer.capacity(), 8);
    assert!(buffer.lines().iter().all(|l| l.text.is_empty() && !l.preserve_on_clear));

    assert!(buffer.update_capacity(720));
    assert_eq!(buffer.capacity(), 28);
    assert!(buffer.lines().iter().all(|l| l.text.is_empty()));
}

#[test]
fn test_resize_produces_new_frame() {
    let mut buffer = sized_buffer(240);
    let mut surface = FrameRecorder::new();
    buffer.flush(&mut surface);
    assert_eq!(surface.last().unwrap().len(), 8);

    buffer.update_capacity(288);
    buffer.flush(&mut surface);
    assert_eq!(surface.writes(), 2);
    assert_eq!(surface.last().unwrap().len(), 10);
}
