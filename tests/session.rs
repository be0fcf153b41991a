use std::path::Path;

use dirmap::app::App;
use dirmap::config::AppConfig;
use dirmap::scanner::{FsSource, MemorySource};

fn config(width: u32, height: u32) -> AppConfig {
    AppConfig {
        viewport_width: width,
        viewport_height: height,
        path_separator: '/',
        preview_cols: 21,
        preview_rows: 11,
        ..AppConfig::default()
    }
}

fn run(app: &mut App, script: &str) -> String {
    let mut out = Vec::new();
    app.run(script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn sample_app() -> App {
    let source = MemorySource::new()
        .with_file("proj/src/main.rs", 600)
        .with_file("proj/src/lib.rs", 200)
        .with_file("proj/README.md", 200);
    App::load(Path::new("proj"), &source, config(100, 100)).unwrap()
}

#[test]
fn click_reveals_children_and_hover_describes_them() {
    let mut app = sample_app();
    let out = run(
        &mut app,
        "hover 50 50\nclick 50 50\nhover 50 10\nhover 50 90\nlist\n",
    );
    let lines: Vec<&str> = out.lines().collect();

    assert!(lines[0].starts_with("proj [1000 B] at (0, 0) 100x100 dir, 2 entries"));
    assert_eq!(lines[1], "proj: 2 visible");
    assert!(lines[2].starts_with("proj/src [800 B] at (0, 0) 100x80"));
    assert!(lines[3].starts_with("proj/README.md [200 B] at (0, 80) 100x20"));
    assert!(lines[4].ends_with("proj/src"));
    assert!(lines[5].ends_with("proj/README.md"));
    assert_eq!(lines.len(), 6);
}

#[test]
fn secondary_click_and_collapse_all() {
    let mut app = sample_app();
    let out = run(
        &mut app,
        "expand-all 1 1\nhover 1 1\nrclick 1 1\nhover 1 1\ncollapse-all\nrclick 1 1\n",
    );
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "proj: 3 visible");
    assert!(lines[1].starts_with("proj/src/main.rs"));
    assert_eq!(lines[2], "proj/src/main.rs: 2 visible");
    assert!(lines[3].starts_with("proj/src ["));
    assert_eq!(lines[4], "proj: 1 visible");
    assert_eq!(lines[5], "proj: unchanged (1 visible)");
}

#[test]
fn misses_and_bad_input_keep_the_session_alive() {
    let mut app = sample_app();
    let out = run(&mut app, "click 500 500\nzap\nclick 1\n\n# comment\nquit\nclick 1 1\n");
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "no node");
    assert!(lines[1].starts_with("error: unknown command 'zap'"));
    assert!(lines[2].starts_with("error: 'click' takes two coordinates"));
    assert_eq!(lines.len(), 3, "commands after quit must not run: {out}");
}

#[test]
fn resize_relayouts_and_show_draws() {
    let mut app = sample_app();
    let out = run(&mut app, "click 1 1\nresize 200 100\nhover 1 1\nshow\n");
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[1], "viewport 200x100");
    // Wide viewport: src becomes the left 160 columns.
    assert!(lines[2].starts_with("proj/src [800 B] at (0, 0) 160x100"));
    assert_eq!(lines.len(), 3 + 11);
    assert!(lines[3].starts_with('+'));
    assert!(lines[4].contains("src"));
}

#[test]
fn snapshot_writes_a_ppm() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("map.ppm");
    let mut app = sample_app();
    app.resize(4, 3);

    let out = run(&mut app, &format!("snapshot {}\n", file.display()));
    assert!(out.starts_with("wrote "));
    let bytes = std::fs::read(&file).unwrap();
    assert!(bytes.starts_with(b"P6\n4 3\n255\n"));
}

#[test]
fn oversized_snapshot_is_reported_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("huge.ppm");
    let mut app = sample_app();

    let out = run(
        &mut app,
        &format!("resize 100000 100000\nsnapshot {}\nhover 1 1\n", file.display()),
    );
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "viewport 100000x100000");
    assert!(lines[1].starts_with("error: rendering"));
    assert!(lines[1].contains("pixel limit"));
    assert!(lines[2].starts_with("proj [1000 B]"));
    assert!(!file.exists());
}

#[test]
fn resize_beyond_i32_coordinates_is_rejected() {
    let mut app = sample_app();
    let out = run(&mut app, "resize 1 4000000000\nclick 50 50\n");
    let lines: Vec<&str> = out.lines().collect();

    assert!(lines[0].starts_with("error: viewport 1x4000000000"));
    assert_eq!(lines[1], "proj: 2 visible");
    assert_eq!((app.viewport_width, app.viewport_height), (100, 100));
}

#[test]
fn loads_a_real_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    std::fs::write(dir.path().join("sub/data.bin"), vec![0u8; 300]).unwrap();
    std::fs::create_dir(dir.path().join("hollow")).unwrap();

    let app = App::load(dir.path(), &FsSource::new(), config(50, 50)).unwrap();
    assert_eq!(app.tree.get(app.tree.root).size, 301);
    assert_eq!(app.stats.total_files, 1);
    assert_eq!(app.stats.total_dirs, 3);
    assert_eq!(app.stats.empty_dirs, 1);
    assert_eq!(app.stats.total_bytes, 300);
}
