//! End-to-end scenarios driving the stock apps through a shell

use console_lines::StyleDecl;
use shell_apps::install_default_apps;
use shell_core::{
    FrameRecorder, KeyEvent, KeyValueStore, MemoryStore, Modifiers, Shell, ShellConfig, Vfs,
};

const KEY: &str = "upsicronOS_state";
const HEIGHT: u32 = 480; // 18 lines

const SEED: &str = r#"{
    "root": { "d": true, "c": {
        "documents": { "d": true, "c": {
            "readme.txt": { "d": false, "c": "Welcome" }
        } },
        "system": { "d": true, "c": {} }
    } }
}"#;

type TestShell = Shell<MemoryStore, FrameRecorder>;

fn shell_with_session(session: &str) -> TestShell {
    let vfs = Vfs::from_seed_json(SEED).unwrap();
    let store = MemoryStore::with_value(KEY, session);
    let mut shell = Shell::new(
        ShellConfig::default(),
        vfs,
        store,
        FrameRecorder::new(),
        HEIGHT,
    );
    install_default_apps(&mut shell).unwrap();
    shell.tick();
    shell
}

fn idle_shell() -> TestShell {
    shell_with_session(r#"{"state":"idle","selectedApp":0,"userInput":""}"#)
}

/// Dispatches each key by name, then runs one tick
fn keys(shell: &mut TestShell, names: &[&str]) {
    for name in names {
        shell.dispatch_key(&KeyEvent::from_name(name, Modifiers::none()));
    }
    shell.tick();
}

fn type_text(shell: &mut TestShell, text: &str) {
    for c in text.chars() {
        shell.dispatch_key(&KeyEvent::from_name(&c.to_string(), Modifiers::none()));
    }
    shell.tick();
}

fn ctrl(shell: &mut TestShell, c: char) {
    let event = KeyEvent::from_name(&c.to_string(), Modifiers::none().with(Modifiers::CTRL));
    shell.dispatch_key(&event);
    shell.tick();
}

fn screen(shell: &TestShell) -> Vec<String> {
    shell
        .surface()
        .last()
        .map(|f| f.plain_lines().iter().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

fn open_app(shell: &mut TestShell, index: usize) {
    for _ in 0..index {
        keys(shell, &["ArrowDown"]);
    }
    keys(shell, &["Enter"]);
}

#[test]
fn test_menu_lists_stock_apps() {
    let shell = idle_shell();
    let lines = screen(&shell);
    assert_eq!(lines[2], "> 1. Calculator");
    assert_eq!(lines[3], "  2. Notepad");
    assert_eq!(lines[4], "  3. Color Text");
    assert_eq!(lines[5], "  4. Files");
}

#[test]
fn test_calculator_result() {
    let mut shell = idle_shell();
    open_app(&mut shell, 0);
    assert_eq!(shell.current_state(), "app.calc");

    keys(&mut shell, &["2", "+", "2", "Enter"]);

    let frame = shell.surface().last().unwrap();
    assert_eq!(frame.lines[2].text, "Result: 4 ");
    assert_eq!(frame.lines[2].styles, vec![StyleDecl::new("color", "green")]);
    assert_eq!(frame.lines[1].text, "Input: ");
}

#[test]
fn test_calculator_error() {
    let mut shell = idle_shell();
    open_app(&mut shell, 0);

    keys(&mut shell, &["2", "+", "Enter"]);

    let frame = shell.surface().last().unwrap();
    assert_eq!(frame.lines[2].text, "Error: Invalid expression  ");
    assert_eq!(
        frame.lines[2].styles,
        vec![
            StyleDecl::new("color", "red"),
            StyleDecl::new("font-weight", "bold"),
        ]
    );
    assert_eq!(frame.lines[1].text, "Input: 2+");
}

#[test]
fn test_leaving_app_hard_clears() {
    let mut shell = idle_shell();
    open_app(&mut shell, 0);
    keys(&mut shell, &["9", "Enter"]);
    keys(&mut shell, &["Escape"]);

    assert_eq!(shell.current_state(), "idle");
    let lines = screen(&shell);
    assert_eq!(lines[0], "Welcome to UpsicronOS!");
    assert!(lines.iter().all(|l| !l.starts_with("Result")));
}

#[test]
fn test_calculator_input_restored() {
    let mut shell = shell_with_session(r#"{"state":"app.calc","selectedApp":0,"userInput":"12+"}"#);
    assert_eq!(screen(&shell)[1], "Input: 12+");

    keys(&mut shell, &["3", "Enter"]);
    assert_eq!(screen(&shell)[2], "Result: 15 ");
}

#[test]
fn test_colortext_styles_output() {
    let mut shell = idle_shell();
    open_app(&mut shell, 2);
    assert_eq!(shell.current_state(), "app.colortext");

    keys(&mut shell, &["3", "i"]);
    type_text(&mut shell, "sky");
    keys(&mut shell, &["Enter"]);

    let frame = shell.surface().last().unwrap();
    assert_eq!(frame.lines[6].text, "sky  ");
    assert_eq!(
        frame.lines[6].styles,
        vec![
            StyleDecl::new("color", "blue"),
            StyleDecl::new("font-style", "italic"),
        ]
    );
    assert_eq!(frame.lines[7].text, "Italic: ON ");
}

#[test]
fn test_files_browse_and_view() {
    let mut shell = idle_shell();
    open_app(&mut shell, 3);

    let lines = screen(&shell);
    assert_eq!(lines[1], "Files - root");
    assert_eq!(lines[4], "> [DIR] documents");
    assert_eq!(lines[5], "  [DIR] system");

    keys(&mut shell, &["Enter"]);
    assert_eq!(screen(&shell)[4], "> [FILE] readme.txt");

    keys(&mut shell, &["Enter"]);
    let lines = screen(&shell);
    assert_eq!(lines[1], "File: root/documents/readme.txt");
    assert_eq!(lines[4], "  Welcome");
    assert_eq!(lines[17], "Line 1-1 of 1");

    keys(&mut shell, &["Escape", "Backspace"]);
    assert_eq!(screen(&shell)[1], "Files - root");
    keys(&mut shell, &["Escape"]);
    assert_eq!(shell.current_state(), "idle");
}

#[test]
fn test_notepad_save_visible_in_files() {
    let mut shell = idle_shell();
    open_app(&mut shell, 1);
    assert_eq!(shell.current_state(), "app.notepad");

    type_text(&mut shell, "line one");
    keys(&mut shell, &["Enter"]);
    type_text(&mut shell, "line two");
    ctrl(&mut shell, 's');
    assert_eq!(screen(&shell)[5], "> documents/untitled.txt_");

    keys(&mut shell, &["Enter"]);
    let lines = screen(&shell);
    assert_eq!(lines[1], "File: untitled.txt | Line 2/2 | Col 9");
    assert_eq!(lines[15], "File saved: root/documents/untitled.txt");

    keys(&mut shell, &["Escape"]);
    assert_eq!(shell.current_state(), "idle");

    // Notepad is still selected; Files is two entries down
    open_app(&mut shell, 2);
    keys(&mut shell, &["Enter"]);
    let lines = screen(&shell);
    assert_eq!(lines[4], "> [FILE] readme.txt");
    assert_eq!(lines[5], "  [FILE] untitled.txt");

    keys(&mut shell, &["ArrowDown", "Enter"]);
    let lines = screen(&shell);
    assert_eq!(lines[4], "  line one");
    assert_eq!(lines[5], "  line two");
}

#[test]
fn test_notepad_ctrl_navigation_edits_text() {
    let mut shell = idle_shell();
    open_app(&mut shell, 1);
    type_text(&mut shell, "ab");

    for name in ["ArrowLeft", "Backspace"] {
        shell.dispatch_key(&KeyEvent::from_name(name, Modifiers::CTRL));
    }
    shell.tick();
    assert_eq!(screen(&shell)[3], "> b");

    shell.dispatch_key(&KeyEvent::from_name("Escape", Modifiers::META));
    assert_eq!(shell.current_state(), "idle");
}

#[test]
fn test_reserved_chord_never_reaches_notepad() {
    let mut shell = idle_shell();
    open_app(&mut shell, 1);
    let event = KeyEvent::from_name("c", Modifiers::none().with(Modifiers::CTRL));
    assert!(!shell.dispatch_key(&event));
    shell.tick();
    assert_eq!(screen(&shell)[3], "> ");
}

#[test]
fn test_input_buffer_persisted() {
    let mut shell = idle_shell();
    open_app(&mut shell, 0);
    keys(&mut shell, &["7", "*"]);
    let saved = shell.store().get(KEY).unwrap();
    assert!(saved.contains(r#""userInput":"7*""#));
    assert!(saved.contains(r#""state":"app.calc""#));
}
