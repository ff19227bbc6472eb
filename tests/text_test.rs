use appointment_chat::ui::text::{display_width, wrap_text};

#[test]
fn test_wrap_text_basic() {
    let text = "Hello world this is a test";
    let wrapped = wrap_text(text, 15);

    assert_eq!(wrapped.len(), 2);
    assert_eq!(wrapped[0], "Hello world");
    assert_eq!(wrapped[1], "this is a test");
}

#[test]
fn test_wrap_text_single_line() {
    let wrapped = wrap_text("Short text", 20);
    assert_eq!(wrapped, vec!["Short text"]);
}

#[test]
fn test_wrap_text_empty_string() {
    let wrapped = wrap_text("", 20);

    // Empty text still renders as one empty line
    assert_eq!(wrapped, vec![""]);
}

#[test]
fn test_wrap_text_width_zero() {
    let wrapped = wrap_text("Hello world", 0);
    assert_eq!(wrapped, vec!["Hello world"]);
}

#[test]
fn test_wrap_text_long_word_is_split() {
    let text = "supercalifragilisticexpialidocious";
    let wrapped = wrap_text(text, 10);

    assert_eq!(
        wrapped,
        vec!["supercalif", "ragilistic", "expialidoc", "ious"]
    );
}

#[test]
fn test_wrap_text_newlines_start_new_lines() {
    let wrapped = wrap_text("Open slots:\n\n09:00", 40);
    assert_eq!(wrapped, vec!["Open slots:", "", "09:00"]);
}

#[test]
fn test_wrap_text_keeps_inner_spaces() {
    let wrapped = wrap_text("  - 09:00   free", 40);
    assert_eq!(wrapped, vec!["  - 09:00   free"]);
}

#[test]
fn test_wrap_text_drops_space_at_break() {
    let wrapped = wrap_text("abcde fgh", 5);
    assert_eq!(wrapped, vec!["abcde", "fgh"]);
}

#[test]
fn test_wrap_text_breaks_then_splits() {
    let wrapped = wrap_text("hi there", 4);
    assert_eq!(wrapped, vec!["hi", "ther", "e"]);
}

#[test]
fn test_wrap_text_wide_chars() {
    // Each CJK char is two cells wide
    let wrapped = wrap_text("日本語", 4);
    assert_eq!(wrapped, vec!["日本", "語"]);
}

#[test]
fn test_wrap_text_lines_fit_width() {
    let text = "Your appointment is booked for Tuesday at 10:30 with Dr. Alvarez.";
    for width in [8, 12, 20, 33] {
        for line in wrap_text(text, width) {
            assert!(display_width(&line) <= width, "{:?} wider than {}", line, width);
        }
    }
}

#[test]
fn test_display_width() {
    assert_eq!(display_width("abc"), 3);
    assert_eq!(display_width("日本"), 4);
    assert_eq!(display_width(""), 0);
}

#[test]
fn test_wrap_text_expands_tabs_to_tab_stops() {
    assert_eq!(wrap_text("A\tB", 20), vec!["A   B"]);
    assert_eq!(wrap_text("\tx", 20), vec!["    x"]);
    assert_eq!(wrap_text("abcd\te", 20), vec!["abcd    e"]);
}

#[test]
fn test_wrap_text_drops_other_control_chars() {
    assert_eq!(wrap_text("a\r\nb", 20), vec!["a", "b"]);
    assert_eq!(wrap_text("x\u{7}y", 0), vec!["xy"]);
}

#[test]
fn test_wrap_text_output_has_no_control_chars() {
    for line in wrap_text("Slots:\n\t09:00\t\tfree\r\n\t10:30", 8) {
        assert!(!line.chars().any(char::is_control), "{:?}", line);
        assert!(display_width(&line) <= 8);
    }
}
