use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal cells.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Columns between tab stops.
const TAB_WIDTH: usize = 4;

/// Wrap text to fit within a given width.
///
/// Explicit newlines always start a new line and runs of spaces are kept
/// as typed. Tabs become spaces up to the next tab stop; other control
/// characters are dropped. Soft breaks happen after the last space that
/// fits; the space at the break itself is dropped. Words wider than `width`
/// are split.
///
/// # Arguments
/// * `text` - The text to wrap
/// * `width` - Maximum width per line, in terminal cells
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.split('\n').map(expand_controls).collect();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(&expand_controls(paragraph), width, &mut lines);
    }
    lines
}

// A raw tab or carriage return in a cell moves the terminal cursor.
fn expand_controls(paragraph: &str) -> String {
    let mut out = String::with_capacity(paragraph.len());
    let mut column = 0;
    for ch in paragraph.chars() {
        if ch == '\t' {
            let spaces = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(spaces));
            column += spaces;
        } else if !ch.is_control() {
            out.push(ch);
            column += UnicodeWidthChar::width(ch).unwrap_or(0);
        }
    }
    out
}

fn wrap_paragraph(paragraph: &str, width: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0;
    // Byte offset just past the last space in `current`
    let mut break_at: Option<usize> = None;

    for ch in paragraph.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);

        if current_width + ch_width > width && !current.is_empty() {
            if ch == ' ' {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
                break_at = None;
                continue;
            }

            let rest = match break_at {
                Some(at) => {
                    let rest = current.split_off(at);
                    current.pop();
                    rest
                }
                None => String::new(),
            };
            if current.is_empty() {
                current = rest;
            } else {
                lines.push(std::mem::replace(&mut current, rest));
            }
            current_width = display_width(&current);
            break_at = None;

            // Wide chars can still overflow the carried-over word.
            if current_width + ch_width > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
        }

        current.push(ch);
        current_width += ch_width;
        if ch == ' ' {
            break_at = Some(current.len());
        }
    }

    lines.push(current);
}
