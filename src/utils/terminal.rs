//! Terminal output sanitization for search results
//!
//! Conversation ids and titles come straight from the export and are printed by the `find`
//! command. They can carry ANSI escape sequences or raw control characters that would move
//! the cursor, recolour the terminal or break the one-line-per-hit layout.

const ESC: char = '\x1b';

/// Makes a user-controlled string safe to print on a single terminal line
///
/// - ANSI CSI sequences (`ESC [ ... letter`) and OSC sequences (`ESC ] ... BEL`) are removed
/// - line breaks, tabs and the Unicode line/paragraph separators become a single space
/// - any other control character is dropped
///
/// # Examples
///
/// ```
/// use conversation_splitter::utils::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[31mRed\x1b[0m title"), "Red title");
/// assert_eq!(sanitize_for_terminal("two\nlines"), "two lines");
/// ```
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ESC => match chars.peek() {
                Some('[') => {
                    chars.next();
                    // CSI ends at the first byte in 0x40..=0x7E
                    for next in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    // OSC ends at BEL or ST (ESC \)
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            '\n' | '\r' | '\t' | '\u{2028}' | '\u{2029}' => {
                if !result.ends_with(' ') {
                    result.push(' ');
                }
            }
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}
