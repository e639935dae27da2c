//! Terminal output sanitization
//!
//! Model answers and response bodies are untrusted text. Printed raw, escape
//! sequences in them could clear the screen, move the cursor or retitle the
//! terminal window. Everything the CLI prints from a response goes through
//! [`sanitize_for_terminal`].

/// Removes ANSI escape sequences and control characters, keeping tab, newline
/// and carriage return.
///
/// Handles CSI sequences (`ESC [ ... final-byte`) and OSC sequences
/// (`ESC ] ... BEL` or `ESC ] ... ESC \`); any other escape drops the ESC and
/// the character after it.
///
/// ```
/// use devpilot::utils::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[31mred\x1b[0m"), "red");
/// ```
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            match chars.next() {
                Some('[') => {
                    // Parameters and intermediates end at a byte in '@'..='~'
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }
        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_color_codes() {
        assert_eq!(sanitize_for_terminal("\x1b[1;31mBold Red\x1b[0m plain"), "Bold Red plain");
    }

    #[test]
    fn test_strips_cursor_movement() {
        assert_eq!(sanitize_for_terminal("\x1b[2J\x1b[H cleared"), " cleared");
    }

    #[test]
    fn test_strips_osc_title_sequences() {
        assert_eq!(sanitize_for_terminal("\x1b]0;pwned\x07after"), "after");
        assert_eq!(sanitize_for_terminal("\x1b]2;title\x1b\\after"), "after");
    }

    #[test]
    fn test_drops_control_characters() {
        assert_eq!(sanitize_for_terminal("bell\x07 back\x08space"), "bell backspace");
    }

    #[test]
    fn test_keeps_whitespace_and_unicode() {
        let text = "<pre><code>fn main() {\n\tprintln!(\"👋\");\r\n}</code></pre>";
        assert_eq!(sanitize_for_terminal(text), text);
    }

    #[test]
    fn test_unterminated_sequences() {
        assert_eq!(sanitize_for_terminal("tail\x1b["), "tail");
        assert_eq!(sanitize_for_terminal("tail\x1b]never ends"), "tail");
        assert_eq!(sanitize_for_terminal("tail\x1b"), "tail");
    }
}
