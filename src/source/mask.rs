//! Structural view of C-family source text.
//!
//! Blanks the contents of comments and string/char literals with spaces so
//! that pattern scanning and brace counting only see real code. The output
//! has exactly the same byte length as the input and keeps every newline,
//! so any offset found in the masked text is valid in the original.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Literal { quote: char, escaped: bool },
}

/// Replace comment and literal contents with spaces, preserving offsets.
///
/// Delimiters (`//`, `/* */`, quotes) are blanked as well. Raw string
/// literals are not recognised.
pub fn mask_comments_and_literals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = State::Code;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        state = match state {
            State::Code => match ch {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    blank(&mut out, "//");
                    State::LineComment
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    blank(&mut out, "/*");
                    State::BlockComment
                }
                '"' | '\'' => {
                    out.push(' ');
                    State::Literal {
                        quote: ch,
                        escaped: false,
                    }
                }
                _ => {
                    out.push(ch);
                    State::Code
                }
            },
            State::LineComment => {
                if ch == '\n' {
                    out.push('\n');
                    State::Code
                } else {
                    blank_char(&mut out, ch);
                    State::LineComment
                }
            }
            State::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    blank(&mut out, "*/");
                    State::Code
                } else {
                    blank_char(&mut out, ch);
                    State::BlockComment
                }
            }
            State::Literal { quote, escaped } => {
                blank_char(&mut out, ch);
                if escaped {
                    State::Literal {
                        quote,
                        escaped: false,
                    }
                } else if ch == '\\' {
                    State::Literal {
                        quote,
                        escaped: true,
                    }
                } else if ch == quote || ch == '\n' {
                    // An unterminated literal ends at the line break
                    State::Code
                } else {
                    State::Literal {
                        quote,
                        escaped: false,
                    }
                }
            }
        };
    }

    out
}

fn blank(out: &mut String, delimiter: &str) {
    out.extend(std::iter::repeat_n(' ', delimiter.len()));
}

fn blank_char(out: &mut String, ch: char) {
    if ch == '\n' {
        out.push('\n');
    } else {
        out.extend(std::iter::repeat_n(' ', ch.len_utf8()));
    }
}
