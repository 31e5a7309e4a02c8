//! Splitting TPTP text into statements
//!
//! A statement ends at a `.` outside quotes and brackets. `%` line comments
//! and `/* */` block comments are replaced by a space. Each statement
//! remembers the line it starts on for error messages.

/// One top-level statement with comments removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub text: String,
    pub line: usize,
}

/// The statements of `input`, plus trailing text that is not terminated by
/// a `.` (empty if the input is complete) and the line it starts on
pub fn split_statements(input: &str) -> (Vec<Statement>, Option<Statement>) {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut start_line = 1;
    let mut line = 1;
    let mut depth = 0usize;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '%' => {
                // Line comment; the newline itself is kept
                while chars.peek().is_some_and(|&n| n != '\n') {
                    chars.next();
                }
                current.push(' ');
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for n in chars.by_ref() {
                    if n == '\n' {
                        line += 1;
                    }
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
                current.push(' ');
            }
            '\'' | '"' => {
                if current.trim().is_empty() {
                    start_line = line;
                }
                current.push(c);
                while let Some(n) = chars.next() {
                    current.push(n);
                    if n == '\n' {
                        line += 1;
                    }
                    if n == '\\' {
                        if let Some(escaped) = chars.next() {
                            current.push(escaped);
                        }
                    } else if n == c {
                        break;
                    }
                }
            }
            _ => {
                if c == '\n' {
                    line += 1;
                }
                if !c.is_whitespace() && current.trim().is_empty() {
                    start_line = line;
                }
                current.push(c);
                match c {
                    '(' | '[' => depth += 1,
                    ')' | ']' => depth = depth.saturating_sub(1),
                    '.' if depth == 0 => {
                        statements.push(Statement {
                            text: current.trim().to_string(),
                            line: start_line,
                        });
                        current.clear();
                    }
                    _ => {}
                }
            }
        }
    }

    let rest = current.trim();
    let rest = (!rest.is_empty()).then(|| Statement {
        text: rest.to_string(),
        line: start_line,
    });
    (statements, rest)
}
