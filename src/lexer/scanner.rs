use super::*;

/// Advance past the current symbol and update line/column tracking
pub(super) fn bump(scanner: &mut Scanner) -> Option<char> {
    let curr = scanner.current()?;
    scanner.pos += curr.len_utf8();
    if curr == '\n' {
        scanner.line += 1;
        scanner.column = 1;
    } else {
        scanner.column += 1;
    }
    Some(curr)
}

/// Symbols skipped between tokens outside of strings
pub fn is_blank(symbol: char) -> bool {
    matches!(symbol, ' ' | '\t' | '\r' | '\n')
}
