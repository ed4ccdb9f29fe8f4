use std::{iter::Peekable, str::CharIndices};

/// Iterates over the characters of SQL text that are code, skipping quoted
/// text and comments.
///
/// Yields the byte offset, the character, and the parenthesis depth the
/// character sits at.
pub(super) struct Code<'a> {
    chars: Peekable<CharIndices<'a>>,
    depth: usize,
}

impl<'a> Code<'a> {
    pub(super) fn new(sql: &'a str) -> Code<'a> {
        Code {
            chars: sql.char_indices().peekable(),
            depth: 0,
        }
    }

    /// Skips to after the closing quote. A doubled quote is an escaped one.
    fn skip_quoted(&mut self, quote: char) {
        while let Some((_, c)) = self.chars.next() {
            if c == quote {
                if self.chars.next_if(|&(_, next)| next == quote).is_none() {
                    return;
                }
            }
        }
    }

    fn skip_line(&mut self) {
        for (_, c) in self.chars.by_ref() {
            if c == '\n' {
                return;
            }
        }
    }

    fn skip_block(&mut self) {
        while let Some((_, c)) = self.chars.next() {
            if c == '*' && self.chars.next_if(|&(_, next)| next == '/').is_some() {
                return;
            }
        }
    }
}

impl Iterator for Code<'_> {
    type Item = (usize, char, usize);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, c) = self.chars.next()?;

            match c {
                '\'' | '"' | '`' => self.skip_quoted(c),
                '-' if self.chars.next_if(|&(_, next)| next == '-').is_some() => {
                    self.skip_line()
                }
                '/' if self.chars.next_if(|&(_, next)| next == '*').is_some() => {
                    self.skip_block()
                }
                '(' => {
                    self.depth += 1;
                    return Some((index, c, self.depth - 1));
                }
                ')' => {
                    self.depth = self.depth.saturating_sub(1);
                    return Some((index, c, self.depth));
                }
                _ => return Some((index, c, self.depth)),
            }
        }
    }
}
