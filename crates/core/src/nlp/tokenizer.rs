//! Rule-based tokenizer tuned for résumé and job-posting text.
//!
//! Technical names survive as single tokens: `c++`, `c#`, `node.js`, `ci/cd`,
//! `scikit-learn`, `.net`. Whitespace never produces a token.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Punct,
}

/// A slice of the input text classified as a word or a punctuation mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

/// Characters that may join two alphanumeric runs inside one token.
const JOINERS: &[char] = &['.', '-', '/', '_', '\''];

/// Characters that may trail or repeat inside a token (`c++`, `f#`).
const SUFFIX_SYMBOLS: &[char] = &['+', '#'];

pub fn tokenize(text: &str) -> Vec<RawToken<'_>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (start, c) = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let next_is_alnum = chars
            .get(i + 1)
            .map(|&(_, n)| n.is_alphanumeric())
            .unwrap_or(false);

        if !(c.is_alphanumeric() || (c == '.' && next_is_alnum)) {
            let end = chars.get(i + 1).map(|&(b, _)| b).unwrap_or(text.len());
            tokens.push(RawToken {
                text: &text[start..end],
                kind: TokenKind::Punct,
            });
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() {
            let (_, cur) = chars[j];
            if cur.is_alphanumeric() || SUFFIX_SYMBOLS.contains(&cur) {
                j += 1;
                continue;
            }
            if JOINERS.contains(&cur) && joins_word(&chars, j) {
                j += 1;
                continue;
            }
            break;
        }

        let end = chars.get(j).map(|&(b, _)| b).unwrap_or(text.len());
        tokens.push(RawToken {
            text: &text[start..end],
            kind: TokenKind::Word,
        });
        i = j;
    }

    tokens
}

/// A joiner at `pos` stays inside the token when an alphanumeric follows it,
/// except for a possessive `'s` closing the word.
fn joins_word(chars: &[(usize, char)], pos: usize) -> bool {
    let next = match chars.get(pos + 1) {
        Some(&(_, n)) if n.is_alphanumeric() => n,
        _ => return false,
    };

    if chars[pos].1 == '\'' && (next == 's' || next == 'S') {
        let after = chars.get(pos + 2).map(|&(_, a)| a);
        return matches!(after, Some(a) if a.is_alphanumeric());
    }
    true
}
