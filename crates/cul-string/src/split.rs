//! Splitting on a delimiter predicate

use std::ops::ControlFlow;

/// What a split callback returns: `()` to keep going, or a [`ControlFlow`]
pub trait SplitSignal {
    fn is_break(&self) -> bool;
}

impl SplitSignal for () {
    fn is_break(&self) -> bool {
        false
    }
}

impl SplitSignal for ControlFlow<()> {
    fn is_break(&self) -> bool {
        ControlFlow::is_break(self)
    }
}

/// Calls `f` for every maximal non-empty run of non-delimiter characters.
///
/// Tokens borrow from `text`. Stops early once `f` returns
/// `ControlFlow::Break(())`.
pub fn for_split<'t, P, F, R>(text: &'t str, is_delim: P, mut f: F)
where
    P: Fn(char) -> bool,
    F: FnMut(&'t str) -> R,
    R: SplitSignal,
{
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (is_delim(c), start) {
            (true, Some(s)) => {
                start = None;
                if f(&text[s..i]).is_break() {
                    return;
                }
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        f(&text[s..]);
    }
}

/// [`for_split`] over a slice of any element type
pub fn for_split_slice<'t, T, P, F, R>(items: &'t [T], is_delim: P, mut f: F)
where
    P: Fn(&T) -> bool,
    F: FnMut(&'t [T]) -> R,
    R: SplitSignal,
{
    for token in items.split(|item| is_delim(item)).filter(|t| !t.is_empty()) {
        if f(token).is_break() {
            return;
        }
    }
}
