//! Trimming on a predicate

/// Strips leading and trailing characters matching `is_ws`
pub fn trim<P>(text: &str, is_ws: P) -> &str
where
    P: Fn(char) -> bool,
{
    text.trim_matches(|c: char| is_ws(c))
}

/// [`trim`] over a slice of any element type
pub fn trim_slice<T, P>(items: &[T], is_ws: P) -> &[T]
where
    P: Fn(&T) -> bool,
{
    let start = items.iter().position(|item| !is_ws(item));
    let Some(start) = start else {
        return &items[items.len()..];
    };
    let end = items.iter().rposition(|item| !is_ws(item)).map_or(start, |e| e + 1);
    &items[start..end]
}
