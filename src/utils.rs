use unicode_width::UnicodeWidthStr;

/// Runs `pass` until it reports that nothing changed.
pub(crate) fn saturate<F: FnMut() -> bool>(mut pass: F) {
    while pass() {}
}

/// Pads `text` with trailing spaces up to `width` terminal columns.
pub(crate) fn pad(text: &str, width: usize) -> String {
    let deficit = width.saturating_sub(UnicodeWidthStr::width(text));
    let mut out = String::with_capacity(text.len() + deficit);
    out.push_str(text);
    for _ in 0..deficit {
        out.push(' ');
    }
    out
}
