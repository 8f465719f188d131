/// Removes the indentation of every line.
///
/// Each line is trimmed on both sides, leading blank space of the whole text
/// is dropped, and a single trailing `\n` or `\r` is removed. Lets multi-line
/// constants be written indented in source and still come out flush-left.
#[must_use]
pub fn strip_indents(value: &str) -> String {
    let joined = value.split('\n').map(str::trim).collect::<Vec<_>>().join("\n");
    let mut out = joined.trim_start().to_string();
    if out.ends_with('\n') || out.ends_with('\r') {
        out.pop();
    }
    out
}
