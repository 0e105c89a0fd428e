//! Content-Disposition header construction (`attachment; filename=...`).

/// Builds an `attachment` Content-Disposition value for `file_name`.
///
/// Plain ASCII names produce exactly `attachment; filename="<name>"`, with `"`
/// and `\` backslash-escaped and control chars replaced by `_`. Names with
/// non-ASCII chars get an ASCII fallback in `filename` plus an RFC 5987
/// `filename*=UTF-8''<percent-encoded>` parameter, so the value is always a
/// valid header.
pub fn attachment_disposition(file_name: &str) -> String {
    let fallback = quoted_ascii(file_name);
    if file_name.is_ascii() {
        format!("attachment; filename=\"{}\"", fallback)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(file_name)
        )
    }
}

fn quoted_ascii(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii_control() || !c.is_ascii() => out.push('_'),
            c => out.push(c),
        }
    }
    out
}
