/// Decodes the content of a quoted string including its delimiters.
///
/// Back-quoted strings are raw. In the other two styles `escape` introduces
/// `n t r b f 0` and `uXXXX` sequences; any other escaped unit stands for
/// itself.
pub fn unquote(quoted: &str, escape: char) -> Result<String, String> {
    let mut chars = quoted.chars();
    let open = chars.next().ok_or("empty quoted string")?;
    let close = chars.next_back().ok_or("unterminated quoted string")?;
    if open != close {
        return Err(format!("mismatched quotes {open:?} and {close:?}"));
    }
    let body = chars.as_str();
    if open == '`' {
        return Ok(body.to_string());
    }
    unescape(body, escape)
}

/// Resolves escape sequences in `text`.
pub fn unescape(text: &str, escape: char) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != escape {
            out.push(ch);
            continue;
        }
        let Some(next) = chars.next() else {
            return Err("dangling escape".to_string());
        };
        match next {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            '0' => out.push('\0'),
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .ok_or_else(|| format!("invalid unicode escape `u{hex}`"))?;
                let decoded = char::from_u32(code)
                    .ok_or_else(|| format!("invalid code point U+{code:04X}"))?;
                out.push(decoded);
            }
            other => out.push(other),
        }
    }
    Ok(out)
}
