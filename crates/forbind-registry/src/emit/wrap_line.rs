/// Indentation added to continuation lines.
const CONTINUATION_INDENT: &str = "   ";

/// Break a Fortran statement into lines of at most `width` columns.
///
/// Each output line starts with `prefix` (continuations with three more
/// spaces) and ends with a newline. Breaks happen after the last `, `
/// separator that fits, with a trailing ` &`. A segment with no usable
/// separator is emitted over-long rather than split mid-token.
pub fn wrap_line(line: &str, prefix: &str, width: usize) -> String {
    let mut out = String::new();
    let mut indent = prefix.to_string();
    let mut rest = line;

    while indent.len() + rest.len() > width {
        // Room for the text before the break, its comma, and " &".
        let budget = width.saturating_sub(indent.len() + 3);
        let split = rest
            .match_indices(", ")
            .map(|(pos, _)| pos)
            .take_while(|&pos| pos <= budget)
            .last();
        let Some(pos) = split else {
            break;
        };
        out.push_str(&indent);
        out.push_str(&rest[..=pos]);
        out.push_str(" &\n");
        rest = &rest[pos + 2..];
        indent = format!("{prefix}{CONTINUATION_INDENT}");
    }

    out.push_str(&indent);
    out.push_str(rest);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lines_are_untouched() {
        assert_eq!(wrap_line("call f(arg0)", "      ", 132), "      call f(arg0)\n");
    }

    #[test]
    fn long_lines_break_after_commas() {
        let wrapped = wrap_line("call f(arg0, arg1, arg2, arg3)", "  ", 20);
        assert_eq!(wrapped, "  call f(arg0, &\n     arg1, arg2, &\n     arg3)\n");
        for line in wrapped.lines() {
            assert!(line.len() <= 20, "{line:?}");
        }
    }

    #[test]
    fn unbreakable_segment_is_kept_whole() {
        let wrapped = wrap_line("averyveryverylongname(x)", "", 10);
        assert_eq!(wrapped, "averyveryverylongname(x)\n");
    }
}
