//! Line post-processing applied after comment removal.
//!
//! Both policies right-trim every line and terminate a non-empty result
//! with exactly one `\n`. They differ in what happens to blank lines.

/// Script policy: a blank line survives only directly after a non-blank
/// one, so runs collapse to a single separator and leading blanks vanish.
/// Trailing blanks are removed.
pub fn collapse_blank_runs(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        let line = line.trim_end();
        let after_content = kept.last().is_some_and(|prev| !prev.is_empty());
        if !line.is_empty() || after_content {
            kept.push(line);
        }
    }
    while kept.last().is_some_and(|l| l.is_empty()) {
        kept.pop();
    }
    join_lines(&kept)
}

/// Style-sheet policy: every blank line is dropped.
pub fn drop_blank_lines(text: &str) -> String {
    let kept: Vec<&str> = text
        .split('\n')
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect();
    join_lines(&kept)
}

fn join_lines(lines: &[&str]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_runs_collapse_to_one_blank() {
        assert_eq!(collapse_blank_runs("a\n \n\n\t\nb\n"), "a\n\nb\n");
    }

    #[test]
    fn script_single_separator_kept() {
        assert_eq!(collapse_blank_runs("a\n\nb"), "a\n\nb\n");
    }

    #[test]
    fn script_leading_blanks_dropped() {
        assert_eq!(collapse_blank_runs("\n\n   \nstart\n"), "start\n");
    }

    #[test]
    fn script_trailing_blanks_removed() {
        assert_eq!(collapse_blank_runs("end;   \n\n\n  \n"), "end;\n");
    }

    #[test]
    fn script_keeps_indentation() {
        assert_eq!(collapse_blank_runs("  if (x) {\n    y();  \n  }"), "  if (x) {\n    y();\n  }\n");
    }

    #[test]
    fn stylesheet_drops_all_blanks() {
        assert_eq!(drop_blank_lines("a {}\n\n\n  \nb {}\n\n"), "a {}\nb {}\n");
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(collapse_blank_runs("\n \n"), "");
        assert_eq!(drop_blank_lines(""), "");
    }
}
