//! Export file naming.

/// Replace characters that are unsafe in file names.
///
/// Keeps ASCII alphanumerics, `-`, `_`, `.` and spaces; everything else
/// becomes `_`. An empty result falls back to `invoice`.
pub fn sanitize_filename(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        let ok = ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | ' ');
        out.push(if ok { ch } else { '_' });
    }
    let trimmed = out.trim();
    if trimmed.is_empty() {
        "invoice".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_safe_characters() {
        assert_eq!(sanitize_filename("INV-20260826 draft.v2"), "INV-20260826 draft.v2");
    }

    #[test]
    fn replaces_path_separators_and_punctuation() {
        assert_eq!(sanitize_filename("Q4/Invoice: final?"), "Q4_Invoice_ final_");
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(sanitize_filename(""), "invoice");
        assert_eq!(sanitize_filename("   "), "invoice");
    }
}
