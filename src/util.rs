//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Case-fold and trim, used wherever two free-text strings are compared
/// (quiz grading, keyword triggers).
pub fn normalize_answer(s: &str) -> String {
  s.trim().to_lowercase()
}

/// Strip leading bullet or numbering markers from a practice-step line:
/// "- foo", "* foo", "1. foo", "2) foo" all become "foo".
pub fn strip_list_marker(line: &str) -> &str {
  let s = line.trim();
  if let Some(rest) = s
    .strip_prefix('-')
    .or_else(|| s.strip_prefix('*'))
    .or_else(|| s.strip_prefix('•'))
  {
    return rest.trim_start();
  }
  // Numbering only counts as a marker when the digits end in '.' or ')',
  // so a line like "2x is the slope" stays intact.
  let digits = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(0);
  if digits > 0 {
    if let Some(rest) = s[digits..].strip_prefix('.').or_else(|| s[digits..].strip_prefix(')')) {
      return rest.trim_start();
    }
  }
  s
}

/// Byte offset of the first case-insensitive occurrence of an ASCII needle.
/// The match starts on an ASCII byte, so the offset is always a valid char
/// boundary for slicing.
pub fn find_ci(hay: &str, needle: &str) -> Option<usize> {
  let h = hay.as_bytes();
  let n = needle.as_bytes();
  if n.is_empty() || h.len() < n.len() {
    return None;
  }
  (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while end > 0 && !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_all_occurrences() {
    let out = fill_template("{a} and {a} plus {b}", &[("a", "x"), ("b", "y")]);
    assert_eq!(out, "x and x plus y");
  }

  #[test]
  fn strip_list_marker_handles_common_shapes() {
    assert_eq!(strip_list_marker("- do this"), "do this");
    assert_eq!(strip_list_marker("* do this"), "do this");
    assert_eq!(strip_list_marker("• do this"), "do this");
    assert_eq!(strip_list_marker("-do this"), "do this");
    assert_eq!(strip_list_marker("1. do this"), "do this");
    assert_eq!(strip_list_marker("12) do this"), "do this");
    assert_eq!(strip_list_marker("plain line"), "plain line");
    assert_eq!(strip_list_marker("2x is the slope"), "2x is the slope");
  }

  #[test]
  fn trunc_for_log_respects_char_boundaries() {
    assert_eq!(trunc_for_log("short", 10), "short");
    let long = "x² marks the spot and keeps going";
    let out = trunc_for_log(long, 2); // byte 2 lands inside '²'
    assert!(out.starts_with("x…"));
    assert!(out.ends_with("bytes total)"));
  }

  #[test]
  fn normalize_answer_folds_case_and_whitespace() {
    assert_eq!(normalize_answer("  2X "), "2x");
  }

  #[test]
  fn find_ci_is_case_insensitive_and_byte_accurate() {
    assert_eq!(find_ci("foo EXPLANATION bar", "explanation"), Some(4));
    assert_eq!(find_ci("nothing here", "explanation"), None);
    // Multibyte text before the match must not break slicing.
    let s = "x² — Practice:";
    let idx = find_ci(s, "practice").expect("found");
    assert_eq!(&s[idx..idx + 8], "Practice");
  }
}
