//! Unified diff output for the CLI.
//!
//! A simplified generator: the changed region is found by trimming the
//! common line prefix and suffix and emitted as a single hunk. Rewrites
//! from both passes are local, so this stays readable without full
//! LCS-based hunk computation.

/// Generate a unified diff between the original and rewritten text.
///
/// Returns an empty string when the texts are identical.
pub fn unified_diff(original: &str, rewritten: &str, path: &str) -> String {
    if original == rewritten {
        return String::new();
    }

    let old_lines: Vec<&str> = original.lines().collect();
    let new_lines: Vec<&str> = rewritten.lines().collect();

    let common_prefix = old_lines
        .iter()
        .zip(new_lines.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let max_suffix = old_lines.len().min(new_lines.len()) - common_prefix;
    let common_suffix = old_lines
        .iter()
        .rev()
        .zip(new_lines.iter().rev())
        .take_while(|(a, b)| a == b)
        .take(max_suffix)
        .count();

    let old_changed = &old_lines[common_prefix..old_lines.len() - common_suffix];
    let new_changed = &new_lines[common_prefix..new_lines.len() - common_suffix];

    let mut diff = String::new();
    diff.push_str(&format!("--- a/{}\n", path));
    diff.push_str(&format!("+++ b/{}\n", path));
    diff.push_str(&format!(
        "@@ -{},{} +{},{} @@\n",
        common_prefix + 1,
        old_changed.len(),
        common_prefix + 1,
        new_changed.len()
    ));
    for line in old_changed {
        diff.push_str(&format!("-{}\n", line));
    }
    for line in new_changed {
        diff.push_str(&format!("+{}\n", line));
    }
    diff
}

// ============================================================================
// Tests
// ============================================================================
