/// Grouping key for exercise names: trimmed and lowercased.
pub fn normalize_exercise_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_exercise_name("  Bench Press "), "bench press");
        assert_eq!(normalize_exercise_name("   "), "");
    }

    #[test]
    fn capitalize_only_first_char() {
        assert_eq!(capitalize_first("bench press"), "Bench press");
        assert_eq!(capitalize_first("rDL"), "RDL");
        assert_eq!(capitalize_first("élévation"), "Élévation");
        assert_eq!(capitalize_first(""), "");
    }
}
