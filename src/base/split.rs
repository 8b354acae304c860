//! Splitting of comma-separated lists as written in C++ and in references.

/// Split on commas outside `<>`, `()` and `[]`. Items are trimmed and
/// empty items dropped.
pub fn split_top_level(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in text.chars() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                items.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    items.push(current);
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("int, double", vec!["int", "double"])]
    #[case("std::map<K, V>, f(a, b)", vec!["std::map<K, V>", "f(a, b)"])]
    #[case("int[2], char", vec!["int[2]", "char"])]
    #[case(" , ", vec![])]
    fn test_split_top_level(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_top_level(text), expected);
    }
}
