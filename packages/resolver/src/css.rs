//! CSS text helpers shared by the renderers.

use std::collections::BTreeMap;

/// `fontSize` → `font-size`; already-kebab names pass through
pub fn to_kebab_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for (i, c) in property.char_indices() {
        if c.is_ascii_uppercase() {
            if i > 0 || property.starts_with("Webkit") || property.starts_with("Moz") {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Replace `var(--name)` / `var(--name, fallback)` with brand values.
///
/// Unknown variables without a fallback are left as written.
pub fn substitute_variables(value: &str, variables: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("var(") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 4..];

        let Some(end) = matching_paren(after) else {
            out.push_str(&rest[start..]);
            return out;
        };

        let inner = &after[..end];
        let (name, fallback) = match inner.split_once(',') {
            Some((name, fallback)) => (name.trim(), Some(fallback.trim())),
            None => (inner.trim(), None),
        };

        match (variables.get(name), fallback) {
            (Some(resolved), _) => out.push_str(resolved),
            (None, Some(fallback)) => out.push_str(&substitute_variables(fallback, variables)),
            (None, None) => out.push_str(&rest[start..start + 4 + end + 1]),
        }

        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> BTreeMap<String, String> {
        BTreeMap::from([("--brand-primary-color".to_string(), "#ff6600".to_string())])
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(to_kebab_case("fontSize"), "font-size");
        assert_eq!(to_kebab_case("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(to_kebab_case("padding"), "padding");
        assert_eq!(to_kebab_case("line-height"), "line-height");
        assert_eq!(to_kebab_case("WebkitTextSizeAdjust"), "-webkit-text-size-adjust");
    }

    #[test]
    fn test_substitutes_known_variable() {
        assert_eq!(substitute_variables("var(--brand-primary-color)", &vars()), "#ff6600");
        assert_eq!(
            substitute_variables("1px solid var(--brand-primary-color)", &vars()),
            "1px solid #ff6600"
        );
    }

    #[test]
    fn test_fallback_and_unknown() {
        assert_eq!(substitute_variables("var(--missing, #000)", &vars()), "#000");
        assert_eq!(
            substitute_variables("var(--missing, var(--brand-primary-color))", &vars()),
            "#ff6600"
        );
        assert_eq!(substitute_variables("var(--missing)", &vars()), "var(--missing)");
        assert_eq!(substitute_variables("calc(100% - 10px)", &vars()), "calc(100% - 10px)");
    }
}
