//! Package and qualified-name utilities.

/// Returns the simple name of a fully qualified type name.
///
/// Nested types separated by `$` keep only the innermost name.
///
/// # Example
///
/// ```ignore
/// assert_eq!(simple_name("jakarta.persistence.Entity"), "Entity");
/// assert_eq!(simple_name("a.Outer$Inner"), "Inner");
/// ```
#[must_use]
pub fn simple_name(full_name: &str) -> &str {
    let last = full_name.rsplit('.').next().unwrap_or(full_name);
    last.rsplit('$').next().unwrap_or(last)
}

/// Returns the package part of a fully qualified type name.
///
/// Returns an empty string for types in the default package.
#[must_use]
pub fn package_name(full_name: &str) -> &str {
    full_name.rsplit_once('.').map_or("", |(package, _)| package)
}

/// Checks if a package name matches a package pattern.
///
/// Supports wildcards:
/// - `..` matches any number of segments (including none)
/// - `*` matches exactly one segment
///
/// # Examples
///
/// ```ignore
/// assert!(package_matches("org.junit", "org.junit"));
/// assert!(package_matches("org.junit.runner", "org.junit.."));
/// assert!(package_matches("com.acme.service.impl", "..service.."));
/// assert!(!package_matches("org.junit.runner", "org.junit"));
/// ```
#[must_use]
pub fn package_matches(package: &str, pattern: &str) -> bool {
    let package_parts: Vec<&str> = package.split('.').filter(|s| !s.is_empty()).collect();
    let expanded = pattern.replace("..", ".**.");
    let pattern_parts: Vec<&str> = expanded.split('.').filter(|s| !s.is_empty()).collect();

    match_parts(&package_parts, &pattern_parts)
}

fn match_parts(package: &[&str], pattern: &[&str]) -> bool {
    let Some((&first_pattern, rest_pattern)) = pattern.split_first() else {
        return package.is_empty();
    };

    match first_pattern {
        "**" => (0..=package.len()).any(|i| match_parts(&package[i..], rest_pattern)),
        "*" => !package.is_empty() && match_parts(&package[1..], rest_pattern),
        literal => package
            .first()
            .is_some_and(|segment| *segment == literal && match_parts(&package[1..], rest_pattern)),
    }
}

/// Returns true for Java primitive type names and `void`.
///
/// Primitive types never produce dependency edges.
#[must_use]
pub fn is_primitive(type_name: &str) -> bool {
    matches!(
        type_name.trim_end_matches("[]"),
        "void" | "boolean" | "byte" | "char" | "short" | "int" | "long" | "float" | "double"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("jakarta.persistence.Entity"), "Entity");
        assert_eq!(simple_name("Entity"), "Entity");
        assert_eq!(simple_name("a.b.Outer$Inner"), "Inner");
    }

    #[test]
    fn test_package_name() {
        assert_eq!(package_name("java.util.Date"), "java.util");
        assert_eq!(package_name("Date"), "");
    }

    #[test]
    fn test_package_matches_literal() {
        assert!(package_matches("org.junit", "org.junit"));
        assert!(!package_matches("org.junit.runner", "org.junit"));
        assert!(!package_matches("org.junitx", "org.junit"));
    }

    #[test]
    fn test_package_matches_wildcard() {
        assert!(package_matches("com.acme.service", "com.*.service"));
        assert!(!package_matches("com.acme.core.service", "com.*.service"));
    }

    #[test]
    fn test_package_matches_double_dot() {
        assert!(package_matches("org.junit", "org.junit.."));
        assert!(package_matches("org.junit.runner.notification", "org.junit.."));
        assert!(package_matches("com.acme.service.impl", "..service.."));
        assert!(package_matches("service", "..service.."));
        assert!(!package_matches("com.acme.services", "..service.."));
    }

    #[test]
    fn test_is_primitive() {
        assert!(is_primitive("int"));
        assert!(is_primitive("void"));
        assert!(is_primitive("byte[]"));
        assert!(!is_primitive("java.lang.Integer"));
    }
}
