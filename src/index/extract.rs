//! Static dependency specifier extraction.
//!
//! Extraction is purely textual: only string-literal specifiers are found.
//! Computed or conditional module references (template strings, variables,
//! concatenation) cannot be seen by static analysis and are silently
//! skipped. This is a documented limitation of the system, not a bug.

use once_cell::sync::Lazy;
use regex::Regex;

static REQUIRE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\brequire\s*\(\s*(?:'([^']+)'|"([^"]+)")\s*\)"#).unwrap()
});

static IMPORT_FROM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*(?:import|export)\b[^'"\n]*\bfrom\s*(?:'([^']+)'|"([^"]+)")"#).unwrap()
});

// Side-effect form: `import './setup.js';`
static IMPORT_BARE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*import\s*(?:'([^']+)'|"([^"]+)")"#).unwrap()
});

/// Extract every string-literal module specifier in `source`, in textual
/// order of occurrence. Recognizes `require("...")` calls and ES
/// `import`/`export ... from "..."` statements.
pub fn extract_specifiers(source: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();

    for pattern in [&REQUIRE_PATTERN, &IMPORT_FROM_PATTERN, &IMPORT_BARE_PATTERN] {
        for cap in pattern.captures_iter(source) {
            let start = cap.get(0).map(|m| m.start()).unwrap_or(0);
            if let Some(specifier) = cap.get(1).or_else(|| cap.get(2)) {
                found.push((start, specifier.as_str().to_string()));
            }
        }
    }

    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, specifier)| specifier).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_single_and_double_quotes() {
        let source = "const a = require('./a.js');\nconst b = require(\"./b.js\");\n";
        assert_eq!(extract_specifiers(source), vec!["./a.js", "./b.js"]);
    }

    #[test]
    fn test_require_with_whitespace() {
        let source = "require ( './spaced.js' );";
        assert_eq!(extract_specifiers(source), vec!["./spaced.js"]);
    }

    #[test]
    fn test_import_from_forms() {
        let source = "import x from './x.js';\nimport { y } from \"./y.js\";\nexport * from './z.js';\n";
        assert_eq!(extract_specifiers(source), vec!["./x.js", "./y.js", "./z.js"]);
    }

    #[test]
    fn test_side_effect_import() {
        let source = "import './setup.js';\n";
        assert_eq!(extract_specifiers(source), vec!["./setup.js"]);
    }

    #[test]
    fn test_textual_order_across_forms() {
        let source = "import a from './first.js';\nconst b = require('./second.js');\nexport { c } from './third.js';\n";
        assert_eq!(
            extract_specifiers(source),
            vec!["./first.js", "./second.js", "./third.js"]
        );
    }

    #[test]
    fn test_computed_specifiers_are_skipped() {
        let source = "require(`./computed-${name}.js`);\nrequire(base + '/x.js');\nrequire(pick ? './a.js' : name);\n";
        // The ternary still contains one literal; the template and the
        // concatenation contain none.
        assert_eq!(extract_specifiers(source), Vec::<String>::new());
    }

    #[test]
    fn test_no_specifiers() {
        assert!(extract_specifiers("console.log('hello');").is_empty());
    }

    #[test]
    fn test_duplicate_specifiers_kept_in_order() {
        let source = "require('./a.js');\nrequire('./a.js');\n";
        assert_eq!(extract_specifiers(source), vec!["./a.js", "./a.js"]);
    }
}
