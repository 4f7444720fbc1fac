//! Shallow taint heuristic.
//!
//! Recognizes direct assignment-from-untrusted-source idioms and collects
//! the assigned variable names. This is not a points-to or dataflow
//! analysis: reassignment, aliasing and flow across expressions are out of
//! scope. The result only ever annotates findings, it never adds or
//! suppresses them.

use crate::models::Language;
use regex::Regex;
use std::collections::BTreeSet;

const PYTHON_SOURCES: &[&str] = &[
    r"(\w+)\s*=\s*request\.(?:args|get_json|form|values|data)\b",
    r"(\w+)\s*=\s*os\.environ\b",
];

const SCRIPT_SOURCES: &[&str] = &[
    r"const\s+([A-Za-z_$][\w$]*)\s*=\s*req\.(?:query|params|body)\b",
    r"let\s+([A-Za-z_$][\w$]*)\s*=\s*req\.(?:query|params|body)\b",
    r"var\s+([A-Za-z_$][\w$]*)\s*=\s*req\.(?:query|params|body)\b",
    r"([A-Za-z_$][\w$]*)\s*=\s*window\.location\b",
    r"([A-Za-z_$][\w$]*)\s*=\s*document\.location\b",
];

/// Collect names of variables assigned from untrusted sources.
///
/// Python buffers get the request/environ idiom set; everything else gets
/// the script-like set. The sorted set makes downstream annotation order
/// deterministic.
pub fn collect_tainted_variables(text: &str, language: Language) -> BTreeSet<String> {
    let sources = match language {
        Language::Python => PYTHON_SOURCES,
        _ => SCRIPT_SOURCES,
    };

    let mut tainted = BTreeSet::new();
    for source in sources {
        let re = Regex::new(source).expect("taint pattern must compile");
        for caps in re.captures_iter(text) {
            if let Some(name) = caps.get(1) {
                tainted.insert(name.as_str().to_string());
            }
        }
    }
    tainted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_request_assignments_in_python() {
        let text = "uid = request.args\nname = request.form\nsafe = compute()\n";
        let tainted = collect_tainted_variables(text, Language::Python);
        assert!(tainted.contains("uid"));
        assert!(tainted.contains("name"));
        assert!(!tainted.contains("safe"));
    }

    #[test]
    fn captures_environ_assignments_in_python() {
        let tainted = collect_tainted_variables("secret = os.environ\n", Language::Python);
        assert_eq!(tainted.len(), 1);
        assert!(tainted.contains("secret"));
    }

    #[test]
    fn captures_req_accessors_in_javascript() {
        let text = "const q = req.query;\nlet b = req.body;\nvar p = req.params;\n";
        let tainted = collect_tainted_variables(text, Language::JavaScript);
        assert_eq!(tainted.len(), 3);
        assert!(tainted.contains("q") && tainted.contains("b") && tainted.contains("p"));
    }

    #[test]
    fn captures_location_globals() {
        let text = "url = window.location;\nhref = document.location;\n";
        let tainted = collect_tainted_variables(text, Language::TypeScript);
        assert!(tainted.contains("url"));
        assert!(tainted.contains("href"));
    }

    #[test]
    fn duplicates_collapse() {
        let text = "const q = req.query;\nconst q = req.query;\n";
        let tainted = collect_tainted_variables(text, Language::JavaScript);
        assert_eq!(tainted.len(), 1);
    }

    #[test]
    fn unknown_language_uses_script_idioms() {
        let tainted = collect_tainted_variables("const x = req.body;", Language::Any);
        assert!(tainted.contains("x"));
    }

    #[test]
    fn iteration_is_sorted() {
        let text = "const z = req.query; const a = req.body;";
        let tainted = collect_tainted_variables(text, Language::JavaScript);
        let names: Vec<&str> = tainted.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "z"]);
    }
}
