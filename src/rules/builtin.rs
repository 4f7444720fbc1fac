//! Built-in vulnerability signatures.
//!
//! Identifiers are namespaced by category prefix (one prefix per injection
//! class) and stay stable across releases: external tools key off them.

use crate::models::{compile_pattern, Language, Rule, Severity};

fn rule(
    id: &str,
    title: &str,
    severity: Severity,
    language: Language,
    description: &str,
    pattern: &str,
    fix: Option<&str>,
) -> Rule {
    Rule {
        id: id.to_string(),
        title: title.to_string(),
        severity,
        language,
        description: Some(description.to_string()),
        pattern: compile_pattern(pattern).expect("built-in pattern must compile"),
        fix: fix.map(str::to_string),
    }
}

/// The fixed built-in rule set, in registry iteration order.
pub fn builtin_rules() -> Vec<Rule> {
    vec![
        rule(
            "VBC001",
            "Avoid innerHTML with untrusted input",
            Severity::Medium,
            Language::JavaScript,
            "Setting innerHTML directly can allow XSS. Prefer textContent or sanitize input before assignment.",
            // Assignments to innerHTML/outerHTML that are not simple string literals
            r#"\b(?:innerHTML|outerHTML)\s*=\s*[^\s'"].*"#,
            Some("Use textContent or sanitize the HTML (e.g., DOMPurify) before assigning."),
        ),
        rule(
            "VBC250",
            "child_process.exec with concatenated command",
            Severity::Critical,
            Language::TypeScript,
            "Avoid string-concatenated shell commands; prefer execFile/spawn with args array.",
            r"\b(?:child_process\.)?exec\s*\(\s*[^)]*\+[^)]*\)",
            None,
        ),
        rule(
            "VBC260",
            "fs.* called with variable path",
            Severity::Medium,
            Language::TypeScript,
            "Potential path traversal when using non-literal paths; validate and normalize.",
            r#"\bfs\.(?:readFile|readFileSync|writeFile|createReadStream|unlink|existsSync|mkdir|rmdir)\s*\(\s*[^\s'"]"#,
            None,
        ),
        rule(
            "VBC450",
            "Mongo query with variable object",
            Severity::Medium,
            Language::TypeScript,
            "Potential NoSQL injection when passing non-literal objects to query methods.",
            r#"\.(?:find|findOne|updateOne|updateMany|deleteMany|aggregate)\s*\(\s*[^\s{\['"]"#,
            None,
        ),
        rule(
            "VBC100",
            "String concatenated SQL query",
            Severity::Critical,
            Language::TypeScript,
            "Use parameterized queries to avoid SQL injection.",
            // .query( ... + ... ) with concatenation inside the call
            r"\.query\s*\(\s*[^)]*\+[^)]*\)",
            Some("Use placeholders and parameter arrays/objects in your DB client."),
        ),
        rule(
            "VBC200",
            "Command execution with variable input",
            Severity::Critical,
            Language::Python,
            "Avoid shelling out with user-controlled strings; prefer exec with arg arrays or safe APIs.",
            // os.system("..." + var) or a variable passed directly
            r#"\bos\.system\s*\(\s*[^)]*(?:\+|[^'")]\w)"#,
            Some("Use subprocess with args list and avoid shell=True; validate/escape inputs."),
        ),
        rule(
            "VBC201",
            "subprocess with shell=True",
            Severity::Critical,
            Language::Python,
            "shell=True can enable command injection when arguments include user input.",
            r"\bsubprocess\.(?:run|Popen|call|check_output)\s*\([^)]*shell\s*=\s*True",
            Some("Avoid shell=True; pass an argument list and validate inputs."),
        ),
        rule(
            "VBC002",
            "dangerouslySetInnerHTML usage",
            Severity::Medium,
            Language::JavaScript,
            "dangerouslySetInnerHTML can expose XSS if content is not sanitized.",
            r"dangerouslySetInnerHTML\s*=\s*\{\s*\{\s*__html\s*:",
            Some("Sanitize HTML before use or avoid dangerouslySetInnerHTML if possible."),
        ),
        rule(
            "VBC150",
            "fetch/axios with variable URL",
            Severity::Medium,
            Language::TypeScript,
            "Potential SSRF if URL is user-controlled. Validate and restrict destinations.",
            r#"\b(?:fetch|axios\.(?:get|post|put|delete|request))\s*\(\s*[^\s'"]"#,
            Some("Validate and whitelist outbound hosts; avoid passing raw user input as URLs."),
        ),
        rule(
            "VBC300",
            "open() with variable path",
            Severity::Low,
            Language::Python,
            "Potential path traversal when opening user-controlled paths.",
            r#"\bopen\s*\(\s*[^\s'"]"#,
            Some("Resolve to a known base directory and validate allowed filenames."),
        ),
        rule(
            "VBP110",
            "cursor.execute with f-string/format/%",
            Severity::Critical,
            Language::Python,
            "Use parameterized queries instead of string formatting to avoid SQL injection.",
            r#"\.execute\s*\(\s*(?:f['"][^'"]*\{[^}]+\}[^'"]*['"]|['"][^'"]*\{[^}]+\}[^'"]*['"]\s*\.\s*format\s*\(|['"][^'"]+['"]\s*%)"#,
            Some("Use placeholders and DB-API parameter binding (e.g., cursor.execute(sql, params))."),
        ),
        rule(
            "VBP310",
            "render_template_string with variable input",
            Severity::Low,
            Language::Python,
            "Rendering template strings with variables can enable XSS if content is unescaped.",
            r#"\brender_template_string\s*\(\s*[^\s'"]"#,
            Some("Prefer render_template with templates that autoescape; sanitize user content."),
        ),
    ]
}
