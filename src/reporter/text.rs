//! Human-readable text reporter.

use super::Reporter;
use crate::models::{Finding, ScanResult, Severity};
use std::path::Path;

/// Ratio bar rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarStyle {
    #[default]
    Ascii,
    Unicode,
}

/// Icon set for severity section headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconSet {
    #[default]
    Ascii,
    Emoji,
}

/// Text format reporter for terminal output: findings grouped by severity,
/// each group headed by a ratio bar.
pub struct TextReporter {
    use_colors: bool,
    style: BarStyle,
    icons: IconSet,
    show_rule_ids: bool,
    bar_width: usize,
}

impl TextReporter {
    /// Create a new text reporter with default styling.
    pub fn new() -> Self {
        Self {
            use_colors: true,
            style: BarStyle::Ascii,
            icons: IconSet::Ascii,
            show_rule_ids: false,
            bar_width: 24,
        }
    }

    /// Disable colors.
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Set the bar style.
    pub fn with_style(mut self, style: BarStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the icon set.
    pub fn with_icons(mut self, icons: IconSet) -> Self {
        self.icons = icons;
        self
    }

    /// Show rule ids next to messages.
    pub fn with_rule_ids(mut self, show: bool) -> Self {
        self.show_rule_ids = show;
        self
    }

    /// Get severity color code.
    fn severity_color(&self, severity: Severity) -> &'static str {
        if !self.use_colors {
            return "";
        }
        match severity {
            Severity::Critical => "\x1b[31m", // Red
            Severity::Medium => "\x1b[33m",   // Yellow
            Severity::Low => "\x1b[36m",      // Cyan
        }
    }

    fn reset(&self) -> &'static str {
        if self.use_colors {
            "\x1b[0m"
        } else {
            ""
        }
    }

    fn bold(&self) -> &'static str {
        if self.use_colors {
            "\x1b[1m"
        } else {
            ""
        }
    }

    fn green(&self) -> &'static str {
        if self.use_colors {
            "\x1b[32m"
        } else {
            ""
        }
    }

    fn severity_icon(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Critical => "\u{26a0}\u{fe0f} ",
            Severity::Medium => "\u{1f50d} ",
            Severity::Low => "\u{24d8} ",
        }
    }

    fn section_title(severity: Severity) -> &'static str {
        match severity {
            Severity::Critical => "Critical (fix immediately)",
            Severity::Medium => "Medium Priority",
            Severity::Low => "Low Priority",
        }
    }

    /// Render a ratio bar: `|====....| 2/4 (50%)` or the Unicode block form.
    fn bar(&self, done: usize, total: usize) -> String {
        let ratio = if total == 0 {
            0.0
        } else {
            (done as f64 / total as f64).clamp(0.0, 1.0)
        };
        let filled = (self.bar_width as f64 * ratio).round() as usize;
        let empty = self.bar_width - filled;
        let pct = (ratio * 100.0).round() as usize;
        match self.style {
            BarStyle::Unicode => format!(
                "[{}{}] {}/{} ({}%)",
                "\u{2588}".repeat(filled),
                "\u{2591}".repeat(empty),
                done,
                total,
                pct
            ),
            BarStyle::Ascii => format!(
                "|{}{}| {}/{} ({}%)",
                "=".repeat(filled),
                ".".repeat(empty),
                done,
                total,
                pct
            ),
        }
    }

    fn location_label(finding: &Finding) -> String {
        match &finding.file {
            Some(file) => {
                let name = Path::new(file)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file.clone());
                format!("{}:{}-{}", name, finding.range.start.line, finding.range.end.line)
            }
            None => "offset".to_string(),
        }
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for TextReporter {
    fn generate(&self, result: &ScanResult) -> String {
        let total = result.findings.len();
        let mut lines = vec![
            format!("{}=== Risk Audit Report ==={}", self.bold(), self.reset()),
            format!("Overall: {}", self.bar(total, total)),
            String::new(),
        ];

        for severity in [Severity::Critical, Severity::Medium, Severity::Low] {
            let group = result.findings_by_severity(severity);
            let icon = match self.icons {
                IconSet::Emoji => self.severity_icon(severity),
                IconSet::Ascii => "",
            };
            lines.push(format!(
                "{}{}{}{}: {}",
                icon,
                self.severity_color(severity),
                Self::section_title(severity),
                self.reset(),
                self.bar(group.len(), total)
            ));
            for (idx, finding) in group.iter().enumerate() {
                let head = if self.show_rule_ids {
                    format!("{} {}", finding.rule_id, finding.message)
                } else {
                    finding.message.clone()
                };
                lines.push(format!(
                    "{}. {} - {}{}{}",
                    idx + 1,
                    head,
                    self.green(),
                    Self::location_label(finding),
                    self.reset()
                ));
                if let Some(ref fix) = finding.fix {
                    lines.push(format!("     fix: {}", fix));
                }
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}
