//! Output rendering for scan reports.
//!
//! Supports `human` (default) and `json` outputs. The human form prints one
//! line per diagnostic followed by a summary block; the JSON form lists every
//! file that had markers or diagnostics plus the summary.

use crate::config::OutputMode;
use crate::models::{Diagnostic, ScanReport};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
/// Rendering switches shared by both output modes.
pub struct RenderOptions {
    pub list_ok: bool,
    pub relative: bool,
    pub color: bool,
}

/// Colors are used for human output on a terminal unless `NO_COLOR` is set.
pub fn use_colors(mode: OutputMode) -> bool {
    mode == OutputMode::Human
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal()
}

fn display_path(path: &Path, root: &Path, relative: bool) -> String {
    let shown: PathBuf = if relative {
        pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf())
    } else {
        path.to_path_buf()
    };
    shown.to_string_lossy().to_string()
}

fn diagnostic_line(d: &Diagnostic, file: &str, color: bool) -> String {
    let msg = d.message();
    let msg = if color { msg.red().to_string() } else { msg };
    let file = if color { file.bold().to_string() } else { file.to_string() };
    if d.has_position() {
        format!("{}: line {}, col {}: {}", file, d.line, d.column, msg)
    } else {
        format!("{}: {}", file, msg)
    }
}

/// Render the human report (pure) for testing/snapshot purposes.
pub fn render_human(report: &ScanReport, opts: &RenderOptions) -> String {
    let mut out = String::new();
    for f in &report.files {
        let file = display_path(&f.path, &report.root, opts.relative);
        if f.has_issues() {
            for d in &f.diagnostics {
                out.push_str(&diagnostic_line(d, &file, opts.color));
                out.push('\n');
            }
        } else if opts.list_ok && f.had_any_marker {
            if opts.color {
                out.push_str(&format!("{}: {}\n", file, "OK".green()));
            } else {
                out.push_str(&format!("{}: OK\n", file));
            }
        }
    }
    if !out.is_empty() {
        out.push('\n');
    }
    let s = &report.summary;
    out.push_str(&format!("Files scanned: {}\n", s.files_scanned));
    out.push_str(&format!("Files with markers: {}\n", s.files_with_markers));
    out.push_str(&format!("Files with issues: {}\n", s.files_with_issues));
    let verdict = if s.ok {
        "Result: All good."
    } else {
        "Result: Problems found."
    };
    if opts.color {
        let v = if s.ok {
            verdict.green().bold().to_string()
        } else {
            verdict.red().bold().to_string()
        };
        out.push_str(&v);
    } else {
        out.push_str(verdict);
    }
    out.push('\n');
    out
}

/// Compose the JSON report (pure) for testing/snapshot purposes.
pub fn compose_json(report: &ScanReport, opts: &RenderOptions) -> JsonVal {
    let files: Vec<_> = report
        .files
        .iter()
        .filter(|f| f.had_any_marker || f.has_issues())
        .map(|f| {
            let diags: Vec<_> = f
                .diagnostics
                .iter()
                .map(|d| {
                    // Serializing the kind keeps its tag and payload fields.
                    let mut v = serde_json::to_value(&d.kind).unwrap_or_else(|_| json!({}));
                    if let Some(obj) = v.as_object_mut() {
                        obj.insert("line".into(), json!(d.line));
                        obj.insert("column".into(), json!(d.column));
                        obj.insert("message".into(), json!(d.message()));
                    }
                    v
                })
                .collect();
            json!({
                "file": display_path(&f.path, &report.root, opts.relative),
                "had_any_marker": f.had_any_marker,
                "ok": !f.has_issues(),
                "diagnostics": diags,
            })
        })
        .collect();
    json!({
        "root": report.root.to_string_lossy(),
        "files": files,
        "summary": serde_json::to_value(&report.summary).unwrap_or(JsonVal::Null),
    })
}

/// Print the report in the requested mode to stdout.
pub fn print_report(report: &ScanReport, mode: OutputMode, opts: &RenderOptions) {
    match mode {
        OutputMode::Json => {
            let out = compose_json(report, opts);
            match serde_json::to_string_pretty(&out) {
                Ok(s) => println!("{}", s),
                Err(e) => tracing::error!(error = %e, "failed to serialize report"),
            }
        }
        OutputMode::Human => print!("{}", render_human(report, opts)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiagnosticKind, FileResult, ScanSummary};

    fn report() -> ScanReport {
        let root = PathBuf::from("/src");
        let bad = PathBuf::from("/src/lib/bad.hpp");
        let files = vec![
            FileResult {
                path: PathBuf::from("/src/a.hpp"),
                diagnostics: vec![],
                had_any_marker: true,
            },
            FileResult {
                path: bad.clone(),
                diagnostics: vec![
                    Diagnostic {
                        file: bad.clone(),
                        line: 4,
                        column: 9,
                        kind: DiagnosticKind::UnmatchedRestore,
                    },
                    Diagnostic {
                        file: bad.clone(),
                        line: 1,
                        column: 1,
                        kind: DiagnosticKind::UnmatchedPush {
                            payload: "IGNORE_DOCS".into(),
                        },
                    },
                ],
                had_any_marker: true,
            },
            FileResult {
                path: PathBuf::from("/src/locked.hpp"),
                diagnostics: vec![Diagnostic {
                    file: PathBuf::from("/src/locked.hpp"),
                    line: 0,
                    column: 0,
                    kind: DiagnosticKind::ReadFailure {
                        reason: "Permission denied".into(),
                    },
                }],
                had_any_marker: false,
            },
            FileResult {
                path: PathBuf::from("/src/plain.cpp"),
                diagnostics: vec![],
                had_any_marker: false,
            },
        ];
        let mut summary = ScanSummary::default();
        for f in &files {
            summary.record(f);
        }
        ScanReport {
            root,
            files,
            summary,
        }
    }

    #[test]
    fn test_render_human_lines_and_summary() {
        let out = render_human(&report(), &RenderOptions::default());
        let expected = "\
/src/lib/bad.hpp: line 4, col 9: RESTORE without matching push
/src/lib/bad.hpp: line 1, col 1: push 'IGNORE_DOCS' without matching RESTORE
/src/locked.hpp: could not read file: Permission denied

Files scanned: 4
Files with markers: 2
Files with issues: 2
Result: Problems found.
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_render_human_list_ok_and_relative() {
        let opts = RenderOptions {
            list_ok: true,
            relative: true,
            color: false,
        };
        let out = render_human(&report(), &opts);
        assert!(out.starts_with("a.hpp: OK\n"));
        assert!(out.contains("lib/bad.hpp: line 4, col 9"));
        assert!(!out.contains("plain.cpp"));
    }

    #[test]
    fn test_render_human_all_good() {
        let r = ScanReport {
            root: PathBuf::from("."),
            files: vec![],
            summary: ScanSummary::default(),
        };
        let out = render_human(&r, &RenderOptions::default());
        assert_eq!(
            out,
            "Files scanned: 0\nFiles with markers: 0\nFiles with issues: 0\nResult: All good.\n"
        );
    }

    #[test]
    fn test_compose_json_shape() {
        let out = compose_json(&report(), &RenderOptions::default());
        assert_eq!(out["summary"]["files_with_issues"], 2);
        assert_eq!(out["summary"]["ok"], false);
        // plain.cpp has neither markers nor diagnostics
        assert_eq!(out["files"].as_array().unwrap().len(), 3);
        let bad = &out["files"][1];
        assert_eq!(bad["ok"], false);
        assert_eq!(bad["diagnostics"][0]["kind"], "unmatched_restore");
        assert_eq!(bad["diagnostics"][0]["line"], 4);
        assert_eq!(bad["diagnostics"][1]["payload"], "IGNORE_DOCS");
        assert_eq!(out["files"][2]["diagnostics"][0]["kind"], "read_failure");
    }
}
