//! Report rendering and verdict for a completed observation pass.
//!
//! Rendering is a pure function over the three drained record vectors, which
//! keeps the output contract testable without a browser: fixed section
//! order, emission order within each section, headers printed even when a
//! section is empty.

use smoke_browser::{ConsoleEntry, FailedRequest, PageError};
use std::fmt::Write as _;
use std::process::ExitCode;

/// The three record sequences drained from one observation pass.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Console messages, in emission order
    pub console: Vec<ConsoleEntry>,
    /// Uncaught page errors, in emission order
    pub page_errors: Vec<PageError>,
    /// Failed network requests, in emission order
    pub failed_requests: Vec<FailedRequest>,
}

/// What the check concluded about the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing suspicious was recorded.
    Clean,
    /// At least one console warning/error, page error, or failed request.
    ProblemsFound,
}

impl Verdict {
    /// Maps the verdict to the process exit code: 0 clean, 1 problems.
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Verdict::Clean => ExitCode::SUCCESS,
            Verdict::ProblemsFound => ExitCode::from(1),
        }
    }
}

impl CheckReport {
    /// Renders the three labeled sections, in fixed order.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("\n--- CONSOLE MESSAGES ---\n");
        for entry in &self.console {
            let _ = writeln!(out, "[{}] {}", entry.level, entry.text);
        }

        out.push_str("\n--- PAGE ERRORS ---\n");
        for error in &self.page_errors {
            let _ = writeln!(out, "{}", error.text);
        }

        out.push_str("\n--- FAILED REQUESTS ---\n");
        for request in &self.failed_requests {
            let _ = writeln!(out, "{} => {}", request.url, request.reason);
        }

        out
    }

    /// Judges the page: console warnings/errors, page errors, and failed
    /// requests all count as problems.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        let noisy_console = self
            .console
            .iter()
            .any(|entry| entry.level.is_warning_or_error());

        if noisy_console || !self.page_errors.is_empty() || !self.failed_requests.is_empty() {
            Verdict::ProblemsFound
        } else {
            Verdict::Clean
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smoke_browser::ConsoleLevel;

    fn entry(level: ConsoleLevel, text: &str) -> ConsoleEntry {
        ConsoleEntry::new(level, text)
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let report = CheckReport::default();
        let rendered = report.render();

        let console = rendered.find("--- CONSOLE MESSAGES ---").unwrap();
        let errors = rendered.find("--- PAGE ERRORS ---").unwrap();
        let failed = rendered.find("--- FAILED REQUESTS ---").unwrap();

        assert!(console < errors);
        assert!(errors < failed);
    }

    #[test]
    fn empty_sections_still_print_headers() {
        let rendered = CheckReport::default().render();

        assert!(rendered.contains("--- CONSOLE MESSAGES ---"));
        assert!(rendered.contains("--- PAGE ERRORS ---"));
        assert!(rendered.contains("--- FAILED REQUESTS ---"));
    }

    #[test]
    fn entries_keep_emission_order_within_sections() {
        let report = CheckReport {
            console: vec![
                entry(ConsoleLevel::Log, "one"),
                entry(ConsoleLevel::Log, "two"),
                entry(ConsoleLevel::Log, "three"),
            ],
            ..Default::default()
        };

        let rendered = report.render();
        let one = rendered.find("[log] one").unwrap();
        let two = rendered.find("[log] two").unwrap();
        let three = rendered.find("[log] three").unwrap();

        assert!(one < two);
        assert!(two < three);
    }

    #[test]
    fn renders_warning_and_failed_request_page_exactly() {
        // One console warning, no page errors, one failed request.
        let report = CheckReport {
            console: vec![entry(ConsoleLevel::Warning, "deprecated API used")],
            page_errors: vec![],
            failed_requests: vec![FailedRequest {
                url: "http://x/y.png".into(),
                reason: "net::ERR_FAILED".into(),
            }],
        };

        let expected = "\n--- CONSOLE MESSAGES ---\n\
                        [warning] deprecated API used\n\
                        \n--- PAGE ERRORS ---\n\
                        \n--- FAILED REQUESTS ---\n\
                        http://x/y.png => net::ERR_FAILED\n";

        assert_eq!(report.render(), expected);
    }

    #[test]
    fn page_errors_render_as_bare_text() {
        let report = CheckReport {
            page_errors: vec![PageError::new("TypeError: x is not a function")],
            ..Default::default()
        };

        let rendered = report.render();
        assert!(rendered.contains("\nTypeError: x is not a function\n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let report = CheckReport {
            console: vec![entry(ConsoleLevel::Info, "ready")],
            page_errors: vec![PageError::new("boom")],
            failed_requests: vec![FailedRequest {
                url: "http://a".into(),
                reason: "net::ERR_TIMED_OUT".into(),
            }],
        };

        assert_eq!(report.render(), report.render());
    }

    #[test]
    fn clean_page_is_clean() {
        let report = CheckReport {
            console: vec![
                entry(ConsoleLevel::Log, "hello"),
                entry(ConsoleLevel::Info, "ready"),
                entry(ConsoleLevel::Debug, "detail"),
            ],
            ..Default::default()
        };

        assert_eq!(report.verdict(), Verdict::Clean);
    }

    #[test]
    fn console_warning_is_a_problem() {
        let report = CheckReport {
            console: vec![entry(ConsoleLevel::Warning, "deprecated API used")],
            ..Default::default()
        };

        assert_eq!(report.verdict(), Verdict::ProblemsFound);
    }

    #[test]
    fn page_error_is_a_problem() {
        let report = CheckReport {
            page_errors: vec![PageError::new("boom")],
            ..Default::default()
        };

        assert_eq!(report.verdict(), Verdict::ProblemsFound);
    }

    #[test]
    fn failed_request_is_a_problem() {
        let report = CheckReport {
            failed_requests: vec![FailedRequest {
                url: "http://x/y.png".into(),
                reason: "net::ERR_FAILED".into(),
            }],
            ..Default::default()
        };

        assert_eq!(report.verdict(), Verdict::ProblemsFound);
    }
}
