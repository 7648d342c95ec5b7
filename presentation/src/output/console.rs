//! Console output formatter for diagnosis sessions

use colored::Colorize;
use medassist_domain::{Condition, ConfigIssue, DiagnosisResult, Question, Severity};

/// Formats questions, results and listings for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a question with its running confidence
    pub fn format_question(number: usize, question: &Question, confidence: f64) -> String {
        format!(
            "{} {}\n{}",
            format!("Q{}.", number).cyan().bold(),
            question.prompt(),
            format!(
                "   [yes / no / maybe / unsure]  leading confidence {:.0}%",
                confidence * 100.0
            )
            .dimmed()
        )
    }

    /// Format the complete diagnosis result
    pub fn format_result(result: &DiagnosisResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Diagnosis Result"));
        output.push('\n');

        let verdict = format!(
            "{} ({:.0}% confidence)",
            result.condition_name,
            result.confidence * 100.0
        );
        output.push_str(&format!(
            "\n{} {}\n",
            "Most likely:".cyan().bold(),
            if result.low_confidence {
                verdict.yellow().bold()
            } else {
                verdict.green().bold()
            }
        ));
        output.push_str(&format!(
            "{}\n",
            format!(
                "Stopped after {} questions: {}",
                result.questions_asked, result.reason
            )
            .dimmed()
        ));

        if result.ranking.len() > 1 {
            output.push_str(&Self::section_header("Other possibilities"));
            for ranked in result.ranking.iter().skip(1) {
                output.push_str(&format!(
                    "  * {} ({:.0}%)\n",
                    ranked.name,
                    ranked.confidence * 100.0
                ));
            }
        }

        let bundle = &result.recommendations;
        if !bundle.description.is_empty() {
            output.push_str(&format!("\n{}\n", bundle.description));
        }
        Self::push_list(&mut output, "Medicines", &bundle.medicines);
        Self::push_list(&mut output, "Exercises", &bundle.exercises);
        Self::push_list(&mut output, "Diet", &bundle.diet);
        if !bundle.doctor_specialization.is_empty() {
            output.push_str(&format!(
                "\n{} {}\n",
                "See a:".cyan().bold(),
                bundle.doctor_specialization
            ));
        }

        output.push_str(&format!("\n{}\n", bundle.disclaimer.yellow()));
        output.push_str(&Self::footer());

        output
    }

    /// Format the condition catalog as a table
    pub fn format_conditions(conditions: &[Condition]) -> String {
        let width = conditions
            .iter()
            .map(|c| c.name().len())
            .max()
            .unwrap_or(0);

        let mut output = format!(
            "{}\n",
            format!("{} conditions", conditions.len()).cyan().bold()
        );
        for condition in conditions {
            output.push_str(&format!(
                "  {:<width$}  {}\n",
                condition.name().bold(),
                condition.symptoms().join(", ").dimmed(),
                width = width
            ));
        }
        output
    }

    /// Format configuration issues, errors in red and warnings in yellow
    pub fn format_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| match issue.severity {
                Severity::Error => format!("{} {}", "error:".red().bold(), issue.message),
                Severity::Warning => format!("{} {}", "warning:".yellow().bold(), issue.message),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn push_list(output: &mut String, title: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        output.push_str(&Self::section_header(title));
        for item in items {
            output.push_str(&format!("  * {}\n", item));
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medassist_domain::{
        ConfigIssueCode, DiagnosisEngine, KnowledgeBase, ScoringPolicy, SessionId,
        builtin_conditions,
    };
    use std::sync::Arc;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_question_shows_prompt_and_confidence() {
        plain();
        let text = ConsoleFormatter::format_question(3, &Question::about("fever"), 0.425);
        assert!(text.starts_with("Q3. Are you experiencing fever?"));
        assert!(text.contains("42%") || text.contains("43%"));
    }

    #[test]
    fn test_format_result_lists_bundle_and_disclaimer() {
        plain();
        let knowledge = Arc::new(KnowledgeBase::new(builtin_conditions()).unwrap());
        let engine = DiagnosisEngine::new(knowledge, ScoringPolicy::default()).unwrap();
        let (mut session, mut step) = engine.start(SessionId::new("s"));
        while !step.is_complete() {
            step = engine
                .answer(&mut session, "yes".parse().unwrap())
                .unwrap();
        }
        let result = step.result().unwrap();

        let text = ConsoleFormatter::format_result(result);
        assert!(text.contains("Most likely:"));
        assert!(text.contains(&result.condition_name));
        assert!(text.contains(&result.recommendations.disclaimer));
    }

    #[test]
    fn test_format_conditions_and_issues() {
        plain();
        let conditions = builtin_conditions();
        let table = ConsoleFormatter::format_conditions(&conditions);
        assert!(table.starts_with("12 conditions"));
        assert!(table.contains("Common Cold"));

        let issues = vec![ConfigIssue::warning(
            ConfigIssueCode::ThresholdBelowFloor,
            "threshold below floor",
        )];
        assert_eq!(
            ConsoleFormatter::format_issues(&issues),
            "warning: threshold below floor"
        );
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
