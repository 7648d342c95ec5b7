//! REPL for answering diagnosis questions in the terminal

use crate::ConsoleFormatter;
use medassist_application::{DiagnosisProgress, RunDiagnosisUseCase};
use medassist_domain::{DiagnosisStep, SessionId};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// Interactive diagnosis REPL
pub struct DiagnosisRepl {
    use_case: RunDiagnosisUseCase,
}

/// What the loop should do after a line of input
enum Flow {
    Continue,
    Restart,
    Quit,
}

/// Expand single-letter answers to the words the engine accepts.
///
/// Anything else passes through unchanged so the engine can reject it.
pub fn parse_shorthand(input: &str) -> &str {
    match input.trim().to_lowercase().as_str() {
        "y" => "yes",
        "n" => "no",
        "m" => "maybe",
        "u" | "?" => "unsure",
        _ => input.trim(),
    }
}

impl DiagnosisRepl {
    pub fn new(use_case: RunDiagnosisUseCase) -> Self {
        Self { use_case }
    }

    /// Run until the patient quits or input ends
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;
        self.print_welcome();

        'sessions: loop {
            let mut progress = self.use_case.start().await;
            let mut number = 1;
            if self.show(&progress, number) {
                if self.ask_again(&mut rl)? {
                    continue 'sessions;
                }
                break;
            }

            loop {
                let readline = rl.readline(">>> ");
                match readline {
                    Ok(line) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }

                        if line.starts_with('/') {
                            match self.handle_command(line) {
                                Flow::Continue => continue,
                                Flow::Restart => continue 'sessions,
                                Flow::Quit => break 'sessions,
                            }
                        }

                        match self.answer(&progress.session_id, line).await {
                            Some(next) => {
                                progress = next;
                                number += 1;
                                if self.show(&progress, number) {
                                    if self.ask_again(&mut rl)? {
                                        continue 'sessions;
                                    }
                                    break 'sessions;
                                }
                            }
                            None => continue,
                        }
                    }
                    Err(ReadlineError::Interrupted) => {
                        println!("^C");
                        continue;
                    }
                    Err(ReadlineError::Eof) => {
                        println!("Bye!");
                        break 'sessions;
                    }
                    Err(err) => {
                        eprintln!("Error: {:?}", err);
                        break 'sessions;
                    }
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        let knowledge = self.use_case.engine().knowledge();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        medassist - Guided Diagnosis         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "{} conditions, {} symptoms known.",
            knowledge.len(),
            knowledge.symptoms().len()
        );
        println!("Answer with yes, no, maybe or unsure (y/n/m/u).");
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /restart  - Start over");
        println!("  /quit     - Exit");
        println!();
    }

    fn handle_command(&self, cmd: &str) -> Flow {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                Flow::Quit
            }
            "/restart" | "/r" => {
                println!("Starting a new session.");
                println!();
                Flow::Restart
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Answers: yes (y), no (n), maybe (m), unsure (u)");
                println!("Commands:");
                println!("  /help, /h, /?     - Show this help");
                println!("  /restart, /r      - Start over");
                println!("  /quit, /exit, /q  - Exit");
                println!();
                Flow::Continue
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                Flow::Continue
            }
        }
    }

    async fn answer(&self, session_id: &SessionId, line: &str) -> Option<DiagnosisProgress> {
        match self.use_case.answer(session_id, parse_shorthand(line)).await {
            Ok(progress) => Some(progress),
            Err(e) => {
                eprintln!("{}", e);
                None
            }
        }
    }

    /// Print the step as question `number`. Returns true once the session
    /// is complete.
    fn show(&self, progress: &DiagnosisProgress, number: usize) -> bool {
        println!();
        match &progress.step {
            DiagnosisStep::Continue {
                question,
                confidence,
                ..
            } => {
                println!(
                    "{}",
                    ConsoleFormatter::format_question(number, question, *confidence)
                );
                false
            }
            DiagnosisStep::Complete(result) => {
                println!("{}", ConsoleFormatter::format_result(result));
                true
            }
        }
    }

    fn ask_again(&self, rl: &mut DefaultEditor) -> RlResult<bool> {
        match rl.readline("Start another diagnosis? [y/N] ") {
            Ok(line) => Ok(parse_shorthand(&line).eq_ignore_ascii_case("yes")),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand_expands_single_letters() {
        assert_eq!(parse_shorthand("y"), "yes");
        assert_eq!(parse_shorthand(" N "), "no");
        assert_eq!(parse_shorthand("m"), "maybe");
        assert_eq!(parse_shorthand("u"), "unsure");
        assert_eq!(parse_shorthand("?"), "unsure");
    }

    #[test]
    fn test_shorthand_passes_other_input_through() {
        assert_eq!(parse_shorthand(" Yes "), "Yes");
        assert_eq!(parse_shorthand("perhaps"), "perhaps");
    }
}
