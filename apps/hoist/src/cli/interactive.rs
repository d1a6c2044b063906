//! Terminal implementation of the user interaction seam

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Select};
use hoist_services::{ConsolidationPreview, UserInteraction};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Prints notifications and previews to stderr and asks with dialoguer.
///
/// stdout is reserved for the final report.
pub struct TerminalInteraction {
    assume_yes: bool,
}

impl TerminalInteraction {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl UserInteraction for TerminalInteraction {
    fn info(&self, message: &str) {
        eprintln!("{} {}", style("info").blue().bold().for_stderr(), message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{} {}", style("warning").yellow().bold().for_stderr(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", style("error").red().bold().for_stderr(), message);
    }

    fn choose(&self, prompt: &str, options: &[String]) -> Option<usize> {
        if options.is_empty() {
            return None;
        }

        if self.assume_yes {
            debug!(prompt = %prompt, choice = %options[0], "Answered by --yes");
            eprintln!("{} {}", style(prompt).bold().for_stderr(), options[0]);
            return Some(0);
        }

        let term = Term::stderr();
        if !term.is_term() {
            // The orchestrator reports the cancellation itself
            debug!(prompt = %prompt, "Not a terminal, treating as cancel");
            return None;
        }

        match Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact_on_opt(&term)
        {
            Ok(choice) => choice,
            Err(e) => {
                warn!(error = %e, "Prompt failed, treating as cancel");
                None
            }
        }
    }

    fn show_preview(&self, preview: &ConsolidationPreview) {
        eprintln!("{}", render_preview(preview));
    }
}

/// Summary block followed by the new consolidated content. Lines the file
/// gains are marked with `+`.
pub fn render_preview(preview: &ConsolidationPreview) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} imports from {} files into {}\n",
        style(&preview.project_name).bold().for_stderr(),
        preview.moved_imports,
        preview.file_count(),
        preview.consolidated_path.display()
    ));

    for file in &preview.files {
        let shown = file
            .path
            .strip_prefix(&preview.project_dir)
            .unwrap_or(&file.path);
        out.push_str(&format!(
            "  {} ({} imports)\n",
            shown.display(),
            file.import_count
        ));
    }

    out.push('\n');
    let existing: HashSet<&str> = preview.existing_content.lines().collect();
    for line in preview.new_content.lines() {
        if line.is_empty() {
            out.push('\n');
        } else if existing.contains(line) {
            out.push_str(&format!("  {}\n", style(line).dim().for_stderr()));
        } else {
            out.push_str(&format!("{}\n", style(format!("+ {}", line)).green().for_stderr()));
        }
    }
    out
}
