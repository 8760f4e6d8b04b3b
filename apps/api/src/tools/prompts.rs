//! Prompt builders for every tool.
//!
//! Each builder is pure and total: user text is embedded verbatim, empty
//! input simply produces an empty section. Nothing here validates input.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Directive appended to the resume + job description prompt.
pub const RESUME_TAILORING_DIRECTIVE: &str = "Provide suggestions on how to improve or tailor the resume \
    to better match the job description. Include keywords, skills, \
    and phrasing recommendations.";

pub const GRAMMAR_STYLE_DIRECTIVE: &str = "Check and fix grammar and style for this resume text:";

pub const MATCH_ANALYSIS_DIRECTIVE: &str =
    "Analyze if the resume matches the description and list matching skills and gaps.";

pub const COMMIT_ISSUE_DIRECTIVE: &str = "Generate a conventional commit message and a GitHub issue template \
    based on this task description:";

pub const COMMIT_ISSUE_CHECKLIST: &str = "Include:\n\
    - A commit message using conventional format\n\
    - A GitHub issue with title, description, and a checklist";

pub const REWRITE_CLOSING: &str = "Ensure it remains clear and engaging.";

pub const SCHEDULE_DIRECTIVE: &str =
    "Summarize the key tasks, remove duplication, and prioritize the items clearly.";

/// Target tone for the content rewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Formal,
    Friendly,
    Persuasive,
}

impl Tone {
    pub fn label(self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::Friendly => "Friendly",
            Tone::Persuasive => "Persuasive",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resume + job description: both inputs under labeled sections, then the tailoring directive.
pub fn build_resume_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "Given the following resume:\n{resume_text}\n\n\
         And the following job description:\n{job_description}\n\n\
         {RESUME_TAILORING_DIRECTIVE}"
    )
}

pub fn grammar_style_fix_prompt(resume_text: &str) -> String {
    format!("{GRAMMAR_STYLE_DIRECTIVE}\n\n{resume_text}")
}

pub fn company_resume_match_prompt(company_description: &str, resume_text: &str) -> String {
    format!(
        "Given this company or job description:\n{company_description}\n\n\
         And this resume:\n{resume_text}\n\n\
         {MATCH_ANALYSIS_DIRECTIVE}"
    )
}

pub fn generate_commit_and_issue_prompt(task_description: &str) -> String {
    format!("{COMMIT_ISSUE_DIRECTIVE}\n\n{task_description}\n\n{COMMIT_ISSUE_CHECKLIST}")
}

pub fn rewrite_content_prompt(content: &str, tone: Tone) -> String {
    format!("Rewrite the following content in a {tone} tone:\n\n{content}\n\n{REWRITE_CLOSING}")
}

pub fn summarize_schedule_prompt(schedule_text: &str) -> String {
    format!("Here is a schedule or task list:\n\n{schedule_text}\n\n{SCHEDULE_DIRECTIVE}")
}
