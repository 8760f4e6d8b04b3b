// Productivity tools: one request type per tool, rendered through the prompt builders.
// Every tool shares the same validate → render → complete path in `handlers`.

pub mod handlers;
pub mod prompts;

use serde::Deserialize;

use crate::errors::AppError;
use crate::tools::prompts::{
    build_resume_prompt, company_resume_match_prompt, generate_commit_and_issue_prompt,
    grammar_style_fix_prompt, rewrite_content_prompt, summarize_schedule_prompt, Tone,
};

/// A request for one tool. Tagged by `tool` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum PromptRequest {
    ResumeSuggestions {
        resume_text: String,
        job_description: String,
    },
    GrammarStyleFix {
        resume_text: String,
    },
    CompanyMatch {
        company_description: String,
        resume_text: String,
    },
    CommitAndIssue {
        task_description: String,
    },
    RewriteContent {
        content: String,
        tone: Tone,
    },
    ScheduleSummary {
        schedule_text: String,
    },
}

impl PromptRequest {
    pub fn tool(&self) -> &'static str {
        match self {
            PromptRequest::ResumeSuggestions { .. } => "resume_suggestions",
            PromptRequest::GrammarStyleFix { .. } => "grammar_style_fix",
            PromptRequest::CompanyMatch { .. } => "company_match",
            PromptRequest::CommitAndIssue { .. } => "commit_and_issue",
            PromptRequest::RewriteContent { .. } => "rewrite_content",
            PromptRequest::ScheduleSummary { .. } => "schedule_summary",
        }
    }

    /// Heading shown above the model output.
    pub fn heading(&self) -> &'static str {
        match self {
            PromptRequest::ResumeSuggestions { .. } => "Suggestions",
            PromptRequest::GrammarStyleFix { .. } => "Fixed Resume",
            PromptRequest::CompanyMatch { .. } => "Match Analysis",
            PromptRequest::CommitAndIssue { .. } => "Output",
            PromptRequest::RewriteContent { .. } => "Rewritten Content",
            PromptRequest::ScheduleSummary { .. } => "Prioritized Tasks",
        }
    }

    /// Rejects blank required fields before any prompt is built.
    pub fn validate(&self) -> Result<(), AppError> {
        let (blank, message) = match self {
            PromptRequest::ResumeSuggestions {
                resume_text,
                job_description,
            } => (
                is_blank(resume_text) || is_blank(job_description),
                "Both fields are required.",
            ),
            PromptRequest::GrammarStyleFix { resume_text } => {
                (is_blank(resume_text), "Please provide your resume text.")
            }
            PromptRequest::CompanyMatch {
                company_description,
                resume_text,
            } => (
                is_blank(company_description) || is_blank(resume_text),
                "Both fields are required.",
            ),
            PromptRequest::CommitAndIssue { task_description } => (
                is_blank(task_description),
                "Please enter a task description.",
            ),
            PromptRequest::RewriteContent { content, .. } => {
                (is_blank(content), "Please paste some content.")
            }
            PromptRequest::ScheduleSummary { schedule_text } => (
                is_blank(schedule_text),
                "Please provide your schedule or task list.",
            ),
        };

        if blank {
            return Err(AppError::Validation(message.to_string()));
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        match self {
            PromptRequest::ResumeSuggestions {
                resume_text,
                job_description,
            } => build_resume_prompt(resume_text, job_description),
            PromptRequest::GrammarStyleFix { resume_text } => grammar_style_fix_prompt(resume_text),
            PromptRequest::CompanyMatch {
                company_description,
                resume_text,
            } => company_resume_match_prompt(company_description, resume_text),
            PromptRequest::CommitAndIssue { task_description } => {
                generate_commit_and_issue_prompt(task_description)
            }
            PromptRequest::RewriteContent { content, tone } => {
                rewrite_content_prompt(content, *tone)
            }
            PromptRequest::ScheduleSummary { schedule_text } => {
                summarize_schedule_prompt(schedule_text)
            }
        }
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
