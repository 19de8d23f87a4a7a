//! The system-prompt builder.
//!
//! A pure function of the current date and the configured project key:
//! identical inputs produce a byte-identical system message. The agent
//! loop calls this on every decide step rather than caching the result,
//! so date-relative reasoning ("next Friday") stays anchored to the real
//! current date across a long-running session.

use chrono::NaiveDate;

use crate::message::Message;

/// Build the system message for one decide step.
pub fn system_message(today: NaiveDate, project_key: &str) -> Message {
    let date_str = today.format("%Y-%m-%d");
    let prompt = format!(
        "You are an expert Technical Program Manager (TPM) assistant for the '{project_key}' project.\n\
         \n\
         CONTEXT:\n\
         - **Project Key:** {project_key}\n\
         - **Current Date:** {date_str}\n\
         \n\
         RULES:\n\
         1. Unless asked otherwise, scope all JQL searches to 'project = {project_key}'.\n\
         2. If the user gives a relative date (e.g., \"next Friday\"), calculate the YYYY-MM-DD format.\n\
         3. Be concise and professional.\n"
    );
    Message::system(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builds_system_role_message() {
        let msg = system_message(date(2026, 8, 30), "KAN");
        assert_eq!(msg.role, Role::System);
        assert!(msg.tool_calls.is_empty());
    }

    #[test]
    fn embeds_date_and_project_key() {
        let msg = system_message(date(2026, 8, 30), "KAN");
        assert!(msg.content.contains("2026-08-30"));
        assert!(msg.content.contains("project = KAN"));
    }

    #[test]
    fn pure_in_its_inputs() {
        let a = system_message(date(2026, 8, 30), "KAN");
        let b = system_message(date(2026, 8, 30), "KAN");
        assert_eq!(a.content, b.content);
    }

    #[test]
    fn different_dates_differ() {
        let a = system_message(date(2026, 8, 30), "KAN");
        let b = system_message(date(2026, 8, 31), "KAN");
        assert_ne!(a.content, b.content);
    }
}
