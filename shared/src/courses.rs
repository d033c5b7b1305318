//! Course lookups.

use serde::{Deserialize, Serialize};

use crate::supabase::SupabaseClient;
use crate::Result;

pub const COURSES_TABLE: &str = "courses";
pub const COURSE_COLUMNS: &str = "title,slug,is_published";

/// Course row as stored in the `courses` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub slug: String,
    pub is_published: bool,
}

/// Fetch the one course whose slug is `slug`.
pub async fn fetch_course_by_slug(client: &SupabaseClient, slug: &str) -> Result<Course> {
    client
        .from(COURSES_TABLE)
        .select(COURSE_COLUMNS)
        .eq("slug", slug)
        .single()
        .await
}

/// Console text for a lookup: the record as JSON, or the error message.
pub fn describe_outcome(outcome: &Result<Course>) -> String {
    match outcome {
        Ok(course) => serde_json::to_string_pretty(course)
            .unwrap_or_else(|e| format!("Failed to format course: {}", e)),
        Err(e) => e.to_string(),
    }
}
