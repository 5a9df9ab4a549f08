use chrono::NaiveDateTime;
use serde::Serialize;

/// A student of the organization (`Students` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub student_id: String,          // ⇔ Students.student_id (PK, externally assigned)
    pub fname: String,               // ⇔ Students.fname
    pub year_level: String,          // ⇔ Students.year_level
    pub course: String,              // ⇔ Students.course
    pub created_at: NaiveDateTime,   // ⇔ Students.created_at
}

impl Student {
    /// Cheap text used in confirmations: "S1 - Jane (2, BSCS)".
    pub fn label(&self) -> String {
        format!(
            "{} - {} ({}, {})",
            self.student_id, self.fname, self.year_level, self.course
        )
    }
}
