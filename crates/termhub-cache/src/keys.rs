//! Deterministic cache-key derivation.
//!
//! Keys are derived from a capability prefix and an entity identifier,
//! never from volatile data. Prefixes namespace the keyspace so
//! capabilities cannot collide; composite keys join their identifiers with
//! a fixed `:` separator.

pub fn student(student_id: &str) -> String {
    format!("student:{student_id}")
}

pub fn teacher(teacher_id: &str) -> String {
    format!("teacher:{teacher_id}")
}

pub fn user(user_id: &str) -> String {
    format!("user:{user_id}")
}

/// Key for the teacher record a user holds inside one organization.
pub fn user_org(user_id: &str, organization_id: &str) -> String {
    user(&format!("{user_id}:{organization_id}"))
}

/// Key for the user account behind a teacher record. Lives under the
/// `user:` namespace since the cached value is a user, not a teacher.
pub fn user_by_teacher(teacher_id: &str) -> String {
    user(&format!("teacher:{teacher_id}"))
}
