use dill_reminders_domain::ID;

/// Finds the incomplete assignments of a student that carry the given metadata pair
#[derive(Debug, Clone)]
pub struct MetadataFindQuery {
    pub student_id: ID,
    pub metadata: KVMetadata,
}

#[derive(Debug, Clone)]
pub struct KVMetadata {
    pub key: String,
    pub value: String,
}

impl KVMetadata {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}
