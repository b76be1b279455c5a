//! Product identifier generation.

use uuid::Uuid;

/// Produce a new unique string id.
///
/// UUIDv7 in canonical text form: time-ordered, so fresh ids cluster at the
/// end of the primary-key index, and wide enough that collisions are not a
/// practical concern over the lifetime of the dataset.
pub fn generate() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_ids_are_version_7() {
        let id = generate();
        let parsed = Uuid::parse_str(&id).expect("generated id should be a valid UUID");
        assert_eq!(parsed.get_version_num(), 7);
    }
}
