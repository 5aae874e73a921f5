use chrono::{Datelike, Utc};
use uuid::Uuid;

/// Generate a reference number of the form `<PREFIX>-<year>-<4 digits>`,
/// e.g. `INC-2025-0482`. The digits come from a v4 uuid rather than a
/// seeded RNG so two forms opened in the same second still differ.
pub fn generate_reference(prefix: &str) -> String {
    let year = Utc::now().year();
    let bytes = Uuid::new_v4().into_bytes();
    let digits = u16::from_be_bytes([bytes[0], bytes[1]]) % 10_000;
    format!("{}-{}-{:04}", prefix, year, digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_shape() {
        let reference = generate_reference("RSK");
        let parts: Vec<&str> = reference.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "RSK");
        assert_eq!(parts[1].len(), 4);
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_references_vary() {
        let all: std::collections::HashSet<String> =
            (0..32).map(|_| generate_reference("INC")).collect();
        assert!(all.len() > 1, "consecutive references should not collide");
    }
}
