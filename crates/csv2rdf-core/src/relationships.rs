//! Cross-reference resolution for `isSimilarTo` lists.
//!
//! References are symbolic: a target does not have to exist when the list
//! is read, and one that never appears stays in the output as written.
//! Links are not mirrored onto their targets.

use csv2rdf_model::EntityId;

/// Separator between items of a reference list.
pub const REFERENCE_SEPARATOR: char = ',';

/// Splits a delimited reference list into identifiers.
///
/// Items are trimmed, blanks dropped, and duplicates removed keeping the
/// first mention.
pub fn resolve_references(raw: &str) -> Vec<EntityId> {
    let mut targets: Vec<EntityId> = Vec::new();
    for item in raw.split(REFERENCE_SEPARATOR) {
        let Some(target) = EntityId::reference(item) else {
            continue;
        };
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(targets: &[EntityId]) -> Vec<&str> {
        targets.iter().map(EntityId::as_str).collect()
    }

    #[test]
    fn keeps_first_mention_order() {
        let targets = resolve_references("ER_ER025,IR_IR004");
        assert_eq!(ids(&targets), vec!["ER_ER025", "IR_IR004"]);
    }

    #[test]
    fn trims_and_drops_blanks_and_duplicates() {
        let targets = resolve_references(" IR_IR004 , ,ER_ER025,IR_IR004,");
        assert_eq!(ids(&targets), vec!["IR_IR004", "ER_ER025"]);
    }

    #[test]
    fn bare_ids_get_their_kind_prefix() {
        let targets = resolve_references("ER025, IR004, ER_ER025");
        assert_eq!(ids(&targets), vec!["ER_ER025", "IR_IR004"]);
    }

    #[test]
    fn unknown_symbols_are_kept() {
        let targets = resolve_references("XYZ-9");
        assert_eq!(ids(&targets), vec!["XYZ_9"]);
    }

    #[test]
    fn empty_list_resolves_to_nothing() {
        assert!(resolve_references("").is_empty());
        assert!(resolve_references(" , ").is_empty());
    }
}
