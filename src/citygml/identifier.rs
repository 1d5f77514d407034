//! Stable identifier generation (§4.4 "Identifiers"): deterministic ids
//! derived from a source id and role tag by default, random UUIDs only when
//! configured.

use uuid::Uuid;

/// Namespace UUID this crate's deterministic ids are derived under (`uuid`
/// v5, name-based). Arbitrary but fixed, so the same `(source_id, role)`
/// always produces the same id across runs.
const NAMESPACE: Uuid = Uuid::from_bytes([
    0x6f, 0x70, 0x65, 0x6e, 0x64, 0x72, 0x69, 0x76, 0x65, 0x2d, 0x72, 0x73, 0x00, 0x00, 0x00, 0x00,
]);

/// Derives a deterministic id from `source_id` and `role` (e.g. a lane's
/// `(roadId, laneSectionIndex, laneId)` tuple already stringified, plus
/// `"trafficArea"`), or mints a fresh random UUID when
/// `generate_random_geometry_ids` is set (§6).
pub fn add_unique_identifier(source_id: &str, role: &str, generate_random: bool) -> String {
    if generate_random {
        format!("UUID_{}", Uuid::new_v4())
    } else {
        let name = format!("{source_id}:{role}");
        format!("UUID_{}", Uuid::new_v5(&NAMESPACE, name.as_bytes()))
    }
}

/// A fresh random UUID, used only when `generateRandomGeometryIds` is true
/// (§4.4).
pub fn generate_random_uuid() -> String {
    format!("UUID_{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_ids_are_stable_across_calls() {
        let a = add_unique_identifier("road-1", "trafficArea", false);
        let b = add_unique_identifier("road-1", "trafficArea", false);
        assert_eq!(a, b);
    }

    #[test]
    fn different_roles_produce_different_ids() {
        let a = add_unique_identifier("road-1", "trafficArea", false);
        let b = add_unique_identifier("road-1", "auxiliaryTrafficArea", false);
        assert_ne!(a, b);
    }

    #[test]
    fn random_ids_are_not_repeatable() {
        let a = add_unique_identifier("road-1", "trafficArea", true);
        let b = add_unique_identifier("road-1", "trafficArea", true);
        assert_ne!(a, b);
    }
}
