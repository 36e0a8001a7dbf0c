pub mod analytics;
pub mod audit;
pub mod health;
pub mod invest;
pub mod money;
pub mod range;
pub mod savings;
pub mod settings;
pub mod state;

use uuid::Uuid;

/// Generate a fresh record identifier.
///
/// Identifiers are opaque strings throughout the document model; backing
/// them with UUID v4 makes collisions practically impossible, which the
/// merge logic relies on.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
