//! # Composite Keys
//!
//! Ledger keys are built by concatenating a registry namespace with an
//! ordered list of string components, each terminated by U+0000. The
//! terminator cannot appear inside a component, so a key built from the
//! first `k` components is a string prefix of exactly the full keys that
//! share those components. Partial-key range scans therefore behave like a
//! relational index over the organization/device/name hierarchy.
//!
//! Layout: `\u{0}` `namespace` `\u{0}` `c1` `\u{0}` `c2` `\u{0}` ...
//!
//! The leading U+0000 keeps composite keys disjoint from any simple key
//! namespace the store might also hold.

use crate::domain::errors::RegistryError;

/// Separator terminating the namespace and every key component.
pub const KEY_DELIMITER: char = '\u{0}';

/// Build a composite key (or scan prefix) from a namespace and ordered
/// components. An empty component list yields the namespace-wide scan
/// prefix.
///
/// # Errors
///
/// `RegistryError::InvalidKey` if the namespace or any component contains
/// the delimiter.
pub fn make_composite_key(namespace: &str, components: &[&str]) -> Result<String, RegistryError> {
    validate_key_part("namespace", namespace)?;

    let mut key = String::with_capacity(
        2 + namespace.len() + components.iter().map(|c| c.len() + 1).sum::<usize>(),
    );
    key.push(KEY_DELIMITER);
    key.push_str(namespace);
    key.push(KEY_DELIMITER);

    for component in components {
        validate_key_part("key component", component)?;
        key.push_str(component);
        key.push(KEY_DELIMITER);
    }

    Ok(key)
}

fn validate_key_part(what: &str, part: &str) -> Result<(), RegistryError> {
    if part.contains(KEY_DELIMITER) {
        return Err(RegistryError::InvalidKey(format!(
            "{what} {part:?} contains the U+0000 delimiter"
        )));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
