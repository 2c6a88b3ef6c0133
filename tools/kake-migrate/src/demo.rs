//! Built-in artifacts for `--demo`, so the migration can run without a
//! compiled contracts directory.

use kake_migrations::prelude::*;

/// Stand-in creation code; the in-memory chain only stores it.
const DEMO_BYTECODE: [u8; 12] = [
    0x60, 0x80, 0x60, 0x40, 0x52, 0x34, 0x80, 0x15, 0x60, 0x0f, 0x57, 0x00,
];

fn owners(count: usize) -> Vec<ConstructorInput> {
    (1..=count)
        .map(|i| ConstructorInput::address(format!("owner{i}")))
        .collect()
}

/// Registry with `Kake2` (two addresses) and `Kake3` (three addresses).
pub fn demo_registry() -> InMemoryArtifactRegistry {
    InMemoryArtifactRegistry::new()
        .with(Artifact::new(KAKE2, owners(2), DEMO_BYTECODE.to_vec()))
        .with(Artifact::new(KAKE3, owners(3), DEMO_BYTECODE.to_vec()))
}
