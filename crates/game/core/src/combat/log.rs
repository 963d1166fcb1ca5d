use super::CombatEvent;

/// Append-only list of combat events in resolution order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLog {
    events: Vec<CombatEvent>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&CombatEvent> {
        self.events.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[CombatEvent] {
        &self.events
    }
}

/// SHA-256 digest over the bincode encoding of every event, in order.
///
/// Two runs with the same seed and commands produce the same root.
#[cfg(feature = "serde")]
pub fn combat_log_root(log: &CombatLog) -> Result<[u8; 32], bincode::Error> {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update((log.len() as u64).to_le_bytes());
    for event in log.iter() {
        let bytes = bincode::serialize(event)?;
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(&bytes);
    }
    Ok(hasher.finalize().into())
}
