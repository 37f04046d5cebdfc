use crate::{ActorId, EndorseError, Identity, PubKey};
use ahash::HashMap;

/// One roster line: a participant and its distributed public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: ActorId,
    pub pub_key: PubKey,
}

/// The set of known participants, as distributed out of band (e.g. through a
/// public key infrastructure). Entry order is preserved; lookups go through
/// an id index.
#[derive(Debug, Clone)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    lookup: HashMap<ActorId, usize>,
}

impl Roster {
    /// Builds a roster from entries, rejecting duplicate participant ids.
    pub fn new(entries: Vec<RosterEntry>) -> Result<Self, EndorseError> {
        let mut lookup = HashMap::default();
        for (i, entry) in entries.iter().enumerate() {
            if lookup.insert(entry.id, i).is_some() {
                return Err(EndorseError::DuplicateParticipant(entry.id));
            }
        }
        Ok(Roster { entries, lookup })
    }

    /// Convenience constructor for the common case where the caller already
    /// holds full identities.
    pub fn from_identities(identities: &[Identity]) -> Result<Self, EndorseError> {
        Self::new(
            identities
                .iter()
                .map(|identity| RosterEntry {
                    id: identity.id(),
                    pub_key: identity.pub_key().clone(),
                })
                .collect(),
        )
    }

    pub fn pub_key(&self, id: ActorId) -> Option<&PubKey> {
        self.lookup.get(&id).map(|&i| &self.entries[i].pub_key)
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
