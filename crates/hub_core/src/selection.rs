use crate::ValidationError;

/// Prefix users habitually type in front of a subreddit name.
pub const SCHEME_PREFIX: &str = "r/";

/// Strip a single leading `r/`. Case-sensitive; inner occurrences are kept.
pub fn normalize_resource_name(raw: &str) -> String {
    raw.strip_prefix(SCHEME_PREFIX).unwrap_or(raw).to_string()
}

/// Ordered, editable list of subreddit inputs. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSelection {
    slots: Vec<String>,
}

impl Default for ResourceSelection {
    fn default() -> Self {
        Self {
            slots: vec![String::new()],
        }
    }
}

impl ResourceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Appends a blank slot and returns its index.
    pub fn add_slot(&mut self) -> usize {
        self.slots.push(String::new());
        self.slots.len() - 1
    }

    /// Removes the slot at `index` unless it is the last one left.
    pub fn remove_slot(&mut self, index: usize) -> bool {
        if self.slots.len() <= 1 || index >= self.slots.len() {
            return false;
        }
        self.slots.remove(index);
        true
    }

    /// Stores the normalized `raw` value at `index`. Out-of-range is ignored.
    pub fn edit_slot(&mut self, index: usize, raw: &str) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = normalize_resource_name(raw);
                true
            }
            None => false,
        }
    }

    /// Trimmed, non-blank names in slot order.
    pub fn submittable(&self) -> Result<Vec<String>, ValidationError> {
        let names: Vec<String> = self
            .slots
            .iter()
            .map(|slot| slot.trim())
            .filter(|name| !name.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        if names.is_empty() {
            Err(ValidationError)
        } else {
            Ok(names)
        }
    }
}
