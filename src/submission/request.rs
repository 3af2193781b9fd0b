use serde::ser::{Serialize, SerializeMap, Serializer};

/// Field name -> value pairs in the order the form declares them.
///
/// Serializes as a JSON object in insertion order; `None` becomes `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionRequest {
    fields: Vec<(String, Option<String>)>,
}

impl SubmissionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required field. Presence is enforced by the form, not here.
    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, Some(value.into()));
        self
    }

    /// Add an optional field. Missing and blank values are sent as `null`.
    pub fn optional(mut self, name: &str, value: Option<String>) -> Self {
        let value = value.filter(|v| !v.trim().is_empty());
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_deref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn insert(&mut self, name: &str, value: Option<String>) {
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }
}

impl Serialize for SubmissionRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
