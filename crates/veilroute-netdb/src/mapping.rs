//! Ordered string key/value table embedded in router descriptors.
//!
//! Wire form: 2-byte big-endian length of the entry block, then per entry
//! a 1-byte key length + UTF-8 key + 1-byte value length + UTF-8 value.
//! Entries serialize in insertion order, never re-sorted: two routers
//! must produce identical bytes for the same insertion sequence or every
//! signature over a descriptor would break.

use serde::{Deserialize, Serialize};

use veilroute_crypto::Reader;

use crate::error::{NetDbError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    entries: Vec<(String, String)>,
}

impl Mapping {
    pub fn new() -> Self {
        Mapping::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or update. An existing key keeps its position so the wire
    /// form stays stable under updates.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut block = Vec::new();
        for (key, value) in &self.entries {
            let kb = key.as_bytes();
            let vb = value.as_bytes();
            if kb.len() > 255 {
                return Err(NetDbError::StringTooLong { len: kb.len() });
            }
            if vb.len() > 255 {
                return Err(NetDbError::StringTooLong { len: vb.len() });
            }
            block.push(kb.len() as u8);
            block.extend_from_slice(kb);
            block.push(vb.len() as u8);
            block.extend_from_slice(vb);
        }
        if block.len() > u16::MAX as usize {
            return Err(NetDbError::MappingTooLarge(block.len()));
        }

        let mut out = Vec::with_capacity(2 + block.len());
        out.extend_from_slice(&(block.len() as u16).to_be_bytes());
        out.extend_from_slice(&block);
        Ok(out)
    }

    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        let total = r.read_u16()? as usize;
        let block = r.read_bytes(total)?;
        let mut br = Reader::new(block);

        let mut mapping = Mapping::new();
        while !br.is_empty() {
            let klen = br.read_u8()? as usize;
            let key = std::str::from_utf8(br.read_bytes(klen)?)
                .map_err(|_| NetDbError::InvalidUtf8)?;
            let vlen = br.read_u8()? as usize;
            let value = std::str::from_utf8(br.read_bytes(vlen)?)
                .map_err(|_| NetDbError::InvalidUtf8)?;

            if mapping.get(key).is_some() {
                return Err(NetDbError::DuplicateKey(key.to_string()));
            }
            mapping.set(key, value);
        }
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut mapping = Mapping::new();
        mapping.set("zebra", "1");
        mapping.set("apple", "2");
        mapping.set("mango", "3");

        let keys: Vec<&str> = mapping.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);

        // Re-serialization must not sort.
        let bytes = mapping.to_bytes().unwrap();
        let parsed = Mapping::read(&mut Reader::new(&bytes)).unwrap();
        let parsed_keys: Vec<&str> = parsed.iter().map(|(k, _)| k).collect();
        assert_eq!(parsed_keys, keys);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut mapping = Mapping::new();
        mapping.set("a", "1");
        mapping.set("b", "2");
        mapping.set("a", "changed");

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("a"), Some("changed"));
        let keys: Vec<&str> = mapping.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_round_trip() {
        let mut mapping = Mapping::new();
        mapping.set("One", "1");
        mapping.set("2", "Two");

        let bytes = mapping.to_bytes().unwrap();
        let parsed = Mapping::read(&mut Reader::new(&bytes)).unwrap();
        assert_eq!(parsed, mapping);
        assert_eq!(parsed.get("One"), Some("1"));
        assert_eq!(parsed.get("2"), Some("Two"));
    }

    #[test]
    fn test_empty_mapping_is_length_zero() {
        let bytes = Mapping::new().to_bytes().unwrap();
        assert_eq!(bytes, vec![0, 0]);
        assert!(Mapping::read(&mut Reader::new(&bytes)).unwrap().is_empty());
    }

    #[test]
    fn test_oversized_entry_rejected() {
        let mut mapping = Mapping::new();
        mapping.set("key", &"x".repeat(256));
        assert!(matches!(
            mapping.to_bytes(),
            Err(NetDbError::StringTooLong { len: 256 })
        ));
    }

    #[test]
    fn test_duplicate_key_rejected_on_parse() {
        // Two "a" entries, legal lengths.
        let bytes = [0, 8, 1, b'a', 1, b'1', 1, b'a', 1, b'2'];
        assert!(matches!(
            Mapping::read(&mut Reader::new(&bytes)),
            Err(NetDbError::DuplicateKey(_))
        ));
    }

    #[test]
    fn test_truncated_block_rejected() {
        // Declared block length runs past the buffer.
        let bytes = [0, 10, 1, b'a'];
        assert!(matches!(
            Mapping::read(&mut Reader::new(&bytes)),
            Err(NetDbError::Buffer(_))
        ));
    }

    #[test]
    fn test_entry_overruns_block() {
        // Key length claims more bytes than the block holds.
        let bytes = [0, 2, 5, b'a'];
        assert!(matches!(
            Mapping::read(&mut Reader::new(&bytes)),
            Err(NetDbError::Buffer(_))
        ));
    }
}
