use bytes::Bytes;

/// Bytes per gibibyte, the unit of the backend size hint.
const GIB: f64 = (1u64 << 30) as f64;

/// A blob as handed to the backend: key, derived type tag, and raw bytes.
///
/// The type tag comes from the key's extension (`"txt"` for `notes.txt`) and
/// is stored alongside the bytes; backends never derive it themselves. The
/// record is the unit of write -- updates replace the full content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobRecord {
    /// Caller-supplied, non-empty identifier.
    pub key: String,
    /// Type tag derived from the key's extension.
    pub type_tag: String,
    /// The blob content.
    pub bytes: Bytes,
}

impl BlobRecord {
    /// Create a record from a key, type tag, and content bytes.
    pub fn new(key: impl Into<String>, type_tag: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            type_tag: type_tag.into(),
            bytes: bytes.into(),
        }
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the content is zero-length.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Content size in gibibytes, the coarse quota signal passed to the
    /// backend with every create/update.
    pub fn size_hint_gib(&self) -> f64 {
        self.bytes.len() as f64 / GIB
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_is_empty() {
        let record = BlobRecord::new("a.bin", "bin", vec![1u8, 2, 3]);
        assert_eq!(record.len(), 3);
        assert!(!record.is_empty());

        let empty = BlobRecord::new("e.bin", "bin", Vec::new());
        assert!(empty.is_empty());
    }

    #[test]
    fn size_hint_is_gibibytes() {
        let one_mib = BlobRecord::new("small.bin", "bin", vec![0u8; 1 << 20]);
        assert!((one_mib.size_hint_gib() - 1.0 / 1024.0).abs() < 1e-12);

        // The unit is bytes / 2^30, not a decimal gigabyte.
        let three = BlobRecord::new("tiny.bin", "bin", vec![0u8; 3]);
        assert!((three.size_hint_gib() - 3.0 / (1u64 << 30) as f64).abs() < 1e-18);
    }

    #[test]
    fn size_hint_of_empty_is_zero() {
        let record = BlobRecord::new("e", "bin", Vec::new());
        assert_eq!(record.size_hint_gib(), 0.0);
    }
}
