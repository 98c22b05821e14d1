//! Decoding of raw sample logs into sequences of 16-bit ADC codes.

use std::io;
use std::ops::Deref;
use std::path::Path;

use crate::{Error, Result};

const SAMPLE_SIZE: usize = std::mem::size_of::<u16>();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
    Native,
}

impl ByteOrder {
    pub const ALL: [ByteOrder; 3] = [ByteOrder::Little, ByteOrder::Big, ByteOrder::Native];

    pub fn name(self) -> &'static str {
        match self {
            Self::Little => "little",
            Self::Big    => "big",
            Self::Native => "native",
        }
    }

    fn decode_sample(self, bytes: [u8; SAMPLE_SIZE]) -> u16 {
        match self {
            Self::Little => u16::from_le_bytes(bytes),
            Self::Big    => u16::from_be_bytes(bytes),
            Self::Native => u16::from_ne_bytes(bytes),
        }
    }
}

impl std::str::FromStr for ByteOrder {
    type Err = String;

    fn from_str(name: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL.into_iter()
            .find(|order| order.name() == name)
            .ok_or_else(|| format!("unknown byte order `{}` (expected little, big, or native)", name))
    }
}

/// Ordered sequence of samples, as they appear in the log.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Samples(Vec<u16>);

impl Samples {
    pub fn into_inner(self) -> Vec<u16> {
        self.0
    }

    /// Raw bytes of the samples in host byte order, suitable for uploading to the GPU.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.0)
    }
}

impl Deref for Samples {
    type Target = [u16];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<u16>> for Samples {
    fn from(samples: Vec<u16>) -> Self {
        Samples(samples)
    }
}

/// Decode `bytes` as consecutive samples in `order`.
///
/// A trailing byte that does not form a complete sample is discarded.
pub fn decode(bytes: &[u8], order: ByteOrder) -> Samples {
    let chunks = bytes.chunks_exact(SAMPLE_SIZE);
    if !chunks.remainder().is_empty() {
        log::warn!("discarding {} trailing byte(s) of a partial sample", chunks.remainder().len());
    }
    Samples(chunks
        .map(|chunk| order.decode_sample([chunk[0], chunk[1]]))
        .collect())
}

/// Read the entire log at `path` and decode it.
pub fn load(path: impl AsRef<Path>, order: ByteOrder) -> Result<Samples> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|error| match error.kind() {
        io::ErrorKind::NotFound => Error::NotFound(path.to_owned()),
        _ => Error::Io(error),
    })?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(decode(&bytes, order))
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    fn write_log(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_even_length() {
        let file = write_log(&[1, 0, 2, 0, 3, 0, 4, 0, 5, 0]);
        let samples = load(file.path(), ByteOrder::Little).unwrap();
        assert_eq!(&samples[..], &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_load_odd_length() {
        let file = write_log(&[0x34, 0x12, 0xff, 0x0f, 0xaa]);
        let samples = load(file.path(), ByteOrder::Little).unwrap();
        assert_eq!(&samples[..], &[0x1234, 0x0fff]);
    }

    #[test]
    fn test_load_empty() {
        let file = write_log(&[]);
        let samples = load(file.path(), ByteOrder::Little).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adc_log.bin");
        match load(&path, ByteOrder::Little) {
            Err(Error::NotFound(missing)) => assert_eq!(missing, path),
            result => panic!("expected NotFound, got {:?}", result),
        }
    }

    #[test]
    fn test_decode_byte_order() {
        let bytes = [0x0f, 0xff, 0x00, 0x01];
        assert_eq!(&decode(&bytes, ByteOrder::Little)[..], &[0xff0f, 0x0100]);
        assert_eq!(&decode(&bytes, ByteOrder::Big)[..], &[0x0fff, 0x0001]);
        assert_eq!(&decode(&bytes, ByteOrder::Native)[..],
            &[u16::from_ne_bytes([0x0f, 0xff]), u16::from_ne_bytes([0x00, 0x01])]);
    }

    #[test]
    fn test_decode_single_byte() {
        assert!(decode(&[0x42], ByteOrder::Big).is_empty());
    }

    #[test]
    fn test_byte_order_from_str() {
        assert_eq!("little".parse(), Ok(ByteOrder::Little));
        assert_eq!("big".parse(), Ok(ByteOrder::Big));
        assert_eq!("native".parse(), Ok(ByteOrder::Native));
        assert!("middle".parse::<ByteOrder>().is_err());
    }

    #[test]
    fn test_samples_as_bytes() {
        let samples = Samples::from(vec![0x0102, 0x0304]);
        assert_eq!(samples.as_bytes().len(), 4);
        assert_eq!(decode(samples.as_bytes(), ByteOrder::Native), samples);
    }
}
