use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

/// Number of leading samples included in a summary.
pub const PREFIX_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub prefix: Vec<u16>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Samples: {}", self.count)?;
        writeln!(f, "First {} samples: {:?}", PREFIX_LEN, self.prefix)
    }
}

pub fn summarize(samples: &[u16]) -> Summary {
    Summary {
        count: samples.len(),
        prefix: samples[..samples.len().min(PREFIX_LEN)].to_vec(),
    }
}

pub fn report(summary: &Summary, mut output: impl Write) -> io::Result<()> {
    write!(output, "{}", summary)?;
    output.flush()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub minimum: u16,
    pub maximum: u16,
    pub mean: f64,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "minimum {}, maximum {}, mean {:.1}", self.minimum, self.maximum, self.mean)
    }
}

impl Statistics {
    pub fn compute(samples: &[u16]) -> Option<Statistics> {
        let (&minimum, &maximum) = (samples.iter().min()?, samples.iter().max()?);
        let sum = samples.iter().map(|&sample| sample as u64).sum::<u64>();
        Some(Statistics { minimum, maximum, mean: sum as f64 / samples.len() as f64 })
    }

    /// Time covered by `count` samples captured at `sample_rate` Hz.
    pub fn duration(count: usize, sample_rate: u32) -> Duration {
        if sample_rate == 0 {
            return Duration::ZERO
        }
        Duration::from_secs_f64(count as f64 / sample_rate as f64)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), Summary { count: 0, prefix: vec![] });
    }

    #[test]
    fn test_summarize_short() {
        let summary = summarize(&[7, 8, 9]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.prefix, [7, 8, 9]);
    }

    #[test]
    fn test_summarize_long() {
        let samples = (100..125).collect::<Vec<u16>>();
        let summary = summarize(&samples);
        assert_eq!(summary.count, 25);
        assert_eq!(summary.prefix, (100..110).collect::<Vec<u16>>());
    }

    #[test]
    fn test_summarize_exact() {
        let samples = [4095; PREFIX_LEN];
        assert_eq!(summarize(&samples).prefix.len(), PREFIX_LEN);
    }

    #[test]
    fn test_report_five_samples() {
        let mut output = Vec::new();
        report(&summarize(&[1, 2, 3, 4, 5]), &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(),
            "Samples: 5\nFirst 10 samples: [1, 2, 3, 4, 5]\n");
    }

    #[test]
    fn test_report_empty() {
        let mut output = Vec::new();
        report(&summarize(&[]), &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(),
            "Samples: 0\nFirst 10 samples: []\n");
    }

    #[test]
    fn test_statistics() {
        assert_eq!(Statistics::compute(&[]), None);
        let stats = Statistics::compute(&[10, 4095, 0, 15]).unwrap();
        assert_eq!(stats.minimum, 0);
        assert_eq!(stats.maximum, 4095);
        assert_eq!(stats.mean, 1030.0);
        assert_eq!(stats.to_string(), "minimum 0, maximum 4095, mean 1030.0");
    }

    #[test]
    fn test_duration() {
        assert_eq!(Statistics::duration(4000, 4000), Duration::from_secs(1));
        assert_eq!(Statistics::duration(1024, 0), Duration::ZERO);
    }
}
