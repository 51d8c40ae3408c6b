//! Operation requests shared by the command line and saved records.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::outcome::Traced;
use crate::{cbc, ecb, single};

/// Direction of an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Plaintext to ciphertext.
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

/// How a message is divided into blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Exactly one block.
    #[serde(rename = "Single Block")]
    Single,
    /// Electronic codebook.
    #[serde(rename = "ECB")]
    Ecb,
    /// Cipher block chaining.
    #[serde(rename = "CBC")]
    Cbc,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Encrypt => write!(f, "Encrypt"),
            Operation::Decrypt => write!(f, "Decrypt"),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Single => write!(f, "Single Block"),
            Mode::Ecb => write!(f, "ECB"),
            Mode::Cbc => write!(f, "CBC"),
        }
    }
}

/// A name that does not match any [`Operation`] or [`Mode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownName {
    /// What was being parsed ("operation" or "mode").
    pub expected: &'static str,
    /// The rejected text.
    pub found: String,
}

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.expected, self.found)
    }
}

impl std::error::Error for UnknownName {}

impl FromStr for Operation {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encrypt" | "enc" => Ok(Operation::Encrypt),
            "decrypt" | "dec" => Ok(Operation::Decrypt),
            _ => Err(UnknownName {
                expected: "operation",
                found: s.to_string(),
            }),
        }
    }
}

impl FromStr for Mode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "single block" | "block" => Ok(Mode::Single),
            "ecb" => Ok(Mode::Ecb),
            "cbc" => Ok(Mode::Cbc),
            _ => Err(UnknownName {
                expected: "mode",
                found: s.to_string(),
            }),
        }
    }
}

/// A fully described operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    /// Encrypt or decrypt.
    pub operation: Operation,
    /// Block handling.
    pub mode: Mode,
    /// Input hex text.
    pub input: String,
    /// Key hex text.
    pub key: String,
    /// IV for CBC encryption; other operations ignore it.
    pub iv: Option<String>,
}

impl Job {
    /// Runs the job, drawing any missing CBC IV from `thread_rng`.
    pub fn run(&self) -> Traced<String> {
        self.run_with_rng(&mut rand::thread_rng())
    }

    /// Runs the job, drawing any missing CBC IV from `rng`.
    pub fn run_with_rng<R: RngCore>(&self, rng: &mut R) -> Traced<String> {
        let (input, key) = (self.input.as_str(), self.key.as_str());
        match (self.operation, self.mode) {
            (Operation::Encrypt, Mode::Single) => single::encrypt(input, key),
            (Operation::Decrypt, Mode::Single) => single::decrypt(input, key),
            (Operation::Encrypt, Mode::Ecb) => ecb::encrypt(input, key),
            (Operation::Decrypt, Mode::Ecb) => ecb::decrypt(input, key),
            (Operation::Encrypt, Mode::Cbc) => {
                cbc::encrypt_with_rng(input, key, self.iv.as_deref(), rng)
            }
            (Operation::Decrypt, Mode::Cbc) => cbc::decrypt(input, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn job(operation: Operation, mode: Mode, input: &str, iv: Option<&str>) -> Job {
        Job {
            operation,
            mode,
            input: input.to_string(),
            key: "A73B".to_string(),
            iv: iv.map(str::to_string),
        }
    }

    #[test]
    fn names_round_trip() {
        for op in [Operation::Encrypt, Operation::Decrypt] {
            assert_eq!(op.to_string().parse::<Operation>(), Ok(op));
        }
        for mode in [Mode::Single, Mode::Ecb, Mode::Cbc] {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
        assert_eq!("cbc".parse::<Mode>(), Ok(Mode::Cbc));
        assert!("ctr".parse::<Mode>().is_err());
    }

    #[test]
    fn dispatches_to_each_mode() {
        let mut rng = ChaCha20Rng::from_seed([0u8; 32]);
        let single = job(Operation::Encrypt, Mode::Single, "6F6B", None);
        assert_eq!(single.run_with_rng(&mut rng).into_result().unwrap(), "683C");

        let ecb = job(Operation::Decrypt, Mode::Ecb, "683C80C9", None);
        assert_eq!(ecb.run_with_rng(&mut rng).into_result().unwrap(), "6F6B2D3B");

        let cbc = job(Operation::Encrypt, Mode::Cbc, "6F6B6F6B", Some("1234"));
        assert_eq!(cbc.run().into_result().unwrap(), "1234FD960C13");

        let back = job(Operation::Decrypt, Mode::Cbc, "1234FD960C13", None);
        assert_eq!(back.run().into_result().unwrap(), "6F6B6F6B");
    }
}
