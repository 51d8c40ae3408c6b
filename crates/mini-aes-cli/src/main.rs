//! Command-line interface for Mini-AES.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mini_aes_core::{block_from_u16, decrypt_block, encrypt_block, expand_key, Key, Trace};
use mini_aes_modes::{cbc, ecb, single, Job, Mode, Operation, Traced};
use mini_aes_record::Record;
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Mini-AES CLI.
#[derive(Parser)]
#[command(
    name = "mini-aes",
    version,
    author,
    about = "Mini-AES 16-bit block cipher with ECB and CBC modes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt hex text.
    Enc {
        /// Block handling: single, ecb or cbc.
        #[arg(long, default_value = "single")]
        mode: Mode,
        /// Key as 4 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Plaintext as hex (a multiple of 4 characters).
        #[arg(long, value_name = "HEX")]
        input: String,
        /// CBC initialization vector; generated when omitted.
        #[arg(long, value_name = "HEX")]
        iv: Option<String>,
        /// Optional RNG seed for a reproducible generated IV.
        #[arg(long)]
        seed: Option<u64>,
        /// Print the step-by-step trace.
        #[arg(long, default_value_t = false)]
        log: bool,
        /// Write a record of the operation to this path.
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
        /// Write the record in binary form instead of CSV.
        #[arg(long, default_value_t = false)]
        binary: bool,
    },
    /// Decrypt hex text (CBC input starts with the IV).
    Dec {
        /// Block handling: single, ecb or cbc.
        #[arg(long, default_value = "single")]
        mode: Mode,
        /// Key as 4 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Ciphertext as hex.
        #[arg(long, value_name = "HEX")]
        input: String,
        /// Print the step-by-step trace.
        #[arg(long, default_value_t = false)]
        log: bool,
        /// Write a record of the operation to this path.
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
        /// Write the record in binary form instead of CSV.
        #[arg(long, default_value_t = false)]
        binary: bool,
    },
    /// Print a previously exported record.
    Show {
        /// Path to the record.
        #[arg(long, value_name = "FILE")]
        record: PathBuf,
        /// Read the binary form instead of CSV.
        #[arg(long, default_value_t = false)]
        binary: bool,
        /// Run the recorded operation again and compare outputs.
        #[arg(long, default_value_t = false)]
        verify: bool,
    },
    /// Verify encrypt/decrypt round trips on random messages.
    Check {
        /// Fixed key as 4 hex characters; random per sample when omitted.
        #[arg(long, value_name = "HEX")]
        key_hex: Option<String>,
        /// Number of random samples to test.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Also check every one of the 65536 blocks (requires --key-hex).
        #[arg(long, default_value_t = false)]
        exhaustive: bool,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the built-in test cases.
    Demo {
        /// Print the step-by-step trace for each case.
        #[arg(long, default_value_t = false)]
        log: bool,
    },
}

/// Output destination for a record.
struct Export<'a> {
    path: &'a Path,
    binary: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Enc {
            mode,
            key_hex,
            input,
            iv,
            seed,
            log,
            export,
            binary,
        } => {
            if iv.is_some() && mode != Mode::Cbc {
                bail!("--iv only applies to CBC mode");
            }
            let job = Job {
                operation: Operation::Encrypt,
                mode,
                input: normalize(&input),
                key: normalize(&key_hex),
                iv: iv.as_deref().map(normalize),
            };
            let mut rng = seeded_rng(seed);
            let export = export.as_deref().map(|path| Export { path, binary });
            cmd_run(&job, &mut rng, log, export)
        }
        Commands::Dec {
            mode,
            key_hex,
            input,
            log,
            export,
            binary,
        } => {
            let job = Job {
                operation: Operation::Decrypt,
                mode,
                input: normalize(&input),
                key: normalize(&key_hex),
                iv: None,
            };
            let mut rng = seeded_rng(None);
            let export = export.as_deref().map(|path| Export { path, binary });
            cmd_run(&job, &mut rng, log, export)
        }
        Commands::Show {
            record,
            binary,
            verify,
        } => cmd_show(&record, binary, verify),
        Commands::Check {
            key_hex,
            samples,
            exhaustive,
            seed,
        } => cmd_check(key_hex.as_deref(), samples, exhaustive, seed),
        Commands::Demo { log } => cmd_demo(log),
    }
}

fn cmd_run(
    job: &Job,
    rng: &mut impl RngCore,
    log: bool,
    export: Option<Export<'_>>,
) -> Result<()> {
    let (output, trace) = job.run_with_rng(rng).into_parts();
    if log {
        print_trace(&trace);
    }
    let output = match output {
        Ok(output) => output,
        Err(err) => bail!("{} ({}) failed: {} [{}]", job.operation, job.mode, err, err.kind()),
    };
    println!("{output}");

    if let Some(Export { path, binary }) = export {
        let record = Record::from_job(job, &output, &trace);
        let bytes = if binary {
            record.to_bytes().context("encode record")?
        } else {
            record.to_csv().context("encode record")?.into_bytes()
        };
        fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}

fn cmd_show(path: &Path, binary: bool, verify: bool) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let record = if binary {
        Record::from_bytes(&bytes).context("decode binary record")?
    } else {
        let text = String::from_utf8(bytes).context("record is not UTF-8")?;
        Record::from_csv(&text).context("parse record")?
    };

    println!("Operation Type: {}", record.operation);
    println!("Cipher Mode: {}", record.mode);
    println!("Input Text: {}", record.input);
    println!("Key: {}", record.key);
    if let Some(iv) = &record.iv {
        println!("IV: {iv}");
    }
    println!("Output: {}", record.output);
    println!("Log:");
    for line in &record.log {
        println!("{line}");
    }

    if verify {
        let replay = record
            .job()
            .run()
            .into_result()
            .context("replay recorded operation")?;
        if replay != record.output {
            bail!("replay produced {replay}, record says {}", record.output);
        }
        println!("verified: replay matches recorded output");
    }
    Ok(())
}

fn cmd_check(
    key_hex: Option<&str>,
    samples: usize,
    exhaustive: bool,
    seed: Option<u64>,
) -> Result<()> {
    let fixed_key = key_hex.map(normalize);
    let mut rng = seeded_rng(seed);

    for _ in 0..samples {
        let key = match &fixed_key {
            Some(key) => key.clone(),
            None => format!("{:04X}", rng.next_u32() as u16),
        };
        let blocks = 1 + (rng.next_u32() % 4) as usize;
        let message: String = (0..blocks)
            .map(|_| format!("{:04X}", rng.next_u32() as u16))
            .collect();

        let first = &message[..4];
        let ct = expect_ok(single::encrypt(first, &key))?;
        check_eq(expect_ok(single::decrypt(&ct, &key))?, first, "single", &key)?;

        let ct = expect_ok(ecb::encrypt(&message, &key))?;
        check_eq(expect_ok(ecb::decrypt(&ct, &key))?, &message, "ECB", &key)?;

        let ct = expect_ok(cbc::encrypt_with_rng(&message, &key, None, &mut rng))?;
        check_eq(expect_ok(cbc::decrypt(&ct, &key))?, &message, "CBC", &key)?;
    }
    println!("{samples} random samples round-tripped");

    if exhaustive {
        let Some(key_hex) = fixed_key else {
            bail!("--exhaustive needs --key-hex");
        };
        let key = Key::from_hex(&key_hex).context("parse key")?;
        let round_keys = expand_key(&key, &mut Trace::muted());
        for value in 0..=u16::MAX {
            let block = block_from_u16(value);
            let ct = encrypt_block(&block, &round_keys, &mut Trace::muted());
            if decrypt_block(&ct, &round_keys, &mut Trace::muted()) != block {
                bail!("round trip failed for block {value:04X} under key {key}");
            }
        }
        println!("all 65536 blocks round-tripped under key {key}");
    }
    Ok(())
}

const DEMO_CASES: [(&str, &str, &str); 4] = [
    ("example 6F6B/A73B", "6F6B", "A73B"),
    ("all zeros", "0000", "0000"),
    ("all Fs", "FFFF", "FFFF"),
    ("example 2D3B/1A5F", "2D3B", "1A5F"),
];

fn cmd_demo(log: bool) -> Result<()> {
    for (name, plaintext, key) in DEMO_CASES {
        let encrypted = single::encrypt(plaintext, key);
        if log {
            print_trace(&encrypted.trace);
        }
        let ciphertext = expect_ok(encrypted)?;
        let decrypted = expect_ok(single::decrypt(&ciphertext, key))?;
        println!("{name}: {plaintext} --[{key}]--> {ciphertext} --> {decrypted}");
        check_eq(decrypted, plaintext, "demo", key)?;
    }

    let repeated = "6F6B6F6B";
    let ecb_out = expect_ok(ecb::encrypt(repeated, "A73B"))?;
    let cbc_out = expect_ok(cbc::encrypt(repeated, "A73B", Some("1234")))?;
    println!("ECB {repeated} -> {ecb_out} (repeated blocks stay repeated)");
    println!("CBC {repeated} (IV 1234) -> {cbc_out}");
    Ok(())
}

fn expect_ok(traced: Traced<String>) -> Result<String> {
    traced.into_result().map_err(anyhow::Error::from)
}

fn check_eq(actual: String, expected: &str, what: &str, key: &str) -> Result<()> {
    if actual != expected {
        bail!("{what} round trip mismatch under key {key}: {expected} -> {actual}");
    }
    Ok(())
}

fn print_trace(trace: &Trace) {
    for line in trace {
        println!("{line}");
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_ascii_uppercase()
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_encrypt() {
        let cli = Cli::try_parse_from([
            "mini-aes", "enc", "--mode", "cbc", "--key-hex", "a73b", "--input", "6f6b", "--iv",
            "1234",
        ])
        .unwrap();
        match cli.command {
            Commands::Enc { mode, iv, .. } => {
                assert_eq!(mode, Mode::Cbc);
                assert_eq!(iv.as_deref(), Some("1234"));
            }
            _ => panic!("expected enc"),
        }
    }

    #[test]
    fn cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from([
            "mini-aes", "dec", "--mode", "ctr", "--key-hex", "A73B", "--input", "683C"
        ])
        .is_err());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = seeded_rng(Some(42));
        let mut b = seeded_rng(Some(42));
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize("  6f6b \n"), "6F6B");
    }

    #[test]
    fn export_writes_a_readable_record() {
        let path = std::env::temp_dir().join(format!("mini-aes-{}.csv", std::process::id()));
        let job = Job {
            operation: Operation::Encrypt,
            mode: Mode::Ecb,
            input: "6F6B2D3B".into(),
            key: "A73B".into(),
            iv: None,
        };
        let export = Export {
            path: &path,
            binary: false,
        };
        cmd_run(&job, &mut seeded_rng(Some(1)), false, Some(export)).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let record = Record::from_csv(&text).unwrap();
        assert_eq!(record.output, "683C80C9");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn demo_and_check_succeed() {
        cmd_demo(false).unwrap();
        cmd_check(Some("A73B"), 8, true, Some(3)).unwrap();
        cmd_check(None, 8, false, Some(4)).unwrap();
    }
}
