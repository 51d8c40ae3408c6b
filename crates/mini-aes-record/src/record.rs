//! Record representation and its text and binary forms.

use mini_aes_modes::{Job, Mode, Operation, Trace};
use serde::{Deserialize, Serialize};

use crate::csv::{parse_row, write_row};
use crate::error::RecordError;

const HEADER: (&str, &str) = ("Field", "Value");
const OPERATION: &str = "Operation Type";
const MODE: &str = "Cipher Mode";
const INPUT: &str = "Input Text";
const KEY: &str = "Key";
const IV: &str = "IV";
const OUTPUT: &str = "Output";
const LOG: &str = "Log";

/// A completed operation: its parameters, output and trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Encrypt or decrypt.
    pub operation: Operation,
    /// Block handling.
    pub mode: Mode,
    /// Input hex text.
    pub input: String,
    /// Key hex text.
    pub key: String,
    /// IV used by CBC operations.
    pub iv: Option<String>,
    /// Output hex text.
    pub output: String,
    /// Trace lines.
    pub log: Vec<String>,
}

impl Record {
    /// Builds a record for a job that produced `output`.
    ///
    /// For CBC the IV is taken from the leading block of the ciphertext, so a
    /// generated IV is captured as well as a supplied one.
    pub fn from_job(job: &Job, output: &str, trace: &Trace) -> Self {
        let iv = match (job.mode, job.operation) {
            (Mode::Cbc, Operation::Encrypt) => output.get(..4),
            (Mode::Cbc, Operation::Decrypt) => job.input.get(..4),
            _ => None,
        }
        .map(str::to_ascii_uppercase);
        Self {
            operation: job.operation,
            mode: job.mode,
            input: job.input.clone(),
            key: job.key.clone(),
            iv,
            output: output.to_string(),
            log: trace.lines().to_vec(),
        }
    }

    /// Rebuilds the job that produced this record.
    pub fn job(&self) -> Job {
        Job {
            operation: self.operation,
            mode: self.mode,
            input: self.input.clone(),
            key: self.key.clone(),
            iv: match (self.mode, self.operation) {
                (Mode::Cbc, Operation::Encrypt) => self.iv.clone(),
                _ => None,
            },
        }
    }

    /// Serializes the record with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserializes a record with `bincode`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Renders the record as CSV rows: parameters first, then the log.
    pub fn to_csv(&self) -> Result<String, RecordError> {
        let operation = self.operation.to_string();
        let mode = self.mode.to_string();
        let mut rows: Vec<(&'static str, &str)> = vec![
            (OPERATION, operation.as_str()),
            (MODE, mode.as_str()),
            (INPUT, self.input.as_str()),
            (KEY, self.key.as_str()),
        ];
        if let Some(iv) = &self.iv {
            rows.push((IV, iv.as_str()));
        }
        rows.push((OUTPUT, self.output.as_str()));

        let mut out = String::new();
        write_row(&mut out, &[HEADER.0, HEADER.1]);
        for (name, value) in rows {
            reject_line_break(name, value)?;
            write_row(&mut out, &[name, value]);
        }
        write_row(&mut out, &[LOG]);
        for line in &self.log {
            reject_line_break(LOG, line)?;
            write_row(&mut out, &[line]);
        }
        Ok(out)
    }

    /// Parses the CSV form produced by [`Record::to_csv`].
    pub fn from_csv(text: &str) -> Result<Self, RecordError> {
        let mut rows = Rows::new(text);

        rows.expect_pair(HEADER.0)?;
        let operation = rows.expect_pair(OPERATION)?;
        let mode = rows.expect_pair(MODE)?;
        let input = rows.expect_pair(INPUT)?;
        let key = rows.expect_pair(KEY)?;
        let iv = rows.optional_pair(IV)?;
        let output = rows.expect_pair(OUTPUT)?;
        rows.expect_single(LOG)?;

        let mut log = Vec::new();
        while let Some((line, fields)) = rows.next_row()? {
            match <[String; 1]>::try_from(fields) {
                Ok([entry]) => log.push(entry),
                Err(fields) => {
                    return Err(RecordError::UnexpectedRow {
                        line,
                        expected: LOG,
                        found: fields.join(","),
                    })
                }
            }
        }

        Ok(Self {
            operation: operation
                .parse()
                .map_err(|err: mini_aes_modes::UnknownName| RecordError::InvalidValue {
                    field: OPERATION,
                    reason: err.to_string(),
                })?,
            mode: mode
                .parse()
                .map_err(|err: mini_aes_modes::UnknownName| RecordError::InvalidValue {
                    field: MODE,
                    reason: err.to_string(),
                })?,
            input,
            key,
            iv,
            output,
            log,
        })
    }
}

fn reject_line_break(name: &'static str, value: &str) -> Result<(), RecordError> {
    if value.contains(['\n', '\r']) {
        return Err(RecordError::LineBreak(name));
    }
    Ok(())
}

struct Rows<'a> {
    lines: std::iter::Peekable<std::iter::Enumerate<std::str::Lines<'a>>>,
}

impl<'a> Rows<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate().peekable(),
        }
    }

    fn next_row(&mut self) -> Result<Option<(usize, Vec<String>)>, RecordError> {
        match self.lines.next() {
            None => Ok(None),
            Some((idx, line)) => parse_row(line)
                .map(|fields| Some((idx + 1, fields)))
                .map_err(|source| RecordError::Row {
                    line: idx + 1,
                    source,
                }),
        }
    }

    fn peek_name(&mut self) -> Option<&'a str> {
        self.lines
            .peek()
            .map(|&(_, line)| line.split(',').next().unwrap_or_default())
    }

    fn expect_pair(&mut self, name: &'static str) -> Result<String, RecordError> {
        let (line, fields) = self.next_row()?.ok_or(RecordError::MissingField(name))?;
        match <[String; 2]>::try_from(fields) {
            Ok([found, value]) if found == name => Ok(value),
            Ok(fields) => Err(unexpected(line, name, &fields)),
            Err(fields) => Err(unexpected(line, name, &fields)),
        }
    }

    fn optional_pair(&mut self, name: &'static str) -> Result<Option<String>, RecordError> {
        if self.peek_name() == Some(name) {
            self.expect_pair(name).map(Some)
        } else {
            Ok(None)
        }
    }

    fn expect_single(&mut self, name: &'static str) -> Result<(), RecordError> {
        let (line, fields) = self.next_row()?.ok_or(RecordError::MissingField(name))?;
        if fields.len() == 1 && fields[0] == name {
            Ok(())
        } else {
            Err(unexpected(line, name, &fields))
        }
    }
}

fn unexpected(line: usize, expected: &'static str, fields: &[String]) -> RecordError {
    RecordError::UnexpectedRow {
        line,
        expected,
        found: fields.join(","),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn run(operation: Operation, mode: Mode, input: &str, iv: Option<&str>) -> Record {
        let job = Job {
            operation,
            mode,
            input: input.to_string(),
            key: "A73B".to_string(),
            iv: iv.map(str::to_string),
        };
        let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
        let (output, trace) = job.run_with_rng(&mut rng).into_parts();
        Record::from_job(&job, &output.unwrap(), &trace)
    }

    #[test]
    fn csv_layout() {
        let record = Record {
            operation: Operation::Encrypt,
            mode: Mode::Cbc,
            input: "6F6B".into(),
            key: "A73B".into(),
            iv: Some("1234".into()),
            output: "1234FD96".into(),
            log: vec!["a, b".into(), String::new(), "  step".into()],
        };
        let csv = record.to_csv().unwrap();
        assert_eq!(
            csv,
            "Field,Value\n\
             Operation Type,Encrypt\n\
             Cipher Mode,CBC\n\
             Input Text,6F6B\n\
             Key,A73B\n\
             IV,1234\n\
             Output,1234FD96\n\
             Log\n\
             \"a, b\"\n\
             \n  step\n"
        );
        assert_eq!(Record::from_csv(&csv).unwrap(), record);
    }

    #[test]
    fn csv_round_trip_for_each_mode() {
        for record in [
            run(Operation::Encrypt, Mode::Single, "6F6B", None),
            run(Operation::Encrypt, Mode::Ecb, "6F6B2D3B", None),
            run(Operation::Encrypt, Mode::Cbc, "6F6B6F6B", None),
            run(Operation::Decrypt, Mode::Cbc, "1234FD960C13", None),
        ] {
            let csv = record.to_csv().unwrap();
            assert_eq!(Record::from_csv(&csv).unwrap(), record);
        }
    }

    #[test]
    fn iv_is_captured_for_cbc_only() {
        let generated = run(Operation::Encrypt, Mode::Cbc, "6F6B", None);
        assert_eq!(generated.iv.as_deref(), Some(&generated.output[..4]));
        assert_eq!(generated.job().iv, generated.iv);

        let decrypted = run(Operation::Decrypt, Mode::Cbc, "1234fd96", None);
        assert_eq!(decrypted.iv.as_deref(), Some("1234"));
        assert_eq!(decrypted.job().iv, None);

        let ecb = run(Operation::Encrypt, Mode::Ecb, "6F6B", None);
        assert_eq!(ecb.iv, None);
        assert!(!ecb.to_csv().unwrap().contains("\nIV,"));
    }

    #[test]
    fn replaying_a_record_reproduces_its_output() {
        let record = run(Operation::Encrypt, Mode::Cbc, "6F6B2D3B", None);
        let replay = record.job().run().into_result().unwrap();
        assert_eq!(replay, record.output);
    }

    #[test]
    fn bytes_round_trip() {
        let record = run(Operation::Decrypt, Mode::Ecb, "683C80C9", None);
        let bytes = record.to_bytes().unwrap();
        assert_eq!(Record::from_bytes(&bytes).unwrap(), record);
        assert!(Record::from_bytes(&bytes[..3]).is_err());
    }

    #[test]
    fn rejects_reordered_fields() {
        let csv = "Field,Value\nCipher Mode,ECB\nOperation Type,Encrypt\n";
        match Record::from_csv(csv) {
            Err(RecordError::UnexpectedRow { line, expected, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(expected, OPERATION);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_mode_and_truncation() {
        let csv = "Field,Value\nOperation Type,Encrypt\nCipher Mode,CTR\nInput Text,6F6B\nKey,A73B\nOutput,683C\nLog\n";
        assert!(matches!(
            Record::from_csv(csv),
            Err(RecordError::InvalidValue { field: MODE, .. })
        ));
        let truncated = "Field,Value\nOperation Type,Encrypt\n";
        assert!(matches!(
            Record::from_csv(truncated),
            Err(RecordError::MissingField(MODE))
        ));
    }

    #[test]
    fn line_breaks_cannot_be_exported() {
        let mut record = run(Operation::Encrypt, Mode::Single, "6F6B", None);
        record.log.push("two\nlines".into());
        assert!(matches!(record.to_csv(), Err(RecordError::LineBreak(LOG))));
    }
}
