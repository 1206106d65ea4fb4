//! The access gate in front of the predictor.
//!
//! The gate is a collaborator of the app: the app only asks it whether the
//! visitor may enter and lets it draw the admin panel at the bottom of the
//! page. Keys are never stored in the clear. A key file holds one SHA-256
//! digest per line, in lowercase hex, and may contain '#' comments.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::Error;

/// Number of keys a visitor may try before the gate stays closed.
pub const MAX_ATTEMPTS: usize = 3;

pub trait Gate {
    /// Ask the visitor for credentials on 'input' and return true if they
    /// may proceed.
    fn authorize(
        &mut self,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> io::Result<bool>;

    /// Write the administrative view of the gate.
    fn admin_panel(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// A gate that lets everyone in.
pub struct OpenGate;

impl Gate for OpenGate {
    fn authorize(
        &mut self,
        _input: &mut dyn BufRead,
        _out: &mut dyn Write,
    ) -> io::Result<bool> {
        Ok(true)
    }

    fn admin_panel(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Admin: no access keys are configured, the gate is open.")
    }
}

/// A gate that accepts the keys whose digests are listed in a key file.
pub struct KeyGate {
    digests: Vec<[u8; 32]>,
    source: PathBuf,
}

impl KeyGate {
    /// Load the digests from the key file at 'path'.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text =
            std::fs::read_to_string(path).map_err(|source| Error::KeyFile {
                path: path.to_path_buf(),
                source,
            })?;
        let gate = Self::parse(&text, path)?;
        log::info!("Loaded {} access keys from {}", gate.len(), path.display());
        Ok(gate)
    }

    /// Parse the contents of a key file. 'source' is only used for messages.
    pub fn parse(text: &str, source: &Path) -> Result<Self, Error> {
        let mut digests = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            }
            .trim();
            if line.is_empty() {
                continue;
            }
            let mut digest = [0u8; 32];
            hex::decode_to_slice(line, &mut digest).map_err(|_| {
                Error::KeyDigest {
                    path: source.to_path_buf(),
                    line: i + 1,
                }
            })?;
            digests.push(digest);
        }
        Ok(Self {
            digests,
            source: source.to_path_buf(),
        })
    }

    /// Returns the hex digest that a key file lists for 'key'.
    pub fn digest(key: &str) -> String {
        hex::encode(Sha256::digest(key.trim().as_bytes()))
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    /// Returns true if 'key' is one of the issued keys.
    pub fn check(&self, key: &str) -> bool {
        let digest: [u8; 32] = Sha256::digest(key.trim().as_bytes()).into();
        self.digests.iter().any(|d| *d == digest)
    }
}

impl Gate for KeyGate {
    fn authorize(
        &mut self,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> io::Result<bool> {
        for attempt in 1..=MAX_ATTEMPTS {
            write!(out, "Access key: ")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if self.check(&line) {
                log::info!("Access granted after {} attempt(s)", attempt);
                writeln!(out, "Access granted. Welcome to ARASHI.")?;
                return Ok(true);
            }
            log::info!("Rejected access key, attempt {}", attempt);
            writeln!(out, "Invalid key.")?;
        }
        writeln!(out, "Access denied.")?;
        Ok(false)
    }

    fn admin_panel(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "Admin: {} active key(s) from {}",
            self.digests.len(),
            self.source.display()
        )?;
        for d in &self.digests {
            writeln!(out, "  {}...", &hex::encode(d)[..8])?;
        }
        Ok(())
    }
}

#[cfg(test)]
fn gate() -> KeyGate {
    let text = format!(
        "# issued keys\n{}\n\n{}  # second\n",
        KeyGate::digest("alpha"),
        KeyGate::digest("bravo")
    );
    KeyGate::parse(&text, Path::new("keys.txt")).unwrap()
}

#[test]
fn test_parse_and_check() {
    let gate = gate();
    assert_eq!(gate.len(), 2);
    assert!(gate.check("alpha"));
    assert!(gate.check("bravo\n"));
    assert!(!gate.check("charlie"));

    let err = KeyGate::parse("abc\n", Path::new("bad.txt"));
    assert!(matches!(err, Err(Error::KeyDigest { line: 1, .. })));
}

#[test]
fn test_authorize() {
    let mut gate = gate();
    let mut out = Vec::new();
    let mut input = io::Cursor::new("wrong\nbravo\n");
    assert!(gate.authorize(&mut input, &mut out).unwrap());
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Invalid key."));
    assert!(text.contains("Access granted."));

    let mut out = Vec::new();
    let mut input = io::Cursor::new("a\nb\nc\nalpha\n");
    assert!(!gate.authorize(&mut input, &mut out).unwrap());

    // The input ends before a valid key.
    let mut out = Vec::new();
    assert!(!gate.authorize(&mut io::Cursor::new(""), &mut out).unwrap());
}

#[test]
fn test_missing_file() {
    let err = KeyGate::load(Path::new("/nonexistent/arashi/keys.txt"));
    assert!(matches!(err, Err(Error::KeyFile { .. })));
}

#[test]
fn test_admin_panel() {
    let mut out = Vec::new();
    gate().admin_panel(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("2 active key(s)"));
    assert!(text.contains(&KeyGate::digest("alpha")[..8]));

    let mut out = Vec::new();
    OpenGate.admin_panel(&mut out).unwrap();
    assert!(!out.is_empty());
}
