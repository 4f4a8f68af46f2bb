//! Where the bulk-paste text for `wdbc predict` comes from.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;

pub enum PasteSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl PasteSource {
    pub fn read(self) -> anyhow::Result<String> {
        match self {
            Self::Inline(text) => Ok(text),
            Self::File(path) => read_file(&path),
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("reading values from stdin")?;
                Ok(text)
            }
        }
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
