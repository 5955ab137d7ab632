use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

/// Environment variable naming the pronunciation dictionary file.
pub const DICTIONARY_ENV: &str = "ARPACODE_DICTIONARY";

/// Location of the bundled dictionary relative to an assets directory.
const DEFAULT_DICTIONARY: &str = "cmudict/cmudict-0.7b";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dictionary_path: PathBuf,
}

impl AppConfig {
    /// Resolves the dictionary from an explicit path, then the environment,
    /// then an `assets/` directory next to the binary.
    pub fn from_override(path: Option<PathBuf>) -> Result<Self> {
        let env_path = std::env::var_os(DICTIONARY_ENV).map(PathBuf::from);
        let dictionary_path = match path.or(env_path) {
            Some(custom) => canonicalize_file(&custom)?,
            None => default_dictionary_path()?,
        };
        Ok(Self { dictionary_path })
    }
}

fn canonicalize_file(path: &Path) -> Result<PathBuf> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("failed to resolve dictionary file at {:?}", path))?;
    if canonical.is_file() {
        Ok(canonical)
    } else {
        Err(anyhow!("dictionary path {:?} is not a file", canonical))
    }
}

fn default_dictionary_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("unable to resolve current executable path")?;
    exe.ancestors()
        .find_map(|dir| {
            let candidate = dir.join("assets").join(DEFAULT_DICTIONARY);
            candidate.is_file().then_some(candidate)
        })
        .ok_or_else(|| {
            anyhow!(
                "could not locate assets/{DEFAULT_DICTIONARY} alongside binary; \
                 pass --dictionary or set {DICTIONARY_ENV}"
            )
        })
}

#[cfg(test)]
mod tests {
    use super::{canonicalize_file, AppConfig};
    use std::io::Write;

    #[test]
    fn accepts_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "CAT  K AE1 T").unwrap();
        let config = AppConfig::from_override(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.dictionary_path, file.path().canonicalize().unwrap());
    }

    #[test]
    fn rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        let error = canonicalize_file(dir.path()).unwrap_err();
        assert!(error.to_string().contains("is not a file"));
    }

    #[test]
    fn rejects_missing_files() {
        assert!(canonicalize_file(std::path::Path::new("/no/such/cmudict")).is_err());
    }
}
