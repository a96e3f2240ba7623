use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// `$CATAT_HOME`, or `~/.catat`.
pub fn catat_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("CATAT_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".catat"))
}

pub fn ensure_catat_home() -> Result<PathBuf> {
    let dir = catat_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Relative paths in config are relative to the catat home.
pub fn resolve(home: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        home.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let home = Path::new("/srv/catat");
        assert_eq!(
            resolve(home, Path::new("finance-data.json")),
            PathBuf::from("/srv/catat/finance-data.json")
        );
        assert_eq!(resolve(home, Path::new("/tmp/x.json")), PathBuf::from("/tmp/x.json"));
    }
}
