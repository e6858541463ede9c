use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Path of the key file for `account_id` inside `keys_dir`.
/// The account id must be a single plain path component.
pub fn key_file_path(keys_dir: &Path, account_id: &str) -> Result<PathBuf> {
    let mut comps = Path::new(account_id).components();
    match (comps.next(), comps.next()) {
        (Some(Component::Normal(_)), None) => Ok(keys_dir.join(account_id)),
        _ => Err(anyhow!("account id '{account_id}' cannot be used as a key file name")),
    }
}

/// Append one `<secret>\n` line to the account's key file, creating the
/// directory and file if needed. Earlier lines are never read or touched.
pub fn append_secret_key(keys_dir: &Path, account_id: &str, secret_key: &str) -> Result<PathBuf> {
    let path = key_file_path(keys_dir, account_id)?;

    if !keys_dir.as_os_str().is_empty() {
        fs::create_dir_all(keys_dir)
            .with_context(|| format!("creating key directory {}", keys_dir.display()))?;
    }

    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    // single write so concurrent appenders never split a line
    f.write_all(format!("{secret_key}\n").as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
