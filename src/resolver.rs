// Author: Dustin Pilgrim
// License: MIT

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, RjsonError};

/// Environment variable naming the installation root for shared conf files.
pub const ROOT_VAR: &str = "ACMACSD_ROOT";

/// Expand a leading `~/` to the home directory. Other paths are unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// `<root>/share/conf/<name>`
pub fn conf_path_in(root: &Path, name: &str) -> PathBuf {
    root.join("share").join("conf").join(name)
}

/// Resolve `name` against `$ACMACSD_ROOT/share/conf`.
pub fn conf_path(name: &str) -> Result<PathBuf> {
    let root = env::var_os(ROOT_VAR).ok_or_else(|| RjsonError::RuntimeError {
        message: format!("{} environment variable not set", ROOT_VAR),
        hint: Some(format!("Export {} pointing at the installation root", ROOT_VAR)),
        code: Some(310),
    })?;
    Ok(conf_path_in(&expand_home(Path::new(&root)), name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let expanded = expand_home(Path::new("~/conf/settings.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("conf/settings.json"));
        }
        assert_eq!(expand_home(Path::new("/etc/x.json")), PathBuf::from("/etc/x.json"));
        assert_eq!(expand_home(Path::new("rel/x.json")), PathBuf::from("rel/x.json"));
    }

    #[test]
    fn test_expand_home_only_for_leading_tilde() {
        assert_eq!(expand_home(Path::new("~user/x")), PathBuf::from("~user/x"));
        assert_eq!(expand_home(Path::new("a/~/x")), PathBuf::from("a/~/x"));
    }

    #[test]
    fn test_conf_path_in() {
        assert_eq!(
            conf_path_in(Path::new("/opt/acmacs"), "clades.json"),
            PathBuf::from("/opt/acmacs/share/conf/clades.json")
        );
    }
}
