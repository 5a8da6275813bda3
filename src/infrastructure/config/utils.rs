//! 설정 모듈 공용 유틸리티.

use std::path::{Path, PathBuf};

/// 선행 `~/`를 홈 디렉터리로 확장한다.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_tilde_prefix_only() {
        let plain = Path::new("config.json");
        assert_eq!(expand_home(plain), PathBuf::from("config.json"));

        let nested = Path::new("a/~/config.json");
        assert_eq!(expand_home(nested), PathBuf::from("a/~/config.json"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home(Path::new("~/agentspace/config.json")),
                home.join("agentspace/config.json")
            );
        }
    }
}
