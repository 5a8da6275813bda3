//! 사용자 확인 입력 포트 구현 어댑터.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::application::ports::UserConfirmer;

/// stdin으로 y/yes 확인을 받는 어댑터. 그 외 입력과 EOF는 거절이다.
pub struct StdinConfirmer;

impl UserConfirmer for StdinConfirmer {
    fn confirm(&self, message: &str) -> Result<bool> {
        eprint!("{message} [y/N]: ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .context("failed to read confirmation from stdin")?;
        Ok(is_affirmative(&input))
    }
}

fn is_affirmative(input: &str) -> bool {
    let answer = input.trim().to_ascii_lowercase();
    answer == "y" || answer == "yes"
}
