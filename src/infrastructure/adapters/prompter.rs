//! 대화형 한 줄 입력 포트 구현 어댑터.

use std::io::{self, BufRead, Write};

use crate::application::ports::Prompter;

/// stderr에 질문을 쓰고 stdin에서 한 줄을 읽는다.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn prompt(&self, message: &str) -> io::Result<Option<String>> {
        let mut stderr = io::stderr();
        write!(stderr, "{message}: ")?;
        stderr.flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        Ok(parse_answer(read, &input))
    }
}

fn parse_answer(read: usize, input: &str) -> Option<String> {
    if read == 0 {
        // EOF
        return None;
    }
    let answer = input.trim();
    (!answer.is_empty()).then(|| answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_and_blank_lines_are_no_value() {
        assert_eq!(parse_answer(0, ""), None);
        assert_eq!(parse_answer(2, " \n"), None);
        assert_eq!(parse_answer(9, " my-app \n"), Some("my-app".to_string()));
    }
}
