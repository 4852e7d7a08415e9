use super::operation::Operation;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    LeftParen,
    RightParen,
    Operator(Operation),
    /// A literal or variable name, whitespace not yet trimmed.
    Text(String),
}

/// Splits a formula into parentheses, operators and the text runs between them.
///
/// Never fails: anything that is not a parenthesis or an operator symbol ends
/// up in a `Text` token and is judged later by the literal resolver. Runs of
/// pure whitespace are dropped.
pub fn tokenize(formula: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut text = String::new();

    for c in formula.chars() {
        let token = match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            _ => match Operation::from_char(c) {
                Some(op) => Token::Operator(op),
                None => {
                    text.push(c);
                    continue;
                }
            },
        };
        flush_text(&mut text, &mut out);
        out.push(token);
    }
    flush_text(&mut text, &mut out);

    out
}

fn flush_text(text: &mut String, out: &mut Vec<Token>) {
    if !text.trim().is_empty() {
        out.push(Token::Text(std::mem::take(text)));
    } else {
        text.clear();
    }
}

#[cfg(test)]
fn text(s: &str) -> Token {
    Token::Text(s.to_owned())
}

#[test]
fn tokenize_test() {
    assert_eq!(
        tokenize("(100+one)*0x1F"),
        vec![
            Token::LeftParen,
            text("100"),
            Token::Operator(Operation::Add),
            text("one"),
            Token::RightParen,
            Token::Operator(Operation::Mul),
            text("0x1F"),
        ]
    );
}

#[test]
fn tokenize_keeps_inner_whitespace_test() {
    assert_eq!(
        tokenize("one + two   *   three"),
        vec![
            text("one "),
            Token::Operator(Operation::Add),
            text(" two   "),
            Token::Operator(Operation::Mul),
            text("   three"),
        ]
    );
}

#[test]
fn tokenize_drops_blank_runs_test() {
    assert_eq!(
        tokenize("(1) | 2"),
        vec![
            Token::LeftParen,
            text("1"),
            Token::RightParen,
            Token::Operator(Operation::Or),
            text(" 2"),
        ]
    );
    assert_eq!(tokenize("   "), vec![]);
    assert_eq!(tokenize(""), vec![]);
}

#[test]
fn tokenize_all_operators_test() {
    let tokens = tokenize("+-*/&|^");
    let ops: Vec<Token> = Operation::ALL.iter().map(|op| Token::Operator(*op)).collect();
    assert_eq!(tokens, ops);
}
